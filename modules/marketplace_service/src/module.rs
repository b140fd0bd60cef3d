//! Module wiring: connection, migrations, repositories and service

use crate::config::Config;
use crate::domain::repository::AddressStore;
use crate::domain::{PageLimits, Repositories, Service};
use crate::infra::storage::migrations::Migrator;
use crate::infra::storage::{
    FilterQueryBuilder, SeaOrmAddressStore, SeaOrmApplicationRepository, SeaOrmEmployerRepository,
    SeaOrmJobRepository, SeaOrmSectorRepository, SeaOrmWorkerRepository,
};
use anyhow::{Context, Result};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use sea_orm_migration::MigratorTrait;
use std::sync::Arc;

/// Marketplace service module
pub struct MarketplaceModule {
    config: Config,
    db: Arc<DatabaseConnection>,
    service: Arc<Service>,
}

impl MarketplaceModule {
    /// Connect to the configured database and build the service.
    ///
    /// Migrations are not run here; call [`Self::migrate`].
    pub async fn init(config: Config) -> Result<Self> {
        let mut options = ConnectOptions::new(config.database_url.clone());
        // Each pooled connection to an in-memory SQLite database is its own database
        if config.database_url.contains(":memory:") {
            options.max_connections(1).min_connections(1);
        }
        options.sqlx_logging(false);

        let db = Database::connect(options)
            .await
            .with_context(|| format!("Failed to connect to {}", redact(&config.database_url)))?;

        tracing::info!(database = %redact(&config.database_url), "Marketplace database connected");
        Ok(Self::with_connection(config, db))
    }

    /// Build the module over an existing connection with the default address store
    pub fn with_connection(config: Config, db: DatabaseConnection) -> Self {
        Self::with_store(config, db, SeaOrmAddressStore::new())
    }

    /// Build the module over an existing connection and a given address store
    pub fn with_store<S>(config: Config, db: DatabaseConnection, store: S) -> Self
    where
        S: AddressStore + Clone + 'static,
    {
        let db = Arc::new(db);
        let repos = build_repositories(&config, db.clone(), store);
        let limits = PageLimits {
            default_size: config.default_page_size,
            max_size: config.max_page_size,
        };
        let service = Arc::new(Service::new(repos, limits));

        Self {
            config,
            db,
            service,
        }
    }

    /// Apply pending schema migrations
    pub async fn migrate(&self) -> Result<()> {
        Migrator::up(self.db.as_ref(), None)
            .await
            .context("Marketplace migrations failed")?;
        tracing::info!("Marketplace migrations completed");
        Ok(())
    }

    pub fn service(&self) -> Arc<Service> {
        self.service.clone()
    }

    pub fn connection(&self) -> &DatabaseConnection {
        &self.db
    }

    pub fn config(&self) -> &Config {
        &self.config
    }
}

/// Repositories over one connection, all sharing the same address store
pub fn build_repositories<S>(config: &Config, db: Arc<DatabaseConnection>, store: S) -> Repositories
where
    S: AddressStore + Clone + 'static,
{
    let filters = FilterQueryBuilder::new(config.date_filter_policy, config.date_format.clone());

    Repositories {
        workers: Arc::new(SeaOrmWorkerRepository::new(
            db.clone(),
            store.clone(),
            filters.clone(),
        )),
        employers: Arc::new(SeaOrmEmployerRepository::new(db.clone(), store.clone())),
        jobs: Arc::new(SeaOrmJobRepository::new(db.clone(), store.clone(), filters)),
        applications: Arc::new(SeaOrmApplicationRepository::new(db.clone(), store)),
        sectors: Arc::new(SeaOrmSectorRepository::new(db)),
    }
}

/// Strip credentials from a connection string before logging it
fn redact(url: &str) -> String {
    match (url.find("://"), url.rfind('@')) {
        (Some(scheme_end), Some(at)) if at > scheme_end => {
            format!("{}://***{}", &url[..scheme_end], &url[at..])
        }
        _ => url.to_owned(),
    }
}
