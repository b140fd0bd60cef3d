//! Shared fixtures: in-memory database, sample drafts and a counting
//! address store

#![allow(dead_code)]

use async_trait::async_trait;
use marketplace_service::domain::repository::AddressStore;
use marketplace_service::infra::storage::entity::address;
use marketplace_service::infra::storage::SeaOrmAddressStore;
use marketplace_service::*;
use parking_lot::Mutex;
use sea_orm::{
    ConnectOptions, ConnectionTrait, Database, DatabaseConnection, EntityTrait, PaginatorTrait,
};
use std::sync::Arc;
use uuid::Uuid;

pub fn print_test_header(test_name: &str, purpose: &[&str]) {
    println!("\n🧪 TEST: {}", test_name);
    if let Some(first) = purpose.first() {
        println!("📋 PURPOSE: {}", first);
    }
    for line in purpose.iter().skip(1) {
        println!("   {}", line);
    }
}

// ===== Database =====

/// Fresh in-memory SQLite database on a single pooled connection
pub async fn connect() -> DatabaseConnection {
    let mut options = ConnectOptions::new("sqlite::memory:");
    options
        .max_connections(1)
        .min_connections(1)
        .sqlx_logging(false);
    Database::connect(options).await.unwrap()
}

/// Module over a migrated in-memory database with the real address store
pub async fn setup() -> MarketplaceModule {
    setup_with(Config::default(), SeaOrmAddressStore::new()).await
}

/// Module over a migrated in-memory database with the given config and store
pub async fn setup_with<S>(config: Config, store: S) -> MarketplaceModule
where
    S: AddressStore + Clone + 'static,
{
    let db = connect().await;
    let module = MarketplaceModule::with_store(config, db, store);
    module.migrate().await.unwrap();
    module
}

pub async fn address_count(db: &DatabaseConnection) -> u64 {
    address::Entity::find().count(db).await.unwrap()
}

/// Make every statement of `event` on `table` fail inside the database
pub async fn fail_on(db: &DatabaseConnection, event: &str, table: &str) {
    let sql = format!(
        "CREATE TRIGGER fail_{event}_{table} BEFORE {event} ON {table} \
         BEGIN SELECT RAISE(ABORT, 'injected {event} failure'); END;",
        event = event.to_lowercase(),
        table = table,
    );
    db.execute_unprepared(&sql).await.unwrap();
}

// ===== Fixtures =====

pub fn pune() -> AddressFields {
    AddressFields {
        details: "Flat 4B, Sai Residency".to_owned(),
        street: "Baner Road".to_owned(),
        city: "Pune".to_owned(),
        state: "Maharashtra".to_owned(),
        pincode: 411057,
    }
}

pub fn mumbai() -> AddressFields {
    AddressFields {
        details: "Unit 7, Andheri Industrial Estate".to_owned(),
        street: "Veera Desai Road".to_owned(),
        city: "Mumbai".to_owned(),
        state: "Maharashtra".to_owned(),
        pincode: 400053,
    }
}

pub fn new_worker(name: &str, phone: &str) -> NewWorker {
    NewWorker {
        name: name.to_owned(),
        phone: phone.to_owned(),
        gender: Gender::Male,
        sector: "Logistics".to_owned(),
        rating: 4.0,
        location: pune(),
    }
}

pub fn new_employer(email: &str) -> NewEmployer {
    NewEmployer {
        name: "Meera Shah".to_owned(),
        phone: "9822012345".to_owned(),
        email: email.to_owned(),
        company: "Shah Logistics Pvt Ltd".to_owned(),
        location: mumbai(),
    }
}

pub fn new_job(employer_id: Uuid, title: &str, wage: i64) -> NewJob {
    NewJob {
        employer_id,
        title: title.to_owned(),
        description: "Day shift, six days a week".to_owned(),
        sector: "Logistics".to_owned(),
        wage,
        required_gender: None,
        openings: 4,
        start_date: chrono::NaiveDate::from_ymd_opt(2025, 4, 1).unwrap(),
        end_date: chrono::NaiveDate::from_ymd_opt(2025, 6, 30).unwrap(),
        location: pune(),
    }
}

pub fn new_application(job_id: Uuid, worker_id: Uuid) -> NewApplication {
    NewApplication {
        job_id,
        worker_id,
        status: ApplicationStatus::Pending,
        pickup_location: AddressFields {
            details: "Near bus stop".to_owned(),
            street: "Aundh Road".to_owned(),
            city: "Pune".to_owned(),
            state: "Maharashtra".to_owned(),
            pincode: 411007,
        },
    }
}

// ===== Counting address store =====

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct StoreCalls {
    pub create: usize,
    pub update: usize,
    pub fetch: usize,
    pub delete: usize,
}

impl StoreCalls {
    pub fn total(&self) -> usize {
        self.create + self.update + self.fetch + self.delete
    }
}

/// Real address store that records how often each operation runs
#[derive(Clone, Default)]
pub struct CountingAddressStore {
    inner: SeaOrmAddressStore,
    calls: Arc<Mutex<StoreCalls>>,
}

impl CountingAddressStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> StoreCalls {
        *self.calls.lock()
    }

    pub fn reset(&self) {
        *self.calls.lock() = StoreCalls::default();
    }
}

#[async_trait]
impl AddressStore for CountingAddressStore {
    async fn create<C>(&self, conn: &C, fields: AddressFields) -> Result<Address, MarketplaceError>
    where
        C: ConnectionTrait + Send + Sync,
    {
        self.calls.lock().create += 1;
        self.inner.create(conn, fields).await
    }

    async fn update<C>(&self, conn: &C, address: &Address) -> Result<Address, MarketplaceError>
    where
        C: ConnectionTrait + Send + Sync,
    {
        self.calls.lock().update += 1;
        self.inner.update(conn, address).await
    }

    async fn fetch_by_id<C>(&self, conn: &C, id: Uuid) -> Result<Address, MarketplaceError>
    where
        C: ConnectionTrait + Send + Sync,
    {
        self.calls.lock().fetch += 1;
        self.inner.fetch_by_id(conn, id).await
    }

    async fn delete<C>(&self, conn: &C, id: Uuid) -> Result<(), MarketplaceError>
    where
        C: ConnectionTrait + Send + Sync,
    {
        self.calls.lock().delete += 1;
        self.inner.delete(conn, id).await
    }
}
