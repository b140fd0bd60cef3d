//! SeaORM repository implementations
//!
//! Address-owning repositories are thin wrappers over
//! [`AddressedRepository`]; listings add the filter predicate, ordering and
//! paging on top of the joined select.

use crate::contract::{
    Application, Employer, Job, JobFilter, MarketplaceError, NewApplication, NewEmployer, NewJob,
    NewSector, NewWorker, PageRequest, Sector, Worker, WorkerFilter,
};
use crate::domain::repository::{
    AddressStore, ApplicationRepository, EmployerRepository, JobRepository, SectorRepository,
    WorkerRepository,
};
use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect, Select,
};
use std::sync::Arc;
use uuid::Uuid;

use super::address_store::SeaOrmAddressStore;
use super::composer::{Applications, Employers, Jobs, Workers};
use super::entity::{self, address, application, job, worker};
use super::filter::{FilterPredicate, FilterQueryBuilder};
use super::unit_of_work::{AddressedRepository, JoinedRow, OwnerTable};

/// Largest LIMIT both SQLite and Postgres accept as a signed 64-bit bound
const UNBOUNDED: u64 = i64::MAX as u64;

/// Apply predicate, stable ordering and paging to a parent select, then run
/// it joined with the owned address.
async fn list_joined<T, S, E>(
    inner: &AddressedRepository<T, S>,
    query: Select<E>,
    predicate: &FilterPredicate,
    created_at: E::Column,
    id: E::Column,
    page: PageRequest,
) -> Result<Vec<T::Domain>, MarketplaceError>
where
    T: OwnerTable<Row = E::Model>,
    S: AddressStore,
    E: EntityTrait + sea_orm::Related<address::Entity>,
{
    let mut query = query;
    if !predicate.is_empty() {
        query = query.filter(predicate.to_condition());
    }

    let joined = query
        .find_also_related(address::Entity)
        .order_by_asc(created_at)
        .order_by_asc(id);
    // SQLite rejects OFFSET without a LIMIT
    let joined = match (page.limit, page.offset) {
        (Some(limit), offset) => joined.limit(limit).offset(offset),
        (None, 0) => joined,
        (None, offset) => joined.limit(UNBOUNDED).offset(offset),
    };

    let rows: Vec<JoinedRow<T>> = joined
        .all(inner.connection())
        .await
        .map_err(MarketplaceError::db(T::ENTITY, "list"))?;

    tracing::debug!(entity = T::ENTITY, count = rows.len(), "Listed");
    inner.compose_all(rows)
}

// ===== Worker Repository =====

pub struct SeaOrmWorkerRepository<S = SeaOrmAddressStore> {
    inner: AddressedRepository<Workers, S>,
    filters: FilterQueryBuilder,
}

impl<S: AddressStore> SeaOrmWorkerRepository<S> {
    pub fn new(db: Arc<DatabaseConnection>, store: S, filters: FilterQueryBuilder) -> Self {
        Self {
            inner: AddressedRepository::new(db, Workers, store),
            filters,
        }
    }
}

#[async_trait]
impl<S: AddressStore> WorkerRepository for SeaOrmWorkerRepository<S> {
    async fn create(&self, worker: NewWorker) -> Result<Worker, MarketplaceError> {
        self.inner.create(worker).await
    }

    async fn fetch_by_id(&self, id: Uuid) -> Result<Worker, MarketplaceError> {
        self.inner.fetch_by_id(id).await
    }

    async fn update(&self, id: Uuid, worker: NewWorker) -> Result<Worker, MarketplaceError> {
        self.inner.update(id, worker).await
    }

    async fn delete(&self, id: Uuid) -> Result<(), MarketplaceError> {
        self.inner.delete(id).await
    }

    async fn list(
        &self,
        filter: &WorkerFilter,
        page: PageRequest,
    ) -> Result<Vec<Worker>, MarketplaceError> {
        let predicate = self.filters.worker_predicate(filter)?;
        list_joined(
            &self.inner,
            worker::Entity::find(),
            &predicate,
            worker::Column::CreatedAt,
            worker::Column::Id,
            page,
        )
        .await
    }
}

// ===== Employer Repository =====

pub struct SeaOrmEmployerRepository<S = SeaOrmAddressStore> {
    inner: AddressedRepository<Employers, S>,
}

impl<S: AddressStore> SeaOrmEmployerRepository<S> {
    pub fn new(db: Arc<DatabaseConnection>, store: S) -> Self {
        Self {
            inner: AddressedRepository::new(db, Employers, store),
        }
    }
}

#[async_trait]
impl<S: AddressStore> EmployerRepository for SeaOrmEmployerRepository<S> {
    async fn create(&self, employer: NewEmployer) -> Result<Employer, MarketplaceError> {
        self.inner.create(employer).await
    }

    async fn fetch_by_id(&self, id: Uuid) -> Result<Employer, MarketplaceError> {
        self.inner.fetch_by_id(id).await
    }

    async fn update(&self, id: Uuid, employer: NewEmployer) -> Result<Employer, MarketplaceError> {
        self.inner.update(id, employer).await
    }

    async fn delete(&self, id: Uuid) -> Result<(), MarketplaceError> {
        self.inner.delete(id).await
    }
}

// ===== Job Repository =====

pub struct SeaOrmJobRepository<S = SeaOrmAddressStore> {
    inner: AddressedRepository<Jobs, S>,
    filters: FilterQueryBuilder,
}

impl<S: AddressStore> SeaOrmJobRepository<S> {
    pub fn new(db: Arc<DatabaseConnection>, store: S, filters: FilterQueryBuilder) -> Self {
        Self {
            inner: AddressedRepository::new(db, Jobs, store),
            filters,
        }
    }
}

#[async_trait]
impl<S: AddressStore> JobRepository for SeaOrmJobRepository<S> {
    async fn create(&self, job: NewJob) -> Result<Job, MarketplaceError> {
        self.inner.create(job).await
    }

    async fn fetch_by_id(&self, id: Uuid) -> Result<Job, MarketplaceError> {
        self.inner.fetch_by_id(id).await
    }

    async fn update(&self, id: Uuid, job: NewJob) -> Result<Job, MarketplaceError> {
        self.inner.update(id, job).await
    }

    async fn delete(&self, id: Uuid) -> Result<(), MarketplaceError> {
        self.inner.delete(id).await
    }

    async fn list(
        &self,
        filter: &JobFilter,
        page: PageRequest,
    ) -> Result<Vec<Job>, MarketplaceError> {
        let predicate = self.filters.job_predicate(filter)?;
        list_joined(
            &self.inner,
            job::Entity::find(),
            &predicate,
            job::Column::CreatedAt,
            job::Column::Id,
            page,
        )
        .await
    }
}

// ===== Application Repository =====

pub struct SeaOrmApplicationRepository<S = SeaOrmAddressStore> {
    inner: AddressedRepository<Applications, S>,
}

impl<S: AddressStore> SeaOrmApplicationRepository<S> {
    pub fn new(db: Arc<DatabaseConnection>, store: S) -> Self {
        Self {
            inner: AddressedRepository::new(db, Applications, store),
        }
    }
}

#[async_trait]
impl<S: AddressStore> ApplicationRepository for SeaOrmApplicationRepository<S> {
    async fn create(&self, application: NewApplication) -> Result<Application, MarketplaceError> {
        self.inner.create(application).await
    }

    async fn fetch_by_id(&self, id: Uuid) -> Result<Application, MarketplaceError> {
        self.inner.fetch_by_id(id).await
    }

    async fn update(
        &self,
        id: Uuid,
        application: NewApplication,
    ) -> Result<Application, MarketplaceError> {
        self.inner.update(id, application).await
    }

    async fn delete(&self, id: Uuid) -> Result<(), MarketplaceError> {
        self.inner.delete(id).await
    }

    async fn list_by_job(&self, job_id: Uuid) -> Result<Vec<Application>, MarketplaceError> {
        list_joined(
            &self.inner,
            application::Entity::find().filter(application::Column::JobId.eq(job_id)),
            &FilterPredicate::default(),
            application::Column::CreatedAt,
            application::Column::Id,
            PageRequest::default(),
        )
        .await
    }

    async fn list_by_worker(
        &self,
        worker_id: Uuid,
    ) -> Result<Vec<Application>, MarketplaceError> {
        list_joined(
            &self.inner,
            application::Entity::find().filter(application::Column::WorkerId.eq(worker_id)),
            &FilterPredicate::default(),
            application::Column::CreatedAt,
            application::Column::Id,
            PageRequest::default(),
        )
        .await
    }
}

// ===== Sector Repository =====

const SECTOR: &str = "Sector";

pub struct SeaOrmSectorRepository {
    db: Arc<DatabaseConnection>,
}

impl SeaOrmSectorRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl SectorRepository for SeaOrmSectorRepository {
    async fn create(&self, sector: NewSector) -> Result<Sector, MarketplaceError> {
        use sea_orm::ActiveValue::Set;

        let active = entity::sector::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(sector.name),
            description: Set(sector.description),
            created_at: Set(chrono::Utc::now()),
        };

        let row = active
            .insert(&*self.db)
            .await
            .map_err(MarketplaceError::db(SECTOR, "create"))?;

        tracing::info!(sector_id = %row.id, name = %row.name, "Created sector");
        Ok(row.into())
    }

    async fn fetch_by_id(&self, id: Uuid) -> Result<Sector, MarketplaceError> {
        entity::sector::Entity::find_by_id(id)
            .one(&*self.db)
            .await
            .map_err(MarketplaceError::db(SECTOR, "fetch"))?
            .map(Into::into)
            .ok_or_else(|| MarketplaceError::not_found(SECTOR, id))
    }

    async fn list(&self) -> Result<Vec<Sector>, MarketplaceError> {
        let results = entity::sector::Entity::find()
            .order_by_asc(entity::sector::Column::Name)
            .all(&*self.db)
            .await
            .map_err(MarketplaceError::db(SECTOR, "list"))?;

        Ok(results.into_iter().map(Into::into).collect())
    }

    async fn delete(&self, id: Uuid) -> Result<(), MarketplaceError> {
        let result = entity::sector::Entity::delete_by_id(id)
            .exec(&*self.db)
            .await
            .map_err(MarketplaceError::db(SECTOR, "delete"))?;

        if result.rows_affected == 0 {
            return Err(MarketplaceError::not_found(SECTOR, id));
        }
        tracing::info!(sector_id = %id, "Deleted sector");
        Ok(())
    }
}
