//! Repository traits for data access
//!
//! These traits define the interface for data access operations.
//! Implementations are in infra/storage.

use crate::contract::{
    Address, AddressFields, Application, Employer, Job, JobFilter, MarketplaceError,
    NewApplication, NewEmployer, NewJob, NewSector, NewWorker, PageRequest, Sector, Worker,
    WorkerFilter,
};
use async_trait::async_trait;
use sea_orm::ConnectionTrait;
use uuid::Uuid;

/// CRUD over the normalized `addresses` table.
///
/// Every call takes the connection to run on so that composite writes can
/// pass the same transaction to the address and to the parent row.
#[async_trait]
pub trait AddressStore: Send + Sync {
    /// Insert a new address and return it with its generated id
    async fn create<C>(&self, conn: &C, fields: AddressFields) -> Result<Address, MarketplaceError>
    where
        C: ConnectionTrait + Send + Sync;

    /// Replace every field of an existing address
    async fn update<C>(&self, conn: &C, address: &Address) -> Result<Address, MarketplaceError>
    where
        C: ConnectionTrait + Send + Sync;

    /// Find an address by id
    async fn fetch_by_id<C>(&self, conn: &C, id: Uuid) -> Result<Address, MarketplaceError>
    where
        C: ConnectionTrait + Send + Sync;

    /// Delete an address. Deleting an unknown id succeeds.
    async fn delete<C>(&self, conn: &C, id: Uuid) -> Result<(), MarketplaceError>
    where
        C: ConnectionTrait + Send + Sync;
}

/// Repository for workers
#[async_trait]
pub trait WorkerRepository: Send + Sync {
    async fn create(&self, worker: NewWorker) -> Result<Worker, MarketplaceError>;

    async fn fetch_by_id(&self, id: Uuid) -> Result<Worker, MarketplaceError>;

    /// Replace the worker's fields and address
    async fn update(&self, id: Uuid, worker: NewWorker) -> Result<Worker, MarketplaceError>;

    /// Delete the worker together with its address
    async fn delete(&self, id: Uuid) -> Result<(), MarketplaceError>;

    async fn list(
        &self,
        filter: &WorkerFilter,
        page: PageRequest,
    ) -> Result<Vec<Worker>, MarketplaceError>;
}

/// Repository for employers
#[async_trait]
pub trait EmployerRepository: Send + Sync {
    async fn create(&self, employer: NewEmployer) -> Result<Employer, MarketplaceError>;

    async fn fetch_by_id(&self, id: Uuid) -> Result<Employer, MarketplaceError>;

    async fn update(&self, id: Uuid, employer: NewEmployer) -> Result<Employer, MarketplaceError>;

    async fn delete(&self, id: Uuid) -> Result<(), MarketplaceError>;
}

/// Repository for jobs
#[async_trait]
pub trait JobRepository: Send + Sync {
    async fn create(&self, job: NewJob) -> Result<Job, MarketplaceError>;

    async fn fetch_by_id(&self, id: Uuid) -> Result<Job, MarketplaceError>;

    async fn update(&self, id: Uuid, job: NewJob) -> Result<Job, MarketplaceError>;

    async fn delete(&self, id: Uuid) -> Result<(), MarketplaceError>;

    async fn list(&self, filter: &JobFilter, page: PageRequest)
        -> Result<Vec<Job>, MarketplaceError>;
}

/// Repository for job applications
#[async_trait]
pub trait ApplicationRepository: Send + Sync {
    async fn create(&self, application: NewApplication) -> Result<Application, MarketplaceError>;

    async fn fetch_by_id(&self, id: Uuid) -> Result<Application, MarketplaceError>;

    async fn update(
        &self,
        id: Uuid,
        application: NewApplication,
    ) -> Result<Application, MarketplaceError>;

    async fn delete(&self, id: Uuid) -> Result<(), MarketplaceError>;

    /// All applications for a job, oldest first
    async fn list_by_job(&self, job_id: Uuid) -> Result<Vec<Application>, MarketplaceError>;

    /// All applications a worker has made, oldest first
    async fn list_by_worker(&self, worker_id: Uuid)
        -> Result<Vec<Application>, MarketplaceError>;
}

/// Repository for the sector reference list
#[async_trait]
pub trait SectorRepository: Send + Sync {
    async fn create(&self, sector: NewSector) -> Result<Sector, MarketplaceError>;

    async fn fetch_by_id(&self, id: Uuid) -> Result<Sector, MarketplaceError>;

    /// All sectors ordered by name
    async fn list(&self) -> Result<Vec<Sector>, MarketplaceError>;

    async fn delete(&self, id: Uuid) -> Result<(), MarketplaceError>;
}
