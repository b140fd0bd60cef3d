//! Domain service - validation and orchestration over the repositories

use crate::contract::{
    Application, ApplicationStatus, Employer, Job, JobFilter, MarketplaceError, NewApplication,
    NewEmployer, NewJob, NewSector, NewWorker, PageRequest, Sector, Worker, WorkerFilter,
};
use super::repository::{
    ApplicationRepository, EmployerRepository, JobRepository, SectorRepository, WorkerRepository,
};
use super::validation;
use std::sync::Arc;
use uuid::Uuid;

/// Listing page size bounds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageLimits {
    /// Used when the caller gives no limit (or zero)
    pub default_size: u64,
    /// Upper bound on any requested limit
    pub max_size: u64,
}

impl Default for PageLimits {
    fn default() -> Self {
        Self {
            default_size: 50,
            max_size: 500,
        }
    }
}

impl PageLimits {
    pub fn clamp(&self, page: PageRequest) -> PageRequest {
        let limit = page
            .limit
            .filter(|l| *l > 0)
            .unwrap_or(self.default_size)
            .min(self.max_size);

        PageRequest {
            limit: Some(limit),
            offset: page.offset,
        }
    }
}

/// Repository handles the service works against
#[derive(Clone)]
pub struct Repositories {
    pub workers: Arc<dyn WorkerRepository>,
    pub employers: Arc<dyn EmployerRepository>,
    pub jobs: Arc<dyn JobRepository>,
    pub applications: Arc<dyn ApplicationRepository>,
    pub sectors: Arc<dyn SectorRepository>,
}

/// Domain service for the marketplace
pub struct Service {
    repos: Repositories,
    limits: PageLimits,
}

impl Service {
    pub fn new(repos: Repositories, limits: PageLimits) -> Self {
        Self { repos, limits }
    }

    pub fn page_limits(&self) -> PageLimits {
        self.limits
    }

    // ===== Workers =====

    pub async fn create_worker(&self, worker: NewWorker) -> Result<Worker, MarketplaceError> {
        validation::validate_worker(&worker)?;
        self.repos.workers.create(worker).await
    }

    pub async fn get_worker(&self, id: Uuid) -> Result<Worker, MarketplaceError> {
        self.repos.workers.fetch_by_id(id).await
    }

    pub async fn update_worker(
        &self,
        id: Uuid,
        worker: NewWorker,
    ) -> Result<Worker, MarketplaceError> {
        validation::validate_worker(&worker)?;
        self.repos.workers.update(id, worker).await
    }

    pub async fn delete_worker(&self, id: Uuid) -> Result<(), MarketplaceError> {
        self.repos.workers.delete(id).await
    }

    pub async fn list_workers(
        &self,
        filter: &WorkerFilter,
        page: PageRequest,
    ) -> Result<Vec<Worker>, MarketplaceError> {
        let page = self.limits.clamp(page);
        tracing::debug!(?filter, limit = ?page.limit, offset = page.offset, "Listing workers");
        self.repos.workers.list(filter, page).await
    }

    // ===== Employers =====

    pub async fn create_employer(
        &self,
        employer: NewEmployer,
    ) -> Result<Employer, MarketplaceError> {
        validation::validate_employer(&employer)?;
        self.repos.employers.create(employer).await
    }

    pub async fn get_employer(&self, id: Uuid) -> Result<Employer, MarketplaceError> {
        self.repos.employers.fetch_by_id(id).await
    }

    pub async fn update_employer(
        &self,
        id: Uuid,
        employer: NewEmployer,
    ) -> Result<Employer, MarketplaceError> {
        validation::validate_employer(&employer)?;
        self.repos.employers.update(id, employer).await
    }

    pub async fn delete_employer(&self, id: Uuid) -> Result<(), MarketplaceError> {
        self.repos.employers.delete(id).await
    }

    // ===== Jobs =====

    /// Post a job; the employer must exist
    pub async fn create_job(&self, job: NewJob) -> Result<Job, MarketplaceError> {
        validation::validate_job(&job)?;
        self.repos.employers.fetch_by_id(job.employer_id).await?;
        self.repos.jobs.create(job).await
    }

    pub async fn get_job(&self, id: Uuid) -> Result<Job, MarketplaceError> {
        self.repos.jobs.fetch_by_id(id).await
    }

    pub async fn update_job(&self, id: Uuid, job: NewJob) -> Result<Job, MarketplaceError> {
        validation::validate_job(&job)?;
        self.repos.employers.fetch_by_id(job.employer_id).await?;
        self.repos.jobs.update(id, job).await
    }

    pub async fn delete_job(&self, id: Uuid) -> Result<(), MarketplaceError> {
        self.repos.jobs.delete(id).await
    }

    pub async fn list_jobs(
        &self,
        filter: &JobFilter,
        page: PageRequest,
    ) -> Result<Vec<Job>, MarketplaceError> {
        let page = self.limits.clamp(page);
        tracing::debug!(?filter, limit = ?page.limit, offset = page.offset, "Listing jobs");
        self.repos.jobs.list(filter, page).await
    }

    // ===== Applications =====

    /// Apply a worker to a job; both must exist
    pub async fn apply(
        &self,
        application: NewApplication,
    ) -> Result<Application, MarketplaceError> {
        validation::validate_application(&application)?;
        self.ensure_application_refs(&application).await?;
        self.repos.applications.create(application).await
    }

    pub async fn get_application(&self, id: Uuid) -> Result<Application, MarketplaceError> {
        self.repos.applications.fetch_by_id(id).await
    }

    pub async fn update_application(
        &self,
        id: Uuid,
        application: NewApplication,
    ) -> Result<Application, MarketplaceError> {
        validation::validate_application(&application)?;
        self.ensure_application_refs(&application).await?;
        self.repos.applications.update(id, application).await
    }

    /// Referenced job and worker must exist before any write
    async fn ensure_application_refs(
        &self,
        application: &NewApplication,
    ) -> Result<(), MarketplaceError> {
        self.repos.jobs.fetch_by_id(application.job_id).await?;
        self.repos.workers.fetch_by_id(application.worker_id).await?;
        Ok(())
    }

    /// Move an application to a new status, keeping its pickup point
    pub async fn set_application_status(
        &self,
        id: Uuid,
        status: ApplicationStatus,
    ) -> Result<Application, MarketplaceError> {
        let current = self.repos.applications.fetch_by_id(id).await?;
        if current.status == status {
            return Ok(current);
        }

        tracing::info!(
            application_id = %id,
            from = current.status.as_str(),
            to = status.as_str(),
            "Changing application status"
        );

        let draft = NewApplication {
            job_id: current.job_id,
            worker_id: current.worker_id,
            status,
            pickup_location: current.pickup_location.fields(),
        };
        self.repos.applications.update(id, draft).await
    }

    pub async fn withdraw_application(&self, id: Uuid) -> Result<(), MarketplaceError> {
        self.repos.applications.delete(id).await
    }

    pub async fn applications_for_job(
        &self,
        job_id: Uuid,
    ) -> Result<Vec<Application>, MarketplaceError> {
        self.repos.applications.list_by_job(job_id).await
    }

    pub async fn applications_by_worker(
        &self,
        worker_id: Uuid,
    ) -> Result<Vec<Application>, MarketplaceError> {
        self.repos.applications.list_by_worker(worker_id).await
    }

    // ===== Sectors =====

    pub async fn create_sector(&self, sector: NewSector) -> Result<Sector, MarketplaceError> {
        validation::validate_sector(&sector)?;
        self.repos.sectors.create(sector).await
    }

    pub async fn get_sector(&self, id: Uuid) -> Result<Sector, MarketplaceError> {
        self.repos.sectors.fetch_by_id(id).await
    }

    pub async fn list_sectors(&self) -> Result<Vec<Sector>, MarketplaceError> {
        self.repos.sectors.list().await
    }

    pub async fn delete_sector(&self, id: Uuid) -> Result<(), MarketplaceError> {
        self.repos.sectors.delete(id).await
    }
}
