//! Marketplace Service Module
//!
//! Record-keeping core for a job marketplace: workers, employers, jobs and
//! applications, each owning one normalized address row. Composite writes
//! run in a single transaction; listings are driven by sparse filters.

// Public exports
pub mod contract;
pub use contract::{
    Address, AddressFields, Application, ApplicationStatus, DateFilterPolicy, Employer, Gender,
    Job, JobFilter, MarketplaceError, NewApplication, NewEmployer, NewJob, NewSector, NewWorker,
    PageRequest, Sector, Worker, WorkerFilter,
};

pub mod config;
pub use config::Config;

pub mod module;
pub use module::MarketplaceModule;

pub mod domain;
pub use domain::Service;

// Storage internals (entities, builders, repositories)
#[doc(hidden)]
pub mod infra;
