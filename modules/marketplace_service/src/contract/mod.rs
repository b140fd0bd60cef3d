//! Contract layer - public models, filter specifications and errors
//!
//! This layer contains transport-agnostic types shared by the service and
//! whoever embeds it.

pub mod error;
pub mod filter;
pub mod model;

pub use error::MarketplaceError;
pub use filter::{DateFilterPolicy, JobFilter, WorkerFilter};
pub use model::{
    Address, AddressFields, Application, ApplicationStatus, Employer, Gender, Job, NewApplication,
    NewEmployer, NewJob, NewSector, NewWorker, PageRequest, Sector, Worker,
};
