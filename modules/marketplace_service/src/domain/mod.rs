//! Domain layer - repository traits, validation and the service

pub mod repository;
pub mod service;
pub mod validation;

pub use repository::{
    AddressStore, ApplicationRepository, EmployerRepository, JobRepository, SectorRepository,
    WorkerRepository,
};
pub use service::{PageLimits, Repositories, Service};
