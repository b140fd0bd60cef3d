//! Storage layer - database entities, address store, filter builder and
//! repositories

pub mod address_store;
pub mod composer;
pub mod entity;
pub mod filter;
pub mod mapper;
pub mod migrations;
pub mod repositories;
pub mod unit_of_work;

pub use address_store::SeaOrmAddressStore;
pub use filter::{FilterPredicate, FilterQueryBuilder};
pub use repositories::{
    SeaOrmApplicationRepository, SeaOrmEmployerRepository, SeaOrmJobRepository,
    SeaOrmSectorRepository, SeaOrmWorkerRepository,
};
