//! Entity–address composition
//!
//! Domain objects carry their address as a nested value; storage keeps it in
//! `addresses` and points at it with a foreign key. [`AddressOwner`] is the
//! one place that knows how a given entity splits into (record, address) and
//! how a joined row goes back together. The transactional protocol built on
//! top of it lives in [`super::unit_of_work`].

use crate::contract::{
    Address, AddressFields, Application, Employer, Job, NewApplication, NewEmployer, NewJob,
    NewWorker, Worker,
};
use sea_orm::ActiveValue::{NotSet, Set};
use uuid::Uuid;

use super::entity::{application, employer, job, worker};
use super::mapper::{parse_gender, parse_status};

/// Field mapping between a domain entity with a nested address and its
/// flat storage form.
pub trait AddressOwner: Send + Sync + 'static {
    /// Entity name used in errors and logs
    const ENTITY: &'static str;

    /// Caller-supplied input with a nested [`AddressFields`]
    type Draft: Send + 'static;
    /// Flat storage record carrying business fields only; id, address
    /// reference and timestamps are left unset
    type Record: Send + 'static;
    /// Stored row as read back from the parent table
    type Row: Send + Sync + 'static;
    /// Domain shape returned to callers
    type Domain: Send + 'static;

    /// Split a draft into its storage record and the address payload
    fn decompose(draft: Self::Draft) -> (Self::Record, AddressFields);

    /// Rebuild the domain object from a stored row and its joined address
    fn compose(row: Self::Row, address: Address) -> Self::Domain;

    /// Address the row points at
    fn location_id(row: &Self::Row) -> Uuid;

    /// Whether writing `candidate` would change the stored address
    fn address_changed(existing: &Address, candidate: &AddressFields) -> bool {
        address_changed(existing, candidate)
    }
}

/// Field-by-field comparison of the mutable address columns.
///
/// Only decides whether an address write is needed.
pub fn address_changed(existing: &Address, candidate: &AddressFields) -> bool {
    existing.details != candidate.details
        || existing.street != candidate.street
        || existing.city != candidate.city
        || existing.state != candidate.state
        || existing.pincode != candidate.pincode
}

// ===== Worker =====

/// Workers table mapping
#[derive(Debug, Clone, Copy, Default)]
pub struct Workers;

impl AddressOwner for Workers {
    const ENTITY: &'static str = "Worker";

    type Draft = NewWorker;
    type Record = worker::ActiveModel;
    type Row = worker::Model;
    type Domain = Worker;

    fn decompose(draft: NewWorker) -> (worker::ActiveModel, AddressFields) {
        let record = worker::ActiveModel {
            id: NotSet,
            name: Set(draft.name),
            phone: Set(draft.phone),
            gender: Set(draft.gender.as_str().to_owned()),
            sector: Set(draft.sector),
            rating: Set(draft.rating),
            location_id: NotSet,
            created_at: NotSet,
            updated_at: NotSet,
        };
        (record, draft.location)
    }

    fn compose(row: worker::Model, address: Address) -> Worker {
        Worker {
            id: row.id,
            name: row.name,
            phone: row.phone,
            gender: parse_gender(&row.gender),
            sector: row.sector,
            rating: row.rating,
            location: address,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }

    fn location_id(row: &worker::Model) -> Uuid {
        row.location_id
    }
}

// ===== Employer =====

/// Employers table mapping
#[derive(Debug, Clone, Copy, Default)]
pub struct Employers;

impl AddressOwner for Employers {
    const ENTITY: &'static str = "Employer";

    type Draft = NewEmployer;
    type Record = employer::ActiveModel;
    type Row = employer::Model;
    type Domain = Employer;

    fn decompose(draft: NewEmployer) -> (employer::ActiveModel, AddressFields) {
        let record = employer::ActiveModel {
            id: NotSet,
            name: Set(draft.name),
            phone: Set(draft.phone),
            email: Set(draft.email),
            company: Set(draft.company),
            location_id: NotSet,
            created_at: NotSet,
            updated_at: NotSet,
        };
        (record, draft.location)
    }

    fn compose(row: employer::Model, address: Address) -> Employer {
        Employer {
            id: row.id,
            name: row.name,
            phone: row.phone,
            email: row.email,
            company: row.company,
            location: address,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }

    fn location_id(row: &employer::Model) -> Uuid {
        row.location_id
    }
}

// ===== Job =====

/// Jobs table mapping
#[derive(Debug, Clone, Copy, Default)]
pub struct Jobs;

impl AddressOwner for Jobs {
    const ENTITY: &'static str = "Job";

    type Draft = NewJob;
    type Record = job::ActiveModel;
    type Row = job::Model;
    type Domain = Job;

    fn decompose(draft: NewJob) -> (job::ActiveModel, AddressFields) {
        let record = job::ActiveModel {
            id: NotSet,
            employer_id: Set(draft.employer_id),
            title: Set(draft.title),
            description: Set(draft.description),
            sector: Set(draft.sector),
            wage: Set(draft.wage),
            required_gender: Set(draft.required_gender.map(|g| g.as_str().to_owned())),
            openings: Set(draft.openings),
            start_date: Set(draft.start_date),
            end_date: Set(draft.end_date),
            location_id: NotSet,
            created_at: NotSet,
            updated_at: NotSet,
        };
        (record, draft.location)
    }

    fn compose(row: job::Model, address: Address) -> Job {
        Job {
            id: row.id,
            employer_id: row.employer_id,
            title: row.title,
            description: row.description,
            sector: row.sector,
            wage: row.wage,
            required_gender: row.required_gender.as_deref().map(parse_gender),
            openings: row.openings,
            start_date: row.start_date,
            end_date: row.end_date,
            location: address,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }

    fn location_id(row: &job::Model) -> Uuid {
        row.location_id
    }
}

// ===== Application =====

/// Applications table mapping; the owned address is the pickup point
#[derive(Debug, Clone, Copy, Default)]
pub struct Applications;

impl AddressOwner for Applications {
    const ENTITY: &'static str = "Application";

    type Draft = NewApplication;
    type Record = application::ActiveModel;
    type Row = application::Model;
    type Domain = Application;

    fn decompose(draft: NewApplication) -> (application::ActiveModel, AddressFields) {
        let record = application::ActiveModel {
            id: NotSet,
            job_id: Set(draft.job_id),
            worker_id: Set(draft.worker_id),
            status: Set(draft.status.as_str().to_owned()),
            pickup_location_id: NotSet,
            created_at: NotSet,
            updated_at: NotSet,
        };
        (record, draft.pickup_location)
    }

    fn compose(row: application::Model, address: Address) -> Application {
        Application {
            id: row.id,
            job_id: row.job_id,
            worker_id: row.worker_id,
            status: parse_status(&row.status),
            pickup_location: address,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }

    fn location_id(row: &application::Model) -> Uuid {
        row.pickup_location_id
    }
}
