//! Contract models for the marketplace service
//!
//! These models are transport-agnostic. The HTTP layer that owns JSON
//! decoding maps its DTOs onto these types.
//! NO serde derives - these are pure domain models.

use chrono::{DateTime, NaiveDate, Utc};
use uuid::Uuid;

// ===== Address =====

/// The mutable part of a postal address, without an identifier.
///
/// Drafts carry this nested value; the storage layer splits it off into
/// its own row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddressFields {
    /// Free-form details (house number, landmark, floor)
    pub details: String,
    pub street: String,
    pub city: String,
    pub state: String,
    /// Numeric postal code
    pub pincode: i32,
}

/// A persisted address as referenced by exactly one parent entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Address {
    /// Generated on create, stable afterwards
    pub id: Uuid,
    pub details: String,
    pub street: String,
    pub city: String,
    pub state: String,
    pub pincode: i32,
}

impl Address {
    /// Attach an identifier to a set of address fields
    pub fn from_fields(id: Uuid, fields: AddressFields) -> Self {
        Self {
            id,
            details: fields.details,
            street: fields.street,
            city: fields.city,
            state: fields.state,
            pincode: fields.pincode,
        }
    }

    /// The address without its identifier
    pub fn fields(&self) -> AddressFields {
        AddressFields {
            details: self.details.clone(),
            street: self.street.clone(),
            city: self.city.clone(),
            state: self.state.clone(),
            pincode: self.pincode,
        }
    }
}

// ===== Enumerations =====

/// Gender codes stored on workers and used as a job requirement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl Gender {
    /// Lowercase code persisted in the database
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Male => "male",
            Self::Female => "female",
            Self::Other => "other",
        }
    }

    /// Parse a stored or user-supplied code, ignoring case and padding
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "male" | "m" => Some(Self::Male),
            "female" | "f" => Some(Self::Female),
            "other" | "o" => Some(Self::Other),
            _ => None,
        }
    }
}

/// Lifecycle of a job application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ApplicationStatus {
    Pending,
    Accepted,
    Rejected,
    Withdrawn,
}

impl ApplicationStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Accepted => "accepted",
            Self::Rejected => "rejected",
            Self::Withdrawn => "withdrawn",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "pending" => Some(Self::Pending),
            "accepted" => Some(Self::Accepted),
            "rejected" => Some(Self::Rejected),
            "withdrawn" => Some(Self::Withdrawn),
            _ => None,
        }
    }
}

// ===== Worker =====

/// A worker looking for jobs
#[derive(Debug, Clone, PartialEq)]
pub struct Worker {
    pub id: Uuid,
    pub name: String,
    /// Unique contact number
    pub phone: String,
    pub gender: Gender,
    /// Sector the worker is skilled in (free text, e.g. "Logistics")
    pub sector: String,
    /// Average rating from 0 to 5
    pub rating: f64,
    /// Home location
    pub location: Address,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input for creating or replacing a worker
#[derive(Debug, Clone, PartialEq)]
pub struct NewWorker {
    pub name: String,
    pub phone: String,
    pub gender: Gender,
    pub sector: String,
    pub rating: f64,
    pub location: AddressFields,
}

// ===== Employer =====

/// An employer posting jobs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Employer {
    pub id: Uuid,
    pub name: String,
    pub phone: String,
    /// Unique contact email
    pub email: String,
    pub company: String,
    /// Office location
    pub location: Address,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewEmployer {
    pub name: String,
    pub phone: String,
    pub email: String,
    pub company: String,
    pub location: AddressFields,
}

// ===== Job =====

/// A job posted by an employer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Job {
    pub id: Uuid,
    pub employer_id: Uuid,
    pub title: String,
    pub description: String,
    pub sector: String,
    /// Offered wage in the smallest currency unit
    pub wage: i64,
    /// Gender requirement, `None` when anyone may apply
    pub required_gender: Option<Gender>,
    pub openings: i32,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    /// Work site
    pub location: Address,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewJob {
    pub employer_id: Uuid,
    pub title: String,
    pub description: String,
    pub sector: String,
    pub wage: i64,
    pub required_gender: Option<Gender>,
    pub openings: i32,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub location: AddressFields,
}

// ===== Application =====

/// A worker's application to a job
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Application {
    pub id: Uuid,
    pub job_id: Uuid,
    pub worker_id: Uuid,
    pub status: ApplicationStatus,
    /// Where the worker is picked up for the job
    pub pickup_location: Address,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewApplication {
    pub job_id: Uuid,
    pub worker_id: Uuid,
    pub status: ApplicationStatus,
    pub pickup_location: AddressFields,
}

// ===== Sector =====

/// Reference list of sectors jobs and workers are grouped under
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sector {
    pub id: Uuid,
    /// Unique display name
    pub name: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSector {
    pub name: String,
    pub description: String,
}

// ===== Pagination =====

/// Offset pagination for listings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PageRequest {
    /// Maximum rows to return; `None` uses the configured default
    pub limit: Option<u64>,
    pub offset: u64,
}
