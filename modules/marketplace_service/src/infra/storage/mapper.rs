//! Entity to model mappers
//!
//! Conversions between SeaORM entities and contract models that do not
//! involve an owned address. Address-owning entities go through
//! [`super::composer`].

use crate::contract::{Address, ApplicationStatus, Gender, Sector};
use super::entity;

// ===== Address Conversions =====

impl From<entity::address::Model> for Address {
    fn from(row: entity::address::Model) -> Self {
        Self {
            id: row.id,
            details: row.details,
            street: row.street,
            city: row.city,
            state: row.state,
            pincode: row.pincode,
        }
    }
}

impl From<&Address> for entity::address::ActiveModel {
    fn from(model: &Address) -> Self {
        use sea_orm::ActiveValue::Set;

        Self {
            id: Set(model.id),
            details: Set(model.details.clone()),
            street: Set(model.street.clone()),
            city: Set(model.city.clone()),
            state: Set(model.state.clone()),
            pincode: Set(model.pincode),
        }
    }
}

// ===== Sector Conversions =====

impl From<entity::sector::Model> for Sector {
    fn from(row: entity::sector::Model) -> Self {
        Self {
            id: row.id,
            name: row.name,
            description: row.description,
            created_at: row.created_at,
        }
    }
}

// ===== Stored code helpers =====

pub(crate) fn parse_gender(code: &str) -> Gender {
    Gender::parse(code).unwrap_or_else(|| {
        tracing::warn!(code, "Unknown stored gender code, reading as other");
        Gender::Other
    })
}

pub(crate) fn parse_status(code: &str) -> ApplicationStatus {
    ApplicationStatus::parse(code).unwrap_or_else(|| {
        tracing::warn!(code, "Unknown stored application status, reading as pending");
        ApplicationStatus::Pending
    })
}
