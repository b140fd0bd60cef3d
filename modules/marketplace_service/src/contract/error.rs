//! Contract error types for the marketplace service
//!
//! These errors are transport-agnostic. Mapping to status codes belongs to
//! the HTTP layer.

use sea_orm::DbErr;
use thiserror::Error;

/// Marketplace service errors
#[derive(Error, Debug)]
pub enum MarketplaceError {
    /// Malformed input; raised before anything reaches storage
    #[error("Validation failed: {field}: {message}")]
    Validation { field: String, message: String },

    /// Referenced row does not exist
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    /// Storage or connectivity failure
    #[error("{entity} {operation} failed: {source}")]
    Persistence {
        entity: &'static str,
        operation: &'static str,
        #[source]
        source: DbErr,
    },

    /// A composite write failed after an earlier step of the same
    /// transaction had written; the transaction was rolled back
    #[error("{entity} {operation} rolled back: {reason}")]
    Consistency {
        entity: &'static str,
        operation: &'static str,
        reason: String,
        #[source]
        source: Option<DbErr>,
    },
}

impl MarketplaceError {
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn not_found(entity: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            entity,
            id: id.to_string(),
        }
    }

    pub fn persistence(entity: &'static str, operation: &'static str, source: DbErr) -> Self {
        Self::Persistence {
            entity,
            operation,
            source,
        }
    }

    pub fn consistency(
        entity: &'static str,
        operation: &'static str,
        reason: impl Into<String>,
    ) -> Self {
        Self::Consistency {
            entity,
            operation,
            reason: reason.into(),
            source: None,
        }
    }

    /// A later step of a composite write failed after an earlier step wrote.
    ///
    /// Storage failures become `Consistency` with the cause preserved; other
    /// errors pass through unchanged.
    pub fn after_partial_write(
        entity: &'static str,
        operation: &'static str,
        error: MarketplaceError,
    ) -> Self {
        match error {
            Self::Persistence {
                entity: step,
                operation: step_op,
                source,
            } => Self::Consistency {
                entity,
                operation,
                reason: format!("{step} {step_op} failed after an earlier write"),
                source: Some(source),
            },
            other => other,
        }
    }

    /// Build a closure that classifies a `DbErr` for the given entity/operation
    pub(crate) fn db(entity: &'static str, operation: &'static str) -> impl Fn(DbErr) -> Self {
        move |source| Self::persistence(entity, operation, source)
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation { .. })
    }

    pub fn is_consistency(&self) -> bool {
        matches!(self, Self::Consistency { .. })
    }
}
