//! Filter specifications for listings
//!
//! Every field is optional. Text and date fields arrive as raw strings from
//! the transport layer; blank values count as absent. A filter with every
//! field absent matches all rows.

use serde::{Deserialize, Serialize};

/// Constraints for listing jobs, in the order predicates are emitted
#[derive(Debug, Clone, Default, PartialEq)]
pub struct JobFilter {
    /// Case-insensitive partial match on the title
    pub title: Option<String>,
    /// Case-insensitive partial match on the sector
    pub sector: Option<String>,
    /// Case-insensitive partial match on the work site city
    pub city: Option<String>,
    /// Minimum wage; zero is treated as absent
    pub wage_min: Option<i64>,
    /// Exact match on the required gender
    pub gender: Option<String>,
    /// Jobs starting on or after this date
    pub starts_from: Option<String>,
    /// Jobs ending on or before this date
    pub ends_by: Option<String>,
}

/// Constraints for listing workers, in the order predicates are emitted
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WorkerFilter {
    pub name: Option<String>,
    pub sector: Option<String>,
    pub city: Option<String>,
    /// Minimum rating; zero is treated as absent
    pub rating_min: Option<f64>,
    pub gender: Option<String>,
}

/// How unparseable date bounds in a filter are handled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DateFilterPolicy {
    /// Drop the bound and keep listing
    #[default]
    Lenient,
    /// Reject the whole filter with a validation error
    Strict,
}
