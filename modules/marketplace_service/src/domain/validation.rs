//! Input validation for drafts
//!
//! Runs in the service before anything reaches storage.

use crate::contract::{
    AddressFields, MarketplaceError, NewApplication, NewEmployer, NewJob, NewSector, NewWorker,
};
use uuid::Uuid;

const PINCODE_RANGE: std::ops::RangeInclusive<i32> = 100_000..=999_999;
const MAX_RATING: f64 = 5.0;

fn require_text(field: &str, value: &str) -> Result<(), MarketplaceError> {
    if value.trim().is_empty() {
        return Err(MarketplaceError::validation(field, "cannot be empty"));
    }
    Ok(())
}

fn require_id(field: &str, id: Uuid) -> Result<(), MarketplaceError> {
    if id.is_nil() {
        return Err(MarketplaceError::validation(field, "must reference an existing row"));
    }
    Ok(())
}

/// Validate the five address fields.
///
/// Pincodes are six-digit postal codes without a leading zero.
pub fn validate_address(prefix: &str, address: &AddressFields) -> Result<(), MarketplaceError> {
    require_text(&format!("{prefix}.details"), &address.details)?;
    require_text(&format!("{prefix}.street"), &address.street)?;
    require_text(&format!("{prefix}.city"), &address.city)?;
    require_text(&format!("{prefix}.state"), &address.state)?;

    if !PINCODE_RANGE.contains(&address.pincode) {
        return Err(MarketplaceError::validation(
            format!("{prefix}.pincode"),
            format!("'{}' is not a six-digit pincode", address.pincode),
        ));
    }
    Ok(())
}

/// Validate a ten-digit phone number
pub fn validate_phone(phone: &str) -> Result<(), MarketplaceError> {
    if phone.len() != 10 || !phone.chars().all(|c| c.is_ascii_digit()) {
        return Err(MarketplaceError::validation(
            "phone",
            format!("'{phone}' must be exactly 10 digits"),
        ));
    }
    Ok(())
}

/// Validate email shape: a local part, `@`, and a dotted domain
pub fn validate_email(email: &str) -> Result<(), MarketplaceError> {
    let invalid = || MarketplaceError::validation("email", format!("'{email}' is not a valid email"));

    let (local, domain) = email.split_once('@').ok_or_else(invalid)?;
    if local.is_empty() || domain.contains('@') || email.chars().any(char::is_whitespace) {
        return Err(invalid());
    }

    let dotted = domain
        .split_once('.')
        .is_some_and(|(host, tld)| !host.is_empty() && !tld.is_empty() && !tld.ends_with('.'));
    if !dotted {
        return Err(invalid());
    }
    Ok(())
}

pub fn validate_worker(worker: &NewWorker) -> Result<(), MarketplaceError> {
    require_text("name", &worker.name)?;
    validate_phone(&worker.phone)?;
    require_text("sector", &worker.sector)?;

    if !worker.rating.is_finite() || !(0.0..=MAX_RATING).contains(&worker.rating) {
        return Err(MarketplaceError::validation(
            "rating",
            format!("{} is outside 0 to {MAX_RATING}", worker.rating),
        ));
    }

    validate_address("location", &worker.location)
}

pub fn validate_employer(employer: &NewEmployer) -> Result<(), MarketplaceError> {
    require_text("name", &employer.name)?;
    validate_phone(&employer.phone)?;
    validate_email(&employer.email)?;
    require_text("company", &employer.company)?;
    validate_address("location", &employer.location)
}

pub fn validate_job(job: &NewJob) -> Result<(), MarketplaceError> {
    require_id("employer_id", job.employer_id)?;
    require_text("title", &job.title)?;
    require_text("sector", &job.sector)?;

    if job.wage < 0 {
        return Err(MarketplaceError::validation("wage", "cannot be negative"));
    }
    if job.openings <= 0 {
        return Err(MarketplaceError::validation("openings", "must be at least 1"));
    }
    if job.end_date < job.start_date {
        return Err(MarketplaceError::validation(
            "end_date",
            format!("{} is before start_date {}", job.end_date, job.start_date),
        ));
    }

    validate_address("location", &job.location)
}

pub fn validate_application(application: &NewApplication) -> Result<(), MarketplaceError> {
    require_id("job_id", application.job_id)?;
    require_id("worker_id", application.worker_id)?;
    validate_address("pickup_location", &application.pickup_location)
}

pub fn validate_sector(sector: &NewSector) -> Result<(), MarketplaceError> {
    require_text("name", &sector.name)
}
