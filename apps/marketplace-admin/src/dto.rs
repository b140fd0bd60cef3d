//! JSON output DTOs with serde derives

use marketplace_service::{Address, Application, Job, Sector, Worker};
use serde::Serialize;
use uuid::Uuid;

/// Address output DTO
#[derive(Debug, Clone, Serialize)]
pub struct AddressDto {
    pub id: Uuid,
    pub details: String,
    pub street: String,
    pub city: String,
    pub state: String,
    pub pincode: i32,
}

impl From<Address> for AddressDto {
    fn from(address: Address) -> Self {
        Self {
            id: address.id,
            details: address.details,
            street: address.street,
            city: address.city,
            state: address.state,
            pincode: address.pincode,
        }
    }
}

/// Job output DTO
#[derive(Debug, Clone, Serialize)]
pub struct JobDto {
    pub id: Uuid,
    pub employer_id: Uuid,
    pub title: String,
    pub description: String,
    pub sector: String,
    pub wage: i64,
    /// Lowercase gender code; omitted when the job is open to everyone
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required_gender: Option<&'static str>,
    pub openings: i32,
    pub start_date: chrono::NaiveDate,
    pub end_date: chrono::NaiveDate,
    pub location: AddressDto,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl From<Job> for JobDto {
    fn from(job: Job) -> Self {
        Self {
            id: job.id,
            employer_id: job.employer_id,
            title: job.title,
            description: job.description,
            sector: job.sector,
            wage: job.wage,
            required_gender: job.required_gender.map(|g| g.as_str()),
            openings: job.openings,
            start_date: job.start_date,
            end_date: job.end_date,
            location: job.location.into(),
            created_at: job.created_at,
            updated_at: job.updated_at,
        }
    }
}

/// Worker output DTO
#[derive(Debug, Clone, Serialize)]
pub struct WorkerDto {
    pub id: Uuid,
    pub name: String,
    pub phone: String,
    pub gender: &'static str,
    pub sector: String,
    pub rating: f64,
    pub location: AddressDto,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl From<Worker> for WorkerDto {
    fn from(worker: Worker) -> Self {
        Self {
            id: worker.id,
            name: worker.name,
            phone: worker.phone,
            gender: worker.gender.as_str(),
            sector: worker.sector,
            rating: worker.rating,
            location: worker.location.into(),
            created_at: worker.created_at,
            updated_at: worker.updated_at,
        }
    }
}

/// Application output DTO
#[derive(Debug, Clone, Serialize)]
pub struct ApplicationDto {
    pub id: Uuid,
    pub job_id: Uuid,
    pub worker_id: Uuid,
    pub status: &'static str,
    pub pickup_location: AddressDto,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl From<Application> for ApplicationDto {
    fn from(application: Application) -> Self {
        Self {
            id: application.id,
            job_id: application.job_id,
            worker_id: application.worker_id,
            status: application.status.as_str(),
            pickup_location: application.pickup_location.into(),
            created_at: application.created_at,
        }
    }
}

/// Sector output DTO
#[derive(Debug, Clone, Serialize)]
pub struct SectorDto {
    pub id: Uuid,
    pub name: String,
    pub description: String,
}

impl From<Sector> for SectorDto {
    fn from(sector: Sector) -> Self {
        Self {
            id: sector.id,
            name: sector.name,
            description: sector.description,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone, Utc};

    #[test]
    fn test_job_without_requirement_omits_gender() {
        let at = Utc.with_ymd_and_hms(2025, 3, 1, 9, 0, 0).unwrap();
        let job = Job {
            id: Uuid::nil(),
            employer_id: Uuid::nil(),
            title: "Loader".to_owned(),
            description: String::new(),
            sector: "Logistics".to_owned(),
            wage: 700,
            required_gender: None,
            openings: 2,
            start_date: NaiveDate::from_ymd_opt(2025, 4, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2025, 4, 30).unwrap(),
            location: Address {
                id: Uuid::nil(),
                details: "Gate 2".to_owned(),
                street: "Bhiwandi Road".to_owned(),
                city: "Thane".to_owned(),
                state: "Maharashtra".to_owned(),
                pincode: 421302,
            },
            created_at: at,
            updated_at: at,
        };

        let json = serde_json::to_value(JobDto::from(job)).unwrap();
        assert!(json.get("required_gender").is_none());
        assert_eq!(json["location"]["city"], "Thane");
        assert_eq!(json["start_date"], "2025-04-01");
    }
}
