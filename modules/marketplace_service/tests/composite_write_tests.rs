//! Create/update/delete of address-owning entities against SQLite

mod common;

use common::*;
use marketplace_service::domain::repository::AddressStore;
use marketplace_service::infra::storage::entity::address;
use marketplace_service::infra::storage::SeaOrmAddressStore;
use marketplace_service::*;
use sea_orm::{ConnectionTrait, EntityTrait};
use uuid::Uuid;

#[tokio::test]
async fn test_worker_address_scenario() {
    print_test_header(
        "test_worker_address_scenario",
        &[
            "Address writes happen only when address fields change",
            "Create in Pune, rename, then move to Mumbai",
        ],
    );

    let store = CountingAddressStore::new();
    let module = setup_with(Config::default(), store.clone()).await;
    let service = module.service();

    // Create and read back
    let draft = new_worker("Ravi Kumar", "9876543210");
    let created = service.create_worker(draft.clone()).await.unwrap();
    let fetched = service.get_worker(created.id).await.unwrap();

    assert_eq!(fetched, created);
    assert_eq!(fetched.location.fields(), draft.location);
    assert_eq!(fetched.location.city, "Pune");
    assert_eq!(fetched.location.pincode, 411057);
    assert_eq!(store.calls().create, 1);

    // Rename only: no address write
    store.reset();
    let renamed = NewWorker {
        name: "Ravi K.".to_owned(),
        ..draft.clone()
    };
    let updated = service.update_worker(created.id, renamed).await.unwrap();

    assert_eq!(store.calls().update, 0);
    assert_eq!(updated.name, "Ravi K.");
    assert_eq!(updated.location, created.location);
    let fetched = service.get_worker(created.id).await.unwrap();
    assert_eq!(fetched.location.city, "Pune");
    assert_eq!(fetched.name, "Ravi K.");

    // Move to Mumbai: exactly one address write, same address row
    store.reset();
    let moved = NewWorker {
        name: "Ravi K.".to_owned(),
        location: AddressFields {
            city: "Mumbai".to_owned(),
            ..draft.location.clone()
        },
        ..draft
    };
    let updated = service.update_worker(created.id, moved).await.unwrap();

    assert_eq!(store.calls().update, 1);
    assert_eq!(updated.location.city, "Mumbai");
    assert_eq!(updated.location.id, created.location.id);

    let fetched = service.get_worker(created.id).await.unwrap();
    assert_eq!(fetched.location.city, "Mumbai");
    assert_eq!(fetched.created_at, created.created_at);
    assert_eq!(address_count(module.connection()).await, 1);
}

#[tokio::test]
async fn test_round_trip_every_entity() {
    let module = setup().await;
    let service = module.service();

    let employer_draft = new_employer("hr@shahlogistics.in");
    let employer = service.create_employer(employer_draft.clone()).await.unwrap();
    let fetched = service.get_employer(employer.id).await.unwrap();
    assert_eq!(fetched.email, employer_draft.email);
    assert_eq!(fetched.company, employer_draft.company);
    assert_eq!(fetched.location.fields(), employer_draft.location);

    let job_draft = NewJob {
        required_gender: Some(Gender::Female),
        ..new_job(employer.id, "Packing Associate", 900)
    };
    let job = service.create_job(job_draft.clone()).await.unwrap();
    let fetched = service.get_job(job.id).await.unwrap();
    assert_eq!(fetched, job);
    assert_eq!(fetched.employer_id, employer.id);
    assert_eq!(fetched.required_gender, Some(Gender::Female));
    assert_eq!(fetched.start_date, job_draft.start_date);
    assert_eq!(fetched.end_date, job_draft.end_date);
    assert_eq!(fetched.location.fields(), job_draft.location);

    let worker = service
        .create_worker(new_worker("Sunil Patil", "9011122233"))
        .await
        .unwrap();
    let app_draft = new_application(job.id, worker.id);
    let application = service.apply(app_draft.clone()).await.unwrap();
    let fetched = service.get_application(application.id).await.unwrap();
    assert_eq!(fetched, application);
    assert_eq!(fetched.status, ApplicationStatus::Pending);
    assert_eq!(fetched.pickup_location.fields(), app_draft.pickup_location);

    // One address per parent, never shared
    assert_eq!(address_count(module.connection()).await, 4);
    assert_ne!(job.location.id, employer.location.id);
    assert_ne!(application.pickup_location.id, worker.location.id);
}

#[tokio::test]
async fn test_failed_worker_insert_leaves_no_address() {
    print_test_header(
        "test_failed_worker_insert_leaves_no_address",
        &["Parent insert failure after the address write rolls back both"],
    );

    let module = setup().await;
    fail_on(module.connection(), "INSERT", "workers").await;

    let err = module
        .service()
        .create_worker(new_worker("Ravi Kumar", "9876543210"))
        .await
        .unwrap_err();

    assert!(err.is_consistency(), "expected consistency error, got {err:?}");
    assert_eq!(address_count(module.connection()).await, 0);
}

#[tokio::test]
async fn test_failed_employer_insert_leaves_no_address() {
    let module = setup().await;
    fail_on(module.connection(), "INSERT", "employers").await;

    let err = module
        .service()
        .create_employer(new_employer("hr@shahlogistics.in"))
        .await
        .unwrap_err();

    assert!(err.is_consistency(), "expected consistency error, got {err:?}");
    assert_eq!(address_count(module.connection()).await, 0);
}

#[tokio::test]
async fn test_failed_job_insert_leaves_no_address() {
    let module = setup().await;
    let service = module.service();
    let employer = service
        .create_employer(new_employer("hr@shahlogistics.in"))
        .await
        .unwrap();
    let before = address_count(module.connection()).await;

    fail_on(module.connection(), "INSERT", "jobs").await;
    let err = service
        .create_job(new_job(employer.id, "Loader", 700))
        .await
        .unwrap_err();

    assert!(err.is_consistency(), "expected consistency error, got {err:?}");
    assert_eq!(address_count(module.connection()).await, before);
}

#[tokio::test]
async fn test_failed_application_insert_leaves_no_address() {
    let module = setup().await;
    let service = module.service();
    let employer = service
        .create_employer(new_employer("hr@shahlogistics.in"))
        .await
        .unwrap();
    let job = service
        .create_job(new_job(employer.id, "Loader", 700))
        .await
        .unwrap();
    let worker = service
        .create_worker(new_worker("Ravi Kumar", "9876543210"))
        .await
        .unwrap();
    let before = address_count(module.connection()).await;

    fail_on(module.connection(), "INSERT", "applications").await;
    let err = service
        .apply(new_application(job.id, worker.id))
        .await
        .unwrap_err();

    assert!(err.is_consistency(), "expected consistency error, got {err:?}");
    assert_eq!(address_count(module.connection()).await, before);
}

#[tokio::test]
async fn test_duplicate_phone_rolls_back_new_address() {
    let module = setup().await;
    let service = module.service();
    service
        .create_worker(new_worker("Ravi Kumar", "9876543210"))
        .await
        .unwrap();

    let err = service
        .create_worker(new_worker("Another Ravi", "9876543210"))
        .await
        .unwrap_err();

    assert!(err.is_consistency());
    assert!(std::error::Error::source(&err).is_some());
    assert_eq!(address_count(module.connection()).await, 1);
}

#[tokio::test]
async fn test_failed_parent_update_restores_address() {
    let module = setup().await;
    let service = module.service();
    let worker = service
        .create_worker(new_worker("Ravi Kumar", "9876543210"))
        .await
        .unwrap();

    fail_on(module.connection(), "UPDATE", "workers").await;
    let moved = NewWorker {
        location: mumbai(),
        ..new_worker("Ravi Kumar", "9876543210")
    };
    let err = service.update_worker(worker.id, moved).await.unwrap_err();
    assert!(err.is_consistency(), "expected consistency error, got {err:?}");

    let fetched = service.get_worker(worker.id).await.unwrap();
    assert_eq!(fetched.location.city, "Pune");
}

#[tokio::test]
async fn test_failed_parent_update_without_address_change_is_persistence() {
    let module = setup().await;
    let service = module.service();
    let worker = service
        .create_worker(new_worker("Ravi Kumar", "9876543210"))
        .await
        .unwrap();

    fail_on(module.connection(), "UPDATE", "workers").await;
    let err = service
        .update_worker(worker.id, new_worker("Ravi K.", "9876543210"))
        .await
        .unwrap_err();

    assert!(
        matches!(err, MarketplaceError::Persistence { entity: "Worker", operation: "update", .. }),
        "got {err:?}"
    );
}

#[tokio::test]
async fn test_update_and_delete_unknown_ids() {
    let module = setup().await;
    let service = module.service();
    let missing = Uuid::new_v4();

    assert!(service.get_worker(missing).await.unwrap_err().is_not_found());
    assert!(service
        .update_worker(missing, new_worker("Nobody", "9000000000"))
        .await
        .unwrap_err()
        .is_not_found());
    assert!(service.delete_worker(missing).await.unwrap_err().is_not_found());
    assert!(service.delete_employer(missing).await.unwrap_err().is_not_found());
    assert_eq!(address_count(module.connection()).await, 0);
}

#[tokio::test]
async fn test_delete_removes_owned_address() {
    let module = setup().await;
    let service = module.service();
    let employer = service
        .create_employer(new_employer("hr@shahlogistics.in"))
        .await
        .unwrap();
    let job = service
        .create_job(new_job(employer.id, "Loader", 700))
        .await
        .unwrap();
    assert_eq!(address_count(module.connection()).await, 2);

    service.delete_job(job.id).await.unwrap();
    assert_eq!(address_count(module.connection()).await, 1);
    assert!(service.get_job(job.id).await.unwrap_err().is_not_found());

    service.delete_employer(employer.id).await.unwrap();
    assert_eq!(address_count(module.connection()).await, 0);
}

#[tokio::test]
async fn test_delete_restricted_by_dependents_keeps_everything() {
    let module = setup().await;
    let service = module.service();
    let employer = service
        .create_employer(new_employer("hr@shahlogistics.in"))
        .await
        .unwrap();
    service
        .create_job(new_job(employer.id, "Loader", 700))
        .await
        .unwrap();

    let err = service.delete_employer(employer.id).await.unwrap_err();
    assert!(matches!(err, MarketplaceError::Persistence { .. }), "got {err:?}");

    assert!(service.get_employer(employer.id).await.is_ok());
    assert_eq!(address_count(module.connection()).await, 2);
}

#[tokio::test]
async fn test_dangling_address_reference_is_consistency_error() {
    let module = setup().await;
    let service = module.service();
    let worker = service
        .create_worker(new_worker("Ravi Kumar", "9876543210"))
        .await
        .unwrap();

    let db = module.connection();
    db.execute_unprepared("PRAGMA foreign_keys = OFF").await.unwrap();
    address::Entity::delete_by_id(worker.location.id)
        .exec(db)
        .await
        .unwrap();

    let err = service.get_worker(worker.id).await.unwrap_err();
    assert!(err.is_consistency(), "got {err:?}");
}

#[tokio::test]
async fn test_address_store_contract() {
    let module = setup().await;
    let db = module.connection();
    let store = SeaOrmAddressStore::new();

    let created = store.create(db, pune()).await.unwrap();
    assert_eq!(store.fetch_by_id(db, created.id).await.unwrap(), created);

    let changed = Address {
        street: "University Road".to_owned(),
        ..created.clone()
    };
    assert_eq!(store.update(db, &changed).await.unwrap(), changed);

    store.delete(db, created.id).await.unwrap();
    assert!(store.fetch_by_id(db, created.id).await.unwrap_err().is_not_found());

    // Deleting an id that is already gone is a no-op
    store.delete(db, created.id).await.unwrap();
    store.delete(db, Uuid::new_v4()).await.unwrap();

    let ghost = Address::from_fields(Uuid::new_v4(), pune());
    assert!(store.update(db, &ghost).await.unwrap_err().is_not_found());
}

// ===== Updates across every address owner =====

#[derive(Debug, Clone, Copy)]
enum Owner {
    Worker,
    Employer,
    Job,
    Application,
}

impl Owner {
    const ALL: [Owner; 4] = [Owner::Worker, Owner::Employer, Owner::Job, Owner::Application];

    fn table(self) -> &'static str {
        match self {
            Owner::Worker => "workers",
            Owner::Employer => "employers",
            Owner::Job => "jobs",
            Owner::Application => "applications",
        }
    }
}

fn nagpur() -> AddressFields {
    AddressFields {
        details: "Shed 12, MIDC Hingna".to_owned(),
        street: "Wadi Road".to_owned(),
        city: "Nagpur".to_owned(),
        state: "Maharashtra".to_owned(),
        pincode: 440016,
    }
}

/// One of each entity; `id` and `location` belong to the owner under test
struct Seeded {
    module: MarketplaceModule,
    store: CountingAddressStore,
    owner: Owner,
    employer: Employer,
    job: Job,
    worker: Worker,
    id: Uuid,
    location: Address,
}

async fn seed(owner: Owner) -> Seeded {
    let store = CountingAddressStore::new();
    let module = setup_with(Config::default(), store.clone()).await;
    let service = module.service();

    let employer = service
        .create_employer(new_employer("hr@shahlogistics.in"))
        .await
        .unwrap();
    let job = service
        .create_job(new_job(employer.id, "Loader", 700))
        .await
        .unwrap();
    let worker = service
        .create_worker(new_worker("Ravi Kumar", "9876543210"))
        .await
        .unwrap();
    let application = service
        .apply(new_application(job.id, worker.id))
        .await
        .unwrap();

    let (id, location) = match owner {
        Owner::Worker => (worker.id, worker.location.clone()),
        Owner::Employer => (employer.id, employer.location.clone()),
        Owner::Job => (job.id, job.location.clone()),
        Owner::Application => (application.id, application.pickup_location.clone()),
    };
    store.reset();

    Seeded {
        module,
        store,
        owner,
        employer,
        job,
        worker,
        id,
        location,
    }
}

impl Seeded {
    /// Change a business field and set the address, returning the new address
    async fn update(&self, location: AddressFields) -> Result<Address, MarketplaceError> {
        let service = self.module.service();
        match self.owner {
            Owner::Worker => service
                .update_worker(
                    self.id,
                    NewWorker {
                        name: "Ravi K.".to_owned(),
                        location,
                        ..new_worker("Ravi Kumar", "9876543210")
                    },
                )
                .await
                .map(|w| w.location),
            Owner::Employer => service
                .update_employer(
                    self.id,
                    NewEmployer {
                        company: "Shah Freight LLP".to_owned(),
                        location,
                        ..new_employer("hr@shahlogistics.in")
                    },
                )
                .await
                .map(|e| e.location),
            Owner::Job => service
                .update_job(
                    self.id,
                    NewJob {
                        openings: 9,
                        location,
                        ..new_job(self.employer.id, "Loader", 700)
                    },
                )
                .await
                .map(|j| j.location),
            Owner::Application => service
                .update_application(
                    self.id,
                    NewApplication {
                        status: ApplicationStatus::Accepted,
                        pickup_location: location,
                        ..new_application(self.job.id, self.worker.id)
                    },
                )
                .await
                .map(|a| a.pickup_location),
        }
    }

    async fn stored_location(&self) -> Address {
        let service = self.module.service();
        match self.owner {
            Owner::Worker => service.get_worker(self.id).await.unwrap().location,
            Owner::Employer => service.get_employer(self.id).await.unwrap().location,
            Owner::Job => service.get_job(self.id).await.unwrap().location,
            Owner::Application => {
                service
                    .get_application(self.id)
                    .await
                    .unwrap()
                    .pickup_location
            }
        }
    }
}

#[tokio::test]
async fn test_update_writes_address_only_when_changed() {
    print_test_header(
        "test_update_writes_address_only_when_changed",
        &[
            "Worker, Employer, Job and Application updates",
            "Unchanged address: no address write; changed address: exactly one",
        ],
    );

    for owner in Owner::ALL {
        let seeded = seed(owner).await;
        let addresses = address_count(seeded.module.connection()).await;

        // Same address, different business field
        let kept = seeded
            .update(seeded.location.fields())
            .await
            .unwrap_or_else(|e| panic!("{owner:?}: {e:?}"));
        assert_eq!(seeded.store.calls().update, 0, "{owner:?}");
        assert_eq!(kept, seeded.location, "{owner:?}");

        // New address, same row
        seeded.store.reset();
        let moved = seeded
            .update(nagpur())
            .await
            .unwrap_or_else(|e| panic!("{owner:?}: {e:?}"));
        assert_eq!(seeded.store.calls().update, 1, "{owner:?}");
        assert_eq!(moved.id, seeded.location.id, "{owner:?}");
        assert_eq!(moved.fields(), nagpur(), "{owner:?}");

        assert_eq!(seeded.stored_location().await, moved, "{owner:?}");
        assert_eq!(address_count(seeded.module.connection()).await, addresses, "{owner:?}");
    }
}

#[tokio::test]
async fn test_failed_update_restores_address_for_every_owner() {
    print_test_header(
        "test_failed_update_restores_address_for_every_owner",
        &["A parent UPDATE failing after the address write rolls the address back"],
    );

    for owner in Owner::ALL {
        let seeded = seed(owner).await;
        fail_on(seeded.module.connection(), "UPDATE", owner.table()).await;

        let err = seeded.update(nagpur()).await.unwrap_err();
        assert!(err.is_consistency(), "{owner:?}: expected consistency error, got {err:?}");
        assert_eq!(seeded.store.calls().update, 1, "{owner:?}");

        assert_eq!(seeded.stored_location().await, seeded.location, "{owner:?}");
    }
}
