//! Transactional create/update/delete for address-owning entities
//!
//! Every composite write opens one transaction, hands it to both the
//! [`AddressStore`] and the parent-row statements, and commits only after
//! every step succeeded. On any error the transaction is rolled back, so a
//! failed parent insert never leaves an orphaned address behind.

use std::sync::Arc;

use crate::contract::{Address, MarketplaceError};
use crate::domain::repository::AddressStore;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::ActiveValue::Set;
use sea_orm::{
    ActiveModelTrait, ConnectionTrait, DatabaseConnection, DatabaseTransaction, DbErr,
    EntityTrait, TransactionTrait,
};
use uuid::Uuid;

use super::composer::{AddressOwner, Applications, Employers, Jobs, Workers};
use super::entity::{address, application, employer, job, worker};

/// Joined read shape: the parent row with the address its foreign key
/// points at (absent only if the reference dangles)
pub type JoinedRow<T> = (<T as AddressOwner>::Row, Option<address::Model>);

/// Parent-table statements for an [`AddressOwner`]
#[async_trait]
pub trait OwnerTable: AddressOwner {
    /// Insert a new parent row referencing `location_id`
    async fn insert_row<C>(
        &self,
        conn: &C,
        id: Uuid,
        record: Self::Record,
        location_id: Uuid,
        now: DateTime<Utc>,
    ) -> Result<Self::Row, DbErr>
    where
        C: ConnectionTrait + Send + Sync;

    async fn find_row<C>(&self, conn: &C, id: Uuid) -> Result<Option<Self::Row>, DbErr>
    where
        C: ConnectionTrait + Send + Sync;

    /// Parent row joined with its address in one statement
    async fn find_joined<C>(&self, conn: &C, id: Uuid) -> Result<Option<JoinedRow<Self>>, DbErr>
    where
        C: ConnectionTrait + Send + Sync;

    /// Overwrite the business fields; the address reference is untouched
    async fn update_row<C>(
        &self,
        conn: &C,
        id: Uuid,
        record: Self::Record,
        now: DateTime<Utc>,
    ) -> Result<Self::Row, DbErr>
    where
        C: ConnectionTrait + Send + Sync;

    async fn delete_row<C>(&self, conn: &C, id: Uuid) -> Result<u64, DbErr>
    where
        C: ConnectionTrait + Send + Sync;
}

/// The four parent tables share the same id/timestamp layout and differ only
/// in entity module and address column.
macro_rules! owner_table {
    ($owner:ty, $table:ident, $location:ident) => {
        #[async_trait]
        impl OwnerTable for $owner {
            async fn insert_row<C>(
                &self,
                conn: &C,
                id: Uuid,
                mut record: $table::ActiveModel,
                location_id: Uuid,
                now: DateTime<Utc>,
            ) -> Result<$table::Model, DbErr>
            where
                C: ConnectionTrait + Send + Sync,
            {
                record.id = Set(id);
                record.$location = Set(location_id);
                record.created_at = Set(now);
                record.updated_at = Set(now);
                record.insert(conn).await
            }

            async fn find_row<C>(&self, conn: &C, id: Uuid) -> Result<Option<$table::Model>, DbErr>
            where
                C: ConnectionTrait + Send + Sync,
            {
                $table::Entity::find_by_id(id).one(conn).await
            }

            async fn find_joined<C>(
                &self,
                conn: &C,
                id: Uuid,
            ) -> Result<Option<JoinedRow<Self>>, DbErr>
            where
                C: ConnectionTrait + Send + Sync,
            {
                $table::Entity::find_by_id(id)
                    .find_also_related(address::Entity)
                    .one(conn)
                    .await
            }

            async fn update_row<C>(
                &self,
                conn: &C,
                id: Uuid,
                mut record: $table::ActiveModel,
                now: DateTime<Utc>,
            ) -> Result<$table::Model, DbErr>
            where
                C: ConnectionTrait + Send + Sync,
            {
                record.id = Set(id);
                record.updated_at = Set(now);
                record.update(conn).await
            }

            async fn delete_row<C>(&self, conn: &C, id: Uuid) -> Result<u64, DbErr>
            where
                C: ConnectionTrait + Send + Sync,
            {
                let result = $table::Entity::delete_by_id(id).exec(conn).await?;
                Ok(result.rows_affected)
            }
        }
    };
}

owner_table!(Workers, worker, location_id);
owner_table!(Employers, employer, location_id);
owner_table!(Jobs, job, location_id);
owner_table!(Applications, application, pickup_location_id);

/// Generic create/fetch/update/delete for one address-owning entity
pub struct AddressedRepository<T, S> {
    db: Arc<DatabaseConnection>,
    owner: T,
    store: S,
}

impl<T, S> AddressedRepository<T, S>
where
    T: OwnerTable,
    S: AddressStore,
{
    pub fn new(db: Arc<DatabaseConnection>, owner: T, store: S) -> Self {
        Self { db, owner, store }
    }

    /// Connection for plain (non-transactional) reads
    pub fn connection(&self) -> &DatabaseConnection {
        &self.db
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Create the address, then the parent row pointing at it
    pub async fn create(&self, draft: T::Draft) -> Result<T::Domain, MarketplaceError> {
        const OP: &str = "create";

        let (record, fields) = T::decompose(draft);
        let id = Uuid::new_v4();
        let now = Utc::now();

        let txn = self.begin(OP).await?;
        let outcome: Result<T::Domain, MarketplaceError> = async {
            let address = self.store.create(&txn, fields).await?;

            let row = self
                .owner
                .insert_row(&txn, id, record, address.id, now)
                .await
                .map_err(|e| {
                    MarketplaceError::after_partial_write(
                        T::ENTITY,
                        OP,
                        MarketplaceError::persistence(T::ENTITY, "insert", e),
                    )
                })?;

            Ok::<_, MarketplaceError>(T::compose(row, address))
        }
        .await;

        let created = self.finish(txn, OP, outcome).await?;
        tracing::info!(entity = T::ENTITY, %id, "Created");
        Ok(created)
    }

    /// Read the parent and its address through a single join
    pub async fn fetch_by_id(&self, id: Uuid) -> Result<T::Domain, MarketplaceError> {
        tracing::debug!(entity = T::ENTITY, %id, "Fetching");

        let joined = self
            .owner
            .find_joined(self.connection(), id)
            .await
            .map_err(MarketplaceError::db(T::ENTITY, "fetch"))?
            .ok_or_else(|| MarketplaceError::not_found(T::ENTITY, id))?;

        compose_joined::<T>(joined, "fetch")
    }

    /// Replace the parent's business fields, writing the address only when
    /// one of its fields differs from what is stored
    pub async fn update(&self, id: Uuid, draft: T::Draft) -> Result<T::Domain, MarketplaceError> {
        const OP: &str = "update";

        let (record, fields) = T::decompose(draft);
        let now = Utc::now();

        let txn = self.begin(OP).await?;
        let outcome: Result<T::Domain, MarketplaceError> = async {
            let current = self
                .owner
                .find_row(&txn, id)
                .await
                .map_err(MarketplaceError::db(T::ENTITY, OP))?
                .ok_or_else(|| MarketplaceError::not_found(T::ENTITY, id))?;

            let existing = self.store.fetch_by_id(&txn, T::location_id(&current)).await?;

            let address_written = T::address_changed(&existing, &fields);
            let address = if address_written {
                self.store
                    .update(&txn, &Address::from_fields(existing.id, fields))
                    .await?
            } else {
                tracing::debug!(
                    entity = T::ENTITY,
                    %id,
                    address_id = %existing.id,
                    "Address unchanged, skipping address write"
                );
                existing
            };

            let row = match self.owner.update_row(&txn, id, record, now).await {
                Ok(row) => row,
                Err(e) => {
                    let err = MarketplaceError::persistence(T::ENTITY, OP, e);
                    return Err(if address_written {
                        MarketplaceError::after_partial_write(T::ENTITY, OP, err)
                    } else {
                        err
                    });
                }
            };

            Ok::<_, MarketplaceError>(T::compose(row, address))
        }
        .await;

        let updated = self.finish(txn, OP, outcome).await?;
        tracing::info!(entity = T::ENTITY, %id, "Updated");
        Ok(updated)
    }

    /// Delete the parent row, then the address it owned
    pub async fn delete(&self, id: Uuid) -> Result<(), MarketplaceError> {
        const OP: &str = "delete";

        let txn = self.begin(OP).await?;
        let outcome: Result<(), MarketplaceError> = async {
            let current = self
                .owner
                .find_row(&txn, id)
                .await
                .map_err(MarketplaceError::db(T::ENTITY, OP))?
                .ok_or_else(|| MarketplaceError::not_found(T::ENTITY, id))?;

            self.owner
                .delete_row(&txn, id)
                .await
                .map_err(MarketplaceError::db(T::ENTITY, OP))?;

            self.store
                .delete(&txn, T::location_id(&current))
                .await
                .map_err(|e| MarketplaceError::after_partial_write(T::ENTITY, OP, e))
        }
        .await;

        self.finish(txn, OP, outcome).await?;
        tracing::info!(entity = T::ENTITY, %id, "Deleted");
        Ok(())
    }

    /// Compose every row of a joined listing
    pub fn compose_all(
        &self,
        rows: Vec<JoinedRow<T>>,
    ) -> Result<Vec<T::Domain>, MarketplaceError> {
        rows.into_iter()
            .map(|joined| compose_joined::<T>(joined, "list"))
            .collect()
    }

    async fn begin(&self, operation: &'static str) -> Result<DatabaseTransaction, MarketplaceError> {
        self.db
            .begin()
            .await
            .map_err(MarketplaceError::db(T::ENTITY, operation))
    }

    async fn finish<R>(
        &self,
        txn: DatabaseTransaction,
        operation: &'static str,
        outcome: Result<R, MarketplaceError>,
    ) -> Result<R, MarketplaceError> {
        match outcome {
            Ok(value) => {
                txn.commit()
                    .await
                    .map_err(MarketplaceError::db(T::ENTITY, operation))?;
                Ok(value)
            }
            Err(e) => {
                if let Err(rollback_err) = txn.rollback().await {
                    tracing::warn!(
                        entity = T::ENTITY,
                        operation,
                        error = %rollback_err,
                        "Rollback failed"
                    );
                }
                tracing::warn!(entity = T::ENTITY, operation, error = %e, "Transaction rolled back");
                Err(e)
            }
        }
    }
}

fn compose_joined<T: AddressOwner>(
    (row, address): JoinedRow<T>,
    operation: &'static str,
) -> Result<T::Domain, MarketplaceError> {
    match address {
        Some(address) => Ok(T::compose(row, address.into())),
        None => Err(MarketplaceError::consistency(
            T::ENTITY,
            operation,
            format!("references missing address {}", T::location_id(&row)),
        )),
    }
}
