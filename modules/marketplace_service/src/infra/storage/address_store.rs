//! SeaORM implementation of the address store

use crate::contract::{Address, AddressFields, MarketplaceError};
use crate::domain::repository::AddressStore;
use async_trait::async_trait;
use sea_orm::{ActiveModelTrait, ConnectionTrait, DbErr, EntityTrait};
use uuid::Uuid;

use super::entity::address;

const ENTITY: &str = "Address";

/// Address store backed by the `addresses` table
#[derive(Debug, Clone, Copy, Default)]
pub struct SeaOrmAddressStore;

impl SeaOrmAddressStore {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl AddressStore for SeaOrmAddressStore {
    async fn create<C>(&self, conn: &C, fields: AddressFields) -> Result<Address, MarketplaceError>
    where
        C: ConnectionTrait + Send + Sync,
    {
        let address = Address::from_fields(Uuid::new_v4(), fields);
        let active: address::ActiveModel = (&address).into();

        let row = active
            .insert(conn)
            .await
            .map_err(MarketplaceError::db(ENTITY, "create"))?;

        tracing::debug!(address_id = %row.id, "Address created");
        Ok(row.into())
    }

    async fn update<C>(&self, conn: &C, address: &Address) -> Result<Address, MarketplaceError>
    where
        C: ConnectionTrait + Send + Sync,
    {
        let active: address::ActiveModel = address.into();

        match active.update(conn).await {
            Ok(row) => {
                tracing::debug!(address_id = %row.id, "Address updated");
                Ok(row.into())
            }
            Err(DbErr::RecordNotUpdated) => Err(MarketplaceError::not_found(ENTITY, address.id)),
            Err(e) => Err(MarketplaceError::persistence(ENTITY, "update", e)),
        }
    }

    async fn fetch_by_id<C>(&self, conn: &C, id: Uuid) -> Result<Address, MarketplaceError>
    where
        C: ConnectionTrait + Send + Sync,
    {
        address::Entity::find_by_id(id)
            .one(conn)
            .await
            .map_err(MarketplaceError::db(ENTITY, "fetch"))?
            .map(Into::into)
            .ok_or_else(|| MarketplaceError::not_found(ENTITY, id))
    }

    async fn delete<C>(&self, conn: &C, id: Uuid) -> Result<(), MarketplaceError>
    where
        C: ConnectionTrait + Send + Sync,
    {
        let result = address::Entity::delete_by_id(id)
            .exec(conn)
            .await
            .map_err(MarketplaceError::db(ENTITY, "delete"))?;

        if result.rows_affected == 0 {
            tracing::debug!(address_id = %id, "Address already absent, nothing to delete");
        }
        Ok(())
    }
}
