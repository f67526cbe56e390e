//! Entity lookup contracts shared by the order and review engines.
//!
//! The engines never touch the database directly; every referenced entity is
//! resolved through one of these per-entity contracts so that validation
//! decisions are made on explicitly loaded rows.

use async_trait::async_trait;
use sea_orm::{DatabaseConnection, EntityTrait};
use uuid::Uuid;

use models::{listing, provider_profile, user};

use crate::errors::ServiceError;

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<user::Model>, ServiceError>;
}

#[async_trait]
pub trait ProviderRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<provider_profile::Model>, ServiceError>;
}

#[async_trait]
pub trait ListingRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<listing::Model>, ServiceError>;
}

/// SeaORM-backed lookups over the shared connection pool.
pub struct SeaOrmEntityStore {
    pub db: DatabaseConnection,
}

#[async_trait]
impl UserRepository for SeaOrmEntityStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<user::Model>, ServiceError> {
        user::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| ServiceError::Db(e.to_string()))
    }
}

#[async_trait]
impl ProviderRepository for SeaOrmEntityStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<provider_profile::Model>, ServiceError> {
        provider_profile::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| ServiceError::Db(e.to_string()))
    }
}

#[async_trait]
impl ListingRepository for SeaOrmEntityStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<listing::Model>, ServiceError> {
        listing::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| ServiceError::Db(e.to_string()))
    }
}
