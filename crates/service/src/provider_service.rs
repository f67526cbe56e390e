use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};
use uuid::Uuid;

use common::pagination::Pagination;
use models::{category, provider_category, provider_profile, user};

use crate::errors::ServiceError;

#[derive(Debug, Clone)]
pub struct ProviderInput {
    pub user_id: Uuid,
    pub bio: Option<String>,
    pub verified: bool,
    pub payout_key: Option<String>,
    pub profile_photo_url: Option<String>,
    pub category_ids: Vec<Uuid>,
}

/// Create a provider profile for an existing user and link its categories.
pub async fn create_provider(db: &DatabaseConnection, input: ProviderInput) -> Result<provider_profile::Model, ServiceError> {
    let owner = user::Entity::find_by_id(input.user_id)
        .one(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?
        .ok_or_else(|| ServiceError::not_found("user"))?;

    let txn = db.begin().await.map_err(|e| ServiceError::Db(e.to_string()))?;
    let am = provider_profile::ActiveModel {
        id: Set(Uuid::new_v4()),
        user_id: Set(owner.id),
        bio: Set(input.bio),
        verified: Set(input.verified),
        payout_key: Set(input.payout_key),
        profile_photo_url: Set(input.profile_photo_url),
        created_at: Set(Utc::now().into()),
    };
    let created = am.insert(&txn).await.map_err(|e| ServiceError::Db(e.to_string()))?;
    replace_categories(&txn, created.id, &input.category_ids).await?;
    txn.commit().await.map_err(|e| ServiceError::Db(e.to_string()))?;
    Ok(created)
}

/// Update a provider profile and replace its category links.
pub async fn update_provider(db: &DatabaseConnection, id: Uuid, input: ProviderInput) -> Result<provider_profile::Model, ServiceError> {
    let owner = user::Entity::find_by_id(input.user_id)
        .one(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?
        .ok_or_else(|| ServiceError::not_found("user"))?;

    let mut am: provider_profile::ActiveModel = provider_profile::Entity::find_by_id(id)
        .one(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?
        .ok_or_else(|| ServiceError::not_found("provider"))?
        .into();

    let txn = db.begin().await.map_err(|e| ServiceError::Db(e.to_string()))?;
    am.user_id = Set(owner.id);
    am.bio = Set(input.bio);
    am.verified = Set(input.verified);
    am.payout_key = Set(input.payout_key);
    am.profile_photo_url = Set(input.profile_photo_url);
    let updated = am.update(&txn).await.map_err(|e| ServiceError::Db(e.to_string()))?;
    replace_categories(&txn, updated.id, &input.category_ids).await?;
    txn.commit().await.map_err(|e| ServiceError::Db(e.to_string()))?;
    Ok(updated)
}

/// Get a provider profile by id.
pub async fn get_provider(db: &DatabaseConnection, id: Uuid) -> Result<Option<provider_profile::Model>, ServiceError> {
    provider_profile::Entity::find_by_id(id)
        .one(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))
}

/// List provider profiles with pagination.
pub async fn list_providers_paginated(db: &DatabaseConnection, opts: Pagination) -> Result<Vec<provider_profile::Model>, ServiceError> {
    let (page_idx, per_page) = opts.normalize();
    provider_profile::Entity::find()
        .order_by_desc(provider_profile::Column::CreatedAt)
        .paginate(db, per_page)
        .fetch_page(page_idx)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))
}

/// Categories linked to a provider.
pub async fn provider_categories(db: &DatabaseConnection, id: Uuid) -> Result<Vec<category::Model>, ServiceError> {
    let links = provider_category::Entity::find()
        .filter(provider_category::Column::ProviderId.eq(id))
        .all(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?;
    let ids: Vec<Uuid> = links.into_iter().map(|l| l.category_id).collect();
    if ids.is_empty() {
        return Ok(Vec::new());
    }
    category::Entity::find()
        .filter(category::Column::Id.is_in(ids))
        .all(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))
}

/// Hard delete a provider profile (category links cascade).
pub async fn delete_provider(db: &DatabaseConnection, id: Uuid) -> Result<(), ServiceError> {
    let existing = provider_profile::Entity::find_by_id(id)
        .one(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?
        .ok_or_else(|| ServiceError::not_found("provider"))?;
    provider_profile::Entity::delete_by_id(existing.id)
        .exec(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?;
    Ok(())
}

pub async fn count_providers(db: &DatabaseConnection) -> Result<u64, ServiceError> {
    provider_profile::Entity::find()
        .count(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))
}

/// Replace the provider's category links with the resolvable ids among
/// `category_ids`; unknown ids are dropped silently.
async fn replace_categories<C: ConnectionTrait>(conn: &C, provider_id: Uuid, category_ids: &[Uuid]) -> Result<(), ServiceError> {
    provider_category::Entity::delete_many()
        .filter(provider_category::Column::ProviderId.eq(provider_id))
        .exec(conn)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?;

    if category_ids.is_empty() {
        return Ok(());
    }
    let known = category::Entity::find()
        .filter(category::Column::Id.is_in(category_ids.to_vec()))
        .all(conn)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?;
    for cat in known {
        let link = provider_category::ActiveModel {
            provider_id: Set(provider_id),
            category_id: Set(cat.id),
        };
        link.insert(conn).await.map_err(|e| ServiceError::Db(e.to_string()))?;
    }
    Ok(())
}
