use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use models::listing_media::{self, MediaKind};
use models::listing;

use crate::errors::ServiceError;

/// Media rows store caller-supplied URLs; the upload itself happens outside
/// this service.
#[derive(Debug, Clone)]
pub struct MediaInput {
    pub kind: MediaKind,
    pub url: String,
    pub short_description: Option<String>,
    pub position: i32,
}

/// Attach a media row to a listing.
pub async fn add_media(db: &DatabaseConnection, listing_id: Uuid, input: MediaInput) -> Result<listing_media::Model, ServiceError> {
    listing_media::validate_url(&input.url)?;
    listing::Entity::find_by_id(listing_id)
        .one(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?
        .ok_or_else(|| ServiceError::not_found("listing"))?;

    let am = listing_media::ActiveModel {
        id: Set(Uuid::new_v4()),
        listing_id: Set(listing_id),
        kind: Set(input.kind),
        url: Set(input.url),
        short_description: Set(input.short_description),
        position: Set(input.position),
        created_at: Set(Utc::now().into()),
    };
    am.insert(db).await.map_err(|e| ServiceError::Db(e.to_string()))
}

/// Update a media row; the listing binding never changes.
pub async fn update_media(db: &DatabaseConnection, id: Uuid, input: MediaInput) -> Result<listing_media::Model, ServiceError> {
    listing_media::validate_url(&input.url)?;
    let mut am: listing_media::ActiveModel = listing_media::Entity::find_by_id(id)
        .one(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?
        .ok_or_else(|| ServiceError::not_found("media"))?
        .into();
    am.kind = Set(input.kind);
    am.url = Set(input.url);
    am.short_description = Set(input.short_description);
    am.position = Set(input.position);
    am.update(db).await.map_err(|e| ServiceError::Db(e.to_string()))
}

/// Remove a media row.
pub async fn delete_media(db: &DatabaseConnection, id: Uuid) -> Result<(), ServiceError> {
    let existing = listing_media::Entity::find_by_id(id)
        .one(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?
        .ok_or_else(|| ServiceError::not_found("media"))?;
    listing_media::Entity::delete_by_id(existing.id)
        .exec(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?;
    Ok(())
}

/// A listing's gallery, ordered by position.
pub async fn list_media_by_listing(db: &DatabaseConnection, listing_id: Uuid) -> Result<Vec<listing_media::Model>, ServiceError> {
    listing_media::Entity::find()
        .filter(listing_media::Column::ListingId.eq(listing_id))
        .order_by_asc(listing_media::Column::Position)
        .all(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))
}
