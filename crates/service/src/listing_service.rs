use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::sea_query::{Expr, Func};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use common::pagination::Pagination;
use models::{category, listing, provider_profile};

use crate::errors::ServiceError;

#[derive(Debug, Clone)]
pub struct ListingInput {
    pub provider_id: Uuid,
    pub category_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub base_price: Decimal,
    pub active: bool,
    pub avg_duration: Option<Decimal>,
}

/// Optional search filters; absent fields do not constrain the query.
#[derive(Debug, Clone, Default)]
pub struct ListingFilters {
    pub category_id: Option<Uuid>,
    pub provider_id: Option<Uuid>,
    pub min_price: Option<Decimal>,
    pub max_price: Option<Decimal>,
    pub search: Option<String>,
}

async fn resolve_refs(db: &DatabaseConnection, input: &ListingInput) -> Result<(), ServiceError> {
    provider_profile::Entity::find_by_id(input.provider_id)
        .one(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?
        .ok_or_else(|| ServiceError::not_found("provider"))?;
    category::Entity::find_by_id(input.category_id)
        .one(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?
        .ok_or_else(|| ServiceError::not_found("category"))?;
    Ok(())
}

/// Publish a listing under a provider and category.
pub async fn create_listing(db: &DatabaseConnection, input: ListingInput) -> Result<listing::Model, ServiceError> {
    listing::validate_title(&input.title)?;
    listing::validate_base_price(input.base_price)?;
    resolve_refs(db, &input).await?;

    let am = listing::ActiveModel {
        id: Set(Uuid::new_v4()),
        provider_id: Set(input.provider_id),
        category_id: Set(input.category_id),
        title: Set(input.title),
        description: Set(input.description),
        base_price: Set(input.base_price),
        active: Set(input.active),
        avg_duration: Set(input.avg_duration),
        created_at: Set(Utc::now().into()),
        updated_at: Set(None),
    };
    am.insert(db).await.map_err(|e| ServiceError::Db(e.to_string()))
}

/// Get a listing by id.
pub async fn get_listing(db: &DatabaseConnection, id: Uuid) -> Result<Option<listing::Model>, ServiceError> {
    listing::Entity::find_by_id(id)
        .one(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))
}

/// Replace a listing's fields; stamps `updated_at`.
pub async fn update_listing(db: &DatabaseConnection, id: Uuid, input: ListingInput) -> Result<listing::Model, ServiceError> {
    listing::validate_title(&input.title)?;
    listing::validate_base_price(input.base_price)?;
    resolve_refs(db, &input).await?;

    let mut am: listing::ActiveModel = listing::Entity::find_by_id(id)
        .one(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?
        .ok_or_else(|| ServiceError::not_found("listing"))?
        .into();
    am.provider_id = Set(input.provider_id);
    am.category_id = Set(input.category_id);
    am.title = Set(input.title);
    am.description = Set(input.description);
    am.base_price = Set(input.base_price);
    am.active = Set(input.active);
    am.avg_duration = Set(input.avg_duration);
    am.updated_at = Set(Some(Utc::now().into()));
    am.update(db).await.map_err(|e| ServiceError::Db(e.to_string()))
}

/// Hard delete a listing.
pub async fn delete_listing(db: &DatabaseConnection, id: Uuid) -> Result<(), ServiceError> {
    let existing = listing::Entity::find_by_id(id)
        .one(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?
        .ok_or_else(|| ServiceError::not_found("listing"))?;
    listing::Entity::delete_by_id(existing.id)
        .exec(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?;
    Ok(())
}

/// List listings with pagination, newest first.
pub async fn list_listings_paginated(db: &DatabaseConnection, opts: Pagination) -> Result<Vec<listing::Model>, ServiceError> {
    let (page_idx, per_page) = opts.normalize();
    listing::Entity::find()
        .order_by_desc(listing::Column::CreatedAt)
        .paginate(db, per_page)
        .fetch_page(page_idx)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))
}

/// Filtered search: category, provider, price window, and a case-insensitive
/// substring match over title and description.
pub async fn list_listings_by_filters(
    db: &DatabaseConnection,
    filters: ListingFilters,
    opts: Pagination,
) -> Result<Vec<listing::Model>, ServiceError> {
    let mut cond = Condition::all();
    if let Some(cid) = filters.category_id {
        cond = cond.add(listing::Column::CategoryId.eq(cid));
    }
    if let Some(pid) = filters.provider_id {
        cond = cond.add(listing::Column::ProviderId.eq(pid));
    }
    if let Some(min) = filters.min_price {
        cond = cond.add(listing::Column::BasePrice.gte(min));
    }
    if let Some(max) = filters.max_price {
        cond = cond.add(listing::Column::BasePrice.lte(max));
    }
    if let Some(term) = filters.search.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
        let pattern = format!("%{}%", term.to_lowercase());
        cond = cond.add(
            Condition::any()
                .add(Expr::expr(Func::lower(Expr::col(listing::Column::Title))).like(pattern.clone()))
                .add(Expr::expr(Func::lower(Expr::col(listing::Column::Description))).like(pattern)),
        );
    }

    let (page_idx, per_page) = opts.normalize();
    listing::Entity::find()
        .filter(cond)
        .order_by_desc(listing::Column::CreatedAt)
        .paginate(db, per_page)
        .fetch_page(page_idx)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))
}

/// Flip the active flag.
pub async fn toggle_listing_active(db: &DatabaseConnection, id: Uuid) -> Result<listing::Model, ServiceError> {
    let found = listing::Entity::find_by_id(id)
        .one(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?
        .ok_or_else(|| ServiceError::not_found("listing"))?;
    let active = found.active;
    let mut am: listing::ActiveModel = found.into();
    am.active = Set(!active);
    am.updated_at = Set(Some(Utc::now().into()));
    am.update(db).await.map_err(|e| ServiceError::Db(e.to_string()))
}

pub async fn count_listings(db: &DatabaseConnection) -> Result<u64, ServiceError> {
    listing::Entity::find()
        .count(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))
}

pub async fn count_active_listings(db: &DatabaseConnection) -> Result<u64, ServiceError> {
    listing::Entity::find()
        .filter(listing::Column::Active.eq(true))
        .count(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::get_db;
    use crate::{category_service, provider_service, user_service};
    use models::user::UserKind;

    #[tokio::test]
    async fn listing_crud_and_filters() -> Result<(), anyhow::Error> {
        if std::env::var("SKIP_DB_TESTS").is_ok() { return Ok(()); }
        let db = get_db().await?;

        let owner = user_service::create_user(
            &db,
            user_service::NewUser {
                name: "Provider".into(),
                email: format!("listing_{}@example.com", Uuid::new_v4()),
                password: "Secret123".into(),
                cellphone_number: None,
                kind: UserKind::Provider,
                address_id: None,
            },
        )
        .await?;
        let provider = provider_service::create_provider(
            &db,
            provider_service::ProviderInput {
                user_id: owner.id,
                bio: None,
                verified: true,
                payout_key: None,
                profile_photo_url: None,
                category_ids: vec![],
            },
        )
        .await?;
        let cat = category_service::create_category(
            &db,
            &format!("listing_cat_{}", Uuid::new_v4()),
            None,
        )
        .await?;

        let created = create_listing(
            &db,
            ListingInput {
                provider_id: provider.id,
                category_id: cat.id,
                title: "Deep cleaning".into(),
                description: Some("full apartment cleaning".into()),
                base_price: Decimal::new(12000, 2),
                active: true,
                avg_duration: None,
            },
        )
        .await?;
        assert!(created.active);

        let by_filter = list_listings_by_filters(
            &db,
            ListingFilters {
                provider_id: Some(provider.id),
                search: Some("cleaning".into()),
                ..Default::default()
            },
            Pagination::default(),
        )
        .await?;
        assert!(by_filter.iter().any(|l| l.id == created.id));

        let none = list_listings_by_filters(
            &db,
            ListingFilters {
                provider_id: Some(provider.id),
                min_price: Some(Decimal::new(100_000, 2)),
                ..Default::default()
            },
            Pagination::default(),
        )
        .await?;
        assert!(none.iter().all(|l| l.id != created.id));

        let toggled = toggle_listing_active(&db, created.id).await?;
        assert!(!toggled.active);

        delete_listing(&db, created.id).await?;
        assert!(get_listing(&db, created.id).await?.is_none());

        provider_service::delete_provider(&db, provider.id).await?;
        category_service::delete_category(&db, cat.id).await?;
        user_service::delete_user(&db, owner.id).await?;
        Ok(())
    }
}
