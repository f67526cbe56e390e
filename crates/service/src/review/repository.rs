use async_trait::async_trait;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use sea_orm::sea_query::{Expr, Func};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Set,
};
use uuid::Uuid;

use common::pagination::Pagination;
use models::{listing, review};

use crate::errors::ServiceError;

/// Persistence contract for reviews consumed by the eligibility engine.
///
/// Provider-scoped queries aggregate across all listings owned by that
/// provider. Averages return `None` when no rating exists; the engine maps
/// that to the documented 0.0 default.
#[async_trait]
pub trait ReviewRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<review::Model>, ServiceError>;
    async fn insert(&self, review: review::Model) -> Result<review::Model, ServiceError>;
    async fn update_content(&self, id: Uuid, rating: i32, comment: Option<String>) -> Result<review::Model, ServiceError>;
    async fn delete(&self, id: Uuid) -> Result<(), ServiceError>;
    async fn exists_for_order_and_user(&self, order_id: Uuid, user_id: Uuid) -> Result<bool, ServiceError>;
    async fn list(&self, page: Pagination) -> Result<Vec<review::Model>, ServiceError>;
    async fn list_by_listing(&self, listing_id: Uuid, page: Pagination) -> Result<Vec<review::Model>, ServiceError>;
    async fn list_by_user(&self, user_id: Uuid, page: Pagination) -> Result<Vec<review::Model>, ServiceError>;
    async fn list_by_provider(&self, provider_id: Uuid, page: Pagination) -> Result<Vec<review::Model>, ServiceError>;
    async fn average_rating_by_listing(&self, listing_id: Uuid) -> Result<Option<f64>, ServiceError>;
    async fn average_rating_by_provider(&self, provider_id: Uuid) -> Result<Option<f64>, ServiceError>;
    async fn count_by_listing(&self, listing_id: Uuid) -> Result<u64, ServiceError>;
    async fn count_by_provider(&self, provider_id: Uuid) -> Result<u64, ServiceError>;
}

/// SeaORM-backed repository implementation.
pub struct SeaOrmReviewRepository {
    pub db: DatabaseConnection,
}

impl SeaOrmReviewRepository {
    fn db_err(e: sea_orm::DbErr) -> ServiceError {
        ServiceError::Db(e.to_string())
    }

    /// Ids of the listings owned by a provider, for provider-level
    /// aggregation without lazy relationship loading.
    async fn provider_listing_ids(&self, provider_id: Uuid) -> Result<Vec<Uuid>, ServiceError> {
        listing::Entity::find()
            .filter(listing::Column::ProviderId.eq(provider_id))
            .select_only()
            .column(listing::Column::Id)
            .into_tuple::<Uuid>()
            .all(&self.db)
            .await
            .map_err(Self::db_err)
    }
}

#[async_trait]
impl ReviewRepository for SeaOrmReviewRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<review::Model>, ServiceError> {
        review::Entity::find_by_id(id).one(&self.db).await.map_err(Self::db_err)
    }

    async fn insert(&self, m: review::Model) -> Result<review::Model, ServiceError> {
        let am = review::ActiveModel {
            id: Set(m.id),
            order_id: Set(m.order_id),
            user_id: Set(m.user_id),
            listing_id: Set(m.listing_id),
            rating: Set(m.rating),
            comment: Set(m.comment),
            created_at: Set(m.created_at),
        };
        am.insert(&self.db).await.map_err(Self::db_err)
    }

    async fn update_content(&self, id: Uuid, rating: i32, comment: Option<String>) -> Result<review::Model, ServiceError> {
        let mut am: review::ActiveModel = review::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(Self::db_err)?
            .ok_or_else(|| ServiceError::not_found("review"))?
            .into();
        am.rating = Set(rating);
        am.comment = Set(comment);
        am.update(&self.db).await.map_err(Self::db_err)
    }

    async fn delete(&self, id: Uuid) -> Result<(), ServiceError> {
        review::Entity::delete_by_id(id).exec(&self.db).await.map_err(Self::db_err)?;
        Ok(())
    }

    async fn exists_for_order_and_user(&self, order_id: Uuid, user_id: Uuid) -> Result<bool, ServiceError> {
        let n = review::Entity::find()
            .filter(review::Column::OrderId.eq(order_id))
            .filter(review::Column::UserId.eq(user_id))
            .count(&self.db)
            .await
            .map_err(Self::db_err)?;
        Ok(n > 0)
    }

    async fn list(&self, page: Pagination) -> Result<Vec<review::Model>, ServiceError> {
        let (page_idx, per_page) = page.normalize();
        review::Entity::find()
            .order_by_desc(review::Column::CreatedAt)
            .paginate(&self.db, per_page)
            .fetch_page(page_idx)
            .await
            .map_err(Self::db_err)
    }

    async fn list_by_listing(&self, listing_id: Uuid, page: Pagination) -> Result<Vec<review::Model>, ServiceError> {
        let (page_idx, per_page) = page.normalize();
        review::Entity::find()
            .filter(review::Column::ListingId.eq(listing_id))
            .order_by_desc(review::Column::CreatedAt)
            .paginate(&self.db, per_page)
            .fetch_page(page_idx)
            .await
            .map_err(Self::db_err)
    }

    async fn list_by_user(&self, user_id: Uuid, page: Pagination) -> Result<Vec<review::Model>, ServiceError> {
        let (page_idx, per_page) = page.normalize();
        review::Entity::find()
            .filter(review::Column::UserId.eq(user_id))
            .order_by_desc(review::Column::CreatedAt)
            .paginate(&self.db, per_page)
            .fetch_page(page_idx)
            .await
            .map_err(Self::db_err)
    }

    async fn list_by_provider(&self, provider_id: Uuid, page: Pagination) -> Result<Vec<review::Model>, ServiceError> {
        let ids = self.provider_listing_ids(provider_id).await?;
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let (page_idx, per_page) = page.normalize();
        review::Entity::find()
            .filter(review::Column::ListingId.is_in(ids))
            .order_by_desc(review::Column::CreatedAt)
            .paginate(&self.db, per_page)
            .fetch_page(page_idx)
            .await
            .map_err(Self::db_err)
    }

    async fn average_rating_by_listing(&self, listing_id: Uuid) -> Result<Option<f64>, ServiceError> {
        let avg = review::Entity::find()
            .filter(review::Column::ListingId.eq(listing_id))
            .select_only()
            .expr_as(Func::avg(Expr::col(review::Column::Rating)), "avg_rating")
            .into_tuple::<Option<Decimal>>()
            .one(&self.db)
            .await
            .map_err(Self::db_err)?
            .flatten();
        Ok(avg.and_then(|d| d.to_f64()))
    }

    async fn average_rating_by_provider(&self, provider_id: Uuid) -> Result<Option<f64>, ServiceError> {
        let ids = self.provider_listing_ids(provider_id).await?;
        if ids.is_empty() {
            return Ok(None);
        }
        let avg = review::Entity::find()
            .filter(review::Column::ListingId.is_in(ids))
            .select_only()
            .expr_as(Func::avg(Expr::col(review::Column::Rating)), "avg_rating")
            .into_tuple::<Option<Decimal>>()
            .one(&self.db)
            .await
            .map_err(Self::db_err)?
            .flatten();
        Ok(avg.and_then(|d| d.to_f64()))
    }

    async fn count_by_listing(&self, listing_id: Uuid) -> Result<u64, ServiceError> {
        review::Entity::find()
            .filter(review::Column::ListingId.eq(listing_id))
            .count(&self.db)
            .await
            .map_err(Self::db_err)
    }

    async fn count_by_provider(&self, provider_id: Uuid) -> Result<u64, ServiceError> {
        let ids = self.provider_listing_ids(provider_id).await?;
        if ids.is_empty() {
            return Ok(0);
        }
        review::Entity::find()
            .filter(review::Column::ListingId.is_in(ids))
            .count(&self.db)
            .await
            .map_err(Self::db_err)
    }
}
