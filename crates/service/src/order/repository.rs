use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set,
};
use uuid::Uuid;

use common::pagination::Pagination;
use models::order::{self, OrderStatus};

use crate::errors::ServiceError;

/// Persistence contract for orders consumed by the lifecycle engine.
#[async_trait]
pub trait OrderRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<order::Model>, ServiceError>;
    async fn insert(&self, order: order::Model) -> Result<order::Model, ServiceError>;
    async fn set_status(&self, id: Uuid, status: OrderStatus) -> Result<order::Model, ServiceError>;
    async fn exists(&self, id: Uuid) -> Result<bool, ServiceError>;
    async fn delete(&self, id: Uuid) -> Result<(), ServiceError>;
    async fn list(&self, page: Pagination) -> Result<Vec<order::Model>, ServiceError>;
    async fn list_by_client(&self, client_id: Uuid, page: Pagination) -> Result<Vec<order::Model>, ServiceError>;
    async fn list_by_provider(&self, provider_id: Uuid, page: Pagination) -> Result<Vec<order::Model>, ServiceError>;
    async fn list_by_status(&self, status: OrderStatus, page: Pagination) -> Result<Vec<order::Model>, ServiceError>;
    async fn count(&self) -> Result<u64, ServiceError>;
    async fn count_by_status(&self, status: OrderStatus) -> Result<u64, ServiceError>;
}

/// SeaORM-backed repository implementation.
pub struct SeaOrmOrderRepository {
    pub db: DatabaseConnection,
}

impl SeaOrmOrderRepository {
    fn db_err(e: sea_orm::DbErr) -> ServiceError {
        ServiceError::Db(e.to_string())
    }
}

#[async_trait]
impl OrderRepository for SeaOrmOrderRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<order::Model>, ServiceError> {
        order::Entity::find_by_id(id).one(&self.db).await.map_err(Self::db_err)
    }

    async fn insert(&self, m: order::Model) -> Result<order::Model, ServiceError> {
        let am = order::ActiveModel {
            id: Set(m.id),
            status: Set(m.status),
            details: Set(m.details),
            quantity: Set(m.quantity),
            value: Set(m.value),
            event_date: Set(m.event_date),
            client_id: Set(m.client_id),
            provider_id: Set(m.provider_id),
            listing_id: Set(m.listing_id),
            created_at: Set(m.created_at),
        };
        am.insert(&self.db).await.map_err(Self::db_err)
    }

    async fn set_status(&self, id: Uuid, status: OrderStatus) -> Result<order::Model, ServiceError> {
        let mut am: order::ActiveModel = order::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(Self::db_err)?
            .ok_or_else(|| ServiceError::not_found("order"))?
            .into();
        am.status = Set(status);
        am.update(&self.db).await.map_err(Self::db_err)
    }

    async fn exists(&self, id: Uuid) -> Result<bool, ServiceError> {
        let n = order::Entity::find_by_id(id).count(&self.db).await.map_err(Self::db_err)?;
        Ok(n > 0)
    }

    async fn delete(&self, id: Uuid) -> Result<(), ServiceError> {
        order::Entity::delete_by_id(id).exec(&self.db).await.map_err(Self::db_err)?;
        Ok(())
    }

    async fn list(&self, page: Pagination) -> Result<Vec<order::Model>, ServiceError> {
        let (page_idx, per_page) = page.normalize();
        order::Entity::find()
            .order_by_desc(order::Column::CreatedAt)
            .paginate(&self.db, per_page)
            .fetch_page(page_idx)
            .await
            .map_err(Self::db_err)
    }

    async fn list_by_client(&self, client_id: Uuid, page: Pagination) -> Result<Vec<order::Model>, ServiceError> {
        let (page_idx, per_page) = page.normalize();
        order::Entity::find()
            .filter(order::Column::ClientId.eq(client_id))
            .order_by_desc(order::Column::CreatedAt)
            .paginate(&self.db, per_page)
            .fetch_page(page_idx)
            .await
            .map_err(Self::db_err)
    }

    async fn list_by_provider(&self, provider_id: Uuid, page: Pagination) -> Result<Vec<order::Model>, ServiceError> {
        let (page_idx, per_page) = page.normalize();
        order::Entity::find()
            .filter(order::Column::ProviderId.eq(provider_id))
            .order_by_desc(order::Column::CreatedAt)
            .paginate(&self.db, per_page)
            .fetch_page(page_idx)
            .await
            .map_err(Self::db_err)
    }

    async fn list_by_status(&self, status: OrderStatus, page: Pagination) -> Result<Vec<order::Model>, ServiceError> {
        let (page_idx, per_page) = page.normalize();
        order::Entity::find()
            .filter(order::Column::Status.eq(status))
            .order_by_desc(order::Column::CreatedAt)
            .paginate(&self.db, per_page)
            .fetch_page(page_idx)
            .await
            .map_err(Self::db_err)
    }

    async fn count(&self) -> Result<u64, ServiceError> {
        order::Entity::find().count(&self.db).await.map_err(Self::db_err)
    }

    async fn count_by_status(&self, status: OrderStatus) -> Result<u64, ServiceError> {
        order::Entity::find()
            .filter(order::Column::Status.eq(status))
            .count(&self.db)
            .await
            .map_err(Self::db_err)
    }
}
