use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryOrder, Set,
};
use uuid::Uuid;

use common::pagination::Pagination;
use models::order;
use models::payment::{self, PaymentMethod, PaymentStatus};

use crate::errors::ServiceError;

/// Payment rows are stored facts; recording one never touches the order's
/// lifecycle status.
#[derive(Debug, Clone)]
pub struct PaymentInput {
    pub order_id: Uuid,
    pub method: PaymentMethod,
    pub status: PaymentStatus,
    pub value: Decimal,
    pub transaction_id: i64,
}

/// Record a payment against an existing order.
pub async fn create_payment(db: &DatabaseConnection, input: PaymentInput) -> Result<payment::Model, ServiceError> {
    payment::validate_value(input.value)?;
    order::Entity::find_by_id(input.order_id)
        .one(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?
        .ok_or_else(|| ServiceError::not_found("order"))?;

    let now = Utc::now();
    let am = payment::ActiveModel {
        id: Set(Uuid::new_v4()),
        order_id: Set(input.order_id),
        method: Set(input.method),
        status: Set(input.status),
        value: Set(input.value),
        transaction_id: Set(input.transaction_id),
        created_at: Set(now.into()),
        updated_at: Set(now.into()),
    };
    am.insert(db).await.map_err(|e| ServiceError::Db(e.to_string()))
}

/// Get a payment by id.
pub async fn get_payment(db: &DatabaseConnection, id: Uuid) -> Result<Option<payment::Model>, ServiceError> {
    payment::Entity::find_by_id(id)
        .one(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))
}

/// List payments with pagination, newest first.
pub async fn list_payments_paginated(db: &DatabaseConnection, opts: Pagination) -> Result<Vec<payment::Model>, ServiceError> {
    let (page_idx, per_page) = opts.normalize();
    payment::Entity::find()
        .order_by_desc(payment::Column::CreatedAt)
        .paginate(db, per_page)
        .fetch_page(page_idx)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))
}

/// Replace a payment's fields; stamps `updated_at`.
pub async fn update_payment(db: &DatabaseConnection, id: Uuid, input: PaymentInput) -> Result<payment::Model, ServiceError> {
    payment::validate_value(input.value)?;
    order::Entity::find_by_id(input.order_id)
        .one(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?
        .ok_or_else(|| ServiceError::not_found("order"))?;

    let mut am: payment::ActiveModel = payment::Entity::find_by_id(id)
        .one(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?
        .ok_or_else(|| ServiceError::not_found("payment"))?
        .into();
    am.order_id = Set(input.order_id);
    am.method = Set(input.method);
    am.status = Set(input.status);
    am.value = Set(input.value);
    am.transaction_id = Set(input.transaction_id);
    am.updated_at = Set(Utc::now().into());
    am.update(db).await.map_err(|e| ServiceError::Db(e.to_string()))
}

/// Remove a payment record.
pub async fn delete_payment(db: &DatabaseConnection, id: Uuid) -> Result<(), ServiceError> {
    let existing = payment::Entity::find_by_id(id)
        .one(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?
        .ok_or_else(|| ServiceError::not_found("payment"))?;
    payment::Entity::delete_by_id(existing.id)
        .exec(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?;
    Ok(())
}
