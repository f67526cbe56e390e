use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryOrder, Set,
};
use uuid::Uuid;

use common::pagination::Pagination;
use models::{evaluation, order, provider_profile, user};

use crate::errors::ServiceError;

#[derive(Debug, Clone)]
pub struct EvaluationInput {
    pub order_id: Uuid,
    pub client_id: Uuid,
    pub provider_id: Uuid,
    pub score: i32,
    pub comment: Option<String>,
}

async fn resolve_refs(db: &DatabaseConnection, input: &EvaluationInput) -> Result<(), ServiceError> {
    order::Entity::find_by_id(input.order_id)
        .one(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?
        .ok_or_else(|| ServiceError::not_found("order"))?;
    user::Entity::find_by_id(input.client_id)
        .one(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?
        .ok_or_else(|| ServiceError::not_found("client"))?;
    provider_profile::Entity::find_by_id(input.provider_id)
        .one(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?
        .ok_or_else(|| ServiceError::not_found("provider"))?;
    Ok(())
}

/// Record an evaluation of a provider for an order.
pub async fn create_evaluation(db: &DatabaseConnection, input: EvaluationInput) -> Result<evaluation::Model, ServiceError> {
    evaluation::validate_score(input.score)?;
    resolve_refs(db, &input).await?;

    let am = evaluation::ActiveModel {
        id: Set(Uuid::new_v4()),
        order_id: Set(input.order_id),
        client_id: Set(input.client_id),
        provider_id: Set(input.provider_id),
        score: Set(input.score),
        comment: Set(input.comment),
        created_at: Set(Utc::now().into()),
    };
    am.insert(db).await.map_err(|e| ServiceError::Db(e.to_string()))
}

/// Get an evaluation by id.
pub async fn get_evaluation(db: &DatabaseConnection, id: Uuid) -> Result<Option<evaluation::Model>, ServiceError> {
    evaluation::Entity::find_by_id(id)
        .one(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))
}

/// List evaluations with pagination, newest first.
pub async fn list_evaluations_paginated(db: &DatabaseConnection, opts: Pagination) -> Result<Vec<evaluation::Model>, ServiceError> {
    let (page_idx, per_page) = opts.normalize();
    evaluation::Entity::find()
        .order_by_desc(evaluation::Column::CreatedAt)
        .paginate(db, per_page)
        .fetch_page(page_idx)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))
}

/// Replace an evaluation's fields.
pub async fn update_evaluation(db: &DatabaseConnection, id: Uuid, input: EvaluationInput) -> Result<evaluation::Model, ServiceError> {
    evaluation::validate_score(input.score)?;
    resolve_refs(db, &input).await?;

    let mut am: evaluation::ActiveModel = evaluation::Entity::find_by_id(id)
        .one(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?
        .ok_or_else(|| ServiceError::not_found("evaluation"))?
        .into();
    am.order_id = Set(input.order_id);
    am.client_id = Set(input.client_id);
    am.provider_id = Set(input.provider_id);
    am.score = Set(input.score);
    am.comment = Set(input.comment);
    am.update(db).await.map_err(|e| ServiceError::Db(e.to_string()))
}

/// Remove an evaluation record.
pub async fn delete_evaluation(db: &DatabaseConnection, id: Uuid) -> Result<(), ServiceError> {
    let existing = evaluation::Entity::find_by_id(id)
        .one(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?
        .ok_or_else(|| ServiceError::not_found("evaluation"))?;
    evaluation::Entity::delete_by_id(existing.id)
        .exec(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?;
    Ok(())
}
