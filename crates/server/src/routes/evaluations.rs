use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;
use uuid::Uuid;

use common::pagination::PageQuery;
use models::evaluation;
use service::evaluation_service::{self, EvaluationInput};

use crate::errors::ApiError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct EvaluationBody {
    pub order_id: Uuid,
    pub client_id: Uuid,
    pub provider_id: Uuid,
    pub score: i32,
    pub comment: Option<String>,
}

impl From<EvaluationBody> for EvaluationInput {
    fn from(b: EvaluationBody) -> Self {
        EvaluationInput {
            order_id: b.order_id,
            client_id: b.client_id,
            provider_id: b.provider_id,
            score: b.score,
            comment: b.comment,
        }
    }
}

#[utoipa::path(get, path = "/evaluations", tag = "evaluations",
    responses((status = 200, description = "List of evaluations, newest first")))]
pub async fn list(
    State(state): State<AppState>,
    Query(page): Query<PageQuery>,
) -> Result<Json<Vec<evaluation::Model>>, ApiError> {
    Ok(Json(evaluation_service::list_evaluations_paginated(&state.db, page.into()).await?))
}

#[utoipa::path(get, path = "/evaluations/{id}", tag = "evaluations",
    params(("id" = Uuid, Path, description = "Evaluation id")),
    responses((status = 200, description = "Evaluation found"), (status = 404, description = "Evaluation not found")))]
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<evaluation::Model>, ApiError> {
    let found = evaluation_service::get_evaluation(&state.db, id)
        .await?
        .ok_or_else(|| service::errors::ServiceError::not_found("evaluation"))?;
    Ok(Json(found))
}

#[utoipa::path(post, path = "/evaluations", tag = "evaluations",
    request_body = crate::openapi::EvaluationRequest,
    responses((status = 201, description = "Evaluation recorded"),
              (status = 404, description = "Order, client or provider not found")))]
pub async fn create(
    State(state): State<AppState>,
    Json(body): Json<EvaluationBody>,
) -> Result<(StatusCode, Json<evaluation::Model>), ApiError> {
    let created = evaluation_service::create_evaluation(&state.db, body.into()).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(put, path = "/evaluations/{id}", tag = "evaluations",
    params(("id" = Uuid, Path, description = "Evaluation id")),
    request_body = crate::openapi::EvaluationRequest,
    responses((status = 200, description = "Evaluation updated"), (status = 404, description = "Evaluation not found")))]
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<EvaluationBody>,
) -> Result<Json<evaluation::Model>, ApiError> {
    Ok(Json(evaluation_service::update_evaluation(&state.db, id, body.into()).await?))
}

#[utoipa::path(delete, path = "/evaluations/{id}", tag = "evaluations",
    params(("id" = Uuid, Path, description = "Evaluation id")),
    responses((status = 204, description = "Evaluation deleted"), (status = 404, description = "Evaluation not found")))]
pub async fn delete_evaluation(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    evaluation_service::delete_evaluation(&state.db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/evaluations", get(list).post(create))
        .route("/evaluations/:id", get(get_by_id).put(update).delete(delete_evaluation))
}
