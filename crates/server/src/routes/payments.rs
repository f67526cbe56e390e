use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use rust_decimal::Decimal;
use serde::Deserialize;
use uuid::Uuid;

use common::pagination::PageQuery;
use models::payment::{self, PaymentMethod, PaymentStatus};
use service::payment_service::{self, PaymentInput};

use crate::errors::ApiError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct PaymentBody {
    pub order_id: Uuid,
    pub method: PaymentMethod,
    pub status: PaymentStatus,
    pub value: Decimal,
    pub transaction_id: i64,
}

impl From<PaymentBody> for PaymentInput {
    fn from(b: PaymentBody) -> Self {
        PaymentInput {
            order_id: b.order_id,
            method: b.method,
            status: b.status,
            value: b.value,
            transaction_id: b.transaction_id,
        }
    }
}

#[utoipa::path(get, path = "/payments", tag = "payments",
    responses((status = 200, description = "List of payments, newest first")))]
pub async fn list(
    State(state): State<AppState>,
    Query(page): Query<PageQuery>,
) -> Result<Json<Vec<payment::Model>>, ApiError> {
    Ok(Json(payment_service::list_payments_paginated(&state.db, page.into()).await?))
}

#[utoipa::path(get, path = "/payments/{id}", tag = "payments",
    params(("id" = Uuid, Path, description = "Payment id")),
    responses((status = 200, description = "Payment found"), (status = 404, description = "Payment not found")))]
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<payment::Model>, ApiError> {
    let found = payment_service::get_payment(&state.db, id)
        .await?
        .ok_or_else(|| service::errors::ServiceError::not_found("payment"))?;
    Ok(Json(found))
}

#[utoipa::path(post, path = "/payments", tag = "payments",
    request_body = crate::openapi::PaymentRequest,
    responses((status = 201, description = "Payment recorded"), (status = 404, description = "Order not found")))]
pub async fn create(
    State(state): State<AppState>,
    Json(body): Json<PaymentBody>,
) -> Result<(StatusCode, Json<payment::Model>), ApiError> {
    let created = payment_service::create_payment(&state.db, body.into()).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(put, path = "/payments/{id}", tag = "payments",
    params(("id" = Uuid, Path, description = "Payment id")),
    request_body = crate::openapi::PaymentRequest,
    responses((status = 200, description = "Payment updated"), (status = 404, description = "Payment or order not found")))]
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<PaymentBody>,
) -> Result<Json<payment::Model>, ApiError> {
    Ok(Json(payment_service::update_payment(&state.db, id, body.into()).await?))
}

#[utoipa::path(delete, path = "/payments/{id}", tag = "payments",
    params(("id" = Uuid, Path, description = "Payment id")),
    responses((status = 204, description = "Payment deleted"), (status = 404, description = "Payment not found")))]
pub async fn delete_payment(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    payment_service::delete_payment(&state.db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/payments", get(list).post(create))
        .route("/payments/:id", get(get_by_id).put(update).delete(delete_payment))
}
