use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::{get, patch};
use axum::{Json, Router};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;
use uuid::Uuid;

use common::pagination::PageQuery;
use models::order::{self, OrderStatus};
use service::order::NewOrder;

use crate::errors::ApiError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateOrderBody {
    /// Accepted for wire compatibility and ignored; orders always start PENDING.
    #[serde(default)]
    pub status: Option<OrderStatus>,
    pub details: Option<String>,
    pub quantity: i64,
    pub value: Decimal,
    pub event_date: NaiveDate,
    pub client_id: Uuid,
    pub provider_id: Uuid,
    pub listing_id: Uuid,
}

#[derive(Debug, Deserialize)]
pub struct StatusUpdateBody {
    pub status: OrderStatus,
}

#[derive(Debug, Deserialize)]
pub struct ProviderActor {
    #[serde(rename = "providerId")]
    pub provider_id: Uuid,
}

#[derive(Debug, Deserialize)]
pub struct ClientActor {
    #[serde(rename = "clientId")]
    pub client_id: Uuid,
}

#[utoipa::path(get, path = "/orders", tag = "orders",
    responses((status = 200, description = "List of orders, newest first")))]
pub async fn list(
    State(state): State<AppState>,
    Query(page): Query<PageQuery>,
) -> Result<Json<Vec<order::Model>>, ApiError> {
    Ok(Json(state.orders.list(page.into()).await?))
}

#[utoipa::path(get, path = "/orders/{id}", tag = "orders",
    params(("id" = Uuid, Path, description = "Order id")),
    responses((status = 200, description = "Order found"), (status = 404, description = "Order not found")))]
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<order::Model>, ApiError> {
    Ok(Json(state.orders.find_by_id(id).await?))
}

#[utoipa::path(get, path = "/orders/client/{client_id}", tag = "orders",
    params(("client_id" = Uuid, Path, description = "Client user id")),
    responses((status = 200, description = "Client orders")))]
pub async fn by_client(
    State(state): State<AppState>,
    Path(client_id): Path<Uuid>,
    Query(page): Query<PageQuery>,
) -> Result<Json<Vec<order::Model>>, ApiError> {
    Ok(Json(state.orders.list_by_client(client_id, page.into()).await?))
}

#[utoipa::path(get, path = "/orders/provider/{provider_id}", tag = "orders",
    params(("provider_id" = Uuid, Path, description = "Provider profile id")),
    responses((status = 200, description = "Provider orders")))]
pub async fn by_provider(
    State(state): State<AppState>,
    Path(provider_id): Path<Uuid>,
    Query(page): Query<PageQuery>,
) -> Result<Json<Vec<order::Model>>, ApiError> {
    Ok(Json(state.orders.list_by_provider(provider_id, page.into()).await?))
}

#[utoipa::path(get, path = "/orders/status/{status}", tag = "orders",
    params(("status" = String, Path, description = "Order status, e.g. PENDING")),
    responses((status = 200, description = "Orders in the given status")))]
pub async fn by_status(
    State(state): State<AppState>,
    Path(status): Path<OrderStatus>,
    Query(page): Query<PageQuery>,
) -> Result<Json<Vec<order::Model>>, ApiError> {
    Ok(Json(state.orders.list_by_status(status, page.into()).await?))
}

#[utoipa::path(post, path = "/orders", tag = "orders",
    request_body = crate::openapi::CreateOrderRequest,
    responses((status = 201, description = "Order created as PENDING"),
              (status = 400, description = "Listing does not belong to the provider"),
              (status = 404, description = "Client, provider or listing not found")))]
pub async fn create(
    State(state): State<AppState>,
    Json(body): Json<CreateOrderBody>,
) -> Result<(StatusCode, Json<order::Model>), ApiError> {
    let created = state
        .orders
        .create(NewOrder {
            status: body.status,
            details: body.details,
            quantity: body.quantity,
            value: body.value,
            event_date: body.event_date,
            client_id: body.client_id,
            provider_id: body.provider_id,
            listing_id: body.listing_id,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(patch, path = "/orders/{id}/status", tag = "orders",
    params(("id" = Uuid, Path, description = "Order id"),
           ("providerId" = Uuid, Query, description = "Acting provider profile id")),
    request_body = crate::openapi::StatusUpdateRequest,
    responses((status = 200, description = "Status updated"),
              (status = 400, description = "Illegal transition"),
              (status = 403, description = "Only the order's provider may update status"),
              (status = 404, description = "Order not found")))]
pub async fn update_status(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(actor): Query<ProviderActor>,
    Json(body): Json<StatusUpdateBody>,
) -> Result<Json<order::Model>, ApiError> {
    Ok(Json(state.orders.update_status(id, body.status, actor.provider_id).await?))
}

#[utoipa::path(patch, path = "/orders/{id}/cancel", tag = "orders",
    params(("id" = Uuid, Path, description = "Order id"),
           ("clientId" = Uuid, Query, description = "Acting client user id")),
    responses((status = 200, description = "Order cancelled"),
              (status = 400, description = "Order is past the cancellation window"),
              (status = 403, description = "Only the order's client may cancel"),
              (status = 404, description = "Order not found")))]
pub async fn cancel(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(actor): Query<ClientActor>,
) -> Result<Json<order::Model>, ApiError> {
    Ok(Json(state.orders.cancel(id, actor.client_id).await?))
}

#[utoipa::path(delete, path = "/orders/{id}", tag = "orders",
    params(("id" = Uuid, Path, description = "Order id")),
    responses((status = 204, description = "Order deleted"), (status = 404, description = "Order not found")))]
pub async fn delete_order(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    state.orders.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/orders", get(list).post(create))
        .route("/orders/:id", get(get_by_id).delete(delete_order))
        .route("/orders/:id/status", patch(update_status))
        .route("/orders/:id/cancel", patch(cancel))
        .route("/orders/client/:client_id", get(by_client))
        .route("/orders/provider/:provider_id", get(by_provider))
        .route("/orders/status/:status", get(by_status))
}
