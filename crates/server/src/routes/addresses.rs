use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use rust_decimal::Decimal;
use serde::Deserialize;
use uuid::Uuid;

use models::address;
use service::address_service::{self, AddressInput};

use crate::errors::ApiError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct AddressBody {
    pub street: String,
    pub number: i32,
    pub neighborhood: String,
    pub city: String,
    pub federative_unit: String,
    pub postal_code: String,
    pub latitude: Option<Decimal>,
    pub longitude: Option<Decimal>,
}

impl From<AddressBody> for AddressInput {
    fn from(b: AddressBody) -> Self {
        AddressInput {
            street: b.street,
            number: b.number,
            neighborhood: b.neighborhood,
            city: b.city,
            federative_unit: b.federative_unit,
            postal_code: b.postal_code,
            latitude: b.latitude,
            longitude: b.longitude,
        }
    }
}

#[utoipa::path(post, path = "/addresses", tag = "addresses",
    request_body = crate::openapi::AddressRequest,
    responses((status = 201, description = "Address created"), (status = 400, description = "Invalid input")))]
pub async fn create(
    State(state): State<AppState>,
    Json(body): Json<AddressBody>,
) -> Result<(StatusCode, Json<address::Model>), ApiError> {
    let created = address_service::create_address(&state.db, body.into()).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(get, path = "/addresses/{id}", tag = "addresses",
    params(("id" = Uuid, Path, description = "Address id")),
    responses((status = 200, description = "Address found"), (status = 404, description = "Address not found")))]
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<address::Model>, ApiError> {
    let found = address_service::get_address(&state.db, id)
        .await?
        .ok_or_else(|| service::errors::ServiceError::not_found("address"))?;
    Ok(Json(found))
}

#[utoipa::path(put, path = "/addresses/{id}", tag = "addresses",
    params(("id" = Uuid, Path, description = "Address id")),
    request_body = crate::openapi::AddressRequest,
    responses((status = 200, description = "Address updated"), (status = 404, description = "Address not found")))]
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<AddressBody>,
) -> Result<Json<address::Model>, ApiError> {
    Ok(Json(address_service::update_address(&state.db, id, body.into()).await?))
}

#[utoipa::path(delete, path = "/addresses/{id}", tag = "addresses",
    params(("id" = Uuid, Path, description = "Address id")),
    responses((status = 204, description = "Address deleted"), (status = 404, description = "Address not found")))]
pub async fn delete_address(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    address_service::delete_address(&state.db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/addresses", post(create))
        .route("/addresses/:id", get(get_by_id).put(update).delete(delete_address))
}
