use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;
use uuid::Uuid;

use common::pagination::PageQuery;
use models::{category, provider_profile};
use service::provider_service::{self, ProviderInput};

use crate::errors::ApiError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ProviderBody {
    pub user_id: Uuid,
    pub bio: Option<String>,
    #[serde(default)]
    pub verified: bool,
    pub payout_key: Option<String>,
    pub profile_photo_url: Option<String>,
    #[serde(default)]
    pub category_ids: Vec<Uuid>,
}

impl From<ProviderBody> for ProviderInput {
    fn from(b: ProviderBody) -> Self {
        ProviderInput {
            user_id: b.user_id,
            bio: b.bio,
            verified: b.verified,
            payout_key: b.payout_key,
            profile_photo_url: b.profile_photo_url,
            category_ids: b.category_ids,
        }
    }
}

#[utoipa::path(get, path = "/providers", tag = "providers",
    responses((status = 200, description = "List of provider profiles, newest first")))]
pub async fn list(
    State(state): State<AppState>,
    Query(page): Query<PageQuery>,
) -> Result<Json<Vec<provider_profile::Model>>, ApiError> {
    Ok(Json(provider_service::list_providers_paginated(&state.db, page.into()).await?))
}

#[utoipa::path(get, path = "/providers/{id}", tag = "providers",
    params(("id" = Uuid, Path, description = "Provider profile id")),
    responses((status = 200, description = "Provider found"), (status = 404, description = "Provider not found")))]
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<provider_profile::Model>, ApiError> {
    let found = provider_service::get_provider(&state.db, id)
        .await?
        .ok_or_else(|| service::errors::ServiceError::not_found("provider"))?;
    Ok(Json(found))
}

#[utoipa::path(get, path = "/providers/{id}/categories", tag = "providers",
    params(("id" = Uuid, Path, description = "Provider profile id")),
    responses((status = 200, description = "Categories linked to the provider")))]
pub async fn categories(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<category::Model>>, ApiError> {
    Ok(Json(provider_service::provider_categories(&state.db, id).await?))
}

#[utoipa::path(post, path = "/providers", tag = "providers",
    request_body = crate::openapi::ProviderRequest,
    responses((status = 201, description = "Provider profile created"), (status = 404, description = "User not found")))]
pub async fn create(
    State(state): State<AppState>,
    Json(body): Json<ProviderBody>,
) -> Result<(StatusCode, Json<provider_profile::Model>), ApiError> {
    let created = provider_service::create_provider(&state.db, body.into()).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(put, path = "/providers/{id}", tag = "providers",
    params(("id" = Uuid, Path, description = "Provider profile id")),
    request_body = crate::openapi::ProviderRequest,
    responses((status = 200, description = "Provider updated"), (status = 404, description = "Provider or user not found")))]
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<ProviderBody>,
) -> Result<Json<provider_profile::Model>, ApiError> {
    Ok(Json(provider_service::update_provider(&state.db, id, body.into()).await?))
}

#[utoipa::path(delete, path = "/providers/{id}", tag = "providers",
    params(("id" = Uuid, Path, description = "Provider profile id")),
    responses((status = 204, description = "Provider deleted"), (status = 404, description = "Provider not found")))]
pub async fn delete_provider(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    provider_service::delete_provider(&state.db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/providers", get(list).post(create))
        .route("/providers/:id", get(get_by_id).put(update).delete(delete_provider))
        .route("/providers/:id/categories", get(categories))
}
