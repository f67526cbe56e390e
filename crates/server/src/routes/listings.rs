use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::{get, patch, put};
use axum::{Json, Router};
use rust_decimal::Decimal;
use serde::Deserialize;
use uuid::Uuid;

use common::pagination::Pagination;
use models::listing;
use models::listing_media::{self, MediaKind};
use service::listing_service::{self, ListingFilters, ListingInput};
use service::media_service::{self, MediaInput};

use crate::errors::ApiError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ListingBody {
    pub provider_id: Uuid,
    pub category_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub base_price: Decimal,
    #[serde(default = "default_active")]
    pub active: bool,
    pub avg_duration: Option<Decimal>,
}

fn default_active() -> bool { true }

impl From<ListingBody> for ListingInput {
    fn from(b: ListingBody) -> Self {
        ListingInput {
            provider_id: b.provider_id,
            category_id: b.category_id,
            title: b.title,
            description: b.description,
            base_price: b.base_price,
            active: b.active,
            avg_duration: b.avg_duration,
        }
    }
}

/// Search query: pagination plus the optional filters.
#[derive(Debug, Default, Deserialize)]
pub struct ListingQuery {
    pub page: Option<u32>,
    pub per_page: Option<u32>,
    pub category_id: Option<Uuid>,
    pub provider_id: Option<Uuid>,
    pub min_price: Option<Decimal>,
    pub max_price: Option<Decimal>,
    pub search: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct MediaBody {
    pub kind: MediaKind,
    pub url: String,
    pub short_description: Option<String>,
    #[serde(default)]
    pub position: i32,
}

impl From<MediaBody> for MediaInput {
    fn from(b: MediaBody) -> Self {
        MediaInput {
            kind: b.kind,
            url: b.url,
            short_description: b.short_description,
            position: b.position,
        }
    }
}

#[utoipa::path(get, path = "/listings", tag = "listings",
    params(("category_id" = Option<Uuid>, Query, description = "Filter by category"),
           ("provider_id" = Option<Uuid>, Query, description = "Filter by provider"),
           ("search" = Option<String>, Query, description = "Title/description substring")),
    responses((status = 200, description = "Listings matching the filters, newest first")))]
pub async fn list(
    State(state): State<AppState>,
    Query(q): Query<ListingQuery>,
) -> Result<Json<Vec<listing::Model>>, ApiError> {
    let page = {
        let d = Pagination::default();
        Pagination { page: q.page.unwrap_or(d.page), per_page: q.per_page.unwrap_or(d.per_page) }
    };
    let filters = ListingFilters {
        category_id: q.category_id,
        provider_id: q.provider_id,
        min_price: q.min_price,
        max_price: q.max_price,
        search: q.search,
    };
    Ok(Json(listing_service::list_listings_by_filters(&state.db, filters, page).await?))
}

#[utoipa::path(get, path = "/listings/{id}", tag = "listings",
    params(("id" = Uuid, Path, description = "Listing id")),
    responses((status = 200, description = "Listing found"), (status = 404, description = "Listing not found")))]
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<listing::Model>, ApiError> {
    let found = listing_service::get_listing(&state.db, id)
        .await?
        .ok_or_else(|| service::errors::ServiceError::not_found("listing"))?;
    Ok(Json(found))
}

#[utoipa::path(post, path = "/listings", tag = "listings",
    request_body = crate::openapi::ListingRequest,
    responses((status = 201, description = "Listing created"),
              (status = 404, description = "Provider or category not found")))]
pub async fn create(
    State(state): State<AppState>,
    Json(body): Json<ListingBody>,
) -> Result<(StatusCode, Json<listing::Model>), ApiError> {
    let created = listing_service::create_listing(&state.db, body.into()).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(put, path = "/listings/{id}", tag = "listings",
    params(("id" = Uuid, Path, description = "Listing id")),
    request_body = crate::openapi::ListingRequest,
    responses((status = 200, description = "Listing updated"), (status = 404, description = "Listing not found")))]
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<ListingBody>,
) -> Result<Json<listing::Model>, ApiError> {
    Ok(Json(listing_service::update_listing(&state.db, id, body.into()).await?))
}

#[utoipa::path(patch, path = "/listings/{id}/toggle", tag = "listings",
    params(("id" = Uuid, Path, description = "Listing id")),
    responses((status = 200, description = "Active flag flipped"), (status = 404, description = "Listing not found")))]
pub async fn toggle_active(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<listing::Model>, ApiError> {
    Ok(Json(listing_service::toggle_listing_active(&state.db, id).await?))
}

#[utoipa::path(delete, path = "/listings/{id}", tag = "listings",
    params(("id" = Uuid, Path, description = "Listing id")),
    responses((status = 204, description = "Listing deleted"), (status = 404, description = "Listing not found")))]
pub async fn delete_listing(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    listing_service::delete_listing(&state.db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(get, path = "/listings/{id}/media", tag = "listings",
    params(("id" = Uuid, Path, description = "Listing id")),
    responses((status = 200, description = "Listing gallery ordered by position")))]
pub async fn list_media(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<listing_media::Model>>, ApiError> {
    Ok(Json(media_service::list_media_by_listing(&state.db, id).await?))
}

#[utoipa::path(post, path = "/listings/{id}/media", tag = "listings",
    params(("id" = Uuid, Path, description = "Listing id")),
    request_body = crate::openapi::MediaRequest,
    responses((status = 201, description = "Media attached"), (status = 404, description = "Listing not found")))]
pub async fn add_media(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<MediaBody>,
) -> Result<(StatusCode, Json<listing_media::Model>), ApiError> {
    let created = media_service::add_media(&state.db, id, body.into()).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(put, path = "/media/{id}", tag = "listings",
    params(("id" = Uuid, Path, description = "Media id")),
    request_body = crate::openapi::MediaRequest,
    responses((status = 200, description = "Media updated"), (status = 404, description = "Media not found")))]
pub async fn update_media(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<MediaBody>,
) -> Result<Json<listing_media::Model>, ApiError> {
    Ok(Json(media_service::update_media(&state.db, id, body.into()).await?))
}

#[utoipa::path(delete, path = "/media/{id}", tag = "listings",
    params(("id" = Uuid, Path, description = "Media id")),
    responses((status = 204, description = "Media deleted"), (status = 404, description = "Media not found")))]
pub async fn delete_media(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    media_service::delete_media(&state.db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/listings", get(list).post(create))
        .route("/listings/:id", get(get_by_id).put(update).delete(delete_listing))
        .route("/listings/:id/toggle", patch(toggle_active))
        .route("/listings/:id/media", get(list_media).post(add_media))
        .route("/media/:id", put(update_media).delete(delete_media))
}
