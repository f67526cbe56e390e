use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;
use uuid::Uuid;

use common::pagination::PageQuery;
use models::review;
use service::review::{NewReview, ReviewUpdate};

use crate::errors::ApiError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateReviewBody {
    pub rating: i32,
    pub comment: Option<String>,
    pub order_id: Uuid,
    pub user_id: Uuid,
    pub listing_id: Uuid,
}

#[derive(Debug, Deserialize)]
pub struct UpdateReviewBody {
    pub rating: i32,
    pub comment: Option<String>,
    pub user_id: Uuid,
}

#[derive(Debug, Deserialize)]
pub struct UserActor {
    #[serde(rename = "userId")]
    pub user_id: Uuid,
}

#[utoipa::path(get, path = "/reviews", tag = "reviews",
    responses((status = 200, description = "List of reviews, newest first")))]
pub async fn list(
    State(state): State<AppState>,
    Query(page): Query<PageQuery>,
) -> Result<Json<Vec<review::Model>>, ApiError> {
    Ok(Json(state.reviews.list(page.into()).await?))
}

#[utoipa::path(get, path = "/reviews/{id}", tag = "reviews",
    params(("id" = Uuid, Path, description = "Review id")),
    responses((status = 200, description = "Review found"), (status = 404, description = "Review not found")))]
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<review::Model>, ApiError> {
    Ok(Json(state.reviews.find_by_id(id).await?))
}

#[utoipa::path(get, path = "/reviews/listing/{listing_id}", tag = "reviews",
    params(("listing_id" = Uuid, Path, description = "Listing id")),
    responses((status = 200, description = "Reviews of a listing")))]
pub async fn by_listing(
    State(state): State<AppState>,
    Path(listing_id): Path<Uuid>,
    Query(page): Query<PageQuery>,
) -> Result<Json<Vec<review::Model>>, ApiError> {
    Ok(Json(state.reviews.list_by_listing(listing_id, page.into()).await?))
}

#[utoipa::path(get, path = "/reviews/user/{user_id}", tag = "reviews",
    params(("user_id" = Uuid, Path, description = "Author user id")),
    responses((status = 200, description = "Reviews written by a user")))]
pub async fn by_user(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
    Query(page): Query<PageQuery>,
) -> Result<Json<Vec<review::Model>>, ApiError> {
    Ok(Json(state.reviews.list_by_user(user_id, page.into()).await?))
}

#[utoipa::path(get, path = "/reviews/provider/{provider_id}", tag = "reviews",
    params(("provider_id" = Uuid, Path, description = "Provider profile id")),
    responses((status = 200, description = "Reviews across the provider's listings")))]
pub async fn by_provider(
    State(state): State<AppState>,
    Path(provider_id): Path<Uuid>,
    Query(page): Query<PageQuery>,
) -> Result<Json<Vec<review::Model>>, ApiError> {
    Ok(Json(state.reviews.list_by_provider(provider_id, page.into()).await?))
}

#[utoipa::path(get, path = "/reviews/listing/{listing_id}/average", tag = "reviews",
    params(("listing_id" = Uuid, Path, description = "Listing id")),
    responses((status = 200, description = "Average rating, 0.0 when unrated")))]
pub async fn average_by_listing(
    State(state): State<AppState>,
    Path(listing_id): Path<Uuid>,
) -> Result<Json<f64>, ApiError> {
    Ok(Json(state.reviews.average_rating_by_listing(listing_id).await?))
}

#[utoipa::path(get, path = "/reviews/provider/{provider_id}/average", tag = "reviews",
    params(("provider_id" = Uuid, Path, description = "Provider profile id")),
    responses((status = 200, description = "Average rating, 0.0 when unrated")))]
pub async fn average_by_provider(
    State(state): State<AppState>,
    Path(provider_id): Path<Uuid>,
) -> Result<Json<f64>, ApiError> {
    Ok(Json(state.reviews.average_rating_by_provider(provider_id).await?))
}

#[utoipa::path(get, path = "/reviews/listing/{listing_id}/count", tag = "reviews",
    params(("listing_id" = Uuid, Path, description = "Listing id")),
    responses((status = 200, description = "Review count for a listing")))]
pub async fn count_by_listing(
    State(state): State<AppState>,
    Path(listing_id): Path<Uuid>,
) -> Result<Json<u64>, ApiError> {
    Ok(Json(state.reviews.count_by_listing(listing_id).await?))
}

#[utoipa::path(get, path = "/reviews/provider/{provider_id}/count", tag = "reviews",
    params(("provider_id" = Uuid, Path, description = "Provider profile id")),
    responses((status = 200, description = "Review count across the provider's listings")))]
pub async fn count_by_provider(
    State(state): State<AppState>,
    Path(provider_id): Path<Uuid>,
) -> Result<Json<u64>, ApiError> {
    Ok(Json(state.reviews.count_by_provider(provider_id).await?))
}

#[utoipa::path(post, path = "/reviews", tag = "reviews",
    request_body = crate::openapi::CreateReviewRequest,
    responses((status = 201, description = "Review created"),
              (status = 400, description = "Order not completed, not the order's client, or already reviewed"),
              (status = 404, description = "Order, user or listing not found")))]
pub async fn create(
    State(state): State<AppState>,
    Json(body): Json<CreateReviewBody>,
) -> Result<(StatusCode, Json<review::Model>), ApiError> {
    let created = state
        .reviews
        .create(NewReview {
            rating: body.rating,
            comment: body.comment,
            order_id: body.order_id,
            user_id: body.user_id,
            listing_id: body.listing_id,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(put, path = "/reviews/{id}", tag = "reviews",
    params(("id" = Uuid, Path, description = "Review id")),
    request_body = crate::openapi::UpdateReviewRequest,
    responses((status = 200, description = "Review updated"),
              (status = 400, description = "Not the review's author"),
              (status = 404, description = "Review not found")))]
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<UpdateReviewBody>,
) -> Result<Json<review::Model>, ApiError> {
    let updated = state
        .reviews
        .update(id, ReviewUpdate { rating: body.rating, comment: body.comment, user_id: body.user_id })
        .await?;
    Ok(Json(updated))
}

#[utoipa::path(delete, path = "/reviews/{id}", tag = "reviews",
    params(("id" = Uuid, Path, description = "Review id"),
           ("userId" = Uuid, Query, description = "Requesting user id")),
    responses((status = 204, description = "Review deleted"),
              (status = 400, description = "Not the review's author"),
              (status = 404, description = "Review not found")))]
pub async fn delete_review(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(actor): Query<UserActor>,
) -> Result<StatusCode, ApiError> {
    state.reviews.delete(id, actor.user_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/reviews", get(list).post(create))
        .route("/reviews/:id", get(get_by_id).put(update).delete(delete_review))
        .route("/reviews/listing/:listing_id", get(by_listing))
        .route("/reviews/listing/:listing_id/average", get(average_by_listing))
        .route("/reviews/listing/:listing_id/count", get(count_by_listing))
        .route("/reviews/user/:user_id", get(by_user))
        .route("/reviews/provider/:provider_id", get(by_provider))
        .route("/reviews/provider/:provider_id/average", get(average_by_provider))
        .route("/reviews/provider/:provider_id/count", get(count_by_provider))
}
