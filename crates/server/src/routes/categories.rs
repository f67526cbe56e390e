use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;
use uuid::Uuid;

use models::category;
use service::category_service;

use crate::errors::ApiError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CategoryBody {
    pub name: String,
    pub description: Option<String>,
}

#[utoipa::path(get, path = "/categories", tag = "categories",
    responses((status = 200, description = "All categories, alphabetically")))]
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<category::Model>>, ApiError> {
    Ok(Json(category_service::list_categories(&state.db).await?))
}

#[utoipa::path(get, path = "/categories/{id}", tag = "categories",
    params(("id" = Uuid, Path, description = "Category id")),
    responses((status = 200, description = "Category found"), (status = 404, description = "Category not found")))]
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<category::Model>, ApiError> {
    let found = category_service::get_category(&state.db, id)
        .await?
        .ok_or_else(|| service::errors::ServiceError::not_found("category"))?;
    Ok(Json(found))
}

#[utoipa::path(post, path = "/categories", tag = "categories",
    request_body = crate::openapi::CategoryRequest,
    responses((status = 201, description = "Category created"), (status = 400, description = "Invalid input")))]
pub async fn create(
    State(state): State<AppState>,
    Json(body): Json<CategoryBody>,
) -> Result<(StatusCode, Json<category::Model>), ApiError> {
    let created = category_service::create_category(&state.db, &body.name, body.description).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(put, path = "/categories/{id}", tag = "categories",
    params(("id" = Uuid, Path, description = "Category id")),
    request_body = crate::openapi::CategoryRequest,
    responses((status = 200, description = "Category updated"), (status = 404, description = "Category not found")))]
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<CategoryBody>,
) -> Result<Json<category::Model>, ApiError> {
    Ok(Json(category_service::update_category(&state.db, id, &body.name, body.description).await?))
}

#[utoipa::path(delete, path = "/categories/{id}", tag = "categories",
    params(("id" = Uuid, Path, description = "Category id")),
    responses((status = 204, description = "Category deleted"), (status = 404, description = "Category not found")))]
pub async fn delete_category(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    category_service::delete_category(&state.db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/categories", get(list).post(create))
        .route("/categories/:id", get(get_by_id).put(update).delete(delete_category))
}
