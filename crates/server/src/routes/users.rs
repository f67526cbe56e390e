use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::{get, patch};
use axum::{Json, Router};
use serde::Deserialize;
use uuid::Uuid;

use common::pagination::PageQuery;
use models::user::{self, UserKind};
use service::user_service::{self, NewUser, UserUpdate};

use crate::errors::ApiError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateUserBody {
    pub name: String,
    pub email: String,
    pub password: String,
    pub cellphone_number: Option<String>,
    pub kind: UserKind,
    pub address_id: Option<Uuid>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateUserBody {
    pub name: String,
    pub email: String,
    pub password: Option<String>,
    pub cellphone_number: Option<String>,
    pub kind: UserKind,
}

#[utoipa::path(get, path = "/users", tag = "users",
    responses((status = 200, description = "List of users, newest first")))]
pub async fn list(
    State(state): State<AppState>,
    Query(page): Query<PageQuery>,
) -> Result<Json<Vec<user::Model>>, ApiError> {
    Ok(Json(user_service::list_users_paginated(&state.db, page.into()).await?))
}

#[utoipa::path(get, path = "/users/{id}", tag = "users",
    params(("id" = Uuid, Path, description = "User id")),
    responses((status = 200, description = "User found"), (status = 404, description = "User not found")))]
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<user::Model>, ApiError> {
    let found = user_service::get_user(&state.db, id)
        .await?
        .ok_or_else(|| service::errors::ServiceError::not_found("user"))?;
    Ok(Json(found))
}

#[utoipa::path(post, path = "/users", tag = "users",
    request_body = crate::openapi::CreateUserRequest,
    responses((status = 201, description = "User created"), (status = 400, description = "Invalid input")))]
pub async fn create(
    State(state): State<AppState>,
    Json(body): Json<CreateUserBody>,
) -> Result<(StatusCode, Json<user::Model>), ApiError> {
    let created = user_service::create_user(
        &state.db,
        NewUser {
            name: body.name,
            email: body.email,
            password: body.password,
            cellphone_number: body.cellphone_number,
            kind: body.kind,
            address_id: body.address_id,
        },
    )
    .await?;
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(put, path = "/users/{id}", tag = "users",
    params(("id" = Uuid, Path, description = "User id")),
    request_body = crate::openapi::UpdateUserRequest,
    responses((status = 200, description = "User updated"), (status = 404, description = "User not found")))]
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<UpdateUserBody>,
) -> Result<Json<user::Model>, ApiError> {
    let updated = user_service::update_user(
        &state.db,
        id,
        UserUpdate {
            name: body.name,
            email: body.email,
            password: body.password,
            cellphone_number: body.cellphone_number,
            kind: body.kind,
        },
    )
    .await?;
    Ok(Json(updated))
}

#[utoipa::path(patch, path = "/users/{id}/toggle", tag = "users",
    params(("id" = Uuid, Path, description = "User id")),
    responses((status = 200, description = "Active flag flipped"), (status = 404, description = "User not found")))]
pub async fn toggle_active(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<user::Model>, ApiError> {
    Ok(Json(user_service::toggle_user_active(&state.db, id).await?))
}

#[utoipa::path(delete, path = "/users/{id}", tag = "users",
    params(("id" = Uuid, Path, description = "User id")),
    responses((status = 204, description = "User deleted"), (status = 404, description = "User not found")))]
pub async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    user_service::delete_user(&state.db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/users", get(list).post(create))
        .route("/users/:id", get(get_by_id).put(update).delete(delete_user))
        .route("/users/:id/toggle", patch(toggle_active))
}
