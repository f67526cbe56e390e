use std::collections::BTreeMap;

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use sea_orm::Iterable;
use serde::Serialize;

use models::order::OrderStatus;
use service::{listing_service, provider_service, user_service};

use crate::errors::ApiError;
use crate::state::AppState;

/// Aggregate counts for the admin dashboard.
#[derive(Debug, Serialize)]
pub struct StatsResponse {
    pub total_users: u64,
    pub active_users: u64,
    pub total_providers: u64,
    pub total_listings: u64,
    pub active_listings: u64,
    pub total_orders: u64,
    pub orders_by_status: BTreeMap<String, u64>,
}

#[utoipa::path(get, path = "/admin/stats", tag = "admin",
    responses((status = 200, description = "Aggregate marketplace counts")))]
pub async fn stats(State(state): State<AppState>) -> Result<Json<StatsResponse>, ApiError> {
    let mut orders_by_status = BTreeMap::new();
    for status in OrderStatus::iter() {
        let key = serde_json::to_value(status)
            .ok()
            .and_then(|v| v.as_str().map(str::to_string))
            .unwrap_or_else(|| format!("{status:?}"));
        orders_by_status.insert(key, state.orders.count_by_status(status).await?);
    }

    Ok(Json(StatsResponse {
        total_users: user_service::count_users(&state.db).await?,
        active_users: user_service::count_active_users(&state.db).await?,
        total_providers: provider_service::count_providers(&state.db).await?,
        total_listings: listing_service::count_listings(&state.db).await?,
        active_listings: listing_service::count_active_listings(&state.db).await?,
        total_orders: state.orders.count().await?,
        orders_by_status,
    }))
}

pub fn router() -> Router<AppState> {
    Router::new().route("/admin/stats", get(stats))
}
