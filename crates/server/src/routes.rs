use axum::{routing::get, Json, Router};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use common::types::Health;

use crate::state::AppState;

pub mod addresses;
pub mod admin;
pub mod categories;
pub mod evaluations;
pub mod listings;
pub mod orders;
pub mod payments;
pub mod providers;
pub mod reviews;
pub mod users;

#[utoipa::path(get, path = "/health", tag = "health", responses((status = 200, description = "Service is up")))]
pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

/// Build the full application router, one sub-router per resource, behind
/// trace and CORS layers. Swagger UI is mounted alongside the API.
pub fn build_router(state: AppState, cors: CorsLayer) -> Router {
    let api = Router::new()
        .route("/health", get(health))
        .merge(orders::router())
        .merge(reviews::router())
        .merge(users::router())
        .merge(addresses::router())
        .merge(categories::router())
        .merge(providers::router())
        .merge(listings::router())
        .merge(payments::router())
        .merge(evaluations::router())
        .merge(admin::router())
        .with_state(state);

    api.merge(crate::openapi::swagger_router())
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
