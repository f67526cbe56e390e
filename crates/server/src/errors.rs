use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use tracing::error;

use common::types::ApiResponse;
use service::errors::ServiceError;

/// Wraps `ServiceError` for the HTTP surface: 404 for missing entities, 403
/// for actor mismatches, 400 for rule violations, 500 (with a generic
/// message) for everything else. Error payloads use the response envelope.
#[derive(Debug)]
pub struct ApiError(pub ServiceError);

impl From<ServiceError> for ApiError {
    fn from(e: ServiceError) -> Self {
        Self(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self.0 {
            ServiceError::NotFound(_) => (StatusCode::NOT_FOUND, self.0.to_string()),
            ServiceError::Forbidden(_) => (StatusCode::FORBIDDEN, self.0.to_string()),
            ServiceError::Validation(_)
            | ServiceError::InvalidTransition(_)
            | ServiceError::Model(_) => (StatusCode::BAD_REQUEST, self.0.to_string()),
            ServiceError::Db(_) => {
                error!(error = %self.0, "unexpected service error");
                (StatusCode::INTERNAL_SERVER_ERROR, "unexpected error".to_string())
            }
        };
        (status, Json(ApiResponse::<serde_json::Value>::err(message))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status_of(e: ServiceError) -> StatusCode {
        ApiError(e).into_response().status()
    }

    #[test]
    fn service_errors_map_to_documented_statuses() {
        assert_eq!(status_of(ServiceError::not_found("order")), StatusCode::NOT_FOUND);
        assert_eq!(status_of(ServiceError::Forbidden("nope".into())), StatusCode::FORBIDDEN);
        assert_eq!(status_of(ServiceError::Validation("bad".into())), StatusCode::BAD_REQUEST);
        assert_eq!(
            status_of(ServiceError::InvalidTransition("bad".into())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(status_of(ServiceError::Db("boom".into())), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
