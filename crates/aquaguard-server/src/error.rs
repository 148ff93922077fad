//! Error types for the AquaGuard API layer.
//!
//! [`ApiError`] unifies the client-visible failure modes into a single
//! enum convertible into an Axum HTTP response. Upstream data failures
//! never appear here -- they resolve to fallback values inside the
//! providers -- so the surface is small: bad requests and internal
//! faults, each answered with `{"error": ...}` and no partial result.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use aquaguard_geo::GeoError;

/// Errors that can occur in the API layer.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The request carried an invalid bounding box or geometry.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// An internal error occurred.
    #[error("internal error: {0}")]
    Internal(String),
}

impl From<GeoError> for ApiError {
    fn from(error: GeoError) -> Self {
        Self::InvalidRequest(error.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            Self::InvalidRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            Self::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg.clone()),
        };

        let body = serde_json::json!({
            "error": message,
            "status": status.as_u16(),
        });

        (status, axum::Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_request_maps_to_bad_request() {
        let response = ApiError::InvalidRequest(String::from("nope")).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn geo_errors_become_invalid_requests() {
        let error = GeoError::DegenerateRing(2);
        assert!(matches!(ApiError::from(error), ApiError::InvalidRequest(_)));
    }
}
