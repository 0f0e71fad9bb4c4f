use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

/// API-boundary error taxonomy. Every variant is recoverable at the
/// interaction level and surfaced straight to the caller.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("unknown user")]
    UnknownUser,

    #[error("geolocation unavailable")]
    GeolocationUnavailable,

    #[error("internal error")]
    Internal,
}

impl ApiError {
    /// Log-and-downgrade for unexpected failures (DB errors, join errors).
    pub fn internal(context: &str, e: impl std::fmt::Display) -> Self {
        error!("{}: {}", context, e);
        ApiError::Internal
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::UnknownUser => (
                StatusCode::NOT_FOUND,
                "Invalid user id. Please register first.",
            ),
            ApiError::GeolocationUnavailable => (
                StatusCode::SERVICE_UNAVAILABLE,
                "Unable to detect current location. Please enter it manually.",
            ),
            ApiError::Internal => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "An unexpected error occurred",
            ),
        };

        let body = Json(json!({
            "error": message,
        }));

        (status, body).into_response()
    }
}
