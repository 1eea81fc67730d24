//! Error types for gra-daemon

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use gra_core::GraError;
use serde::Serialize;
use thiserror::Error;

/// Daemon-level errors
#[derive(Debug, Error)]
pub enum DaemonError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Server startup error
    #[error("Server error: {0}")]
    Server(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// API-specific errors
#[derive(Debug, Error)]
pub enum ApiError {
    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Malformed request payload
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Field out of range or otherwise invalid
    #[error("Validation error: {0}")]
    Validation(String),

    /// Optimizer exceeded the wall-clock budget
    #[error("Simulation timed out after {0}s")]
    Timeout(u64),

    /// Numerical failure inside the optimizer
    #[error("Computation error: {0}")]
    Computation(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<GraError> for ApiError {
    fn from(err: GraError) -> Self {
        match err {
            GraError::Configuration(message) => ApiError::Validation(message),
            GraError::Computation(message) => ApiError::Computation(message),
        }
    }
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = match &self {
            ApiError::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            ApiError::BadRequest(_) => (StatusCode::BAD_REQUEST, "BAD_REQUEST"),
            ApiError::Validation(_) => (StatusCode::UNPROCESSABLE_ENTITY, "VALIDATION_ERROR"),
            ApiError::Timeout(_) => (StatusCode::GATEWAY_TIMEOUT, "TIMEOUT"),
            ApiError::Computation(_) => (StatusCode::INTERNAL_SERVER_ERROR, "COMPUTATION_ERROR"),
            ApiError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        };

        let body = ErrorResponse {
            error: self.to_string(),
            code: code.to_string(),
        };

        (status, Json(body)).into_response()
    }
}

/// Result type alias for API operations
pub type ApiResult<T> = Result<T, ApiError>;

/// Result type alias for daemon operations
pub type DaemonResult<T> = Result<T, DaemonError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_status_codes() {
        assert_eq!(
            ApiError::NotFound("test".to_string()).into_response().status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::Validation("test".to_string()).into_response().status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            ApiError::Timeout(30).into_response().status(),
            StatusCode::GATEWAY_TIMEOUT
        );
    }

    #[test]
    fn test_core_errors_map_to_api_errors() {
        let api: ApiError = GraError::Configuration("inner_steps must be >= 1".into()).into();
        assert!(matches!(api, ApiError::Validation(_)));

        let api: ApiError = GraError::Computation("phi is NaN".into()).into();
        assert_eq!(api.into_response().status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
