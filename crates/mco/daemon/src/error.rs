//! Error types for mco-daemon.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use mco_core::GeneratorError;
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

/// Result alias for daemon-level operations
pub type DaemonResult<T> = Result<T, DaemonError>;

/// API-level errors
#[derive(Debug, Error)]
pub enum ApiError {
    /// No data matches the request (simulated empty perimeter)
    #[error("Not found: {0}")]
    NotFound(String),

    /// Malformed request parameter
    #[error("Bad request: {0}")]
    BadRequest(String),
}

/// Result alias for API handlers
pub type ApiResult<T> = Result<T, ApiError>;

impl From<GeneratorError> for ApiError {
    fn from(err: GeneratorError) -> Self {
        // Both engine failures (bad trancheage, bad annee) are caller input
        // problems.
        ApiError::BadRequest(err.to_string())
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
        };

        let body = ErrorResponse {
            error: self.to_string(),
            code: code.to_string(),
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generator_errors_map_to_bad_request() {
        let err: ApiError = GeneratorError::InvalidYear {
            value: "20xx".to_string(),
        }
        .into();
        assert!(matches!(err, ApiError::BadRequest(_)));
    }
}
