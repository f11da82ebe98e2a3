// SPDX-License-Identifier: MIT

//! Application error types with consistent API responses.

use crate::services::SessionError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Application error type that converts to HTTP responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Not signed in")]
    Unauthorized,

    #[error("Invalid password")]
    InvalidCredentials,

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Invalid request: {0}")]
    BadRequest(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Account storage unavailable")]
    StoreUnavailable,

    #[error("Backend error: {0}")]
    Backend(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<SessionError> for AppError {
    fn from(err: SessionError) -> Self {
        match err {
            SessionError::UserNotFound => AppError::NotFound("User not found".to_string()),
            SessionError::InvalidCredentials => AppError::InvalidCredentials,
            SessionError::NotSignedIn => AppError::Unauthorized,
            SessionError::AlreadyExists | SessionError::Conflict => {
                AppError::Conflict(err.to_string())
            }
            SessionError::StoreUnavailable => AppError::StoreUnavailable,
            SessionError::Transport(detail) => AppError::Backend(detail),
            SessionError::Internal(detail) => AppError::Internal(anyhow::anyhow!(detail)),
        }
    }
}

/// JSON error response body
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error, details) = match &self {
            AppError::Unauthorized => (StatusCode::UNAUTHORIZED, "unauthorized", None),
            AppError::InvalidCredentials => {
                (StatusCode::UNAUTHORIZED, "invalid_credentials", None)
            }
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", Some(msg.clone())),
            AppError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, "bad_request", Some(msg.clone()))
            }
            AppError::Conflict(msg) => (StatusCode::CONFLICT, "conflict", Some(msg.clone())),
            AppError::StoreUnavailable => {
                (StatusCode::SERVICE_UNAVAILABLE, "store_unavailable", None)
            }
            AppError::Backend(msg) => {
                tracing::error!(error = %msg, "Content store backend error");
                (StatusCode::BAD_GATEWAY, "backend_error", Some(msg.clone()))
            }
            AppError::Internal(err) => {
                tracing::error!(error = %err, "Internal server error");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal_error", None)
            }
        };

        let body = ErrorResponse {
            error: error.to_string(),
            details,
        };

        (status, Json(body)).into_response()
    }
}

/// Result type alias for handlers
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_errors_map_to_statuses() {
        let err: AppError = SessionError::InvalidCredentials.into();
        assert!(matches!(err, AppError::InvalidCredentials));

        let err: AppError = SessionError::AlreadyExists.into();
        assert!(matches!(err, AppError::Conflict(_)));

        let err: AppError = SessionError::StoreUnavailable.into();
        assert!(matches!(err, AppError::StoreUnavailable));

        let err: AppError = SessionError::NotSignedIn.into();
        assert!(matches!(err, AppError::Unauthorized));
    }
}
