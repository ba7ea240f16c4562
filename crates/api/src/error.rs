use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use meshmon_core::error::CoreError;

/// Application-level error type for HTTP handlers.
///
/// Implements [`IntoResponse`] to produce consistent JSON error responses.
/// Authentication-path failures must go through [`AppError::from_auth`] so
/// that `NotFound`, `Expired`, and `AuthFailed` all present as the same
/// generic unauthorized body.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Generic unauthorized response; deliberately carries no detail about
    /// which authentication check failed.
    #[error("Unauthorized")]
    Unauthorized,

    /// A resource lookup that legitimately 404s (repeater records).
    #[error("Not found: {0}")]
    NotFound(String),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Storage unavailable after the adapter's retries were exhausted.
    #[error("Service unavailable: {0}")]
    Unavailable(String),

    /// An internal error with a human-readable message.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    /// Collapse an authentication-path [`CoreError`] into the response
    /// taxonomy: token/credential failures become one generic 401, while
    /// transient and internal failures keep their own status codes.
    pub fn from_auth(err: CoreError) -> Self {
        match err {
            CoreError::NotFound { .. } | CoreError::Expired { .. } | CoreError::AuthFailed => {
                AppError::Unauthorized
            }
            other => other.into(),
        }
    }
}

impl From<CoreError> for AppError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::NotFound { entity, key } => {
                AppError::NotFound(format!("{entity} {key} not found"))
            }
            CoreError::Expired { .. } | CoreError::AuthFailed => AppError::Unauthorized,
            CoreError::Transient(msg) => AppError::Unavailable(msg),
            CoreError::Validation(msg) => AppError::BadRequest(msg),
            CoreError::Conflict(msg) => AppError::Internal(format!("version conflict: {msg}")),
            CoreError::Internal(msg) => AppError::Internal(msg),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                "UNAUTHORIZED",
                "Invalid credentials or token".to_string(),
            ),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
            AppError::Unavailable(msg) => {
                tracing::error!(error = %msg, "Storage unavailable");
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "SERVICE_UNAVAILABLE",
                    "Storage unavailable".to_string(),
                )
            }
            AppError::Internal(msg) => {
                tracing::error!(error = %msg, "Internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal error occurred".to_string(),
                )
            }
        };

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}
