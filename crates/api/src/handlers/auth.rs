//! Handlers for login, session check, and logout.

use axum::extract::State;
use axum::http::HeaderMap;
use axum::Json;
use serde::{Deserialize, Serialize};

use meshmon_core::types::Timestamp;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::{AuthSession, TOKEN_HEADER};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /api/login`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Successful login response: the opaque session token plus the owner
/// profile.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub expires_at: Timestamp,
    pub email: String,
    pub username: String,
    pub access_rights: String,
}

/// Response body for `GET /api/check`.
#[derive(Debug, Serialize)]
pub struct CheckResponse {
    pub email: String,
    pub expires_at: Timestamp,
}

/// Response body for `POST /api/logout`.
#[derive(Debug, Serialize)]
pub struct LogoutResponse {
    pub status: &'static str,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/login
///
/// Authenticate with email + password. Returns an opaque session token.
/// Unknown account, inactive account, and wrong password all produce the
/// same generic 401.
pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    let (record, owner) = state
        .sessions
        .login(&input.email, &input.password)
        .await
        .map_err(AppError::from_auth)?;

    Ok(Json(LoginResponse {
        token: record.token,
        expires_at: record.expires_at,
        email: owner.email,
        username: owner.username,
        access_rights: owner.access_rights,
    }))
}

/// GET /api/check
///
/// Resolve the presented token; 200 with the owner identity while the
/// session is live, 401 otherwise.
pub async fn check(session: AuthSession) -> AppResult<Json<CheckResponse>> {
    Ok(Json(CheckResponse {
        email: session.email,
        expires_at: session.expires_at,
    }))
}

/// POST /api/logout
///
/// Revoke the presented token. Idempotent: revoking an unknown or already
/// expired token still returns 200. Only a missing header is a 401.
pub async fn logout(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> AppResult<Json<LogoutResponse>> {
    let token = headers
        .get(TOKEN_HEADER)
        .and_then(|v| v.to_str().ok())
        .ok_or(AppError::Unauthorized)?;

    state
        .sessions
        .revoke(token)
        .await
        .map_err(AppError::from_auth)?;

    Ok(Json(LogoutResponse { status: "ok" }))
}
