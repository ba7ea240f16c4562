//! Session-token authentication extractor for Axum handlers.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use meshmon_core::types::Timestamp;

use crate::error::AppError;
use crate::state::AppState;

/// Request header carrying the opaque session token.
pub const TOKEN_HEADER: &str = "x-api-token";

/// Authenticated session extracted from the `x-api-token` header.
///
/// Every extraction scans the token log fresh and resolves the current
/// record; validity is never cached between requests, so a revocation is
/// visible on the very next call. Use this as an extractor parameter in
/// any handler that requires authentication:
///
/// ```ignore
/// async fn my_handler(session: AuthSession) -> AppResult<Json<()>> {
///     tracing::info!(email = %session.email, "handling request");
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AuthSession {
    /// Owner identity of the resolved session record.
    pub email: String,
    /// The presented token.
    pub token: String,
    /// Expiry of the resolved session record.
    pub expires_at: Timestamp,
}

impl FromRequestParts<AppState> for AuthSession {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(TOKEN_HEADER)
            .and_then(|v| v.to_str().ok())
            .ok_or(AppError::Unauthorized)?;

        let record = state
            .sessions
            .check(token)
            .await
            .map_err(AppError::from_auth)?;

        Ok(AuthSession {
            email: record.email,
            token: record.token,
            expires_at: record.expires_at,
        })
    }
}
