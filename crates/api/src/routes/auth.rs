//! Route definitions for the authentication endpoints.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::auth;
use crate::state::AppState;

/// Routes mounted under `/api`.
///
/// ```text
/// POST /login    -> login
/// GET  /check    -> check
/// POST /logout   -> logout
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/login", post(auth::login))
        .route("/check", get(auth::check))
        .route("/logout", post(auth::logout))
}
