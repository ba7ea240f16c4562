pub mod auth;
pub mod repeaters;
pub mod status;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /login               POST  login (public)
/// /check               GET   resolve session (requires token)
/// /logout              POST  revoke session (requires token header)
///
/// /repeaters/{id}      GET   resolve repeater record (requires token)
/// /repeaters/{id}      PUT   upsert repeater record (requires token)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(auth::router())
        .merge(repeaters::router())
}
