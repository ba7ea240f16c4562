//! Route definitions for repeater identity records.

use axum::routing::get;
use axum::Router;

use crate::handlers::repeaters;
use crate::state::AppState;

/// Routes mounted under `/api`.
///
/// ```text
/// GET /repeaters/{id}  -> get_repeater
/// PUT /repeaters/{id}  -> upsert_repeater
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route(
        "/repeaters/{id}",
        get(repeaters::get_repeater).put(repeaters::upsert_repeater),
    )
}
