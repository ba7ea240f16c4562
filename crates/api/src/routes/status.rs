//! Route definition for the status endpoint.

use axum::routing::get;
use axum::Router;

use crate::handlers::status;
use crate::state::AppState;

/// Mount the status route (intended for root level, NOT under `/api`).
pub fn router() -> Router<AppState> {
    Router::new().route("/status", get(status::status))
}
