//! Service status handler.

use std::time::Instant;

use axum::extract::State;
use axum::http::HeaderMap;
use axum::Json;
use serde::Serialize;

use crate::middleware::auth::TOKEN_HEADER;
use crate::state::AppState;

/// Store reachability fragment of the status payload.
#[derive(Debug, Serialize)]
pub struct StoreStatus {
    pub connected: bool,
    pub latency_ms: f64,
}

/// Status response payload.
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    /// `ok` when the store responds, `degraded` otherwise.
    pub status: &'static str,
    /// Crate version from Cargo.toml.
    pub version: &'static str,
    pub store: StoreStatus,
    /// Whether the optional `x-api-token` header resolved to a live
    /// session. Always false when the header is absent.
    pub authenticated: bool,
}

/// GET /status -- service and store health plus an optional session probe.
///
/// Never fails: an unreachable store degrades the payload instead of
/// erroring, and a bad token simply reports `authenticated: false`.
pub async fn status(State(state): State<AppState>, headers: HeaderMap) -> Json<StatusResponse> {
    let started = Instant::now();
    let connected = state.health.ping().await.is_ok();
    let latency_ms = started.elapsed().as_secs_f64() * 1000.0;

    let authenticated = match headers.get(TOKEN_HEADER).and_then(|v| v.to_str().ok()) {
        Some(token) => state.sessions.check(token).await.is_ok(),
        None => false,
    };

    Json(StatusResponse {
        status: if connected { "ok" } else { "degraded" },
        version: env!("CARGO_PKG_VERSION"),
        store: StoreStatus {
            connected,
            latency_ms,
        },
        authenticated,
    })
}
