use std::sync::Arc;

use meshmon_core::repeaters::RepeaterRegistry;
use meshmon_core::sessions::SessionService;
use meshmon_core::store::StoreHealth;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Token issuance, validation, and revocation.
    pub sessions: Arc<SessionService>,
    /// Repeater identity records.
    pub repeaters: Arc<RepeaterRegistry>,
    /// Store liveness probe for the status endpoint.
    pub health: Arc<dyn StoreHealth>,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
}
