use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use meshmon_api::config::ServerConfig;
use meshmon_api::router::build_app_router;
use meshmon_api::state::AppState;
use meshmon_core::auth::hash_password;
use meshmon_core::clock::SystemClock;
use meshmon_core::models::owner::OwnerRecord;
use meshmon_core::repeaters::RepeaterRegistry;
use meshmon_core::sessions::SessionService;
use meshmon_store::maintenance;
use meshmon_store::memory::MemoryStore;
use meshmon_store::retry::{RetryPolicy, RetryingDirectory, RetryingLog};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "meshmon_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = ServerConfig::from_env();
    tracing::info!(host = %config.host, port = %config.port, "Loaded server configuration");

    // --- Store ---
    let store = Arc::new(MemoryStore::new());
    seed_admin_owner(&store);

    let clock = Arc::new(SystemClock);
    let policy = RetryPolicy {
        attempts: config.store.retry_attempts,
        backoff: config.store.retry_backoff(),
        op_timeout: config.store.op_timeout(),
    };

    // --- Services ---
    let sessions = Arc::new(SessionService::new(
        Arc::new(RetryingLog::new(store.clone(), policy.clone())),
        Arc::new(RetryingDirectory::new(store.clone(), policy.clone())),
        clock.clone(),
        config.session_ttl(),
    ));
    let repeaters = Arc::new(RepeaterRegistry::new(
        Arc::new(RetryingLog::new(store.clone(), policy)),
        clock.clone(),
    ));

    // --- Store maintenance (merge + TTL sweep) ---
    let maintenance_cancel = CancellationToken::new();
    let maintenance_handle = tokio::spawn(maintenance::run(
        store.clone(),
        clock,
        config.maintenance_interval(),
        maintenance_cancel.clone(),
    ));

    // --- App state ---
    let state = AppState {
        sessions,
        repeaters,
        health: store,
        config: Arc::new(config.clone()),
    };

    // --- Router ---
    let app = build_app_router(state, &config);

    // --- Start server ---
    let addr = SocketAddr::new(
        config.host.parse().expect("Invalid HOST address"),
        config.port,
    );
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    // --- Post-shutdown cleanup ---
    tracing::info!("Server stopped accepting connections, cleaning up");

    maintenance_cancel.cancel();
    let _ = tokio::time::timeout(Duration::from_secs(5), maintenance_handle).await;
    tracing::info!("Store maintenance stopped");

    tracing::info!("Graceful shutdown complete");
}

/// Seed the initial owner account from `ADMIN_EMAIL` / `ADMIN_PASSWORD`.
///
/// Owner accounts are reference data maintained outside this service; the
/// seeded account is what lets a fresh deployment log in at all.
fn seed_admin_owner(store: &MemoryStore) {
    let (Ok(email), Ok(password)) = (
        std::env::var("ADMIN_EMAIL"),
        std::env::var("ADMIN_PASSWORD"),
    ) else {
        tracing::warn!("ADMIN_EMAIL/ADMIN_PASSWORD not set; no owner accounts seeded");
        return;
    };

    let password_hash = hash_password(&password).expect("Failed to hash ADMIN_PASSWORD");
    let username = email.split('@').next().unwrap_or_default().to_string();

    store.seed_owner(OwnerRecord {
        email: email.clone(),
        username,
        password_hash,
        active: true,
        access_rights: "admin".to_string(),
    });
    tracing::info!(email = %email, "Seeded admin owner account");
}

/// Wait for a termination signal to initiate graceful shutdown.
///
/// Handles both SIGINT (Ctrl-C) and SIGTERM (on Unix) so the server
/// shuts down cleanly whether stopped interactively or by a process
/// manager (e.g. systemd, Docker, Kubernetes).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
