#![allow(dead_code)] // not every test binary uses every helper

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, Response, StatusCode};
use axum::Router;
use chrono::{TimeZone, Utc};
use http_body_util::BodyExt;
use tower::ServiceExt;

use meshmon_api::config::{ServerConfig, StoreConfig};
use meshmon_api::router::build_app_router;
use meshmon_api::state::AppState;
use meshmon_core::auth::hash_password;
use meshmon_core::clock::ManualClock;
use meshmon_core::models::owner::OwnerRecord;
use meshmon_core::repeaters::RepeaterRegistry;
use meshmon_core::sessions::SessionService;
use meshmon_core::types::Timestamp;
use meshmon_store::memory::MemoryStore;

/// Password of every seeded test owner.
pub const TEST_PASSWORD: &str = "test_password_123!";

/// Fixed start time of the manual test clock.
pub fn test_start() -> Timestamp {
    Utc.with_ymd_and_hms(2024, 3, 10, 9, 0, 0).unwrap()
}

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        session_ttl_days: 7,
        store: StoreConfig {
            retry_attempts: 3,
            retry_backoff_ms: 1,
            op_timeout_ms: 1000,
            maintenance_interval_secs: 60,
        },
    }
}

/// The app under test plus handles to the store and clock so tests can
/// inject duplicate rows and cross expiry boundaries.
pub struct TestApp {
    pub app: Router,
    pub store: Arc<MemoryStore>,
    pub clock: Arc<ManualClock>,
}

/// Build the full application router with the production middleware stack
/// over a fresh in-memory store.
///
/// Seeds one active owner (`alice@example.com`) and one inactive owner
/// (`bob@example.com`), both with [`TEST_PASSWORD`].
pub fn build_test_app() -> TestApp {
    let config = test_config();

    let store = Arc::new(MemoryStore::new());
    let hashed = hash_password(TEST_PASSWORD).expect("hashing should succeed");
    store.seed_owner(OwnerRecord {
        email: "alice@example.com".to_string(),
        username: "alice".to_string(),
        password_hash: hashed.clone(),
        active: true,
        access_rights: "admin".to_string(),
    });
    store.seed_owner(OwnerRecord {
        email: "bob@example.com".to_string(),
        username: "bob".to_string(),
        password_hash: hashed,
        active: false,
        access_rights: String::new(),
    });

    let clock = Arc::new(ManualClock::new(test_start()));
    let sessions = Arc::new(SessionService::new(
        store.clone(),
        store.clone(),
        clock.clone(),
        config.session_ttl(),
    ));
    let repeaters = Arc::new(RepeaterRegistry::new(store.clone(), clock.clone()));

    let state = AppState {
        sessions,
        repeaters,
        health: store.clone(),
        config: Arc::new(config.clone()),
    };

    TestApp {
        app: build_app_router(state, &config),
        store,
        clock,
    }
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn get(app: &Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .uri(uri)
        .body(Body::empty())
        .expect("request should build");
    app.clone().oneshot(request).await.expect("infallible")
}

pub async fn get_auth(app: &Router, uri: &str, token: &str) -> Response<Body> {
    let request = Request::builder()
        .uri(uri)
        .header("x-api-token", token)
        .body(Body::empty())
        .expect("request should build");
    app.clone().oneshot(request).await.expect("infallible")
}

pub async fn post_json(app: &Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .expect("request should build");
    app.clone().oneshot(request).await.expect("infallible")
}

pub async fn post_auth(app: &Router, uri: &str, token: &str) -> Response<Body> {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("x-api-token", token)
        .body(Body::empty())
        .expect("request should build");
    app.clone().oneshot(request).await.expect("infallible")
}

pub async fn put_json_auth(
    app: &Router,
    uri: &str,
    token: &str,
    body: serde_json::Value,
) -> Response<Body> {
    let request = Request::builder()
        .method("PUT")
        .uri(uri)
        .header("x-api-token", token)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .expect("request should build");
    app.clone().oneshot(request).await.expect("infallible")
}

/// Read a response body as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body should collect")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("body should be JSON")
}

/// Log in as the seeded active owner and return the session token.
pub async fn login_token(app: &Router) -> String {
    let body = serde_json::json!({ "email": "alice@example.com", "password": TEST_PASSWORD });
    let response = post_json(app, "/api/login", body).await;
    assert_eq!(response.status(), StatusCode::OK);
    body_json(response).await["token"]
        .as_str()
        .expect("login response must contain token")
        .to_string()
}
