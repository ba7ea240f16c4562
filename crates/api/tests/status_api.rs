//! HTTP-level integration tests for the status endpoint.

mod common;

use axum::http::StatusCode;
use common::{body_json, get, get_auth, login_token};

/// Status reports ok and an unauthenticated session when no token is sent.
#[tokio::test]
async fn status_ok_without_token() {
    let fixture = common::build_test_app();

    let response = get(&fixture.app, "/status").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["status"], "ok");
    assert_eq!(json["store"]["connected"], true);
    assert!(json["store"]["latency_ms"].is_number());
    assert_eq!(json["authenticated"], false);
    assert!(json["version"].is_string());
}

/// A valid session token flips the authenticated flag.
#[tokio::test]
async fn status_authenticated_with_valid_token() {
    let fixture = common::build_test_app();
    let token = login_token(&fixture.app).await;

    let response = get_auth(&fixture.app, "/status", &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["authenticated"], true);
}

/// An unknown token still returns 200, just unauthenticated.
#[tokio::test]
async fn status_with_invalid_token_is_not_an_error() {
    let fixture = common::build_test_app();

    let response = get_auth(&fixture.app, "/status", "wrongtoken").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["authenticated"], false);
}

/// An expired session no longer authenticates the status probe.
#[tokio::test]
async fn status_after_expiry_is_unauthenticated() {
    let fixture = common::build_test_app();
    let token = login_token(&fixture.app).await;

    fixture.clock.advance(chrono::Duration::days(8));
    let response = get_auth(&fixture.app, "/status", &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["authenticated"], false);
}
