//! API Integration Tests
//!
//! These tests require:
//! - Running PostgreSQL instance
//! - Environment variable: DATABASE_URL
//!
//! Run with: cargo test -p integration-tests --test api_tests

use integration_tests::{
    assert_json, assert_status, check_test_env, Credentials, TestServer, TokenBody,
};
use reqwest::StatusCode;
use serde_json::json;

// ============================================================================
// Health Check Tests
// ============================================================================

#[tokio::test]
async fn test_healthz() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/api/healthz").await.expect("Request failed");
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.text().await.unwrap(), "OK");
}

// ============================================================================
// Account Tests
// ============================================================================

#[tokio::test]
async fn test_register_and_login() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let credentials = Credentials::unique();

    let user = server.register(&credentials).await.unwrap();
    assert_eq!(user.email, credentials.email);
    assert!(!user.is_chirpy_red);

    let login = server.login(&credentials).await.unwrap();
    assert_eq!(login.user.id, user.id);
    assert_eq!(login.refresh_token.len(), 64);
    assert!(!login.token.is_empty());
}

#[tokio::test]
async fn test_register_duplicate_email() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let credentials = Credentials::unique();
    server.register(&credentials).await.unwrap();

    let response = server.post("/api/users", &credentials).await.unwrap();
    assert_status(response, StatusCode::CONFLICT).await.unwrap();
}

#[tokio::test]
async fn test_login_wrong_password() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let credentials = Credentials::unique();
    server.register(&credentials).await.unwrap();

    let response = server
        .post(
            "/api/login",
            &json!({ "email": credentials.email, "password": "wrong" }),
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();
}

// ============================================================================
// Session Tests
// ============================================================================

#[tokio::test]
async fn test_refresh_then_revoke() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let credentials = Credentials::unique();
    server.register(&credentials).await.unwrap();
    let login = server.login(&credentials).await.unwrap();

    let response = server
        .post_bearer("/api/refresh", &login.refresh_token)
        .await
        .unwrap();
    let refreshed: TokenBody = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(!refreshed.token.is_empty());

    let response = server
        .post_bearer("/api/revoke", &login.refresh_token)
        .await
        .unwrap();
    assert_status(response, StatusCode::NO_CONTENT).await.unwrap();

    let response = server
        .post_bearer("/api/refresh", &login.refresh_token)
        .await
        .unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();
}

#[tokio::test]
async fn test_password_change_revokes_sessions() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let credentials = Credentials::unique();
    server.register(&credentials).await.unwrap();
    let login = server.login(&credentials).await.unwrap();

    let response = server
        .put_bearer("/api/users", &login.token, &json!({ "password": "say-my-name" }))
        .await
        .unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();

    let response = server
        .post_bearer("/api/refresh", &login.refresh_token)
        .await
        .unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();

    let relogin = Credentials {
        email: credentials.email.clone(),
        password: "say-my-name".to_string(),
    };
    server.login(&relogin).await.unwrap();
}

#[tokio::test]
async fn test_email_change_conflict() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let walt = Credentials::unique();
    let jesse = Credentials::unique();
    server.register(&walt).await.unwrap();
    server.register(&jesse).await.unwrap();
    let login = server.login(&walt).await.unwrap();

    let response = server
        .put_bearer("/api/users", &login.token, &json!({ "email": jesse.email }))
        .await
        .unwrap();
    assert_status(response, StatusCode::CONFLICT).await.unwrap();
}
