//! HTTP tests driving the full router against the in-memory stores

use std::collections::HashMap;

use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    response::Response,
    Router,
};
use chirpy_api::{create_app, create_in_memory_app_state};
use chirpy_common::AppConfig;
use serde_json::{json, Value};
use tower::ServiceExt;

const SERVICE_KEY: &str = "polka-test-key";

fn test_config() -> AppConfig {
    let vars: HashMap<&str, &str> = [
        ("API_PORT", "8080"),
        ("DATABASE_URL", "postgres://unused"),
        ("JWT_SECRET", "http-test-secret"),
        ("SERVICE_API_KEY", SERVICE_KEY),
        ("RATE_LIMIT_BURST", "1000"),
    ]
    .into_iter()
    .collect();
    AppConfig::from_lookup(|key| vars.get(key).map(ToString::to_string)).unwrap()
}

fn app() -> Router {
    create_app(create_in_memory_app_state(test_config()).unwrap()).unwrap()
}

fn json_request(method: &str, uri: &str, auth: Option<&str>, body: &Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(auth) = auth {
        builder = builder.header(header::AUTHORIZATION, auth);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

fn empty_request(method: &str, uri: &str, auth: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(auth) = auth {
        builder = builder.header(header::AUTHORIZATION, auth);
    }
    builder.body(Body::empty()).unwrap()
}

async fn send(app: &Router, request: Request<Body>) -> Response {
    app.clone().oneshot(request).await.unwrap()
}

async fn json_body(response: Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

async fn register(app: &Router, email: &str, password: &str) -> Value {
    let response = send(
        app,
        json_request(
            "POST",
            "/api/users",
            None,
            &json!({ "email": email, "password": password }),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    json_body(response).await
}

async fn login(app: &Router, email: &str, password: &str) -> Response {
    send(
        app,
        json_request(
            "POST",
            "/api/login",
            None,
            &json!({ "email": email, "password": password }),
        ),
    )
    .await
}

#[tokio::test]
async fn test_healthz() {
    let app = app();
    let response = send(&app, empty_request("GET", "/api/healthz", None)).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers()[header::CONTENT_TYPE]
        .to_str()
        .unwrap()
        .starts_with("text/plain"));
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert_eq!(&bytes[..], b"OK");
}

#[tokio::test]
async fn test_register_hides_password_hash() {
    let app = app();
    let user = register(&app, "walt@breakingbad.com", "04234").await;

    assert_eq!(user["email"], "walt@breakingbad.com");
    assert_eq!(user["is_chirpy_red"], false);
    assert!(user["id"].is_string());
    assert!(user.get("password").is_none());
    assert!(user.get("password_hash").is_none());
    assert!(user.get("hashed_password").is_none());
}

#[tokio::test]
async fn test_register_conflict_and_bad_body() {
    let app = app();
    register(&app, "walt@breakingbad.com", "04234").await;

    let response = send(
        &app,
        json_request(
            "POST",
            "/api/users",
            None,
            &json!({ "email": "walt@breakingbad.com", "password": "x" }),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let response = send(
        &app,
        json_request("POST", "/api/users", None, &json!({ "email": "", "password": "x" })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = send(
        &app,
        json_request("POST", "/api/users", None, &json!({ "email": "a@b.c" })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_login_returns_flat_user_with_tokens() {
    let app = app();
    let user = register(&app, "walt@breakingbad.com", "04234").await;

    let response = login(&app, "walt@breakingbad.com", "04234").await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;

    assert_eq!(body["id"], user["id"]);
    assert_eq!(body["email"], "walt@breakingbad.com");
    assert!(body["token"].as_str().unwrap().split('.').count() == 3);
    assert_eq!(body["refresh_token"].as_str().unwrap().len(), 64);
}

#[tokio::test]
async fn test_login_failures_share_one_body() {
    let app = app();
    register(&app, "walt@breakingbad.com", "04234").await;

    let wrong_password = login(&app, "walt@breakingbad.com", "nope").await;
    let unknown_email = login(&app, "saul@breakingbad.com", "04234").await;

    assert_eq!(wrong_password.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_email.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(json_body(wrong_password).await, json_body(unknown_email).await);
}

#[tokio::test]
async fn test_login_email_too_long() {
    let app = app();
    let response = login(&app, &"a".repeat(256), "04234").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_login_blank_fields_rejected() {
    let app = app();
    register(&app, "walt@breakingbad.com", "04234").await;

    let no_email = login(&app, "", "04234").await;
    assert_eq!(no_email.status(), StatusCode::BAD_REQUEST);

    let no_password = login(&app, "walt@breakingbad.com", "").await;
    assert_eq!(no_password.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_refresh_and_revoke_flow() {
    let app = app();
    register(&app, "walt@breakingbad.com", "04234").await;
    let body = json_body(login(&app, "walt@breakingbad.com", "04234").await).await;
    let bearer = format!("Bearer {}", body["refresh_token"].as_str().unwrap());

    let response = send(&app, empty_request("POST", "/api/refresh", Some(&bearer))).await;
    assert_eq!(response.status(), StatusCode::OK);
    let refreshed = json_body(response).await;
    assert!(refreshed["token"].is_string());
    assert_eq!(refreshed.as_object().unwrap().len(), 1);

    let response = send(&app, empty_request("POST", "/api/revoke", Some(&bearer))).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = send(&app, empty_request("POST", "/api/refresh", Some(&bearer))).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    // revoking again is still a silent success
    let response = send(&app, empty_request("POST", "/api/revoke", Some(&bearer))).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn test_malformed_authorization_headers() {
    let app = app();

    for auth in [None, Some("Bearer"), Some("Basic abc"), Some("Bearer a b")] {
        let response = send(&app, empty_request("POST", "/api/refresh", auth)).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let response = send(&app, empty_request("POST", "/api/revoke", auth)).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    // well-formed but unknown: refresh rejects, revoke is a no-op
    let response = send(&app, empty_request("POST", "/api/refresh", Some("Bearer short"))).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let response = send(&app, empty_request("POST", "/api/revoke", Some("Bearer short"))).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn test_update_user_requires_access_token() {
    let app = app();
    register(&app, "walt@breakingbad.com", "04234").await;
    let body = json_body(login(&app, "walt@breakingbad.com", "04234").await).await;
    let access = format!("Bearer {}", body["token"].as_str().unwrap());
    let refresh = format!("Bearer {}", body["refresh_token"].as_str().unwrap());
    let update = json!({ "email": "heisenberg@breakingbad.com", "password": "say-my-name" });

    let response = send(&app, json_request("PUT", "/api/users", None, &update)).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    // a refresh token is not an access token
    let response = send(&app, json_request("PUT", "/api/users", Some(&refresh), &update)).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = send(&app, json_request("PUT", "/api/users", Some(&access), &update)).await;
    assert_eq!(response.status(), StatusCode::OK);
    let updated = json_body(response).await;
    assert_eq!(updated["email"], "heisenberg@breakingbad.com");

    // the password change revoked the session
    let response = send(&app, empty_request("POST", "/api/refresh", Some(&refresh))).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = login(&app, "heisenberg@breakingbad.com", "say-my-name").await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_update_user_empty_body_rejected() {
    let app = app();
    register(&app, "walt@breakingbad.com", "04234").await;
    let body = json_body(login(&app, "walt@breakingbad.com", "04234").await).await;
    let access = format!("Bearer {}", body["token"].as_str().unwrap());

    let response = send(&app, json_request("PUT", "/api/users", Some(&access), &json!({}))).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_admin_routes_require_service_key() {
    let app = app();
    send(&app, empty_request("GET", "/api/healthz", None)).await;
    send(&app, empty_request("GET", "/api/healthz", None)).await;

    let response = send(&app, empty_request("GET", "/admin/metrics", None)).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = send(
        &app,
        empty_request("GET", "/admin/metrics", Some("ApiKey wrong-key")),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let key = format!("ApiKey {SERVICE_KEY}");
    let response = send(&app, empty_request("GET", "/admin/metrics", Some(&key))).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await["hits"], 2);

    let response = send(&app, empty_request("POST", "/admin/reset", Some(&key))).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = send(&app, empty_request("GET", "/admin/metrics", Some(&key))).await;
    assert_eq!(json_body(response).await["hits"], 0);
}

#[tokio::test]
async fn test_request_id_is_propagated() {
    let app = app();
    let response = send(&app, empty_request("GET", "/api/healthz", None)).await;
    assert!(response.headers().contains_key("x-request-id"));
}
