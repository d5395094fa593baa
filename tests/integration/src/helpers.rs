//! Test helpers for integration tests
//!
//! Provides utilities for spawning test servers and making HTTP requests.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::time::Duration;

use anyhow::Result;
use chirpy_api::{create_app, create_app_state};
use chirpy_common::AppConfig;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

use crate::fixtures::{Credentials, LoginBody, UserBody};

/// Test server instance that manages lifecycle
pub struct TestServer {
    pub addr: SocketAddr,
    pub client: Client,
    _handle: JoinHandle<()>,
}

impl TestServer {
    /// Start a new test server
    pub async fn start() -> Result<Self> {
        Self::start_with_config(test_config()?).await
    }

    /// Start a test server with custom config
    pub async fn start_with_config(config: AppConfig) -> Result<Self> {
        let state = create_app_state(config).await?;
        let app = create_app(state)?;

        // Ephemeral port
        let listener = TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0))).await?;
        let addr = listener.local_addr()?;

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.ok();
        });

        let client = Client::builder().timeout(Duration::from_secs(10)).build()?;

        Ok(Self {
            addr,
            client,
            _handle: handle,
        })
    }

    /// Get base URL for the server
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    fn request(&self, method: reqwest::Method, path: &str) -> RequestBuilder {
        self.client
            .request(method, format!("{}{}", self.base_url(), path))
    }

    /// Make a GET request
    pub async fn get(&self, path: &str) -> Result<Response> {
        Ok(self.request(reqwest::Method::GET, path).send().await?)
    }

    /// Make a POST request with JSON body
    pub async fn post<T: Serialize>(&self, path: &str, body: &T) -> Result<Response> {
        Ok(self
            .request(reqwest::Method::POST, path)
            .json(body)
            .send()
            .await?)
    }

    /// Make a POST request with a Bearer credential and no body
    pub async fn post_bearer(&self, path: &str, token: &str) -> Result<Response> {
        Ok(self
            .request(reqwest::Method::POST, path)
            .bearer_auth(token)
            .send()
            .await?)
    }

    /// Make a PUT request with a Bearer credential
    pub async fn put_bearer<T: Serialize>(
        &self,
        path: &str,
        token: &str,
        body: &T,
    ) -> Result<Response> {
        Ok(self
            .request(reqwest::Method::PUT, path)
            .bearer_auth(token)
            .json(body)
            .send()
            .await?)
    }

    /// Register `credentials` and return the created user
    pub async fn register(&self, credentials: &Credentials) -> Result<UserBody> {
        let response = self.post("/api/users", credentials).await?;
        assert_json(response, StatusCode::CREATED).await
    }

    /// Log in with `credentials`
    pub async fn login(&self, credentials: &Credentials) -> Result<LoginBody> {
        let response = self.post("/api/login", credentials).await?;
        assert_json(response, StatusCode::OK).await
    }
}

/// Create a test configuration
///
/// Reads the environment (and `.env`); everything except `DATABASE_URL`
/// falls back to a test default.
pub fn test_config() -> Result<AppConfig> {
    dotenvy::dotenv().ok();

    let defaults: HashMap<&str, &str> = [
        ("API_PORT", "0"),
        ("JWT_SECRET", "integration-test-secret"),
        ("SERVICE_API_KEY", "integration-test-key"),
        ("RATE_LIMIT_BURST", "1000"),
    ]
    .into_iter()
    .collect();

    let config = AppConfig::from_lookup(|key| {
        std::env::var(key)
            .ok()
            .or_else(|| defaults.get(key).map(ToString::to_string))
    })
    .map_err(|e| anyhow::anyhow!("Config error: {e}"))?;

    Ok(config)
}

/// Helper to check if test environment is available
pub fn check_test_env() -> bool {
    if std::env::var("DATABASE_URL").is_err() {
        eprintln!("Skipping test: DATABASE_URL not set");
        return false;
    }
    true
}

/// Assert response status and parse JSON body
pub async fn assert_json<T: DeserializeOwned>(
    response: Response,
    expected_status: StatusCode,
) -> Result<T> {
    let status = response.status();
    if status != expected_status {
        let body = response.text().await?;
        anyhow::bail!("Expected status {expected_status}, got {status}. Body: {body}");
    }
    Ok(response.json().await?)
}

/// Assert response status without parsing body
pub async fn assert_status(response: Response, expected_status: StatusCode) -> Result<()> {
    let status = response.status();
    if status != expected_status {
        let body = response.text().await?;
        anyhow::bail!("Expected status {expected_status}, got {status}. Body: {body}");
    }
    Ok(())
}
