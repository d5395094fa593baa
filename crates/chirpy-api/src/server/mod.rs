//! Server setup and initialization
//!
//! Provides the main application builder and server runner.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use chirpy_common::{AccessTokenCodec, AppConfig, AppError};
use chirpy_core::{RefreshTokenRepository, UserRepository};
use chirpy_db::{
    create_pool, run_migrations, DatabaseConfig, InMemoryRefreshTokenRepository,
    InMemoryUserRepository, PgRefreshTokenRepository, PgUserRepository,
};
use chirpy_service::ServiceContext;
use tokio::net::TcpListener;
use tracing::info;

use crate::middleware::apply_middleware;
use crate::routes::create_router;
use crate::state::AppState;

/// Build the complete Axum application with all routes and middleware
///
/// # Errors
/// Returns `AppError::Config` if the middleware settings are unusable
pub fn create_app(state: AppState) -> Result<Router, AppError> {
    let config = state.config();
    let router = apply_middleware(
        create_router(state.clone()),
        &config.rate_limit,
        &config.cors,
        config.app.env.is_production(),
    )?;
    Ok(router.with_state(state))
}

/// Connect to PostgreSQL, apply migrations, and create AppState
pub async fn create_app_state(config: AppConfig) -> Result<AppState, AppError> {
    info!("Connecting to PostgreSQL...");
    let pool = create_pool(&DatabaseConfig::from(&config.database))
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;
    info!("PostgreSQL connection established");

    run_migrations(&pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;
    info!("Database migrations applied");

    let user_repo = Arc::new(PgUserRepository::new(pool.clone()));
    let refresh_token_repo = Arc::new(PgRefreshTokenRepository::new(pool));

    build_app_state(config, user_repo, refresh_token_repo)
}

/// Create AppState backed by the in-memory stores
pub fn create_in_memory_app_state(config: AppConfig) -> Result<AppState, AppError> {
    build_app_state(
        config,
        Arc::new(InMemoryUserRepository::new()),
        Arc::new(InMemoryRefreshTokenRepository::new()),
    )
}

fn build_app_state(
    config: AppConfig,
    user_repo: Arc<dyn UserRepository>,
    refresh_token_repo: Arc<dyn RefreshTokenRepository>,
) -> Result<AppState, AppError> {
    let codec = Arc::new(AccessTokenCodec::new(
        config.jwt.secret.as_bytes(),
        config.jwt.issuer.clone(),
        chrono::Duration::seconds(config.jwt.access_token_expiry),
    ));

    let service_context = ServiceContext::builder()
        .user_repo(user_repo)
        .refresh_token_repo(refresh_token_repo)
        .access_token_codec(codec)
        .refresh_token_ttl(chrono::Duration::seconds(
            config.session.refresh_token_expiry,
        ))
        .store_timeout(Duration::from_millis(config.session.store_timeout_ms))
        .build()
        .map_err(|e| AppError::Config(e.to_string()))?;

    Ok(AppState::new(service_context, config))
}

/// Run the HTTP server
pub async fn run_server(app: Router, addr: SocketAddr) -> Result<(), AppError> {
    info!(%addr, "Starting HTTP server");

    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| AppError::Config(format!("Failed to bind to {addr}: {e}")))?;

    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .await
        .map_err(|e| AppError::Config(format!("Server error: {e}")))?;

    Ok(())
}

/// Run the complete server with configuration
pub async fn run(config: AppConfig) -> Result<(), AppError> {
    let addr: SocketAddr = config
        .api
        .address()
        .parse()
        .map_err(|e| AppError::Config(format!("Invalid listen address: {e}")))?;

    let state = create_app_state(config).await?;
    let app = create_app(state)?;

    run_server(app, addr).await
}
