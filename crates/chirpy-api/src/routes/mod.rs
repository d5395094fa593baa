//! Route definitions
//!
//! Public routes live under `/api`, counter administration under `/admin`.

use axum::{
    middleware::from_fn_with_state,
    routing::{get, post},
    Router,
};

use crate::handlers::{admin, health, sessions, users};
use crate::middleware::count_hits;
use crate::state::AppState;

/// Create the main router. Requests to `/api` are counted.
pub fn create_router(state: AppState) -> Router<AppState> {
    Router::new()
        .nest("/api", api_routes().layer(from_fn_with_state(state, count_hits)))
        .nest("/admin", admin_routes())
}

/// Public API routes
fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/healthz", get(health::healthz))
        .merge(user_routes())
        .merge(session_routes())
}

/// Account routes
fn user_routes() -> Router<AppState> {
    Router::new().route("/users", post(users::create_user).put(users::update_user))
}

/// Session routes
fn session_routes() -> Router<AppState> {
    Router::new()
        .route("/login", post(sessions::login))
        .route("/refresh", post(sessions::refresh))
        .route("/revoke", post(sessions::revoke))
}

/// Admin routes
fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/metrics", get(admin::metrics))
        .route("/reset", post(admin::reset))
}
