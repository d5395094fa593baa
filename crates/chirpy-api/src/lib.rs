//! # chirpy-api
//!
//! REST API server built with Axum framework. A thin transport over the
//! session and account services.

pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod response;
pub mod routes;
pub mod server;
pub mod state;

pub use server::{create_app, create_app_state, create_in_memory_app_state, run, run_server};
pub use state::AppState;
