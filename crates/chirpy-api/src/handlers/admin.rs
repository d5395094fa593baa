//! Admin handlers
//!
//! Hit counter inspection. Both routes require the service API key.

use axum::{extract::State, Json};
use chirpy_service::dto::MetricsResponse;
use tracing::info;

use crate::extractors::ServiceKey;
use crate::response::NoContent;
use crate::state::AppState;

/// Current request count
///
/// GET /admin/metrics
pub async fn metrics(State(state): State<AppState>, _key: ServiceKey) -> Json<MetricsResponse> {
    Json(MetricsResponse {
        hits: state.hit_counter().hits(),
    })
}

/// Zero the request count
///
/// POST /admin/reset
pub async fn reset(State(state): State<AppState>, _key: ServiceKey) -> NoContent {
    state.hit_counter().reset();
    info!("Hit counter reset");
    NoContent
}
