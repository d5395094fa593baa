//! Health check handler

use axum::http::header;
use axum::response::IntoResponse;

/// Liveness probe
///
/// GET /api/healthz
pub async fn healthz() -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "text/plain; charset=utf-8")], "OK")
}
