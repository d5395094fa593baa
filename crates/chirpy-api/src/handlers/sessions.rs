//! Session handlers
//!
//! Login, access token refresh, and refresh token revocation. Refresh and
//! revoke take the refresh token as the Bearer credential.

use axum::{extract::State, Json};
use chirpy_service::dto::{LoginRequest, LoginResponse, RefreshResponse};
use chirpy_service::SessionService;

use crate::extractors::{BearerToken, ValidatedJson};
use crate::response::{ApiResult, NoContent};
use crate::state::AppState;

/// Login with email and password
///
/// POST /api/login
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<LoginRequest>,
) -> ApiResult<Json<LoginResponse>> {
    let service = SessionService::new(state.service_context());
    let response = service.login(request).await?;
    Ok(Json(response))
}

/// Mint a new access token
///
/// POST /api/refresh
pub async fn refresh(
    State(state): State<AppState>,
    BearerToken(token): BearerToken,
) -> ApiResult<Json<RefreshResponse>> {
    let service = SessionService::new(state.service_context());
    let response = service.refresh(&token).await?;
    Ok(Json(response))
}

/// Revoke a refresh token
///
/// POST /api/revoke
pub async fn revoke(
    State(state): State<AppState>,
    BearerToken(token): BearerToken,
) -> ApiResult<NoContent> {
    let service = SessionService::new(state.service_context());
    service.revoke(&token).await?;
    Ok(NoContent)
}
