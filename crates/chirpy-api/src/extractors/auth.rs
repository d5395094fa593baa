//! Authorization header extractors
//!
//! `AuthUser` resolves a Bearer access token to a user. `BearerToken` hands
//! the raw Bearer credential (a refresh token) to the handler. `ServiceKey`
//! guards the admin routes with the configured API key.

use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::{header, request::Parts},
};
use chirpy_common::{extract_api_key, extract_bearer, verify_api_key, AppError};
use chirpy_core::UserId;
use chirpy_service::SessionService;

use crate::response::ApiError;
use crate::state::AppState;

/// Raw `Authorization` header value. Absent and non-UTF-8 are both `None`.
fn authorization(parts: &Parts) -> Option<&str> {
    parts
        .headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
}

/// Authenticated user extracted from a Bearer access token
#[derive(Debug, Clone, Copy)]
pub struct AuthUser {
    /// User ID from the token subject
    pub user_id: UserId,
}

impl AuthUser {
    /// Create a new AuthUser
    pub fn new(user_id: UserId) -> Self {
        Self { user_id }
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let token = extract_bearer(authorization(parts))?;

        let app_state = AppState::from_ref(state);
        let user_id = SessionService::new(app_state.service_context()).authenticate(token)?;

        Ok(AuthUser::new(user_id))
    }
}

/// Raw Bearer credential, not interpreted
#[derive(Debug, Clone)]
pub struct BearerToken(pub String);

#[async_trait]
impl<S> FromRequestParts<S> for BearerToken
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let token = extract_bearer(authorization(parts))?;
        Ok(BearerToken(token.to_string()))
    }
}

/// Proof that the caller presented the service API key
#[derive(Debug, Clone, Copy)]
pub struct ServiceKey;

#[async_trait]
impl<S> FromRequestParts<S> for ServiceKey
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let presented = extract_api_key(authorization(parts))?;

        let app_state = AppState::from_ref(state);
        verify_api_key(presented, &app_state.config().api_key.service_key).map_err(
            |e: AppError| {
                tracing::warn!("Service API key mismatch");
                ApiError::from(e)
            },
        )?;

        Ok(ServiceKey)
    }
}
