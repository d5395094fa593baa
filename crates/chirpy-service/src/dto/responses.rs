//! Response DTOs for API endpoints
//!
//! All response DTOs implement `Serialize` for JSON output. The password
//! hash never appears in any of them.

use chirpy_core::UserId;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Public view of a user account
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserResponse {
    pub id: UserId,
    pub email: String,
    pub is_chirpy_red: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Successful login: the user plus both tokens
#[derive(Debug, Clone, Serialize)]
pub struct LoginResponse {
    #[serde(flatten)]
    pub user: UserResponse,
    /// Access token
    pub token: String,
    pub refresh_token: String,
}

/// A freshly minted access token
#[derive(Debug, Clone, Serialize)]
pub struct RefreshResponse {
    pub token: String,
}

/// Request counter snapshot
#[derive(Debug, Clone, Copy, Serialize)]
pub struct MetricsResponse {
    pub hits: u64,
}
