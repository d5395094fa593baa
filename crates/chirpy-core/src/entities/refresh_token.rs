//! Refresh token entity - the stateful half of a session
//!
//! A refresh token is an opaque capability: 32 bytes from the OS CSPRNG,
//! hex-encoded. The row is the only state; nothing is ever deleted, revocation
//! just stamps `revoked_at`.

use chrono::{DateTime, Duration, Utc};
use rand::{rngs::OsRng, RngCore};

use crate::error::DomainError;
use crate::value_objects::UserId;

/// Number of random bytes in a refresh token
pub const REFRESH_TOKEN_BYTES: usize = 32;

/// Length of the hex-encoded token value
pub const REFRESH_TOKEN_LEN: usize = REFRESH_TOKEN_BYTES * 2;

/// Lifecycle state of a refresh token at a given instant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshTokenState {
    Active,
    Revoked,
    Expired,
}

/// Stored refresh token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefreshToken {
    pub token: String,
    pub user_id: UserId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub revoked_at: Option<DateTime<Utc>>,
}

impl RefreshToken {
    /// Create a new, active token row
    pub fn new(token: String, user_id: UserId, expires_at: DateTime<Utc>) -> Self {
        let now = Utc::now();
        Self {
            token,
            user_id,
            created_at: now,
            updated_at: now,
            expires_at,
            revoked_at: None,
        }
    }

    /// Create a new token row expiring `ttl` from now
    pub fn with_ttl(token: String, user_id: UserId, ttl: Duration) -> Self {
        let mut row = Self::new(token, user_id, Utc::now());
        row.expires_at = row.created_at + ttl;
        row
    }

    /// State as observed at `now`. Revocation wins over expiry.
    pub fn state_at(&self, now: DateTime<Utc>) -> RefreshTokenState {
        if self.revoked_at.is_some() {
            RefreshTokenState::Revoked
        } else if now >= self.expires_at {
            RefreshTokenState::Expired
        } else {
            RefreshTokenState::Active
        }
    }

    /// Check if token is revoked
    #[inline]
    pub fn is_revoked(&self) -> bool {
        self.revoked_at.is_some()
    }

    /// Check if token can still mint access tokens
    #[inline]
    pub fn is_active(&self) -> bool {
        self.state_at(Utc::now()) == RefreshTokenState::Active
    }

    /// Mark revoked. No-op on an already revoked row so the first stamp is kept.
    pub fn revoke(&mut self, at: DateTime<Utc>) {
        if self.revoked_at.is_none() {
            self.revoked_at = Some(at);
            self.updated_at = at;
        }
    }

    /// Short, log-safe prefix of the token value
    pub fn log_prefix(token: &str) -> &str {
        token.get(..8).unwrap_or("")
    }
}

/// Generate a new refresh token value: 256 bits, 64 lowercase hex chars
///
/// # Errors
/// Returns `DomainError::Entropy` if the OS random source is unavailable
pub fn generate_refresh_token() -> Result<String, DomainError> {
    let mut bytes = [0u8; REFRESH_TOKEN_BYTES];
    OsRng
        .try_fill_bytes(&mut bytes)
        .map_err(|e| DomainError::Entropy(e.to_string()))?;
    Ok(hex::encode(bytes))
}
