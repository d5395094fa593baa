//! Repository traits (ports) - define the interface for data access
//!
//! The domain layer defines what it needs, and the infrastructure layer
//! provides the implementation. Each method is one store round trip.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::entities::{RefreshToken, User};
use crate::error::DomainError;
use crate::value_objects::UserId;

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

/// Fields needed to create a user
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub password_hash: String,
}

/// Full replacement of a user's credentials
#[derive(Debug, Clone)]
pub struct CredentialUpdate {
    pub id: UserId,
    pub email: String,
    pub password_hash: String,
}

// ============================================================================
// User Repository
// ============================================================================

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Create a new user. `EmailAlreadyExists` on a duplicate email.
    async fn create(&self, user: NewUser) -> RepoResult<User>;

    /// Find user by ID
    async fn find_by_id(&self, id: UserId) -> RepoResult<Option<User>>;

    /// Find user by email
    async fn find_by_email(&self, email: &str) -> RepoResult<Option<User>>;

    /// Get password hash for authentication
    async fn get_password_hash(&self, id: UserId) -> RepoResult<Option<String>>;

    /// Replace email and password hash. `UserNotFound` if the user is gone.
    async fn update_credentials(&self, update: CredentialUpdate) -> RepoResult<User>;
}

// ============================================================================
// Refresh Token Repository
// ============================================================================

#[async_trait]
pub trait RefreshTokenRepository: Send + Sync {
    /// Persist a new token. `RefreshTokenConflict` if the value already exists.
    async fn create(
        &self,
        token: &str,
        user_id: UserId,
        expires_at: DateTime<Utc>,
    ) -> RepoResult<RefreshToken>;

    /// Owner of an active token. `RefreshTokenNotFound` when absent, revoked, or expired.
    async fn lookup_active_owner(&self, token: &str) -> RepoResult<UserId>;

    /// Stamp `revoked_at` on one token. `RefreshTokenNotFound` if it does not exist.
    async fn revoke(&self, token: &str) -> RepoResult<()>;

    /// Stamp `revoked_at` on every unrevoked token of the user; returns how many.
    async fn revoke_all_for_user(&self, user_id: UserId) -> RepoResult<u64>;

    /// Raw row, regardless of state. For audits and tests.
    async fn find(&self, token: &str) -> RepoResult<Option<RefreshToken>>;
}
