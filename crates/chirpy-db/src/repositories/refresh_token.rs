//! PostgreSQL implementation of RefreshTokenRepository
//!
//! Liveness is decided inside the statement against the database clock, so
//! a lookup sees one consistent instant for both the revocation and expiry
//! checks. Token values are never logged in full.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use chirpy_core::{DomainError, RefreshToken, RefreshTokenRepository, RepoResult, UserId};

use crate::models::RefreshTokenModel;

use super::error::{map_db_error, map_unique_violation};

/// PostgreSQL implementation of RefreshTokenRepository
#[derive(Clone)]
pub struct PgRefreshTokenRepository {
    pool: PgPool,
}

impl PgRefreshTokenRepository {
    /// Create a new PgRefreshTokenRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RefreshTokenRepository for PgRefreshTokenRepository {
    #[instrument(
        skip(self, token),
        fields(token_prefix = RefreshToken::log_prefix(token))
    )]
    async fn create(
        &self,
        token: &str,
        user_id: UserId,
        expires_at: DateTime<Utc>,
    ) -> RepoResult<RefreshToken> {
        let row = sqlx::query_as::<_, RefreshTokenModel>(
            r"
            INSERT INTO refresh_tokens (token, user_id, created_at, updated_at, expires_at, revoked_at)
            VALUES ($1, $2, NOW(), NOW(), $3, NULL)
            RETURNING token, user_id, created_at, updated_at, expires_at, revoked_at
            ",
        )
        .bind(token)
        .bind(user_id.into_inner())
        .bind(expires_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, DomainError::RefreshTokenConflict))?;

        Ok(RefreshToken::from(row))
    }

    #[instrument(
        skip(self, token),
        fields(token_prefix = RefreshToken::log_prefix(token))
    )]
    async fn lookup_active_owner(&self, token: &str) -> RepoResult<UserId> {
        let owner = sqlx::query_scalar::<_, Uuid>(
            r"
            SELECT user_id
            FROM refresh_tokens
            WHERE token = $1 AND revoked_at IS NULL AND expires_at > NOW()
            ",
        )
        .bind(token)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        owner
            .map(UserId::new)
            .ok_or(DomainError::RefreshTokenNotFound)
    }

    #[instrument(
        skip(self, token),
        fields(token_prefix = RefreshToken::log_prefix(token))
    )]
    async fn revoke(&self, token: &str) -> RepoResult<()> {
        // First revocation stamp wins; repeated calls leave the row untouched.
        let result = sqlx::query(
            r"
            UPDATE refresh_tokens
            SET revoked_at = COALESCE(revoked_at, NOW()),
                updated_at = CASE WHEN revoked_at IS NULL THEN NOW() ELSE updated_at END
            WHERE token = $1
            ",
        )
        .bind(token)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::RefreshTokenNotFound);
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn revoke_all_for_user(&self, user_id: UserId) -> RepoResult<u64> {
        let result = sqlx::query(
            r"
            UPDATE refresh_tokens
            SET revoked_at = NOW(), updated_at = NOW()
            WHERE user_id = $1 AND revoked_at IS NULL
            ",
        )
        .bind(user_id.into_inner())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.rows_affected())
    }

    #[instrument(
        skip(self, token),
        fields(token_prefix = RefreshToken::log_prefix(token))
    )]
    async fn find(&self, token: &str) -> RepoResult<Option<RefreshToken>> {
        let result = sqlx::query_as::<_, RefreshTokenModel>(
            r"
            SELECT token, user_id, created_at, updated_at, expires_at, revoked_at
            FROM refresh_tokens
            WHERE token = $1
            ",
        )
        .bind(token)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(RefreshToken::from))
    }
}
