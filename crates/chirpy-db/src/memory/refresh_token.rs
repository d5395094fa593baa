//! In-memory implementation of RefreshTokenRepository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::{mapref::entry::Entry, DashMap};

use chirpy_core::{
    DomainError, RefreshToken, RefreshTokenRepository, RefreshTokenState, RepoResult, UserId,
};

/// In-memory refresh token store keyed by token value
#[derive(Debug, Default)]
pub struct InMemoryRefreshTokenRepository {
    tokens: DashMap<String, RefreshToken>,
}

impl InMemoryRefreshTokenRepository {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored rows, in any state
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Check if the store is empty
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Insert a row as-is. Lets tests seed expired or revoked tokens.
    pub fn insert_row(&self, row: RefreshToken) {
        self.tokens.insert(row.token.clone(), row);
    }
}

#[async_trait]
impl RefreshTokenRepository for InMemoryRefreshTokenRepository {
    async fn create(
        &self,
        token: &str,
        user_id: UserId,
        expires_at: DateTime<Utc>,
    ) -> RepoResult<RefreshToken> {
        match self.tokens.entry(token.to_string()) {
            Entry::Occupied(_) => Err(DomainError::RefreshTokenConflict),
            Entry::Vacant(slot) => {
                let row = RefreshToken::new(token.to_string(), user_id, expires_at);
                slot.insert(row.clone());
                Ok(row)
            }
        }
    }

    async fn lookup_active_owner(&self, token: &str) -> RepoResult<UserId> {
        let now = Utc::now();
        self.tokens
            .get(token)
            .filter(|row| row.state_at(now) == RefreshTokenState::Active)
            .map(|row| row.user_id)
            .ok_or(DomainError::RefreshTokenNotFound)
    }

    async fn revoke(&self, token: &str) -> RepoResult<()> {
        let mut row = self
            .tokens
            .get_mut(token)
            .ok_or(DomainError::RefreshTokenNotFound)?;
        row.revoke(Utc::now());
        Ok(())
    }

    async fn revoke_all_for_user(&self, user_id: UserId) -> RepoResult<u64> {
        let now = Utc::now();
        let mut revoked = 0;
        for mut row in self.tokens.iter_mut() {
            if row.user_id == user_id && !row.is_revoked() {
                row.revoke(now);
                revoked += 1;
            }
        }
        Ok(revoked)
    }

    async fn find(&self, token: &str) -> RepoResult<Option<RefreshToken>> {
        Ok(self.tokens.get(token).map(|row| row.clone()))
    }
}
