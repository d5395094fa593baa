//! Service context - dependency container for services
//!
//! Holds the stores, the access token codec, and the few knobs the session
//! lifecycle needs. Every store call made by a service goes through
//! [`ServiceContext::store`], which bounds it by the configured deadline.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use chirpy_common::{
    AccessTokenCodec, AppError, CredentialHasher, PasswordService, TokenIssuer, TokenValidator,
};
use chirpy_core::{RefreshTokenRepository, RepoResult, UserRepository};
use tracing::warn;

use super::error::{ServiceError, ServiceResult};
use super::hit_counter::{AtomicHitCounter, HitCounter};

/// Default refresh token lifetime in seconds (60 days)
pub const DEFAULT_REFRESH_TOKEN_TTL_SECS: i64 = 60 * 24 * 60 * 60;

/// Default upper bound on a single store call
pub const DEFAULT_STORE_TIMEOUT: Duration = Duration::from_secs(5);

/// Service context containing all dependencies
#[derive(Clone)]
pub struct ServiceContext {
    // Stores
    user_repo: Arc<dyn UserRepository>,
    refresh_token_repo: Arc<dyn RefreshTokenRepository>,

    // Credentials
    token_issuer: Arc<dyn TokenIssuer>,
    token_validator: Arc<dyn TokenValidator>,
    password_hasher: Arc<dyn CredentialHasher>,

    // Request counting
    hit_counter: Arc<dyn HitCounter>,

    refresh_token_ttl: chrono::Duration,
    store_timeout: Duration,
}

impl ServiceContext {
    /// Start building a context
    pub fn builder() -> ServiceContextBuilder {
        ServiceContextBuilder::new()
    }

    // === Stores ===

    /// Get the user repository
    pub fn user_repo(&self) -> &dyn UserRepository {
        self.user_repo.as_ref()
    }

    /// Get the refresh token repository
    pub fn refresh_token_repo(&self) -> &dyn RefreshTokenRepository {
        self.refresh_token_repo.as_ref()
    }

    /// Run one store call under the store deadline
    ///
    /// On elapse the call is dropped and `StoreTimeout` is returned.
    /// There is no retry.
    pub async fn store<T, F>(&self, operation: &'static str, call: F) -> ServiceResult<T>
    where
        F: Future<Output = RepoResult<T>> + Send,
    {
        match tokio::time::timeout(self.store_timeout, call).await {
            Ok(result) => result.map_err(ServiceError::from),
            Err(_) => {
                warn!(
                    operation,
                    timeout_ms = u64::try_from(self.store_timeout.as_millis()).unwrap_or(u64::MAX),
                    "Store call timed out"
                );
                Err(ServiceError::App(AppError::StoreTimeout))
            }
        }
    }

    // === Credentials ===

    /// Get the access token issuer
    pub fn token_issuer(&self) -> &dyn TokenIssuer {
        self.token_issuer.as_ref()
    }

    /// Get the access token validator
    pub fn token_validator(&self) -> &dyn TokenValidator {
        self.token_validator.as_ref()
    }

    /// Get the password hasher
    pub fn password_hasher(&self) -> &Arc<dyn CredentialHasher> {
        &self.password_hasher
    }

    // === Metrics ===

    /// Get the request hit counter
    pub fn hit_counter(&self) -> &dyn HitCounter {
        self.hit_counter.as_ref()
    }

    // === Settings ===

    /// Lifetime of newly issued refresh tokens
    pub fn refresh_token_ttl(&self) -> chrono::Duration {
        self.refresh_token_ttl
    }

    /// Upper bound on a single store call
    pub fn store_timeout(&self) -> Duration {
        self.store_timeout
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("repositories", &"...")
            .field("refresh_token_ttl_secs", &self.refresh_token_ttl.num_seconds())
            .field("store_timeout", &self.store_timeout)
            .finish_non_exhaustive()
    }
}

/// Builder for creating ServiceContext with custom configuration
pub struct ServiceContextBuilder {
    user_repo: Option<Arc<dyn UserRepository>>,
    refresh_token_repo: Option<Arc<dyn RefreshTokenRepository>>,
    token_issuer: Option<Arc<dyn TokenIssuer>>,
    token_validator: Option<Arc<dyn TokenValidator>>,
    password_hasher: Option<Arc<dyn CredentialHasher>>,
    hit_counter: Option<Arc<dyn HitCounter>>,
    refresh_token_ttl: chrono::Duration,
    store_timeout: Duration,
}

impl ServiceContextBuilder {
    pub fn new() -> Self {
        Self {
            user_repo: None,
            refresh_token_repo: None,
            token_issuer: None,
            token_validator: None,
            password_hasher: None,
            hit_counter: None,
            refresh_token_ttl: chrono::Duration::seconds(DEFAULT_REFRESH_TOKEN_TTL_SECS),
            store_timeout: DEFAULT_STORE_TIMEOUT,
        }
    }

    pub fn user_repo(mut self, repo: Arc<dyn UserRepository>) -> Self {
        self.user_repo = Some(repo);
        self
    }

    pub fn refresh_token_repo(mut self, repo: Arc<dyn RefreshTokenRepository>) -> Self {
        self.refresh_token_repo = Some(repo);
        self
    }

    /// Use one codec for both issuing and validating access tokens
    pub fn access_token_codec(mut self, codec: Arc<AccessTokenCodec>) -> Self {
        self.token_issuer = Some(codec.clone());
        self.token_validator = Some(codec);
        self
    }

    pub fn token_issuer(mut self, issuer: Arc<dyn TokenIssuer>) -> Self {
        self.token_issuer = Some(issuer);
        self
    }

    pub fn token_validator(mut self, validator: Arc<dyn TokenValidator>) -> Self {
        self.token_validator = Some(validator);
        self
    }

    /// Defaults to argon2id via `PasswordService`
    pub fn password_hasher(mut self, hasher: Arc<dyn CredentialHasher>) -> Self {
        self.password_hasher = Some(hasher);
        self
    }

    pub fn hit_counter(mut self, counter: Arc<dyn HitCounter>) -> Self {
        self.hit_counter = Some(counter);
        self
    }

    pub fn refresh_token_ttl(mut self, ttl: chrono::Duration) -> Self {
        self.refresh_token_ttl = ttl;
        self
    }

    pub fn store_timeout(mut self, timeout: Duration) -> Self {
        self.store_timeout = timeout;
        self
    }

    /// Build the ServiceContext
    ///
    /// # Errors
    /// Returns `ServiceError::Validation` if any required dependency is missing
    pub fn build(self) -> ServiceResult<ServiceContext> {
        if self.refresh_token_ttl <= chrono::Duration::zero() {
            return Err(ServiceError::validation("refresh_token_ttl must be positive"));
        }
        if self.store_timeout.is_zero() {
            return Err(ServiceError::validation("store_timeout must be positive"));
        }

        let hit_counter: Arc<dyn HitCounter> = match self.hit_counter {
            Some(counter) => counter,
            None => Arc::new(AtomicHitCounter::new()),
        };

        let password_hasher: Arc<dyn CredentialHasher> = match self.password_hasher {
            Some(hasher) => hasher,
            None => Arc::new(PasswordService::new()),
        };

        Ok(ServiceContext {
            user_repo: self
                .user_repo
                .ok_or_else(|| ServiceError::validation("user_repo is required"))?,
            refresh_token_repo: self
                .refresh_token_repo
                .ok_or_else(|| ServiceError::validation("refresh_token_repo is required"))?,
            token_issuer: self
                .token_issuer
                .ok_or_else(|| ServiceError::validation("token_issuer is required"))?,
            token_validator: self
                .token_validator
                .ok_or_else(|| ServiceError::validation("token_validator is required"))?,
            password_hasher,
            hit_counter,
            refresh_token_ttl: self.refresh_token_ttl,
            store_timeout: self.store_timeout,
        })
    }
}

impl Default for ServiceContextBuilder {
    fn default() -> Self {
        Self::new()
    }
}
