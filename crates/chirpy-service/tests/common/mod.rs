//! Shared fixtures for service tests: in-memory stores behind a probe that
//! counts calls and can inject latency or failures.

#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chirpy_common::{AccessTokenCodec, AppError, CredentialHasher, PasswordService};
use chirpy_core::{DomainError, RefreshToken, RefreshTokenRepository, RepoResult, UserId};
use chirpy_db::{InMemoryRefreshTokenRepository, InMemoryUserRepository};
use chirpy_service::dto::{CreateUserRequest, LoginRequest, LoginResponse, UserResponse};
use chirpy_service::{ServiceContext, SessionService, UserService};
use chrono::{DateTime, Utc};

pub const SECRET: &[u8] = b"service-test-secret";
pub const PASSWORD: &str = "04234";

/// Refresh token store wrapper used to observe and perturb store traffic
#[derive(Default)]
pub struct ProbeRefreshTokenRepository {
    pub inner: InMemoryRefreshTokenRepository,
    calls: AtomicUsize,
    delay: Option<Duration>,
    fail_revoke_all: AtomicBool,
}

impl ProbeRefreshTokenRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every call sleeps for `delay` before touching the store
    pub fn slow(delay: Duration) -> Self {
        Self {
            delay: Some(delay),
            ..Self::default()
        }
    }

    pub fn fail_revoke_all(&self) {
        self.fail_revoke_all.store(true, Ordering::SeqCst);
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    async fn enter(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
    }
}

#[async_trait]
impl RefreshTokenRepository for ProbeRefreshTokenRepository {
    async fn create(
        &self,
        token: &str,
        user_id: UserId,
        expires_at: DateTime<Utc>,
    ) -> RepoResult<RefreshToken> {
        self.enter().await;
        self.inner.create(token, user_id, expires_at).await
    }

    async fn lookup_active_owner(&self, token: &str) -> RepoResult<UserId> {
        self.enter().await;
        self.inner.lookup_active_owner(token).await
    }

    async fn revoke(&self, token: &str) -> RepoResult<()> {
        self.enter().await;
        self.inner.revoke(token).await
    }

    async fn revoke_all_for_user(&self, user_id: UserId) -> RepoResult<u64> {
        self.enter().await;
        if self.fail_revoke_all.load(Ordering::SeqCst) {
            return Err(DomainError::DatabaseError("connection reset".to_string()));
        }
        self.inner.revoke_all_for_user(user_id).await
    }

    async fn find(&self, token: &str) -> RepoResult<Option<RefreshToken>> {
        self.enter().await;
        self.inner.find(token).await
    }
}

/// Argon2 hasher that counts verifications
#[derive(Default)]
pub struct CountingHasher {
    inner: PasswordService,
    verifies: AtomicUsize,
}

impl CountingHasher {
    pub fn verifies(&self) -> usize {
        self.verifies.load(Ordering::SeqCst)
    }
}

impl CredentialHasher for CountingHasher {
    fn hash(&self, password: &str) -> Result<String, AppError> {
        self.inner.hash(password)
    }

    fn verify(&self, password: &str, hash: &str) -> Result<bool, AppError> {
        self.verifies.fetch_add(1, Ordering::SeqCst);
        self.inner.verify(password, hash)
    }
}

pub struct Harness {
    pub ctx: ServiceContext,
    pub users: Arc<InMemoryUserRepository>,
    pub tokens: Arc<ProbeRefreshTokenRepository>,
    pub codec: Arc<AccessTokenCodec>,
    pub hasher: Arc<CountingHasher>,
}

impl Harness {
    pub fn new() -> Self {
        Self::with_tokens(ProbeRefreshTokenRepository::new(), Duration::from_secs(5))
    }

    pub fn with_tokens(tokens: ProbeRefreshTokenRepository, store_timeout: Duration) -> Self {
        let users = Arc::new(InMemoryUserRepository::new());
        let tokens = Arc::new(tokens);
        let codec = Arc::new(AccessTokenCodec::with_defaults(SECRET));
        let hasher = Arc::new(CountingHasher::default());

        let ctx = ServiceContext::builder()
            .user_repo(users.clone())
            .refresh_token_repo(tokens.clone())
            .access_token_codec(codec.clone())
            .password_hasher(hasher.clone())
            .store_timeout(store_timeout)
            .build()
            .expect("complete context");

        Self {
            ctx,
            users,
            tokens,
            codec,
            hasher,
        }
    }

    pub fn sessions(&self) -> SessionService<'_> {
        SessionService::new(&self.ctx)
    }

    pub fn accounts(&self) -> UserService<'_> {
        UserService::new(&self.ctx)
    }

    pub async fn register(&self, email: &str) -> UserResponse {
        self.accounts()
            .register(CreateUserRequest {
                email: email.to_string(),
                password: PASSWORD.to_string(),
            })
            .await
            .expect("registration")
    }

    pub async fn login(&self, email: &str) -> LoginResponse {
        self.sessions()
            .login(LoginRequest {
                email: email.to_string(),
                password: PASSWORD.to_string(),
            })
            .await
            .expect("login")
    }
}
