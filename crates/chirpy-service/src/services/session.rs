//! Session service
//!
//! Composes password verification, the access token codec, and the refresh
//! token store into the session lifecycle. Per refresh token:
//! `ACTIVE -> REVOKED` on explicit revoke or password change, and
//! `ACTIVE -> EXPIRED` when a lookup happens past `expires_at`. Both are
//! terminal. Refresh does not rotate the refresh token.

use chirpy_common::UNMATCHABLE_PASSWORD_HASH;
use chirpy_core::{generate_refresh_token, RefreshToken, UserId, REFRESH_TOKEN_LEN};
use chrono::Utc;
use tracing::{debug, error, info, instrument, warn};

use crate::dto::{LoginRequest, LoginResponse, RefreshResponse, UserResponse};

use super::blocking;
use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Session service
pub struct SessionService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> SessionService<'a> {
    /// Create a new SessionService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Login with email and password
    ///
    /// Unknown email and wrong password are the same rejection, and both pay
    /// for one argon2 verification.
    #[instrument(skip(self, request), fields(email = %request.email))]
    pub async fn login(&self, request: LoginRequest) -> ServiceResult<LoginResponse> {
        let user = self
            .ctx
            .store("find_by_email", self.ctx.user_repo().find_by_email(&request.email))
            .await?;

        let credentials = match user {
            Some(user) => self
                .ctx
                .store("get_password_hash", self.ctx.user_repo().get_password_hash(user.id))
                .await?
                .map(|hash| (user, hash)),
            None => None,
        };

        let Some((user, password_hash)) = credentials else {
            warn!("Login failed: unknown email");
            // same argon2 cost as a wrong password
            let _ = blocking::verify_password(
                self.ctx.password_hasher(),
                request.password,
                UNMATCHABLE_PASSWORD_HASH.to_string(),
            )
            .await;
            return Err(ServiceError::unauthorized());
        };

        let is_valid = blocking::verify_password(
            self.ctx.password_hasher(),
            request.password,
            password_hash,
        )
        .await?;

        if !is_valid {
            warn!(user_id = %user.id, "Login failed: invalid password");
            return Err(ServiceError::unauthorized());
        }

        let token = self.ctx.token_issuer().issue(user.id)?;
        let refresh_token = self.issue_refresh_token(user.id).await?;

        info!(user_id = %user.id, "User logged in successfully");

        Ok(LoginResponse {
            user: UserResponse::from(user),
            token,
            refresh_token,
        })
    }

    /// Mint a new access token from a refresh token
    ///
    /// The refresh token must be exactly 64 characters before the store is
    /// consulted. The refresh token itself stays valid.
    #[instrument(skip(self, raw), fields(token_prefix = RefreshToken::log_prefix(raw)))]
    pub async fn refresh(&self, raw: &str) -> ServiceResult<RefreshResponse> {
        if raw.len() != REFRESH_TOKEN_LEN {
            debug!(len = raw.len(), "Refresh rejected: wrong token length");
            return Err(ServiceError::unauthorized());
        }

        let user_id = self
            .ctx
            .store(
                "lookup_active_owner",
                self.ctx.refresh_token_repo().lookup_active_owner(raw),
            )
            .await
            .inspect_err(|e| {
                if e.is_auth_rejection() {
                    debug!("Refresh rejected: unknown, revoked, or expired token");
                }
            })?;

        let token = self.ctx.token_issuer().issue(user_id)?;

        info!(user_id = %user_id, "Access token refreshed");
        Ok(RefreshResponse { token })
    }

    /// Revoke a refresh token
    ///
    /// Wrong-length and unknown tokens are silent no-ops. Only infrastructure
    /// failures are reported.
    #[instrument(skip(self, raw), fields(token_prefix = RefreshToken::log_prefix(raw)))]
    pub async fn revoke(&self, raw: &str) -> ServiceResult<()> {
        if raw.len() != REFRESH_TOKEN_LEN {
            debug!(len = raw.len(), "Revoke ignored: wrong token length");
            return Ok(());
        }

        match self
            .ctx
            .store("revoke", self.ctx.refresh_token_repo().revoke(raw))
            .await
        {
            Ok(()) => {
                info!("Refresh token revoked");
                Ok(())
            }
            Err(e) if e.is_auth_rejection() => {
                debug!("Revoke ignored: unknown token");
                Ok(())
            }
            Err(e) => Err(e),
        }
    }

    /// Revoke every refresh token of a user after a password change
    ///
    /// Failures are logged and swallowed; the password change has already
    /// been committed.
    #[instrument(skip(self))]
    pub async fn on_password_change(&self, user_id: UserId) {
        match self
            .ctx
            .store(
                "revoke_all_for_user",
                self.ctx.refresh_token_repo().revoke_all_for_user(user_id),
            )
            .await
        {
            Ok(revoked) => info!(user_id = %user_id, revoked, "Refresh tokens revoked"),
            Err(e) => error!(user_id = %user_id, error = %e, "Failed to revoke refresh tokens"),
        }
    }

    /// Resolve an access token to the user it was issued for
    ///
    /// Pure: no store access.
    #[instrument(skip(self, token))]
    pub fn authenticate(&self, token: &str) -> ServiceResult<UserId> {
        self.ctx.token_validator().validate(token).map_err(|e| {
            debug!(error = %e, "Access token rejected");
            ServiceError::from(e)
        })
    }

    async fn issue_refresh_token(&self, user_id: UserId) -> ServiceResult<String> {
        let token = generate_refresh_token()?;
        let expires_at = Utc::now() + self.ctx.refresh_token_ttl();

        self.ctx
            .store(
                "create_refresh_token",
                self.ctx
                    .refresh_token_repo()
                    .create(&token, user_id, expires_at),
            )
            .await?;

        Ok(token)
    }
}
