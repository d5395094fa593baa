//! User service
//!
//! Account creation and credential updates. A password change revokes every
//! refresh token the user holds.

use chirpy_common::validate_password_strength;
use chirpy_core::{CredentialUpdate, NewUser, UserId};
use tracing::{info, instrument};

use crate::dto::{CreateUserRequest, UpdateUserRequest, UserResponse};

use super::blocking;
use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};
use super::session::SessionService;

/// User service
pub struct UserService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> UserService<'a> {
    /// Create a new UserService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Register a new user
    #[instrument(skip(self, request), fields(email = %request.email))]
    pub async fn register(&self, request: CreateUserRequest) -> ServiceResult<UserResponse> {
        if request.email.trim().is_empty() {
            return Err(ServiceError::validation("Email is required"));
        }
        validate_password_strength(&request.password)?;

        let password_hash =
            blocking::hash_password(self.ctx.password_hasher(), request.password).await?;

        let user = self
            .ctx
            .store(
                "create_user",
                self.ctx.user_repo().create(NewUser {
                    email: request.email,
                    password_hash,
                }),
            )
            .await?;

        info!(user_id = %user.id, "User registered successfully");
        Ok(UserResponse::from(user))
    }

    /// Replace the email and/or password of `user_id`
    ///
    /// Omitted fields keep their stored values.
    #[instrument(skip(self, request))]
    pub async fn update_credentials(
        &self,
        user_id: UserId,
        request: UpdateUserRequest,
    ) -> ServiceResult<UserResponse> {
        if request.is_empty() {
            return Err(ServiceError::validation("Nothing to update"));
        }
        if request.email.as_deref().is_some_and(|e| e.trim().is_empty()) {
            return Err(ServiceError::validation("Email must not be empty"));
        }
        if let Some(password) = &request.password {
            validate_password_strength(password)?;
        }

        let current = self
            .ctx
            .store("find_by_id", self.ctx.user_repo().find_by_id(user_id))
            .await?
            .ok_or_else(|| ServiceError::not_found("User", user_id.to_string()))?;

        let password_changed = request.password.is_some();
        let password_hash = match request.password {
            Some(password) => {
                blocking::hash_password(self.ctx.password_hasher(), password).await?
            }
            None => self
                .ctx
                .store("get_password_hash", self.ctx.user_repo().get_password_hash(user_id))
                .await?
                .ok_or_else(|| ServiceError::not_found("User", user_id.to_string()))?,
        };

        let user = self
            .ctx
            .store(
                "update_credentials",
                self.ctx.user_repo().update_credentials(CredentialUpdate {
                    id: user_id,
                    email: request.email.unwrap_or(current.email),
                    password_hash,
                }),
            )
            .await?;

        info!(user_id = %user_id, password_changed, "User credentials updated");

        if password_changed {
            SessionService::new(self.ctx).on_password_change(user_id).await;
        }

        Ok(UserResponse::from(user))
    }
}
