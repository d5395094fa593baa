//! Request DTOs for API endpoints
//!
//! All request DTOs implement `Deserialize` and `Validate` for input validation.
//! Password length is checked in bytes by the services, not here.

use serde::Deserialize;
use validator::Validate;

// ============================================================================
// Account Requests
// ============================================================================

/// User registration request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateUserRequest {
    #[validate(length(min = 1, max = 255, message = "Email must be 1-255 characters"))]
    pub email: String,

    pub password: String,
}

/// Update the authenticated user's credentials. At least one field is required.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateUserRequest {
    #[validate(length(min = 1, max = 255, message = "Email must be 1-255 characters"))]
    pub email: Option<String>,

    pub password: Option<String>,
}

impl UpdateUserRequest {
    /// Check whether the request changes anything
    pub fn is_empty(&self) -> bool {
        self.email.is_none() && self.password.is_none()
    }
}

// ============================================================================
// Session Requests
// ============================================================================

/// Login request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, max = 255, message = "Email must be 1-255 characters"))]
    pub email: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}
