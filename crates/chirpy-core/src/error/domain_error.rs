//! Domain errors - error types for the domain layer and the stores behind it

use thiserror::Error;

use crate::value_objects::UserId;

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    // =========================================================================
    // Not Found Errors
    // =========================================================================
    #[error("User not found: {0}")]
    UserNotFound(UserId),

    /// Absent, revoked, or expired. The three are never told apart.
    #[error("Refresh token not found")]
    RefreshTokenNotFound,

    // =========================================================================
    // Validation Errors
    // =========================================================================
    #[error("Validation error: {0}")]
    ValidationError(String),

    // =========================================================================
    // Conflict Errors
    // =========================================================================
    #[error("Email already in use")]
    EmailAlreadyExists,

    #[error("Refresh token value already exists")]
    RefreshTokenConflict,

    // =========================================================================
    // Infrastructure Errors (wrapped)
    // =========================================================================
    #[error("Entropy source unavailable: {0}")]
    Entropy(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl DomainError {
    /// Get an error code string for API responses
    pub fn code(&self) -> &'static str {
        match self {
            Self::UserNotFound(_) => "UNKNOWN_USER",
            Self::RefreshTokenNotFound => "UNKNOWN_REFRESH_TOKEN",
            Self::ValidationError(_) => "VALIDATION_ERROR",
            Self::EmailAlreadyExists => "EMAIL_ALREADY_EXISTS",
            Self::RefreshTokenConflict => "REFRESH_TOKEN_CONFLICT",
            Self::Entropy(_) => "ENTROPY_ERROR",
            Self::DatabaseError(_) => "DATABASE_ERROR",
            Self::InternalError(_) => "INTERNAL_ERROR",
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::UserNotFound(_) | Self::RefreshTokenNotFound)
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::ValidationError(_))
    }

    /// Check if this is a conflict error
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::EmailAlreadyExists | Self::RefreshTokenConflict)
    }

    /// Check if this is an infrastructure failure (store, entropy)
    pub fn is_infrastructure(&self) -> bool {
        matches!(
            self,
            Self::Entropy(_) | Self::DatabaseError(_) | Self::InternalError(_)
        )
    }
}
