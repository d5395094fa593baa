//! Application error types
//!
//! Unified error handling for the entire application. Every authentication
//! rejection collapses to one public shape; the variant is for logs only.

use chirpy_core::DomainError;
use serde::Serialize;
use std::fmt;

/// Public code and message shared by every authentication rejection
pub const UNAUTHORIZED_CODE: &str = "UNAUTHORIZED";
pub const UNAUTHORIZED_MESSAGE: &str = "Unauthorized";

/// Application-wide error type
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    // Authentication errors
    #[error("Missing or malformed credential")]
    MalformedCredential,

    #[error("Authentication failed")]
    AuthenticationFailed,

    #[error("Invalid token")]
    InvalidToken,

    #[error("Refresh token not found")]
    RefreshTokenNotFound,

    // Validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    // Resource errors
    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    // Credential primitives
    #[error("Hashing error: {0}")]
    Hashing(String),

    #[error("Signing error: {0}")]
    Signing(String),

    #[error("Entropy source unavailable: {0}")]
    Entropy(String),

    // Store errors
    #[error("Store timed out")]
    StoreTimeout,

    #[error("Database error: {0}")]
    Database(String),

    // Internal errors
    #[error("Internal server error")]
    Internal(#[source] anyhow::Error),

    // Domain errors
    #[error(transparent)]
    Domain(DomainError),

    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::RefreshTokenNotFound => Self::RefreshTokenNotFound,
            DomainError::Entropy(msg) => Self::Entropy(msg),
            DomainError::DatabaseError(msg) => Self::Database(msg),
            other => Self::Domain(other),
        }
    }
}

impl AppError {
    /// Get HTTP status code for this error
    #[must_use]
    pub fn status_code(&self) -> u16 {
        match self {
            // 400 Bad Request
            Self::Validation(_) => 400,

            // 401 Unauthorized
            Self::MalformedCredential
            | Self::AuthenticationFailed
            | Self::InvalidToken
            | Self::RefreshTokenNotFound => 401,

            // 404 Not Found
            Self::NotFound(_) => 404,

            // 409 Conflict
            Self::Conflict(_) => 409,

            // 503 Service Unavailable
            Self::StoreTimeout => 503,

            // 500 Internal Server Error
            Self::Hashing(_)
            | Self::Signing(_)
            | Self::Entropy(_)
            | Self::Database(_)
            | Self::Internal(_)
            | Self::Config(_) => 500,

            // Map domain errors to appropriate status codes
            Self::Domain(e) => {
                if e.is_not_found() {
                    404
                } else if e.is_validation() {
                    400
                } else if e.is_conflict() {
                    409
                } else {
                    500
                }
            }
        }
    }

    /// Error code for API responses. Authentication rejections share one code.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        if self.is_auth_rejection() {
            return UNAUTHORIZED_CODE;
        }
        match self {
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::NotFound(_) => "NOT_FOUND",
            Self::Conflict(_) => "CONFLICT",
            Self::StoreTimeout => "SERVICE_UNAVAILABLE",
            Self::Domain(e) if !e.is_infrastructure() => e.code(),
            _ => "INTERNAL_ERROR",
        }
    }

    /// Precise internal kind, for logs
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::MalformedCredential => "MALFORMED_CREDENTIAL",
            Self::AuthenticationFailed => "AUTHENTICATION_FAILED",
            Self::InvalidToken => "INVALID_TOKEN",
            Self::RefreshTokenNotFound => "UNKNOWN_REFRESH_TOKEN",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::NotFound(_) => "NOT_FOUND",
            Self::Conflict(_) => "CONFLICT",
            Self::Hashing(_) => "HASHING_ERROR",
            Self::Signing(_) => "SIGNING_ERROR",
            Self::Entropy(_) => "ENTROPY_ERROR",
            Self::StoreTimeout => "STORE_TIMEOUT",
            Self::Database(_) => "DATABASE_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
            Self::Config(_) => "CONFIG_ERROR",
            Self::Domain(e) => e.code(),
        }
    }

    /// Message safe to show a caller. Server errors never expose their cause.
    #[must_use]
    pub fn public_message(&self) -> String {
        if self.is_auth_rejection() {
            UNAUTHORIZED_MESSAGE.to_string()
        } else if matches!(self, Self::StoreTimeout) {
            "Service temporarily unavailable".to_string()
        } else if self.is_server_error() {
            "Internal server error".to_string()
        } else {
            self.to_string()
        }
    }

    /// Check if this is an authentication rejection (401)
    #[must_use]
    pub fn is_auth_rejection(&self) -> bool {
        matches!(
            self,
            Self::MalformedCredential
                | Self::AuthenticationFailed
                | Self::InvalidToken
                | Self::RefreshTokenNotFound
        )
    }

    /// Check if this is a client error (4xx)
    #[must_use]
    pub fn is_client_error(&self) -> bool {
        let status = self.status_code();
        (400..500).contains(&status)
    }

    /// Check if this is a server error (5xx)
    #[must_use]
    pub fn is_server_error(&self) -> bool {
        let status = self.status_code();
        (500..600).contains(&status)
    }

    /// Create a not found error for a resource type
    #[must_use]
    pub fn not_found(resource: impl fmt::Display) -> Self {
        Self::NotFound(resource.to_string())
    }

    /// Create a validation error
    #[must_use]
    pub fn validation(msg: impl fmt::Display) -> Self {
        Self::Validation(msg.to_string())
    }

    /// Create an internal error from any error
    pub fn internal(err: impl Into<anyhow::Error>) -> Self {
        Self::Internal(err.into())
    }
}

/// Error response structure for API responses
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl From<&AppError> for ErrorResponse {
    fn from(err: &AppError) -> Self {
        Self {
            code: err.error_code().to_string(),
            message: err.public_message(),
            details: None,
        }
    }
}

impl From<AppError> for ErrorResponse {
    fn from(err: AppError) -> Self {
        Self::from(&err)
    }
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;
