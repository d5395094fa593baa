//! # chirpy-common
//!
//! Shared utilities including configuration, error handling, credential
//! primitives (password hashing, header parsing, access tokens), and telemetry.

pub mod auth;
pub mod config;
pub mod error;
pub mod telemetry;

// Re-export commonly used types at crate root
pub use auth::{
    extract_api_key, extract_bearer, hash_password, issue_access_token, validate_access_token,
    validate_password_strength, verify_api_key, verify_password, AccessTokenCodec, Claims,
    CredentialHasher, InvalidTokenReason, PasswordService, TokenError, TokenIssuer,
    TokenValidator, ACCESS_TOKEN_TTL_SECS, DEFAULT_ISSUER, MAX_PASSWORD_BYTES,
    UNMATCHABLE_PASSWORD_HASH,
};
pub use config::{
    ApiKeyConfig, AppConfig, AppSettings, ConfigError, CorsConfig, DatabaseConfig, Environment,
    JwtConfig, RateLimitConfig, ServerConfig, SessionConfig,
};
pub use error::{AppError, AppResult, ErrorResponse, UNAUTHORIZED_CODE, UNAUTHORIZED_MESSAGE};
pub use telemetry::{try_init_tracing, try_init_tracing_with_config, TracingConfig, TracingError};
