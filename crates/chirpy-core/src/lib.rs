//! # chirpy-core
//!
//! Domain layer containing the user identity, the refresh token entity and its
//! lifecycle, and the store traits the session subsystem is written against.
//! This crate has zero dependencies on infrastructure (database, web framework, etc.).

pub mod entities;
pub mod error;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use entities::{
    generate_refresh_token, RefreshToken, RefreshTokenState, User, REFRESH_TOKEN_BYTES,
    REFRESH_TOKEN_LEN,
};
pub use error::DomainError;
pub use traits::{
    CredentialUpdate, NewUser, RefreshTokenRepository, RepoResult, UserRepository,
};
pub use value_objects::{UserId, UserIdParseError};
