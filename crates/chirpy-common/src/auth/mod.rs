//! Credential primitives
//!
//! Everything here is pure computation: no store access, no I/O.

mod access_token;
mod bearer;
mod password;

pub use access_token::{
    issue_access_token, validate_access_token, AccessTokenCodec, Claims, InvalidTokenReason,
    TokenError, TokenIssuer, TokenValidator, ACCESS_TOKEN_TTL_SECS, DEFAULT_ISSUER,
};
pub use bearer::{extract_api_key, extract_bearer, verify_api_key};
pub use password::{
    hash_password, validate_password_strength, verify_password, CredentialHasher, PasswordService,
    MAX_PASSWORD_BYTES, UNMATCHABLE_PASSWORD_HASH,
};
