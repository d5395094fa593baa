//! Access tokens
//!
//! Short-lived HS256 JWTs carrying `iss`, `sub`, `iat`, `exp` and a random
//! `jti`, so two tokens minted in the same second still differ. Validation
//! is signature + algorithm family + issuer + clock, nothing else; there is no
//! store lookup, which is also why an issued access token outlives a logout.

use chirpy_core::UserId;
use chrono::{Duration, Utc};
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::error::AppError;

/// Issuer stamped into and required from every access token
pub const DEFAULT_ISSUER: &str = "chirpy";

/// Access token lifetime (1 hour)
pub const ACCESS_TOKEN_TTL_SECS: i64 = 60 * 60;

/// Accepted header algorithms. All share the HMAC key family.
const HMAC_ALGORITHMS: [Algorithm; 3] = [Algorithm::HS256, Algorithm::HS384, Algorithm::HS512];

/// JWT claims structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Issuer
    pub iss: String,
    /// Subject (user ID, hyphenated UUID)
    pub sub: String,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
    /// Token id, unique per issued token
    pub jti: String,
}

impl Claims {
    /// Get the subject as a UserId
    ///
    /// # Errors
    /// Returns `TokenError::Invalid(Subject)` if the subject is not a user id
    pub fn user_id(&self) -> Result<UserId, TokenError> {
        self.sub
            .parse()
            .map_err(|_| TokenError::Invalid(InvalidTokenReason::Subject))
    }
}

/// Why a token was rejected. For logs only; callers see one rejection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidTokenReason {
    Malformed,
    Signature,
    Algorithm,
    Issuer,
    Expired,
    Subject,
}

impl std::fmt::Display for InvalidTokenReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let reason = match self {
            Self::Malformed => "malformed",
            Self::Signature => "bad signature",
            Self::Algorithm => "unexpected algorithm",
            Self::Issuer => "wrong issuer",
            Self::Expired => "expired",
            Self::Subject => "bad subject",
        };
        f.write_str(reason)
    }
}

/// Access token failures, kept apart from refresh-store failures
#[derive(Debug, Error)]
pub enum TokenError {
    #[error("failed to sign access token: {0}")]
    Signing(String),

    #[error("invalid access token: {0}")]
    Invalid(InvalidTokenReason),
}

impl From<TokenError> for AppError {
    fn from(err: TokenError) -> Self {
        match err {
            TokenError::Signing(msg) => AppError::Signing(msg),
            TokenError::Invalid(_) => AppError::InvalidToken,
        }
    }
}

/// Mints access tokens for a subject
pub trait TokenIssuer: Send + Sync {
    /// Issue a signed token for `subject`
    fn issue(&self, subject: UserId) -> Result<String, TokenError>;

    /// Lifetime of issued tokens
    fn ttl(&self) -> Duration;
}

/// Turns a presented access token back into an identity
pub trait TokenValidator: Send + Sync {
    /// Validate `token` and return its subject
    fn validate(&self, token: &str) -> Result<UserId, TokenError>;
}

/// HMAC-signed access token codec
#[derive(Clone)]
pub struct AccessTokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    issuer: String,
    ttl: Duration,
}

impl AccessTokenCodec {
    /// Create a codec for the given secret, issuer and token lifetime
    #[must_use]
    pub fn new(secret: &[u8], issuer: impl Into<String>, ttl: Duration) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            issuer: issuer.into(),
            ttl,
        }
    }

    /// Codec with the default issuer and 1 hour lifetime
    #[must_use]
    pub fn with_defaults(secret: &[u8]) -> Self {
        Self::new(secret, DEFAULT_ISSUER, Duration::seconds(ACCESS_TOKEN_TTL_SECS))
    }

    /// Issuer this codec stamps and requires
    pub fn issuer(&self) -> &str {
        &self.issuer
    }

    /// Issue a token with an explicit lifetime
    ///
    /// # Errors
    /// Returns `TokenError::Signing` if encoding fails
    pub fn issue_with_ttl(&self, subject: UserId, ttl: Duration) -> Result<String, TokenError> {
        let now = Utc::now();
        let claims = Claims {
            iss: self.issuer.clone(),
            sub: subject.to_string(),
            iat: now.timestamp(),
            exp: (now + ttl).timestamp(),
            jti: Uuid::new_v4().to_string(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| TokenError::Signing(e.to_string()))
    }

    /// Verify a token and return its claims
    ///
    /// # Errors
    /// Returns `TokenError::Invalid` on any signature, algorithm, issuer, or expiry failure
    pub fn decode_claims(&self, token: &str) -> Result<Claims, TokenError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.algorithms = HMAC_ALGORITHMS.to_vec();
        validation.leeway = 0;
        validation.set_issuer(&[self.issuer.as_str()]);
        validation.set_required_spec_claims(&["exp", "iss", "sub"]);

        let token_data = decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| {
            let reason = match e.kind() {
                ErrorKind::InvalidSignature => InvalidTokenReason::Signature,
                ErrorKind::InvalidAlgorithm | ErrorKind::InvalidAlgorithmName => {
                    InvalidTokenReason::Algorithm
                }
                ErrorKind::InvalidIssuer => InvalidTokenReason::Issuer,
                ErrorKind::ExpiredSignature => InvalidTokenReason::Expired,
                _ => InvalidTokenReason::Malformed,
            };
            TokenError::Invalid(reason)
        })?;

        Ok(token_data.claims)
    }
}

impl TokenIssuer for AccessTokenCodec {
    fn issue(&self, subject: UserId) -> Result<String, TokenError> {
        self.issue_with_ttl(subject, self.ttl)
    }

    fn ttl(&self) -> Duration {
        self.ttl
    }
}

impl TokenValidator for AccessTokenCodec {
    fn validate(&self, token: &str) -> Result<UserId, TokenError> {
        self.decode_claims(token)?.user_id()
    }
}

impl std::fmt::Debug for AccessTokenCodec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccessTokenCodec")
            .field("issuer", &self.issuer)
            .field("ttl_secs", &self.ttl.num_seconds())
            .finish_non_exhaustive()
    }
}

/// Issue a token under `secret` with the default issuer
///
/// # Errors
/// Returns `TokenError::Signing` if encoding fails
pub fn issue_access_token(
    subject: UserId,
    secret: &[u8],
    ttl: Duration,
) -> Result<String, TokenError> {
    AccessTokenCodec::new(secret, DEFAULT_ISSUER, ttl).issue_with_ttl(subject, ttl)
}

/// Validate a token under `secret` with the default issuer
///
/// # Errors
/// Returns `TokenError::Invalid` if the token does not validate
pub fn validate_access_token(token: &str, secret: &[u8]) -> Result<UserId, TokenError> {
    AccessTokenCodec::with_defaults(secret).validate(token)
}
