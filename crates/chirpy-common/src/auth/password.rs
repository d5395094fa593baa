//! Password hashing and verification utilities
//!
//! Uses Argon2id with the crate's default (OWASP recommended) parameters. The
//! stored string is PHC formatted and carries algorithm, version, cost
//! parameters, salt and digest, so hashes made under older defaults keep
//! verifying after the defaults change.

use argon2::{
    password_hash::{
        self, rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString,
    },
    Argon2,
};

use crate::error::AppError;

/// Upper bound on accepted password length
pub const MAX_PASSWORD_BYTES: usize = 72;

/// Well-formed hash with the default cost parameters that no password is
/// known to match. Verifying against it costs the same as a real mismatch.
pub const UNMATCHABLE_PASSWORD_HASH: &str =
    "$argon2id$v=19$m=19456,t=2,p=1$DHXQ9uXTCqpmAnGn7DuNrA$6pjATh5Vjhb0doGNNoXd0qFSfE0/SSmzg57TDkOUwmY";

/// Hash a password using Argon2id with a fresh random salt
///
/// # Errors
/// Returns `AppError::Hashing` if the salt or parameters cannot be produced
pub fn hash_password(password: &str) -> Result<String, AppError> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AppError::Hashing(format!("password hashing failed: {e}")))
}

/// Verify a password against a stored hash
///
/// A mismatch is `Ok(false)`; only a malformed hash string is an error.
///
/// # Errors
/// Returns `AppError::Hashing` if the hash cannot be parsed or recomputed
pub fn verify_password(password: &str, hash: &str) -> Result<bool, AppError> {
    let parsed_hash = PasswordHash::new(hash)
        .map_err(|e| AppError::Hashing(format!("invalid password hash format: {e}")))?;

    match Argon2::default().verify_password(password.as_bytes(), &parsed_hash) {
        Ok(()) => Ok(true),
        Err(password_hash::Error::Password) => Ok(false),
        Err(e) => Err(AppError::Hashing(format!("password verification failed: {e}"))),
    }
}

/// Hashing seam used by the services
pub trait CredentialHasher: Send + Sync {
    /// Hash `password` into a PHC string
    fn hash(&self, password: &str) -> Result<String, AppError>;

    /// Check `password` against a PHC string. A mismatch is `Ok(false)`.
    fn verify(&self, password: &str, hash: &str) -> Result<bool, AppError>;
}

/// Password service for dependency injection
#[derive(Debug, Clone, Default)]
pub struct PasswordService;

impl PasswordService {
    /// Create a new password service
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Hash a password
    ///
    /// # Errors
    /// Returns an error if hashing fails
    pub fn hash(&self, password: &str) -> Result<String, AppError> {
        hash_password(password)
    }

    /// Verify a password against a hash
    ///
    /// # Errors
    /// Returns an error if the hash is malformed
    pub fn verify(&self, password: &str, hash: &str) -> Result<bool, AppError> {
        verify_password(password, hash)
    }

    /// Verify a password and return an error if it does not match
    ///
    /// # Errors
    /// Returns `AppError::AuthenticationFailed` if the password doesn't match
    pub fn verify_or_error(&self, password: &str, hash: &str) -> Result<(), AppError> {
        if self.verify(password, hash)? {
            Ok(())
        } else {
            Err(AppError::AuthenticationFailed)
        }
    }
}

impl CredentialHasher for PasswordService {
    fn hash(&self, password: &str) -> Result<String, AppError> {
        hash_password(password)
    }

    fn verify(&self, password: &str, hash: &str) -> Result<bool, AppError> {
        verify_password(password, hash)
    }
}

/// Validate an incoming password
///
/// Returns `Ok(())` if the password is non-empty and at most
/// `MAX_PASSWORD_BYTES` long.
///
/// # Errors
/// Returns a validation error if the password doesn't meet requirements
pub fn validate_password_strength(password: &str) -> Result<(), AppError> {
    if password.is_empty() {
        return Err(AppError::Validation("Password is required".to_string()));
    }

    if password.len() > MAX_PASSWORD_BYTES {
        return Err(AppError::Validation(format!(
            "Password must be at most {MAX_PASSWORD_BYTES} bytes"
        )));
    }

    Ok(())
}
