//! `Authorization` header parsing
//!
//! Two schemes share one shape: `<scheme> <credential>`, exactly two
//! space-separated parts, scheme matched ignoring ASCII case. An absent
//! header and a malformed one produce the same error.

use subtle::ConstantTimeEq;

use crate::error::AppError;

const BEARER_SCHEME: &str = "bearer";
const API_KEY_SCHEME: &str = "apikey";

/// Extract the token from `Authorization: Bearer <token>`
///
/// # Errors
/// Returns `AppError::MalformedCredential` if the header is absent or malformed
pub fn extract_bearer(header: Option<&str>) -> Result<&str, AppError> {
    extract_scheme(header, BEARER_SCHEME)
}

/// Extract the key from `Authorization: ApiKey <key>`
///
/// # Errors
/// Returns `AppError::MalformedCredential` if the header is absent or malformed
pub fn extract_api_key(header: Option<&str>) -> Result<&str, AppError> {
    extract_scheme(header, API_KEY_SCHEME)
}

/// Compare a presented API key with the configured one in constant time
///
/// # Errors
/// Returns `AppError::AuthenticationFailed` on mismatch
pub fn verify_api_key(presented: &str, expected: &str) -> Result<(), AppError> {
    if bool::from(presented.as_bytes().ct_eq(expected.as_bytes())) {
        Ok(())
    } else {
        Err(AppError::AuthenticationFailed)
    }
}

fn extract_scheme<'a>(header: Option<&'a str>, scheme: &str) -> Result<&'a str, AppError> {
    let value = header.ok_or(AppError::MalformedCredential)?;

    let mut parts = value.split(' ');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(found), Some(credential), None)
            if found.eq_ignore_ascii_case(scheme) && !credential.is_empty() =>
        {
            Ok(credential)
        }
        _ => Err(AppError::MalformedCredential),
    }
}
