//! Argon2 runs off the async executor

use std::sync::Arc;

use chirpy_common::CredentialHasher;

use super::error::{ServiceError, ServiceResult};

/// Hash a password on the blocking pool
pub(crate) async fn hash_password(
    hasher: &Arc<dyn CredentialHasher>,
    password: String,
) -> ServiceResult<String> {
    let hasher = Arc::clone(hasher);
    tokio::task::spawn_blocking(move || hasher.hash(&password))
        .await
        .map_err(|e| ServiceError::internal(format!("hashing task failed: {e}")))?
        .map_err(ServiceError::from)
}

/// Verify a password on the blocking pool. A mismatch is `Ok(false)`.
pub(crate) async fn verify_password(
    hasher: &Arc<dyn CredentialHasher>,
    password: String,
    hash: String,
) -> ServiceResult<bool> {
    let hasher = Arc::clone(hasher);
    tokio::task::spawn_blocking(move || hasher.verify(&password, &hash))
        .await
        .map_err(|e| ServiceError::internal(format!("verification task failed: {e}")))?
        .map_err(ServiceError::from)
}
