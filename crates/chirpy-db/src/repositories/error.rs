//! SQLx error mapping for the Postgres repositories
//!
//! Everything except a unique violation is an infrastructure failure; the
//! driver message goes to the logs and into `DatabaseError`, which the upper
//! layers never show to callers.

use chirpy_core::{DomainError, UserId};
use sqlx::Error as SqlxError;
use tracing::error;

/// Convert SQLx error to DomainError
pub fn map_db_error(e: SqlxError) -> DomainError {
    error!(error = %e, "Database error");
    DomainError::DatabaseError(e.to_string())
}

/// `conflict` when `e` is a unique violation, otherwise `map_db_error`
pub fn map_unique_violation(e: SqlxError, conflict: DomainError) -> DomainError {
    match e.as_database_error() {
        Some(db_err) if db_err.is_unique_violation() => conflict,
        _ => map_db_error(e),
    }
}

/// No row for `id`
pub fn user_not_found(id: UserId) -> DomainError {
    DomainError::UserNotFound(id)
}
