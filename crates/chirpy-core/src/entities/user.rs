//! User entity - the account fields the session subsystem authenticates against
//!
//! The password hash is deliberately not part of the entity; it is fetched
//! separately through `UserRepository::get_password_hash` so that it never
//! rides along into response mappers.

use chrono::{DateTime, Utc};

use crate::value_objects::UserId;

/// User account
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    pub email: String,
    pub is_chirpy_red: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a new User with a fresh identifier
    pub fn new(email: String) -> Self {
        let now = Utc::now();
        Self {
            id: UserId::generate(),
            email,
            is_chirpy_red: false,
            created_at: now,
            updated_at: now,
        }
    }

    /// Update the email address
    pub fn set_email(&mut self, email: String) {
        self.email = email;
        self.updated_at = Utc::now();
    }
}
