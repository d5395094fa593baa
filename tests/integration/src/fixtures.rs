//! Test fixtures and data generators
//!
//! Emails carry a UUID so runs against a shared database never collide.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Default password for generated accounts
pub const TEST_PASSWORD: &str = "04234";

/// Registration / login body
#[derive(Debug, Clone, Serialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    pub fn unique() -> Self {
        Self {
            email: format!("test-{}@example.com", Uuid::new_v4()),
            password: TEST_PASSWORD.to_string(),
        }
    }
}

/// User as returned by the API
#[derive(Debug, Clone, Deserialize)]
pub struct UserBody {
    pub id: String,
    pub email: String,
    pub is_chirpy_red: bool,
    pub created_at: String,
    pub updated_at: String,
}

/// Login response: the user plus both tokens
#[derive(Debug, Clone, Deserialize)]
pub struct LoginBody {
    #[serde(flatten)]
    pub user: UserBody,
    pub token: String,
    pub refresh_token: String,
}

/// Refresh response
#[derive(Debug, Clone, Deserialize)]
pub struct TokenBody {
    pub token: String,
}
