//! Database models - SQLx-compatible structs for PostgreSQL tables

mod refresh_token;
mod user;

pub use refresh_token::RefreshTokenModel;
pub use user::UserModel;
