//! In-memory repositories
//!
//! `DashMap`-backed implementations of the core repository traits. They keep
//! the same contracts as the PostgreSQL ones (unique emails, unique token
//! values, first revocation stamp wins) and are what the service and API
//! tests run against.

mod refresh_token;
mod user;

pub use refresh_token::InMemoryRefreshTokenRepository;
pub use user::InMemoryUserRepository;
