//! # chirpy-db
//!
//! Storage layer implementing the `chirpy-core` repository traits.
//!
//! ## Overview
//!
//! - Connection pool management and embedded migrations
//! - Database models with SQLx `FromRow` derives
//! - Model → entity mappers
//! - PostgreSQL repository implementations
//! - In-memory implementations for tests and local runs
//!
//! ## Usage
//!
//! ```rust,ignore
//! use chirpy_db::{create_pool, run_migrations, DatabaseConfig, PgRefreshTokenRepository};
//!
//! async fn example() -> Result<(), Box<dyn std::error::Error>> {
//!     let pool = create_pool(&DatabaseConfig::from_env()).await?;
//!     run_migrations(&pool).await?;
//!     let tokens = PgRefreshTokenRepository::new(pool);
//!     Ok(())
//! }
//! ```

pub mod mappers;
pub mod memory;
pub mod models;
pub mod pool;
pub mod repositories;

// Re-export commonly used types
pub use memory::{InMemoryRefreshTokenRepository, InMemoryUserRepository};
pub use pool::{create_pool, create_pool_from_env, run_migrations, DatabaseConfig, PgPool};
pub use repositories::{PgRefreshTokenRepository, PgUserRepository};
