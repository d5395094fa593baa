//! Configuration structs

mod app_config;

pub use app_config::{
    ApiKeyConfig, AppConfig, AppSettings, ConfigError, CorsConfig, DatabaseConfig, Environment,
    JwtConfig, RateLimitConfig, ServerConfig, SessionConfig,
};
