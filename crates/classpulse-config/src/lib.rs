//! # ClassPulse Config
//!
//! Configuration types for the ClassPulse API.
//!
//! Every structure is loaded from environment variables through a
//! `from_env()` constructor and falls back to development defaults:
//!
//! - [`server`]: bind address and runtime environment
//! - [`database`]: PostgreSQL pool sizing and migrations
//! - [`jwt`]: admin token signing
//! - [`cors`]: allowed origins
//! - [`rate_limit`]: per-IP request budgets
//!
//! # Example
//!
//! ```ignore
//! use classpulse_config::{CorsConfig, DatabaseConfig, JwtConfig, RateLimitConfig, ServerConfig};
//!
//! let server = ServerConfig::from_env();
//! let database = DatabaseConfig::from_env()?;
//! let jwt = JwtConfig::from_env();
//! let cors = CorsConfig::from_env();
//! let rate_limit = RateLimitConfig::from_env();
//! ```

pub mod cors;
pub mod database;
pub mod jwt;
pub mod rate_limit;
pub mod server;

// Re-export commonly used types at crate root
pub use cors::CorsConfig;
pub use database::DatabaseConfig;
pub use jwt::JwtConfig;
pub use rate_limit::RateLimitConfig;
pub use server::{Environment, ServerConfig};

/// Reads and parses an environment variable, falling back to `default` when
/// the variable is unset or unparsable.
pub(crate) fn env_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

/// Reads a boolean flag. Accepts `true/false`, `1/0`, `yes/no`.
pub(crate) fn env_flag(key: &str, default: bool) -> bool {
    match std::env::var(key) {
        Ok(v) => match v.trim().to_ascii_lowercase().as_str() {
            "true" | "1" | "yes" => true,
            "false" | "0" | "no" => false,
            _ => default,
        },
        Err(_) => default,
    }
}
