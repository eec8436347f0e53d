//! # SchoolHub Config
//!
//! Configuration structures loaded from environment variables:
//!
//! - [`cors`]: CORS allowed origins
//! - [`database`]: Postgres connection settings
//! - [`logging`]: Log directory and observability switch
//! - [`server`]: Bind address
//!
//! Each type exposes a `from_env()` constructor that falls back to sensible
//! development defaults, except for `DATABASE_URL` which is required.
//!
//! # Example
//!
//! ```ignore
//! use schoolhub_config::{CorsConfig, DatabaseConfig, ServerConfig};
//!
//! let server = ServerConfig::from_env();
//! let database = DatabaseConfig::from_env()?;
//! ```

pub mod cors;
pub mod database;
pub mod logging;
pub mod server;

pub use cors::CorsConfig;
pub use database::{ConfigError, DatabaseConfig};
pub use logging::LoggingConfig;
pub use server::ServerConfig;

/// Reads an environment variable and parses it, falling back to `default`
/// when the variable is unset or unparsable.
pub(crate) fn env_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}
