//! Configuration management module for gamedevs-api
//!
//! Layered configuration loading with support for:
//! - TOML configuration files
//! - Environment variable overrides
//! - Multiple environment configurations (development, test, staging, production)
//!
//! # Configuration Priority (lowest to highest)
//! 1. `default.toml` - Base default configuration
//! 2. `{environment}.toml` - Environment-specific configuration
//! 3. `local.toml` - Local development overrides (not committed to version control)
//! 4. `GAMEDEVS_*` environment variables
//! 5. `HOST_EMAIL` / `USER_EMAIL` / `PASS_EMAIL` for the SMTP relay

pub mod environment;
pub mod error;
pub mod loader;
pub mod settings;
pub mod validation;

pub use environment::Environment;
pub use error::ConfigError;
pub use loader::ConfigLoader;
pub use settings::{
    ApplicationConfig, DatabaseConfig, JwtConfig, LoggerSettings, MailConfig, ServerConfig,
    Settings,
};
