//! Configuration validation logic
//!
//! Each section validates itself; `Settings::validate` runs them in order and
//! returns the first failure.

use crate::config::environment::Environment;
use crate::config::error::ConfigError;
use crate::config::settings::{
    DatabaseConfig, FileSettings, JwtConfig, LoggerSettings, MailConfig, ServerConfig, Settings,
};

const VALID_LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

const VALID_LOG_FORMATS: &[&str] = &["full", "compact", "json"];

const MIN_JWT_SECRET_LEN: usize = 32;

impl ServerConfig {
    /// Validate server configuration
    ///
    /// # Validation Rules
    /// - Port must be between 1 and 65535
    /// - Request timeout must be greater than 0
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.port == 0 {
            return Err(ConfigError::validation(
                "server.port",
                "Port must be between 1 and 65535. Please specify a valid port number.",
            ));
        }

        if self.request_timeout == 0 {
            return Err(ConfigError::validation(
                "server.request_timeout",
                "Request timeout must be greater than 0 seconds.",
            ));
        }

        Ok(())
    }
}

impl DatabaseConfig {
    /// Validate database configuration
    ///
    /// # Validation Rules
    /// - URL must be a PostgreSQL connection string
    /// - Min and max connections must be positive, with min <= max
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.url.is_empty() {
            return Err(ConfigError::validation(
                "database.url",
                "Database URL is required. Please specify a valid database connection string.",
            ));
        }

        if !self.is_valid_database_url() {
            return Err(ConfigError::validation(
                "database.url",
                "Invalid database URL format. Expected format: postgres://[user:password@]host[:port]/database",
            ));
        }

        if self.max_connections == 0 {
            return Err(ConfigError::validation(
                "database.max_connections",
                "Max connections must be greater than 0.",
            ));
        }

        if self.min_connections == 0 {
            return Err(ConfigError::validation(
                "database.min_connections",
                "Min connections must be greater than 0.",
            ));
        }

        if self.min_connections > self.max_connections {
            return Err(ConfigError::ValidationError {
                field: "database.min_connections".to_string(),
                message: format!(
                    "Min connections ({}) cannot exceed max connections ({}).",
                    self.min_connections, self.max_connections
                ),
            });
        }

        Ok(())
    }

    fn is_valid_database_url(&self) -> bool {
        ["postgres://", "postgresql://"]
            .iter()
            .any(|scheme| self.url.starts_with(scheme))
    }
}

impl JwtConfig {
    /// Validate JWT configuration
    ///
    /// # Validation Rules
    /// - Secret must be at least 32 characters
    /// - Every expiration must be positive
    /// - Refresh tokens must outlive access tokens
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.secret.is_empty() {
            return Err(ConfigError::validation(
                "jwt.secret",
                "JWT secret cannot be empty",
            ));
        }

        if self.secret.len() < MIN_JWT_SECRET_LEN {
            return Err(ConfigError::validation(
                "jwt.secret",
                "JWT secret should be at least 32 characters for security",
            ));
        }

        let expirations = [
            ("jwt.access_token_expiration", self.access_token_expiration),
            ("jwt.refresh_token_expiration", self.refresh_token_expiration),
            (
                "jwt.recovery_token_expiration",
                self.recovery_token_expiration,
            ),
        ];
        for (field, hours) in expirations {
            if hours <= 0 {
                return Err(ConfigError::ValidationError {
                    field: field.to_string(),
                    message: "Token expiration must be positive".to_string(),
                });
            }
        }

        if self.access_token_expiration >= self.refresh_token_expiration {
            return Err(ConfigError::validation(
                "jwt",
                "Refresh token expiration should be longer than access token expiration",
            ));
        }

        Ok(())
    }
}

impl MailConfig {
    /// Validate SMTP relay configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.host.trim().is_empty() {
            return Err(ConfigError::validation(
                "mail.host",
                "SMTP host is required to send recovery emails.",
            ));
        }

        if self.port == 0 {
            return Err(ConfigError::validation(
                "mail.port",
                "SMTP port must be between 1 and 65535.",
            ));
        }

        Ok(())
    }

    /// Validate the relay for `environment`.
    ///
    /// Staging and production must authenticate; development and test may
    /// leave credentials empty, in which case mail is skipped.
    pub fn validate_for(&self, environment: Environment) -> Result<(), ConfigError> {
        self.validate()?;

        if !environment.requires_mail_credentials() {
            return Ok(());
        }

        if self.username.trim().is_empty() {
            return Err(ConfigError::ValidationError {
                field: "mail.username".to_string(),
                message: format!(
                    "SMTP username is required in {}. Set USER_EMAIL or GAMEDEVS_MAIL__USERNAME.",
                    environment.as_str()
                ),
            });
        }

        if self.password.is_empty() {
            return Err(ConfigError::ValidationError {
                field: "mail.password".to_string(),
                message: format!(
                    "SMTP password is required in {}. Set PASS_EMAIL or GAMEDEVS_MAIL__PASSWORD.",
                    environment.as_str()
                ),
            });
        }

        Ok(())
    }
}

impl FileSettings {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.enabled && self.path.trim().is_empty() {
            return Err(ConfigError::validation(
                "logger.file.path",
                "File path is required when file logging is enabled.",
            ));
        }

        if !VALID_LOG_FORMATS.contains(&self.format.to_lowercase().as_str()) {
            return Err(ConfigError::ValidationError {
                field: "logger.file.format".to_string(),
                message: format!(
                    "Invalid log format '{}'. Valid formats are: {}",
                    self.format,
                    VALID_LOG_FORMATS.join(", ")
                ),
            });
        }

        Ok(())
    }
}

impl LoggerSettings {
    /// Validate logger settings
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !VALID_LOG_LEVELS.contains(&self.level.to_lowercase().as_str()) {
            return Err(ConfigError::ValidationError {
                field: "logger.level".to_string(),
                message: format!(
                    "Invalid log level '{}'. Valid levels are: {}",
                    self.level,
                    VALID_LOG_LEVELS.join(", ")
                ),
            });
        }

        if !self.console.enabled && !self.file.enabled {
            return Err(ConfigError::validation(
                "logger",
                "At least one output (console or file) must be enabled.",
            ));
        }

        self.file.validate()
    }
}

impl Settings {
    /// Validate all configuration settings
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.server.validate()?;
        self.database.validate()?;
        self.jwt.validate()?;
        self.mail.validate_for(self.application.environment)?;
        self.logger.validate()?;
        Ok(())
    }
}
