//! Configuration loader for gamedevs-api
//!
//! Handles loading configuration from multiple sources with proper precedence.

use std::path::{Path, PathBuf};

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, Environment, File, FileFormat};

use crate::config::environment::Environment as AppEnvironment;
use crate::config::error::ConfigError;
use crate::config::settings::Settings;

const CONFIG_DIR_ENV: &str = "GAMEDEVS_CONFIG_DIR";

const CONFIG_FILE_ENV: &str = "GAMEDEVS_CONFIG_FILE";

const DEFAULT_CONFIG_DIR: &str = "config";

const ENV_PREFIX: &str = "GAMEDEVS";

/// Separator for nested configuration keys in environment variables
const ENV_SEPARATOR: &str = "__";

/// Legacy SMTP variables and the keys they override.
const LEGACY_MAIL_VARS: [(&str, &str); 3] = [
    ("HOST_EMAIL", "mail.host"),
    ("USER_EMAIL", "mail.username"),
    ("PASS_EMAIL", "mail.password"),
];

/// Configuration loader that handles layered configuration loading
///
/// Sources, lowest priority first:
/// 1. `default.toml` (required)
/// 2. `{environment}.toml`
/// 3. `local.toml`
/// 4. `GAMEDEVS_*` environment variables
/// 5. `HOST_EMAIL`, `USER_EMAIL`, `PASS_EMAIL`
///
/// `application.environment` always reflects the loader's environment.
#[derive(Debug)]
pub struct ConfigLoader {
    config_dir: PathBuf,
    /// When set, layered loading is skipped and only this file is read
    config_file: Option<PathBuf>,
    environment: AppEnvironment,
}

impl ConfigLoader {
    /// Create a new configuration loader from `GAMEDEVS_CONFIG_DIR`,
    /// `GAMEDEVS_CONFIG_FILE` and `GAMEDEVS_APP_ENV`.
    ///
    /// # Errors
    ///
    /// Returns an error if both `GAMEDEVS_CONFIG_DIR` and `GAMEDEVS_CONFIG_FILE` are set.
    pub fn new() -> Result<Self, ConfigError> {
        let config_dir_var = std::env::var(CONFIG_DIR_ENV).ok();
        let config_file = std::env::var(CONFIG_FILE_ENV).ok().map(PathBuf::from);

        if config_file.is_some() && config_dir_var.is_some() {
            return Err(ConfigError::mutual_exclusivity(
                "GAMEDEVS_CONFIG_DIR and GAMEDEVS_CONFIG_FILE cannot both be set. \
                 Use GAMEDEVS_CONFIG_DIR for layered configuration or \
                 GAMEDEVS_CONFIG_FILE for a single configuration file.",
            ));
        }

        Ok(Self {
            config_dir: config_dir_var
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_DIR)),
            config_file,
            environment: AppEnvironment::from_env(),
        })
    }

    /// Overrides the environment read from `GAMEDEVS_APP_ENV`.
    pub fn with_environment(mut self, environment: AppEnvironment) -> Self {
        self.environment = environment;
        self
    }

    /// Uses a single file instead of the layered directory.
    pub fn with_config_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.config_file = Some(path.into());
        self
    }

    pub fn environment(&self) -> AppEnvironment {
        self.environment
    }

    /// Load, deserialize and validate configuration from all sources
    pub fn load(&self) -> Result<Settings, ConfigError> {
        let settings = self.load_unvalidated()?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load configuration without running section validation.
    ///
    /// Used when CLI overrides still have to be merged before validating.
    pub fn load_unvalidated(&self) -> Result<Settings, ConfigError> {
        let config = self.build_config()?;
        config.try_deserialize().map_err(|e| {
            ConfigError::ParseError(format!("Failed to deserialize configuration: {}", e))
        })
    }

    fn build_config(&self) -> Result<Config, ConfigError> {
        let builder = Config::builder();

        let builder = match self.config_file {
            Some(ref config_file) => Self::add_file_source(builder, config_file, true)?,
            None => self.build_layered_config(builder)?,
        };

        // GAMEDEVS_SERVER__PORT -> server.port
        let builder = builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator(ENV_SEPARATOR)
                .ignore_empty(true)
                .try_parsing(true),
        );

        let builder = Self::add_legacy_mail_overrides(builder)?;

        // The resolved environment wins over anything written in files
        let builder = builder
            .set_override("application.environment", self.environment.as_str())
            .map_err(ConfigError::from)?;

        builder.build().map_err(ConfigError::from)
    }

    fn build_layered_config(
        &self,
        builder: ConfigBuilder<DefaultState>,
    ) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        let default_path = self.config_dir.join("default.toml");
        let builder = Self::add_file_source(builder, &default_path, true)?;

        let env_path = self
            .config_dir
            .join(format!("{}.toml", self.environment.as_str()));
        let builder = Self::add_file_source(builder, &env_path, false)?;

        let local_path = self.config_dir.join("local.toml");
        Self::add_file_source(builder, &local_path, false)
    }

    fn add_file_source(
        builder: ConfigBuilder<DefaultState>,
        path: &Path,
        required: bool,
    ) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        if required && !path.exists() {
            return Err(ConfigError::file_not_found(format!(
                "Required configuration file not found: {}",
                path.display()
            )));
        }

        Ok(builder.add_source(
            File::new(path.to_str().unwrap_or_default(), FileFormat::Toml).required(required),
        ))
    }

    fn add_legacy_mail_overrides(
        builder: ConfigBuilder<DefaultState>,
    ) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        LEGACY_MAIL_VARS
            .iter()
            .try_fold(builder, |builder, (var, key)| {
                let value = std::env::var(var).ok().filter(|v| !v.is_empty());
                builder
                    .set_override_option(*key, value)
                    .map_err(ConfigError::from)
            })
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new().unwrap_or_else(|_| Self {
            config_dir: PathBuf::from(DEFAULT_CONFIG_DIR),
            config_file: None,
            environment: AppEnvironment::default(),
        })
    }
}
