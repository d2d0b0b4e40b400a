//! Merges CLI overrides into file and environment configuration.
//!
//! Precedence, lowest first: configuration files, `GAMEDEVS_*` variables,
//! global flags, subcommand flags.

use std::path::Path;

use super::parser::{Cli, Commands};
use crate::config::error::ConfigError;
use crate::config::{ConfigLoader, settings::Settings};

pub struct ConfigurationMerger {
    base_config: Settings,
}

impl ConfigurationMerger {
    pub fn new(base_config: Settings) -> Self {
        Self { base_config }
    }

    /// Loads the base configuration for `cli` without validating it yet.
    ///
    /// `--config` replaces the layered directory with a single file and
    /// `--env` replaces `GAMEDEVS_APP_ENV`.
    pub fn from_cli(cli: &Cli) -> Result<Self, ConfigError> {
        let mut loader = ConfigLoader::new()?;
        if let Some(env) = cli.env {
            loader = loader.with_environment(env.into());
        }
        if let Some(path) = cli.config.as_deref() {
            Self::validate_config_file_access(path)?;
            loader = loader.with_config_file(path);
        }

        Ok(Self::new(loader.load_unvalidated()?))
    }

    fn validate_config_file_access(path: &Path) -> Result<(), ConfigError> {
        if !path.is_file() {
            return Err(ConfigError::ValidationError {
                field: "config_file".to_string(),
                message: format!("Configuration file does not exist: '{}'", path.display()),
            });
        }

        std::fs::File::open(path)
            .map(|_| ())
            .map_err(|e| ConfigError::ValidationError {
                field: "config_file".to_string(),
                message: format!("Cannot read configuration file '{}': {}", path.display(), e),
            })
    }

    /// Applies CLI overrides and validates the result.
    pub fn merge_cli_args(&self, cli: &Cli) -> Result<Settings, ConfigError> {
        let mut config = self.base_config.clone();

        if cli.verbose {
            config.logger.level = "debug".to_string();
        } else if cli.quiet {
            config.logger.level = "error".to_string();
        }

        if let Some(Commands::Serve {
            host,
            port,
            log_level,
            ..
        }) = &cli.command
        {
            if let Some(host) = host {
                config.server.host = host.clone();
            }
            if let Some(port) = port {
                config.server.port = *port;
            }
            if let Some(level) = log_level {
                config.logger.level = level.as_str().to_string();
            }
        }

        config.validate()?;
        Ok(config)
    }

    pub fn config(&self) -> &Settings {
        &self.base_config
    }
}
