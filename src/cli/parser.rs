//! Command-line interface definition.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// GameDevs API server
#[derive(Parser, Debug)]
#[command(name = "gamedevs-api")]
#[command(about = "REST API for the GameDevs catalog of games, genres and developer profiles")]
#[command(long_about = "
REST API for the GameDevs catalog: games, genres, users and their
developer profiles, with JWT sessions and password recovery by email.

EXAMPLES:
    # Start the server with the layered configuration in ./config
    gamedevs-api serve

    # Bind to every interface on port 8080
    gamedevs-api serve --host 0.0.0.0 --port 8080

    # Load a single configuration file
    gamedevs-api --config /etc/gamedevs/production.toml serve

    # Check configuration without starting the server
    gamedevs-api serve --dry-run

    # Apply pending migrations
    gamedevs-api migrate

    # List pending migrations
    gamedevs-api migrate --dry-run

    # Revert the last migration
    gamedevs-api migrate --rollback 1
")]
#[command(version = crate::clap_long_version())]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Configuration file used instead of the layered `config/` directory
    #[arg(short, long, value_name = "FILE", value_parser = super::validation::validate_config_file_path)]
    pub config: Option<PathBuf>,

    /// Override `GAMEDEVS_APP_ENV`
    #[arg(short, long, value_enum)]
    pub env: Option<Environment>,

    /// Log at debug level
    #[arg(short, long)]
    pub verbose: bool,

    /// Log errors only
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the HTTP server (default)
    ///
    /// Examples:
    ///   gamedevs-api serve
    ///   gamedevs-api serve --host 0.0.0.0 --port 80
    ///   gamedevs-api serve --dry-run
    Serve {
        /// Address to bind, e.g. 127.0.0.1 or 0.0.0.0
        #[arg(long, value_name = "ADDRESS", value_parser = super::validation::validate_host_address)]
        host: Option<String>,

        /// TCP port, 1 to 65535
        #[arg(short, long, value_name = "PORT", value_parser = super::validation::validate_port)]
        port: Option<u16>,

        /// Log level for this run; wins over --verbose and --quiet
        #[arg(long, value_enum)]
        log_level: Option<LogLevel>,

        /// Validate the merged configuration and exit
        #[arg(long)]
        dry_run: bool,
    },
    /// Apply or revert database migrations
    ///
    /// Examples:
    ///   gamedevs-api migrate
    ///   gamedevs-api migrate --dry-run
    ///   gamedevs-api migrate --rollback 2
    Migrate {
        /// List pending migrations without applying them
        #[arg(long, conflicts_with = "rollback")]
        dry_run: bool,

        /// Revert the given number of most recent migrations (1 to 100)
        #[arg(long, value_name = "STEPS", conflicts_with = "dry_run", value_parser = super::validation::validate_rollback_steps)]
        rollback: Option<u32>,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Environment {
    #[value(name = "development", alias = "dev")]
    Development,
    #[value(name = "test")]
    Test,
    #[value(name = "staging", alias = "stage")]
    Staging,
    #[value(name = "production", alias = "prod")]
    Production,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogLevel {
    #[value(name = "error")]
    Error,
    #[value(name = "warn", alias = "warning")]
    Warn,
    #[value(name = "info")]
    Info,
    #[value(name = "debug")]
    Debug,
    #[value(name = "trace")]
    Trace,
}

impl Cli {
    /// Checks combinations clap cannot express.
    pub fn validate(&self) -> Result<(), String> {
        let privileged_wildcard = matches!(
            &self.command,
            Some(Commands::Serve { host: Some(host), port: Some(port), .. })
                if host == "0.0.0.0" && *port < 1024
        );
        if privileged_wildcard {
            return Err(
                "Binding to 0.0.0.0 on a privileged port (< 1024) requires root privileges"
                    .to_string(),
            );
        }

        if self.verbose && self.quiet {
            return Err("Cannot use --verbose and --quiet together".to_string());
        }

        Ok(())
    }

    pub fn get_validation_help() -> &'static str {
        r#"
Common validation errors:

  --port       1 to 65535; below 1024 usually needs root
  --host       localhost, an IPv4 address or a hostname without spaces
  --config     an existing, readable TOML file
  --rollback   1 to 100, not together with --dry-run

For more help, use: gamedevs-api help <subcommand>
"#
    }
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

impl From<Environment> for crate::config::Environment {
    fn from(env: Environment) -> Self {
        match env {
            Environment::Development => crate::config::Environment::Development,
            Environment::Test => crate::config::Environment::Test,
            Environment::Staging => crate::config::Environment::Staging,
            Environment::Production => crate::config::Environment::Production,
        }
    }
}
