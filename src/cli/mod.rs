//! Command-line entry point: parsing, configuration merging and dispatch.

pub mod config_merger;
pub mod executor;
pub mod handlers;
pub mod parser;
pub mod validation;

pub use config_merger::ConfigurationMerger;
pub use executor::execute_command;
pub use parser::{Cli, Commands, Environment, LogLevel};

use clap::Parser;

use crate::config::settings::Settings;
use crate::logger::init_logger;

/// Loads file and environment configuration, then applies CLI overrides.
pub fn load_and_merge_config(cli: &Cli) -> anyhow::Result<Settings> {
    let merger = ConfigurationMerger::from_cli(cli)
        .map_err(|e| anyhow::anyhow!("Configuration error: {}", e))?;

    merger
        .merge_cli_args(cli)
        .map_err(|e| anyhow::anyhow!("Configuration merge error: {}", e))
}

pub fn init_logger_from_settings(settings: &Settings) -> anyhow::Result<()> {
    let logger_config = settings
        .logger
        .clone()
        .into_logger_config()
        .map_err(|e| anyhow::anyhow!("Logger configuration error: {}", e))?;

    init_logger(logger_config).map_err(|e| anyhow::anyhow!("Logger initialization error: {}", e))
}

/// Parses `std::env::args`, configures logging and runs the command.
pub async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let settings = load_and_merge_config(&cli)?;
    init_logger_from_settings(&settings)?;

    execute_command(&cli, settings).await?;
    Ok(())
}
