//! Dispatches a parsed command to its handler.

use super::handlers::{MigrateCommandHandler, ServeCommandHandler};
use super::parser::{Cli, Commands};
use crate::config::settings::Settings;
use crate::error::{AppError, AppResult};

/// Runs the command in `cli`; no subcommand means `serve`.
///
/// # Errors
/// Invalid argument combinations, plus whatever the handler returns.
pub async fn execute_command(cli: &Cli, settings: Settings) -> AppResult<()> {
    cli.validate().map_err(|reason| AppError::Validation {
        field: "cli_arguments".to_string(),
        reason,
    })?;

    match &cli.command {
        Some(Commands::Serve { dry_run, .. }) => {
            ServeCommandHandler::new(settings).execute(*dry_run).await
        }
        None => ServeCommandHandler::new(settings).execute(false).await,
        Some(Commands::Migrate { dry_run, rollback }) => {
            if rollback.is_some_and(|steps| steps > 50) {
                tracing::warn!(
                    steps = rollback.unwrap_or_default(),
                    "Reverting a large number of migrations"
                );
            }
            MigrateCommandHandler::new(settings)
                .execute(*dry_run, *rollback)
                .await
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn valid_config() -> Settings {
        let mut config = Settings::default();
        config.database.url = "postgres://localhost/gamedevs".to_string();
        config.jwt.secret = "a".repeat(32);
        config
    }

    #[tokio::test]
    async fn test_execute_serve_dry_run() {
        let cli = Cli::try_parse_from(["gamedevs-api", "serve", "--dry-run"]).unwrap();
        assert!(execute_command(&cli, valid_config()).await.is_ok());
    }

    #[tokio::test]
    async fn test_execute_rejects_invalid_combination() {
        let cli = Cli {
            command: Some(Commands::Migrate {
                dry_run: false,
                rollback: None,
            }),
            config: None,
            env: None,
            verbose: true,
            quiet: true,
        };

        match execute_command(&cli, valid_config()).await {
            Err(AppError::Validation { field, .. }) => assert_eq!(field, "cli_arguments"),
            other => panic!("Expected validation error, got {:?}", other),
        }
    }
}
