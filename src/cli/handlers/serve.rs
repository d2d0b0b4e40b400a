//! `serve` subcommand: dry-run validation and server startup.

use crate::config::settings::Settings;
use crate::error::AppResult;
use crate::server::Server;

pub struct ServeCommandHandler {
    config: Settings,
}

impl ServeCommandHandler {
    pub fn new(config: Settings) -> Self {
        Self { config }
    }

    /// Runs the server, or only validates the configuration when `dry_run` is set.
    pub async fn execute(self, dry_run: bool) -> AppResult<()> {
        if dry_run {
            return self.validate_only();
        }

        Server::new(self.config)
            .run()
            .await
            .map_err(|source| crate::error::AppError::Internal { source })
    }

    /// Validates every configuration section and prints a summary.
    pub fn validate_only(&self) -> AppResult<()> {
        self.config.validate()?;

        println!("✓ Configuration is valid");
        println!("✓ Environment: {}", self.config.application.environment);
        println!("✓ Server would bind to: {}", self.config.server.address());
        println!("✓ Request timeout: {}s", self.config.server.request_timeout);
        println!(
            "✓ Migrations on startup: {}",
            if self.config.database.auto_migrate { "enabled" } else { "disabled" }
        );
        if self.config.mail.username.is_empty() {
            println!("! Mail credentials missing - recovery emails will not be sent");
        } else {
            println!("✓ Mail relay: {}:{}", self.config.mail.host, self.config.mail.port);
        }
        println!("Dry run completed successfully");
        Ok(())
    }

    pub fn config(&self) -> &Settings {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_config() -> Settings {
        let mut config = Settings::default();
        config.database.url = "postgres://localhost/gamedevs".to_string();
        config.jwt.secret = "a-test-secret-that-is-long-enough-for-hs256".to_string();
        config
    }

    #[tokio::test]
    async fn test_dry_run_accepts_valid_config() {
        let handler = ServeCommandHandler::new(valid_config());
        assert!(handler.execute(true).await.is_ok());
    }

    #[tokio::test]
    async fn test_dry_run_rejects_invalid_port() {
        let mut config = valid_config();
        config.server.port = 0;
        let handler = ServeCommandHandler::new(config);

        assert!(handler.execute(true).await.is_err());
    }

    #[test]
    fn test_dry_run_rejects_missing_jwt_secret() {
        let mut config = valid_config();
        config.jwt.secret.clear();
        let handler = ServeCommandHandler::new(config);

        assert!(handler.validate_only().is_err());
    }
}
