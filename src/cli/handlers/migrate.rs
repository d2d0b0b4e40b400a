//! `migrate` subcommand: apply, preview or revert schema migrations.

use crate::config::settings::Settings;
use crate::db::migrations::{pending_migrations, revert_migrations, run_pending_migrations};
use crate::error::AppResult;

pub struct MigrateCommandHandler {
    config: Settings,
}

impl MigrateCommandHandler {
    pub fn new(config: Settings) -> Self {
        Self { config }
    }

    /// `dry_run` lists pending migrations; `rollback` reverts that many.
    /// With neither, every pending migration is applied.
    ///
    /// # Errors
    /// - Invalid database configuration
    /// - Connection or migration failures
    pub async fn execute(&self, dry_run: bool, rollback: Option<u32>) -> AppResult<()> {
        self.config.database.validate()?;

        let url = &self.config.database.url;
        match (dry_run, rollback) {
            (true, _) => {
                let pending = pending_migrations(url).await?;
                if pending.is_empty() {
                    println!("✓ No pending migrations - database is up to date");
                } else {
                    println!("{} pending migration(s):", pending.len());
                    print_names(&pending);
                    println!("\nRun without --dry-run to apply them");
                }
            }
            (false, Some(steps)) => {
                let reverted = revert_migrations(url, steps).await?;
                tracing::info!(count = reverted.len(), "Migrations reverted");
                println!("✓ Reverted {} migration(s):", reverted.len());
                print_names(&reverted);
            }
            (false, None) => {
                let applied = run_pending_migrations(url).await?;
                tracing::info!(count = applied.len(), "Migrations applied");
                if applied.is_empty() {
                    println!("✓ No migrations to apply - database is up to date");
                } else {
                    println!("✓ Applied {} migration(s):", applied.len());
                    print_names(&applied);
                }
            }
        }

        Ok(())
    }

    pub fn config(&self) -> &Settings {
        &self.config
    }
}

fn print_names(names: &[String]) {
    for name in names {
        println!("  - {}", name);
    }
}
