//! Embedded schema migrations.
//!
//! `diesel_migrations` only speaks to synchronous connections, so every
//! function here opens its own `PgConnection` inside `spawn_blocking`.

use diesel::Connection;
use diesel::pg::PgConnection;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};

use crate::error::{AppError, AppResult};

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

fn migration_error(operation: &str, error: impl std::fmt::Display) -> AppError {
    AppError::Database {
        operation: operation.to_string(),
        source: anyhow::anyhow!("Migration error: {}", error),
    }
}

async fn with_connection<T, F>(database_url: &str, operation: &'static str, f: F) -> AppResult<T>
where
    T: Send + 'static,
    F: FnOnce(&mut PgConnection) -> AppResult<T> + Send + 'static,
{
    let database_url = database_url.to_string();
    tokio::task::spawn_blocking(move || {
        let mut conn = PgConnection::establish(&database_url)
            .map_err(|e| migration_error(operation, e))?;
        f(&mut conn)
    })
    .await?
}

/// Names of migrations not yet applied.
pub async fn pending_migrations(database_url: &str) -> AppResult<Vec<String>> {
    with_connection(database_url, "check pending migrations", |conn| {
        let pending = conn
            .pending_migrations(MIGRATIONS)
            .map_err(|e| migration_error("check pending migrations", e))?;
        Ok(pending.iter().map(|m| m.name().to_string()).collect())
    })
    .await
}

/// Applies every pending migration and returns the applied versions.
pub async fn run_pending_migrations(database_url: &str) -> AppResult<Vec<String>> {
    with_connection(database_url, "run pending migrations", |conn| {
        let applied = conn
            .run_pending_migrations(MIGRATIONS)
            .map_err(|e| migration_error("run pending migrations", e))?;
        Ok(applied.iter().map(|v| v.to_string()).collect())
    })
    .await
}

/// Reverts the last `steps` migrations.
pub async fn revert_migrations(database_url: &str, steps: u32) -> AppResult<Vec<String>> {
    if steps == 0 {
        return Err(AppError::Validation {
            field: "rollback_steps".to_string(),
            reason: "Number of rollback steps must be greater than 0".to_string(),
        });
    }

    with_connection(database_url, "revert migrations", move |conn| {
        let applied = conn
            .applied_migrations()
            .map_err(|e| migration_error("get applied migrations", e))?;

        if applied.len() < steps as usize {
            return Err(AppError::Validation {
                field: "rollback_steps".to_string(),
                reason: format!(
                    "Cannot rollback {} migrations - only {} applied migrations available",
                    steps,
                    applied.len()
                ),
            });
        }

        (0..steps)
            .map(|_| {
                conn.revert_last_migration(MIGRATIONS)
                    .map(|version| version.to_string())
                    .map_err(|e| migration_error("revert migration", e))
            })
            .collect()
    })
    .await
}
