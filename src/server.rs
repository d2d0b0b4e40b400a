//! HTTP server lifecycle: startup, optional migrations and graceful shutdown.

use std::time::Duration;

use axum::Router;
use tokio::net::TcpListener;
use tower_http::timeout::TimeoutLayer;
use tokio::signal;

use crate::api::routes::create_router;
use crate::config::settings::Settings;
use crate::db::establish_async_connection_pool;
use crate::db::migrations::run_pending_migrations;
use crate::state::AppState;

/// HTTP server manager
pub struct Server {
    settings: Settings,
}

impl Server {
    pub fn new(settings: Settings) -> Self {
        Self { settings }
    }

    /// Start the server and run until a shutdown signal arrives.
    ///
    /// # Errors
    /// - Invalid JWT or mail configuration
    /// - Migration failures when `database.auto_migrate` is set
    /// - Database connection pool initialization errors
    /// - Address binding errors
    pub async fn run(self) -> anyhow::Result<()> {
        let settings = self.settings;

        tracing::info!(
            app_name = %settings.application.name,
            app_version = %settings.application.version,
            environment = %settings.application.environment,
            "Application starting"
        );

        tracing::info!(
            host = %settings.server.host,
            port = %settings.server.port,
            request_timeout = %settings.server.request_timeout,
            "Server configuration loaded"
        );

        tracing::info!(
            max_connections = %settings.database.max_connections,
            min_connections = %settings.database.min_connections,
            connection_timeout = %settings.database.connection_timeout,
            auto_migrate = %settings.database.auto_migrate,
            "Database configuration loaded"
        );

        // Secrets stay out of the logs
        tracing::info!(
            access_token_expiration = %settings.jwt.access_token_expiration,
            refresh_token_expiration = %settings.jwt.refresh_token_expiration,
            recovery_token_expiration = %settings.jwt.recovery_token_expiration,
            secret_configured = %(!settings.jwt.secret.is_empty()),
            "JWT configuration loaded"
        );

        tracing::info!(
            mail_host = %settings.mail.host,
            mail_port = %settings.mail.port,
            credentials_configured = %(!settings.mail.username.is_empty()),
            "Mail configuration loaded"
        );

        settings.jwt.validate().map_err(|e| {
            tracing::error!(error = %e, "JWT configuration validation failed");
            anyhow::anyhow!("JWT configuration validation failed: {}", e)
        })?;
        settings
            .mail
            .validate_for(settings.application.environment)
            .map_err(|e| {
                tracing::error!(error = %e, "Mail configuration validation failed");
                anyhow::anyhow!("Mail configuration validation failed: {}", e)
            })?;

        if settings.database.auto_migrate {
            let applied = run_pending_migrations(&settings.database.url).await?;
            tracing::info!(count = applied.len(), migrations = ?applied, "Migrations applied");
        }

        tracing::info!("Initializing database connection pool...");
        let pool = establish_async_connection_pool(&settings.database).await?;
        tracing::info!("Database connection pool initialized");

        let state = AppState::new(pool, settings.jwt.clone(), settings.mail.clone());
        let router = with_request_timeout(
            create_router(state),
            Duration::from_secs(settings.server.request_timeout),
        );

        let address = settings.server.address();
        let listener = TcpListener::bind(&address).await.map_err(|e| {
            tracing::error!(error = %e, address = %address, "Failed to bind to address");
            anyhow::anyhow!("Failed to bind to {}: {}", address, e)
        })?;

        tracing::info!(address = %address, "Server listening");

        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");

        Ok(())
    }
}

/// Answers requests still running after `timeout` with 408 Request Timeout.
pub fn with_request_timeout(router: Router, timeout: Duration) -> Router {
    router.layer(TimeoutLayer::new(timeout))
}

/// Resolves on Ctrl+C or SIGTERM.
///
/// A handler that cannot be installed is logged and treated as never firing.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, initiating graceful shutdown");
        }
    }
}
