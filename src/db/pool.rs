//! Async database connection pool implementation.
//!
//! Uses bb8 connection pool manager with diesel_async for PostgreSQL connections.

use std::time::Duration;

use diesel_async::AsyncPgConnection;
use diesel_async::pooled_connection::AsyncDieselConnectionManager;
use diesel_async::pooled_connection::bb8::Pool;

use crate::config::DatabaseConfig;
use crate::error::{AppError, AppResult};

/// Async connection pool type alias.
///
/// bb8::Pool internally uses Arc, so Clone is cheap (just reference count increment).
pub type AsyncDbPool = Pool<AsyncPgConnection>;

/// Creates an async database connection pool sized by `[database]`.
///
/// # Errors
///
/// - `AppError::ConnectionPool` if the initial connections cannot be opened
///
/// # Example
///
/// ```ignore
/// let pool = establish_async_connection_pool(&settings.database).await?;
/// let mut conn = pool.get().await?;
/// ```
pub async fn establish_async_connection_pool(config: &DatabaseConfig) -> AppResult<AsyncDbPool> {
    let manager = AsyncDieselConnectionManager::<AsyncPgConnection>::new(config.url.as_str());

    Pool::builder()
        .max_size(config.max_connections)
        .min_idle(Some(config.min_connections))
        .connection_timeout(Duration::from_secs(config.connection_timeout))
        .build(manager)
        .await
        .map_err(|e| AppError::ConnectionPool {
            source: anyhow::Error::new(e),
        })
}
