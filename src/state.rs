//! Application state for Axum web framework.

use std::sync::Arc;

use crate::config::{JwtConfig, MailConfig};
use crate::db::AsyncDbPool;
use crate::repositories::Repositories;
use crate::services::{Mailer, Services, SmtpMailer};

/// Shared services and resources handed to every handler.
///
/// Cloning is cheap; everything inside is reference counted.
#[derive(Clone)]
pub struct AppState {
    pub services: Services,
    /// `None` when the stores are not database-backed
    pub db_pool: Option<AsyncDbPool>,
    pub jwt_config: JwtConfig,
}

impl AppState {
    /// PostgreSQL-backed state with SMTP delivery.
    ///
    /// # Example
    /// ```ignore
    /// let pool = establish_async_connection_pool(&settings.database).await?;
    /// let state = AppState::new(pool, settings.jwt.clone(), settings.mail.clone());
    /// ```
    pub fn new(pool: AsyncDbPool, jwt_config: JwtConfig, mail_config: MailConfig) -> Self {
        let mailer: Arc<dyn Mailer> = Arc::new(SmtpMailer::new(mail_config));
        let services = Services::new(Repositories::new(pool.clone()), mailer, jwt_config.clone());
        Self {
            services,
            db_pool: Some(pool),
            jwt_config,
        }
    }

    /// State over arbitrary stores and mailer, without a pool.
    pub fn from_parts(repos: Repositories, mailer: Arc<dyn Mailer>, jwt_config: JwtConfig) -> Self {
        Self {
            services: Services::new(repos, mailer, jwt_config.clone()),
            db_pool: None,
            jwt_config,
        }
    }
}
