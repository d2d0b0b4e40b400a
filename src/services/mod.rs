//! Service layer for business logic operations.
//!
//! Services encapsulate business logic and coordinate between
//! repositories and handlers.

pub mod authorization;
mod game_service;
mod gender_service;
pub mod mailer;
pub mod recovery_message;
mod user_service;

use std::sync::Arc;

pub use authorization::Caller;
pub use game_service::GameService;
pub use gender_service::GenderService;
pub use mailer::{Mailer, OutgoingEmail, SmtpMailer};
pub use user_service::{RECOVERY_RESPONSE, UserService};

use crate::config::JwtConfig;
use crate::repositories::Repositories;

/// Aggregates all services for convenient access.
///
/// This struct is designed to be used as Axum application state.
/// Cloning is cheap since every service holds `Arc`s.
#[derive(Clone)]
pub struct Services {
    pub games: GameService,
    pub genders: GenderService,
    pub users: UserService,
}

impl Services {
    pub fn new(repos: Repositories, mailer: Arc<dyn Mailer>, jwt_config: JwtConfig) -> Self {
        Self {
            games: GameService::new(repos.games),
            genders: GenderService::new(repos.genders),
            users: UserService::new(repos.users, mailer, jwt_config),
        }
    }
}
