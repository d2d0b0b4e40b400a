//! Repository layer for data access operations.
//!
//! Services depend on the store traits; the diesel repositories are the
//! PostgreSQL implementations.

mod game_repo;
mod gender_repo;
mod store;
mod user_repo;

#[cfg(test)]
pub(crate) mod memory;

use std::sync::Arc;

pub use game_repo::GameRepository;
pub use gender_repo::GenderRepository;
pub use store::{GameStore, GenderStore, UserStore};
pub use user_repo::UserRepository;

use crate::db::AsyncDbPool;

/// Aggregates the stores behind trait objects.
///
/// Cloning only bumps reference counts.
#[derive(Clone)]
pub struct Repositories {
    pub games: Arc<dyn GameStore>,
    pub genders: Arc<dyn GenderStore>,
    pub users: Arc<dyn UserStore>,
}

impl Repositories {
    /// PostgreSQL-backed repositories sharing one pool.
    pub fn new(pool: AsyncDbPool) -> Self {
        Self {
            games: Arc::new(GameRepository::new(pool.clone())),
            genders: Arc::new(GenderRepository::new(pool.clone())),
            users: Arc::new(UserRepository::new(pool)),
        }
    }
}
