//! Persistence contracts the services are written against.
//!
//! Every error crossing these traits has already been through
//! `DatabaseErrorConverter`, so uniqueness conflicts arrive as
//! `AppError::Duplicate` and dangling references as `AppError::Validation`.

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::AppResult;
use crate::models::{
    GameWithGender, Gender, NewGame, NewGender, NewUser, Profile, UpdateGame, UpdateUser, User,
};

/// Games are always read with their gender expanded.
#[async_trait]
pub trait GameStore: Send + Sync {
    async fn find_all(&self) -> AppResult<Vec<GameWithGender>>;

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<GameWithGender>>;

    async fn create(&self, new_game: NewGame) -> AppResult<GameWithGender>;

    /// `None` when no game has `id`.
    async fn update(&self, id: Uuid, changes: UpdateGame) -> AppResult<Option<GameWithGender>>;

    /// Number of deleted rows.
    async fn delete(&self, id: Uuid) -> AppResult<usize>;
}

#[async_trait]
pub trait GenderStore: Send + Sync {
    async fn find_all(&self) -> AppResult<Vec<Gender>>;

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Gender>>;

    async fn create(&self, new_gender: NewGender) -> AppResult<Gender>;

    async fn delete(&self, id: Uuid) -> AppResult<usize>;
}

#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_all(&self) -> AppResult<Vec<User>>;

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>>;

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;

    async fn find_profiles(&self, user_id: Uuid) -> AppResult<Vec<Profile>>;

    async fn create(&self, new_user: NewUser) -> AppResult<User>;

    async fn update(&self, id: Uuid, changes: UpdateUser) -> AppResult<Option<User>>;

    /// Returns the deleted row, `None` when no user has `id`.
    async fn delete(&self, id: Uuid) -> AppResult<Option<User>>;
}
