//! User repository for async database operations.
//!
//! Provides CRUD operations for the users table using diesel_async.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::db::AsyncDbPool;
use crate::error::{AppError, AppResult};
use crate::models::{NewUser, Profile, UpdateUser, User};
use crate::repositories::UserStore;

/// User repository holding an async connection pool.
///
/// Since `AsyncDbPool` (bb8::Pool) internally uses `Arc`, cloning is cheap
/// (just reference count increment).
#[derive(Clone)]
pub struct UserRepository {
    pool: AsyncDbPool,
}

impl UserRepository {
    pub fn new(pool: AsyncDbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for UserRepository {
    async fn find_all(&self) -> AppResult<Vec<User>> {
        use crate::schema::users::dsl::*;
        let mut conn = self.pool.get().await?;

        users
            .select(User::as_select())
            .order(created_at.asc())
            .load(&mut conn)
            .await
            .map_err(AppError::from)
    }

    async fn find_by_id(&self, user_id: Uuid) -> AppResult<Option<User>> {
        use crate::schema::users::dsl::*;
        let mut conn = self.pool.get().await?;

        users
            .filter(id.eq(user_id))
            .select(User::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(AppError::from)
    }

    async fn find_by_email(&self, user_email: &str) -> AppResult<Option<User>> {
        use crate::schema::users::dsl::*;
        let mut conn = self.pool.get().await?;

        users
            .filter(email.eq(user_email))
            .select(User::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(AppError::from)
    }

    async fn find_profiles(&self, owner_id: Uuid) -> AppResult<Vec<Profile>> {
        use crate::schema::profiles::dsl::*;
        let mut conn = self.pool.get().await?;

        profiles
            .filter(user_id.eq(owner_id))
            .select(Profile::as_select())
            .order(created_at.asc())
            .load(&mut conn)
            .await
            .map_err(AppError::from)
    }

    /// The password must already be hashed.
    async fn create(&self, new_user: NewUser) -> AppResult<User> {
        use crate::schema::users::dsl::*;
        let mut conn = self.pool.get().await?;

        diesel::insert_into(users)
            .values(&new_user)
            .returning(User::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(AppError::from)
    }

    async fn update(&self, user_id: Uuid, changes: UpdateUser) -> AppResult<Option<User>> {
        use crate::schema::users::dsl::*;
        let mut conn = self.pool.get().await?;

        diesel::update(users.filter(id.eq(user_id)))
            .set((&changes, updated_at.eq(diesel::dsl::now)))
            .returning(User::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(AppError::from)
    }

    async fn delete(&self, user_id: Uuid) -> AppResult<Option<User>> {
        use crate::schema::users::dsl::*;
        let mut conn = self.pool.get().await?;

        diesel::delete(users.filter(id.eq(user_id)))
            .returning(User::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(AppError::from)
    }
}
