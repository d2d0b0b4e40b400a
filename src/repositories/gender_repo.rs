//! Gender repository for async database operations.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::db::AsyncDbPool;
use crate::error::{AppError, AppResult};
use crate::models::{Gender, NewGender};
use crate::repositories::GenderStore;

#[derive(Clone)]
pub struct GenderRepository {
    pool: AsyncDbPool,
}

impl GenderRepository {
    pub fn new(pool: AsyncDbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl GenderStore for GenderRepository {
    async fn find_all(&self) -> AppResult<Vec<Gender>> {
        use crate::schema::genders::dsl::*;
        let mut conn = self.pool.get().await?;

        genders
            .select(Gender::as_select())
            .order(name.asc())
            .load(&mut conn)
            .await
            .map_err(AppError::from)
    }

    async fn find_by_id(&self, gender_id: Uuid) -> AppResult<Option<Gender>> {
        use crate::schema::genders::dsl::*;
        let mut conn = self.pool.get().await?;

        genders
            .filter(id.eq(gender_id))
            .select(Gender::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(AppError::from)
    }

    async fn create(&self, new_gender: NewGender) -> AppResult<Gender> {
        use crate::schema::genders::dsl::*;
        let mut conn = self.pool.get().await?;

        diesel::insert_into(genders)
            .values(&new_gender)
            .returning(Gender::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(AppError::from)
    }

    async fn delete(&self, gender_id: Uuid) -> AppResult<usize> {
        use crate::schema::genders::dsl::*;
        let mut conn = self.pool.get().await?;

        diesel::delete(genders.filter(id.eq(gender_id)))
            .execute(&mut conn)
            .await
            .map_err(AppError::from)
    }
}
