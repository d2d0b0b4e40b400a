//! Game repository for async database operations.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::db::AsyncDbPool;
use crate::error::{AppError, AppResult};
use crate::models::{Game, GameWithGender, Gender, NewGame, UpdateGame};
use crate::repositories::GameStore;
use crate::schema::{games, genders};

#[derive(Clone)]
pub struct GameRepository {
    pool: AsyncDbPool,
}

impl GameRepository {
    pub fn new(pool: AsyncDbPool) -> Self {
        Self { pool }
    }

    async fn with_gender(&self, game: Game) -> AppResult<GameWithGender> {
        let mut conn = self.pool.get().await?;

        let gender = genders::table
            .find(game.gender_id)
            .select(Gender::as_select())
            .first(&mut conn)
            .await
            .map_err(AppError::from)?;

        Ok(GameWithGender { game, gender })
    }
}

#[async_trait]
impl GameStore for GameRepository {
    async fn find_all(&self) -> AppResult<Vec<GameWithGender>> {
        let mut conn = self.pool.get().await?;

        let rows = games::table
            .inner_join(genders::table)
            .select((Game::as_select(), Gender::as_select()))
            .order(games::created_at.asc())
            .load::<(Game, Gender)>(&mut conn)
            .await
            .map_err(AppError::from)?;

        Ok(rows.into_iter().map(GameWithGender::from).collect())
    }

    async fn find_by_id(&self, game_id: Uuid) -> AppResult<Option<GameWithGender>> {
        let mut conn = self.pool.get().await?;

        let row = games::table
            .inner_join(genders::table)
            .filter(games::id.eq(game_id))
            .select((Game::as_select(), Gender::as_select()))
            .first::<(Game, Gender)>(&mut conn)
            .await
            .optional()
            .map_err(AppError::from)?;

        Ok(row.map(GameWithGender::from))
    }

    async fn create(&self, new_game: NewGame) -> AppResult<GameWithGender> {
        let game = {
            let mut conn = self.pool.get().await?;
            diesel::insert_into(games::table)
                .values(&new_game)
                .returning(Game::as_returning())
                .get_result(&mut conn)
                .await
                .map_err(AppError::from)?
        };

        self.with_gender(game).await
    }

    async fn update(&self, game_id: Uuid, changes: UpdateGame) -> AppResult<Option<GameWithGender>> {
        let updated = {
            let mut conn = self.pool.get().await?;
            diesel::update(games::table.find(game_id))
                .set((&changes, games::updated_at.eq(diesel::dsl::now)))
                .returning(Game::as_returning())
                .get_result(&mut conn)
                .await
                .optional()
                .map_err(AppError::from)?
        };

        match updated {
            Some(game) => self.with_gender(game).await.map(Some),
            None => Ok(None),
        }
    }

    async fn delete(&self, game_id: Uuid) -> AppResult<usize> {
        let mut conn = self.pool.get().await?;

        diesel::delete(games::table.find(game_id))
            .execute(&mut conn)
            .await
            .map_err(AppError::from)
    }
}
