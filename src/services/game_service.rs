//! Game catalog business logic.

use std::sync::Arc;

use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::models::{GameWithGender, NewGame, UpdateGame};
use crate::repositories::GameStore;
use crate::services::authorization::{Caller, require_admin};

/// Reads are public; every write is gated on `is_admin`.
#[derive(Clone)]
pub struct GameService {
    repo: Arc<dyn GameStore>,
}

impl GameService {
    pub fn new(repo: Arc<dyn GameStore>) -> Self {
        Self { repo }
    }

    pub async fn find_all(&self) -> AppResult<Vec<GameWithGender>> {
        self.repo.find_all().await
    }

    /// Gets a game with its gender, or `NotFound`.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<GameWithGender> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("game", "id", id))
    }

    pub async fn create(&self, new_game: NewGame, caller: &Caller) -> AppResult<GameWithGender> {
        require_admin(caller)?;

        let game = self.repo.create(new_game).await?;
        tracing::info!(game_id = %game.game.id, title = %game.game.title, "Game created");
        Ok(game)
    }

    pub async fn update(
        &self,
        id: Uuid,
        changes: UpdateGame,
        caller: &Caller,
    ) -> AppResult<GameWithGender> {
        require_admin(caller)?;

        let game = self
            .repo
            .update(id, changes)
            .await?
            .ok_or_else(|| AppError::not_found("game", "id", id))?;
        tracing::info!(game_id = %id, gender_id = %game.gender.id, "Game updated");
        Ok(game)
    }

    pub async fn delete(&self, id: Uuid, caller: &Caller) -> AppResult<()> {
        require_admin(caller)?;
        self.find_by_id(id).await?;

        self.repo.delete(id).await?;
        tracing::info!(game_id = %id, "Game deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NewGender;
    use crate::repositories::GenderStore;
    use crate::repositories::memory::MemoryDatabase;

    fn admin() -> Caller {
        Caller {
            id: Uuid::new_v4(),
            email: "admin@gamedevs.com".to_string(),
            is_admin: true,
        }
    }

    fn player() -> Caller {
        Caller {
            id: Uuid::new_v4(),
            email: "player@gamedevs.com".to_string(),
            is_admin: false,
        }
    }

    fn new_game(title: &str, gender_id: Uuid) -> NewGame {
        NewGame {
            title: title.to_string(),
            description: "Open world adventure".to_string(),
            image: "https://img.gamedevs.test/cover.png".to_string(),
            year: 2017,
            score: 9.5,
            trailer: "https://youtube.com/watch?v=trailer".to_string(),
            gameplay: "https://youtube.com/watch?v=gameplay".to_string(),
            gender_id,
        }
    }

    async fn add_gender(db: &MemoryDatabase, name: &str) -> Uuid {
        GenderStore::create(
            db,
            NewGender {
                name: name.to_string(),
            },
        )
        .await
        .unwrap()
        .id
    }

    async fn setup() -> (GameService, Uuid) {
        let (service, _, gender_id) = setup_with_db().await;
        (service, gender_id)
    }

    async fn setup_with_db() -> (GameService, Arc<MemoryDatabase>, Uuid) {
        let db = MemoryDatabase::new();
        let gender_id = add_gender(&db, "Adventure").await;
        (GameService::new(db.clone()), db, gender_id)
    }

    #[tokio::test]
    async fn test_create_expands_gender() {
        let (service, gender_id) = setup().await;

        let game = service.create(new_game("Zelda", gender_id), &admin()).await.unwrap();
        assert_eq!(game.gender.id, gender_id);
        assert_eq!(game.gender.name, "Adventure");

        let fetched = service.find_by_id(game.game.id).await.unwrap();
        assert_eq!(fetched, game);
    }

    #[tokio::test]
    async fn test_non_admin_writes_rejected() {
        let (service, gender_id) = setup().await;
        let created = service.create(new_game("Zelda", gender_id), &admin()).await.unwrap();
        let id = created.game.id;

        assert!(matches!(
            service.create(new_game("Mario", gender_id), &player()).await,
            Err(AppError::Unauthorized { .. })
        ));
        assert!(matches!(
            service.update(id, UpdateGame::default(), &player()).await,
            Err(AppError::Unauthorized { .. })
        ));
        assert!(matches!(
            service.delete(id, &player()).await,
            Err(AppError::Unauthorized { .. })
        ));
        assert_eq!(service.find_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_duplicate_title() {
        let (service, gender_id) = setup().await;
        service.create(new_game("Zelda", gender_id), &admin()).await.unwrap();

        match service.create(new_game("Zelda", gender_id), &admin()).await {
            Err(AppError::Duplicate { entity, field, value }) => {
                assert_eq!(entity, "games");
                assert_eq!(field, "title");
                assert_eq!(value, "Zelda");
            }
            other => panic!("Expected Duplicate, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_unknown_gender_is_validation_error() {
        let (service, _) = setup().await;

        let result = service.create(new_game("Zelda", Uuid::new_v4()), &admin()).await;
        assert!(matches!(result, Err(AppError::Validation { .. })));
    }

    #[tokio::test]
    async fn test_update_and_missing_ids() {
        let (service, gender_id) = setup().await;
        let game = service.create(new_game("Zelda", gender_id), &admin()).await.unwrap();

        let changes = UpdateGame {
            score: Some(10.0),
            ..UpdateGame::default()
        };
        let updated = service.update(game.game.id, changes, &admin()).await.unwrap();
        assert_eq!(updated.game.score, 10.0);
        assert_eq!(updated.game.title, "Zelda");

        let missing = Uuid::new_v4();
        assert!(matches!(
            service.find_by_id(missing).await,
            Err(AppError::NotFound { .. })
        ));
        assert!(matches!(
            service.update(missing, UpdateGame::default(), &admin()).await,
            Err(AppError::NotFound { .. })
        ));
        assert!(matches!(
            service.delete(missing, &admin()).await,
            Err(AppError::NotFound { .. })
        ));

        service.delete(game.game.id, &admin()).await.unwrap();
        assert!(service.find_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_update_relinks_gender() {
        let (service, db, adventure) = setup_with_db().await;
        let rpg = add_gender(&db, "RPG").await;
        let game = service.create(new_game("Zelda", adventure), &admin()).await.unwrap();

        let changes = UpdateGame {
            gender_id: Some(rpg),
            ..UpdateGame::default()
        };
        let updated = service.update(game.game.id, changes, &admin()).await.unwrap();
        assert_eq!(updated.game.gender_id, rpg);
        assert_eq!(updated.gender.id, rpg);
        assert_eq!(updated.gender.name, "RPG");

        let fetched = service.find_by_id(game.game.id).await.unwrap();
        assert_eq!(fetched.gender.name, "RPG");
    }

    #[tokio::test]
    async fn test_update_to_unknown_gender_is_validation_error() {
        let (service, gender_id) = setup().await;
        let game = service.create(new_game("Zelda", gender_id), &admin()).await.unwrap();

        let changes = UpdateGame {
            gender_id: Some(Uuid::new_v4()),
            title: Some("Zelda II".to_string()),
            ..UpdateGame::default()
        };
        match service.update(game.game.id, changes, &admin()).await {
            Err(AppError::Validation { field, .. }) => assert_eq!(field, "gender_id"),
            other => panic!("Expected Validation, got {:?}", other),
        }

        let unchanged = service.find_by_id(game.game.id).await.unwrap();
        assert_eq!(unchanged.game.title, "Zelda");
        assert_eq!(unchanged.gender.id, gender_id);
    }

    #[tokio::test]
    async fn test_update_to_taken_title_is_duplicate() {
        let (service, gender_id) = setup().await;
        service.create(new_game("Zelda", gender_id), &admin()).await.unwrap();
        let mario = service.create(new_game("Mario", gender_id), &admin()).await.unwrap();

        let changes = UpdateGame {
            title: Some("Zelda".to_string()),
            ..UpdateGame::default()
        };
        assert!(matches!(
            service.update(mario.game.id, changes, &admin()).await,
            Err(AppError::Duplicate { .. })
        ));
    }
}
