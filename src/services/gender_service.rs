use std::sync::Arc;

use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::models::{Gender, NewGender};
use crate::repositories::GenderStore;
use crate::services::authorization::{Caller, require_admin};

#[derive(Clone)]
pub struct GenderService {
    repo: Arc<dyn GenderStore>,
}

impl GenderService {
    pub fn new(repo: Arc<dyn GenderStore>) -> Self {
        Self { repo }
    }

    pub async fn find_all(&self) -> AppResult<Vec<Gender>> {
        self.repo.find_all().await
    }

    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Gender> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("gender", "id", id))
    }

    pub async fn create(&self, new_gender: NewGender, caller: &Caller) -> AppResult<Gender> {
        require_admin(caller)?;

        let gender = self.repo.create(new_gender).await?;
        tracing::info!(gender_id = %gender.id, name = %gender.name, "Gender created");
        Ok(gender)
    }

    /// Fails with a validation error while games still reference the gender.
    pub async fn delete(&self, id: Uuid, caller: &Caller) -> AppResult<()> {
        require_admin(caller)?;
        self.find_by_id(id).await?;

        self.repo.delete(id).await?;
        tracing::info!(gender_id = %id, "Gender deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NewGame;
    use crate::repositories::GameStore;
    use crate::repositories::memory::MemoryDatabase;

    fn caller(is_admin: bool) -> Caller {
        Caller {
            id: Uuid::new_v4(),
            email: "someone@gamedevs.com".to_string(),
            is_admin,
        }
    }

    fn named(name: &str) -> NewGender {
        NewGender {
            name: name.to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_list_sorted() {
        let service = GenderService::new(MemoryDatabase::new());
        service.create(named("Shooter"), &caller(true)).await.unwrap();
        service.create(named("RPG"), &caller(true)).await.unwrap();

        let names: Vec<String> = service
            .find_all()
            .await
            .unwrap()
            .into_iter()
            .map(|g| g.name)
            .collect();
        assert_eq!(names, vec!["RPG", "Shooter"]);
    }

    #[tokio::test]
    async fn test_admin_gate_and_duplicates() {
        let service = GenderService::new(MemoryDatabase::new());

        assert!(matches!(
            service.create(named("RPG"), &caller(false)).await,
            Err(AppError::Unauthorized { .. })
        ));

        service.create(named("RPG"), &caller(true)).await.unwrap();
        assert!(matches!(
            service.create(named("RPG"), &caller(true)).await,
            Err(AppError::Duplicate { .. })
        ));
    }

    #[tokio::test]
    async fn test_delete_referenced_gender_rejected() {
        let db = MemoryDatabase::new();
        let service = GenderService::new(db.clone());
        let gender = service.create(named("RPG"), &caller(true)).await.unwrap();

        GameStore::create(
            db.as_ref(),
            NewGame {
                title: "Elden Ring".to_string(),
                description: "Souls-like".to_string(),
                image: "https://img.gamedevs.test/er.png".to_string(),
                year: 2022,
                score: 9.6,
                trailer: "https://youtube.com/watch?v=er".to_string(),
                gameplay: "https://youtube.com/watch?v=er-gp".to_string(),
                gender_id: gender.id,
            },
        )
        .await
        .unwrap();

        assert!(matches!(
            service.delete(gender.id, &caller(true)).await,
            Err(AppError::Validation { .. })
        ));
        assert!(service.find_by_id(gender.id).await.is_ok());
    }

    #[tokio::test]
    async fn test_delete_missing_and_unreferenced() {
        let service = GenderService::new(MemoryDatabase::new());
        let gender = service.create(named("Puzzle"), &caller(true)).await.unwrap();

        assert!(matches!(
            service.delete(Uuid::new_v4(), &caller(true)).await,
            Err(AppError::NotFound { .. })
        ));
        service.delete(gender.id, &caller(true)).await.unwrap();
        assert!(matches!(
            service.find_by_id(gender.id).await,
            Err(AppError::NotFound { .. })
        ));
    }
}
