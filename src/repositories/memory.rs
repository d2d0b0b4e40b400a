//! In-memory stores for service and router tests.
//!
//! Constraint violations are raised as the same diesel errors PostgreSQL
//! would produce and pushed through `AppError::from`, so the translation
//! path matches the real repositories.

use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use crate::error::{AppError, AppResult, foreign_key_violation, unique_violation};
use crate::models::{
    Game, GameWithGender, Gender, NewGame, NewGender, NewUser, Profile, UpdateGame, UpdateUser,
    User,
};
use crate::repositories::{GameStore, GenderStore, Repositories, UserStore};

#[derive(Default)]
struct Tables {
    games: Vec<Game>,
    genders: Vec<Gender>,
    users: Vec<User>,
    profiles: Vec<Profile>,
}

impl Tables {
    fn expand(&self, game: &Game) -> AppResult<GameWithGender> {
        let gender = self
            .genders
            .iter()
            .find(|g| g.id == game.gender_id)
            .cloned()
            .ok_or_else(|| AppError::from(diesel::result::Error::NotFound))?;
        Ok(GameWithGender {
            game: game.clone(),
            gender,
        })
    }

    fn check_gender_exists(&self, gender_id: Uuid) -> AppResult<()> {
        if self.genders.iter().any(|g| g.id == gender_id) {
            Ok(())
        } else {
            Err(foreign_key_violation("games", "gender_id", &gender_id.to_string()).into())
        }
    }

    fn check_game_title(&self, title: &str, except: Option<Uuid>) -> AppResult<()> {
        if self
            .games
            .iter()
            .any(|g| g.title == title && Some(g.id) != except)
        {
            return Err(unique_violation("games", "title", title).into());
        }
        Ok(())
    }

    fn check_user_unique(
        &self,
        email: Option<&str>,
        cpf: Option<&str>,
        except: Option<Uuid>,
    ) -> AppResult<()> {
        let others = || self.users.iter().filter(move |u| Some(u.id) != except);
        if let Some(email) = email {
            if others().any(|u| u.email == email) {
                return Err(unique_violation("users", "email", email).into());
            }
        }
        if let Some(cpf) = cpf {
            if others().any(|u| u.cpf == cpf) {
                return Err(unique_violation("users", "cpf", cpf).into());
            }
        }
        Ok(())
    }
}

/// One lock over every table so cross-table constraints stay consistent.
#[derive(Default)]
pub(crate) struct MemoryDatabase {
    tables: Mutex<Tables>,
}

impl MemoryDatabase {
    pub(crate) fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub(crate) fn repositories(self: &Arc<Self>) -> Repositories {
        Repositories {
            games: self.clone(),
            genders: self.clone(),
            users: self.clone(),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Tables> {
        self.tables.lock().expect("memory database lock poisoned")
    }

    pub(crate) fn stored_user(&self, id: Uuid) -> Option<User> {
        self.lock().users.iter().find(|u| u.id == id).cloned()
    }

    pub(crate) fn add_profile(&self, user_id: Uuid, title: &str) -> Profile {
        let now = Utc::now().naive_utc();
        let profile = Profile {
            id: Uuid::new_v4(),
            title: title.to_string(),
            image_url: format!("https://img.gamedevs.test/{}.png", title),
            user_id,
            created_at: now,
            updated_at: now,
        };
        self.lock().profiles.push(profile.clone());
        profile
    }
}

#[async_trait]
impl GameStore for MemoryDatabase {
    async fn find_all(&self) -> AppResult<Vec<GameWithGender>> {
        let tables = self.lock();
        tables.games.iter().map(|g| tables.expand(g)).collect()
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<GameWithGender>> {
        let tables = self.lock();
        tables
            .games
            .iter()
            .find(|g| g.id == id)
            .map(|g| tables.expand(g))
            .transpose()
    }

    async fn create(&self, new_game: NewGame) -> AppResult<GameWithGender> {
        let mut tables = self.lock();
        tables.check_game_title(&new_game.title, None)?;
        tables.check_gender_exists(new_game.gender_id)?;

        let now = Utc::now().naive_utc();
        let game = Game {
            id: Uuid::new_v4(),
            title: new_game.title,
            description: new_game.description,
            image: new_game.image,
            year: new_game.year,
            score: new_game.score,
            trailer: new_game.trailer,
            gameplay: new_game.gameplay,
            gender_id: new_game.gender_id,
            created_at: now,
            updated_at: now,
        };
        tables.games.push(game.clone());
        tables.expand(&game)
    }

    async fn update(&self, id: Uuid, changes: UpdateGame) -> AppResult<Option<GameWithGender>> {
        let mut tables = self.lock();
        if !tables.games.iter().any(|g| g.id == id) {
            return Ok(None);
        }
        if let Some(title) = &changes.title {
            tables.check_game_title(title, Some(id))?;
        }
        if let Some(gender_id) = changes.gender_id {
            tables.check_gender_exists(gender_id)?;
        }

        let game = tables
            .games
            .iter_mut()
            .find(|g| g.id == id)
            .ok_or_else(|| AppError::from(diesel::result::Error::NotFound))?;
        if let Some(v) = changes.title {
            game.title = v;
        }
        if let Some(v) = changes.description {
            game.description = v;
        }
        if let Some(v) = changes.image {
            game.image = v;
        }
        if let Some(v) = changes.year {
            game.year = v;
        }
        if let Some(v) = changes.score {
            game.score = v;
        }
        if let Some(v) = changes.trailer {
            game.trailer = v;
        }
        if let Some(v) = changes.gameplay {
            game.gameplay = v;
        }
        if let Some(v) = changes.gender_id {
            game.gender_id = v;
        }
        game.updated_at = Utc::now().naive_utc();

        let game = game.clone();
        tables.expand(&game).map(Some)
    }

    async fn delete(&self, id: Uuid) -> AppResult<usize> {
        let mut tables = self.lock();
        let before = tables.games.len();
        tables.games.retain(|g| g.id != id);
        Ok(before - tables.games.len())
    }
}

#[async_trait]
impl GenderStore for MemoryDatabase {
    async fn find_all(&self) -> AppResult<Vec<Gender>> {
        let mut genders = self.lock().genders.clone();
        genders.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(genders)
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Gender>> {
        Ok(self.lock().genders.iter().find(|g| g.id == id).cloned())
    }

    async fn create(&self, new_gender: NewGender) -> AppResult<Gender> {
        let mut tables = self.lock();
        if tables.genders.iter().any(|g| g.name == new_gender.name) {
            return Err(unique_violation("genders", "name", &new_gender.name).into());
        }

        let now = Utc::now().naive_utc();
        let gender = Gender {
            id: Uuid::new_v4(),
            name: new_gender.name,
            created_at: now,
            updated_at: now,
        };
        tables.genders.push(gender.clone());
        Ok(gender)
    }

    async fn delete(&self, id: Uuid) -> AppResult<usize> {
        let mut tables = self.lock();
        if tables.games.iter().any(|g| g.gender_id == id) {
            return Err(foreign_key_violation("games", "gender_id", &id.to_string()).into());
        }
        let before = tables.genders.len();
        tables.genders.retain(|g| g.id != id);
        Ok(before - tables.genders.len())
    }
}

#[async_trait]
impl UserStore for MemoryDatabase {
    async fn find_all(&self) -> AppResult<Vec<User>> {
        Ok(self.lock().users.clone())
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        Ok(self.stored_user(id))
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        Ok(self.lock().users.iter().find(|u| u.email == email).cloned())
    }

    async fn find_profiles(&self, user_id: Uuid) -> AppResult<Vec<Profile>> {
        Ok(self
            .lock()
            .profiles
            .iter()
            .filter(|p| p.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn create(&self, new_user: NewUser) -> AppResult<User> {
        let mut tables = self.lock();
        tables.check_user_unique(Some(&new_user.email), Some(&new_user.cpf), None)?;

        let now = Utc::now().naive_utc();
        let user = User {
            id: Uuid::new_v4(),
            name: new_user.name,
            email: new_user.email,
            password: new_user.password,
            cpf: new_user.cpf,
            is_admin: new_user.is_admin,
            created_at: now,
            updated_at: now,
        };
        tables.users.push(user.clone());
        Ok(user)
    }

    async fn update(&self, id: Uuid, changes: UpdateUser) -> AppResult<Option<User>> {
        let mut tables = self.lock();
        tables.check_user_unique(changes.email.as_deref(), changes.cpf.as_deref(), Some(id))?;

        let Some(user) = tables.users.iter_mut().find(|u| u.id == id) else {
            return Ok(None);
        };
        if let Some(v) = changes.name {
            user.name = v;
        }
        if let Some(v) = changes.email {
            user.email = v;
        }
        if let Some(v) = changes.password {
            user.password = v;
        }
        if let Some(v) = changes.cpf {
            user.cpf = v;
        }
        if let Some(v) = changes.is_admin {
            user.is_admin = v;
        }
        user.updated_at = Utc::now().naive_utc();
        Ok(Some(user.clone()))
    }

    async fn delete(&self, id: Uuid) -> AppResult<Option<User>> {
        let mut tables = self.lock();
        let Some(position) = tables.users.iter().position(|u| u.id == id) else {
            return Ok(None);
        };
        tables.profiles.retain(|p| p.user_id != id);
        Ok(Some(tables.users.remove(position)))
    }
}
