//! Game and gender DTOs.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use super::format_timestamp;
use crate::models::{GameWithGender, Gender, NewGame, NewGender, UpdateGame};

#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct CreateGameRequest {
    #[validate(length(min = 1, max = 255, message = "Title must be between 1 and 255 characters"))]
    #[schema(example = "Hollow Knight")]
    pub title: String,
    #[validate(length(min = 1, message = "Description cannot be empty"))]
    pub description: String,
    #[validate(url(message = "Image must be a valid URL"))]
    #[schema(format = "uri")]
    pub image: String,
    #[validate(range(min = 1950, max = 2100, message = "Year must be between 1950 and 2100"))]
    #[schema(example = 2017)]
    pub year: i32,
    #[validate(range(min = 0.0, max = 10.0, message = "Score must be between 0 and 10"))]
    #[schema(example = 9.2)]
    pub score: f64,
    #[validate(url(message = "Trailer must be a valid URL"))]
    #[schema(format = "uri")]
    pub trailer: String,
    #[validate(length(min = 1, message = "Gameplay cannot be empty"))]
    pub gameplay: String,
    pub gender_id: Uuid,
}

impl CreateGameRequest {
    pub fn into_new_game(self) -> NewGame {
        NewGame {
            title: self.title,
            description: self.description,
            image: self.image,
            year: self.year,
            score: self.score,
            trailer: self.trailer,
            gameplay: self.gameplay,
            gender_id: self.gender_id,
        }
    }
}

/// Partial game update; `gender_id` re-links the game.
#[derive(Debug, Default, Deserialize, ToSchema, Validate)]
pub struct UpdateGameRequest {
    #[validate(length(min = 1, max = 255, message = "Title must be between 1 and 255 characters"))]
    pub title: Option<String>,
    #[validate(length(min = 1, message = "Description cannot be empty"))]
    pub description: Option<String>,
    #[validate(url(message = "Image must be a valid URL"))]
    pub image: Option<String>,
    #[validate(range(min = 1950, max = 2100, message = "Year must be between 1950 and 2100"))]
    pub year: Option<i32>,
    #[validate(range(min = 0.0, max = 10.0, message = "Score must be between 0 and 10"))]
    pub score: Option<f64>,
    #[validate(url(message = "Trailer must be a valid URL"))]
    pub trailer: Option<String>,
    #[validate(length(min = 1, message = "Gameplay cannot be empty"))]
    pub gameplay: Option<String>,
    pub gender_id: Option<Uuid>,
}

impl UpdateGameRequest {
    pub fn into_update_game(self) -> UpdateGame {
        UpdateGame {
            title: self.title,
            description: self.description,
            image: self.image,
            year: self.year,
            score: self.score,
            trailer: self.trailer,
            gameplay: self.gameplay,
            gender_id: self.gender_id,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct CreateGenderRequest {
    #[validate(length(min = 2, max = 50, message = "Name must be between 2 and 50 characters"))]
    #[schema(example = "Metroidvania")]
    pub name: String,
}

impl CreateGenderRequest {
    pub fn into_new_gender(self) -> NewGender {
        NewGender { name: self.name }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct GenderResponse {
    pub id: Uuid,
    pub name: String,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Gender> for GenderResponse {
    fn from(gender: Gender) -> Self {
        Self {
            id: gender.id,
            name: gender.name,
            created_at: format_timestamp(&gender.created_at),
            updated_at: format_timestamp(&gender.updated_at),
        }
    }
}

/// A game with its gender expanded under `genders`.
#[derive(Debug, Serialize, ToSchema)]
pub struct GameResponse {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub image: String,
    pub year: i32,
    pub score: f64,
    pub trailer: String,
    pub gameplay: String,
    pub gender_id: Uuid,
    pub genders: GenderResponse,
    pub created_at: String,
    pub updated_at: String,
}

impl From<GameWithGender> for GameResponse {
    fn from(GameWithGender { game, gender }: GameWithGender) -> Self {
        Self {
            id: game.id,
            title: game.title,
            description: game.description,
            image: game.image,
            year: game.year,
            score: game.score,
            trailer: game.trailer,
            gameplay: game.gameplay,
            gender_id: game.gender_id,
            genders: gender.into(),
            created_at: format_timestamp(&game.created_at),
            updated_at: format_timestamp(&game.updated_at),
        }
    }
}
