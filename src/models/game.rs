use chrono::NaiveDateTime;
use diesel::prelude::*;
use uuid::Uuid;

use super::Gender;

#[derive(Debug, Queryable, Selectable, Identifiable, Associations, Clone, PartialEq)]
#[diesel(belongs_to(Gender))]
#[diesel(table_name = crate::schema::games)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Game {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub image: String,
    pub year: i32,
    pub score: f64,
    pub trailer: String,
    pub gameplay: String,
    pub gender_id: Uuid,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Debug, Insertable, Clone)]
#[diesel(table_name = crate::schema::games)]
pub struct NewGame {
    pub title: String,
    pub description: String,
    pub image: String,
    pub year: i32,
    pub score: f64,
    pub trailer: String,
    pub gameplay: String,
    pub gender_id: Uuid,
}

/// Partial update; `gender_id` re-links the game to another gender.
#[derive(Debug, AsChangeset, Clone, Default)]
#[diesel(table_name = crate::schema::games)]
pub struct UpdateGame {
    pub title: Option<String>,
    pub description: Option<String>,
    pub image: Option<String>,
    pub year: Option<i32>,
    pub score: Option<f64>,
    pub trailer: Option<String>,
    pub gameplay: Option<String>,
    pub gender_id: Option<Uuid>,
}

/// A game with its gender expanded, the only shape games are read in.
#[derive(Debug, Clone, PartialEq)]
pub struct GameWithGender {
    pub game: Game,
    pub gender: Gender,
}

impl From<(Game, Gender)> for GameWithGender {
    fn from((game, gender): (Game, Gender)) -> Self {
        Self { game, gender }
    }
}
