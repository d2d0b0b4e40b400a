use chrono::NaiveDateTime;
use diesel::prelude::*;
use uuid::Uuid;

use super::User;

/// Only ever read as part of a user's detail projection.
#[derive(Debug, Queryable, Selectable, Identifiable, Associations, Clone, PartialEq)]
#[diesel(belongs_to(User))]
#[diesel(table_name = crate::schema::profiles)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Profile {
    pub id: Uuid,
    pub title: String,
    pub image_url: String,
    pub user_id: Uuid,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}
