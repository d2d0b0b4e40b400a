use chrono::NaiveDateTime;
use diesel::prelude::*;
use uuid::Uuid;

use super::Profile;

/// User row as stored, including the password hash.
///
/// Never leaves the service layer; callers get a `UserSummary` or `UserDetail`.
#[derive(Debug, Queryable, Selectable, Identifiable, Clone, PartialEq)]
#[diesel(table_name = crate::schema::users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub password: String,
    pub cpf: String,
    pub is_admin: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Debug, Insertable, Clone)]
#[diesel(table_name = crate::schema::users)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    /// Plaintext on the way in; the service replaces it with a hash
    pub password: String,
    pub cpf: String,
    pub is_admin: bool,
}

#[derive(Debug, AsChangeset, Clone, Default)]
#[diesel(table_name = crate::schema::users)]
pub struct UpdateUser {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub cpf: Option<String>,
    pub is_admin: Option<bool>,
}

/// Public projection of a user.
#[derive(Debug, Clone, PartialEq)]
pub struct UserSummary {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl From<User> for UserSummary {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

/// Extended projection used for authorization lookups.
#[derive(Debug, Clone, PartialEq)]
pub struct UserDetail {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub is_admin: bool,
    pub cpf: String,
    pub profiles: Vec<Profile>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl UserDetail {
    pub fn new(user: User, profiles: Vec<Profile>) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            is_admin: user.is_admin,
            cpf: user.cpf,
            profiles,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}
