use chrono::NaiveDateTime;
use diesel::prelude::*;
use uuid::Uuid;

/// Game category; every game references exactly one.
#[derive(Debug, Queryable, Selectable, Identifiable, Clone, PartialEq)]
#[diesel(table_name = crate::schema::genders)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Gender {
    pub id: Uuid,
    pub name: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Debug, Insertable, Clone)]
#[diesel(table_name = crate::schema::genders)]
pub struct NewGender {
    pub name: String,
}
