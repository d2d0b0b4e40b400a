//! HTTP request handlers for API endpoints.
//!
//! Resources with protected writes expose a `public_routes` and a
//! `protected_routes` router; the latter gets the auth layer in `routes`.

pub mod auth;
pub mod games;
pub mod genders;
pub mod health;
pub mod users;
