//! Data Transfer Objects for API requests and responses.
//!
//! DTOs are organized by domain:
//! - `auth` - Login and token DTOs
//! - `game` - Game and gender DTOs
//! - `user` - User-related request/response DTOs
//! - `error` - Common error response DTOs
//! - `health` - Health probe DTOs

mod auth;
mod error;
mod game;
mod health;
mod user;

use chrono::NaiveDateTime;

pub use auth::{LoginRequest, LoginResponse, RefreshTokenRequest, TokenResponse};
pub use error::ErrorResponse;
pub use game::{
    CreateGameRequest, CreateGenderRequest, GameResponse, GenderResponse, UpdateGameRequest,
};
pub use health::{ComponentHealth, HealthResponse, HealthStatus};
pub use user::{
    CreateUserRequest, MessageResponse, ProfileResponse, RecoverPasswordRequest,
    ResetPasswordRequest, UpdateUserRequest, UserDetailResponse, UserResponse,
};

/// Stored timestamps are UTC.
pub(crate) fn format_timestamp(value: &NaiveDateTime) -> String {
    value.format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string()
}
