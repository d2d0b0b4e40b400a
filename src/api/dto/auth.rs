//! Authentication-related Data Transfer Objects

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use super::UserResponse;
use crate::utils::jwt::TokenPair;

/// Login request payload
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "Invalid email format"))]
    #[schema(example = "ana@gamedevs.com", format = "email")]
    pub email: String,
    #[validate(length(min = 1, message = "Password cannot be empty"))]
    #[schema(example = "password123", format = "password")]
    pub password: String,
}

/// Refresh token request payload
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct RefreshTokenRequest {
    #[validate(length(min = 1, message = "Refresh token cannot be empty"))]
    #[schema(example = "eyJ0eXAiOiJKV1QiLCJhbGc...")]
    pub refresh_token: String,
}

/// Access and refresh tokens
#[derive(Debug, Serialize, ToSchema)]
pub struct TokenResponse {
    /// Access token (short-lived)
    #[schema(example = "eyJ0eXAiOiJKV1QiLCJhbGc...")]
    pub access_token: String,
    /// Refresh token (long-lived)
    #[schema(example = "eyJ0eXAiOiJKV1QiLCJhbGc...")]
    pub refresh_token: String,
    #[schema(example = "Bearer")]
    pub token_type: String,
    /// Access token lifetime in seconds
    #[schema(example = 3600)]
    pub expires_in: i64,
}

impl From<TokenPair> for TokenResponse {
    fn from(pair: TokenPair) -> Self {
        Self {
            access_token: pair.access_token,
            refresh_token: pair.refresh_token,
            token_type: "Bearer".to_string(),
            expires_in: pair.expires_in,
        }
    }
}

/// Login response with user info and tokens
#[derive(Debug, Serialize, ToSchema)]
pub struct LoginResponse {
    pub user: UserResponse,
    #[serde(flatten)]
    pub tokens: TokenResponse,
}
