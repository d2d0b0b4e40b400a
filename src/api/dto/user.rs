//! User-related DTOs for API requests and responses.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use super::format_timestamp;
use crate::models::{NewUser, Profile, UpdateUser, UserDetail, UserSummary};

// ============================================================================
// Request DTOs
// ============================================================================

/// Request body for creating a new user.
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct CreateUserRequest {
    #[validate(length(min = 2, max = 100, message = "Name must be between 2 and 100 characters"))]
    #[schema(example = "Ana Souza")]
    pub name: String,
    #[validate(email(message = "Invalid email format"))]
    #[schema(example = "ana@gamedevs.com", format = "email")]
    pub email: String,
    #[validate(length(min = 6, max = 64, message = "Password must be between 6 and 64 characters"))]
    #[schema(format = "password", min_length = 6, max_length = 64)]
    pub password: String,
    /// CPF, digits only or formatted
    #[validate(length(min = 11, max = 14, message = "CPF must be between 11 and 14 characters"))]
    #[schema(example = "123.456.789-09")]
    pub cpf: String,
    #[serde(default)]
    pub is_admin: bool,
}

impl CreateUserRequest {
    pub fn into_new_user(self) -> NewUser {
        NewUser {
            name: self.name,
            email: self.email,
            password: self.password,
            cpf: self.cpf,
            is_admin: self.is_admin,
        }
    }
}

/// Request body for updating a user. Omitted fields are left unchanged.
#[derive(Debug, Default, Deserialize, ToSchema, Validate)]
pub struct UpdateUserRequest {
    #[validate(length(min = 2, max = 100, message = "Name must be between 2 and 100 characters"))]
    pub name: Option<String>,
    #[validate(email(message = "Invalid email format"))]
    #[schema(format = "email")]
    pub email: Option<String>,
    #[validate(length(min = 6, max = 64, message = "Password must be between 6 and 64 characters"))]
    #[schema(format = "password")]
    pub password: Option<String>,
    #[validate(length(min = 11, max = 14, message = "CPF must be between 11 and 14 characters"))]
    pub cpf: Option<String>,
    /// Ignored unless the caller is an admin
    pub is_admin: Option<bool>,
}

impl UpdateUserRequest {
    pub fn into_update_user(self) -> UpdateUser {
        UpdateUser {
            name: self.name,
            email: self.email,
            password: self.password,
            cpf: self.cpf,
            is_admin: self.is_admin,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct RecoverPasswordRequest {
    #[validate(email(message = "Invalid email format"))]
    #[schema(example = "ana@gamedevs.com", format = "email")]
    pub email: String,
}

#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct ResetPasswordRequest {
    /// Token from the recovery link
    #[validate(length(min = 1, message = "Token cannot be empty"))]
    pub token: String,
    #[validate(length(min = 6, max = 64, message = "Password must be between 6 and 64 characters"))]
    #[schema(format = "password")]
    pub password: String,
}

// ============================================================================
// Response DTOs
// ============================================================================

/// Public user data; never carries the password, cpf or admin flag.
#[derive(Debug, Serialize, ToSchema)]
pub struct UserResponse {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub created_at: String,
    pub updated_at: String,
}

impl From<UserSummary> for UserResponse {
    fn from(user: UserSummary) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            created_at: format_timestamp(&user.created_at),
            updated_at: format_timestamp(&user.updated_at),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ProfileResponse {
    pub id: Uuid,
    pub title: String,
    pub image_url: String,
}

impl From<Profile> for ProfileResponse {
    fn from(profile: Profile) -> Self {
        Self {
            id: profile.id,
            title: profile.title,
            image_url: profile.image_url,
        }
    }
}

/// Extended user data, including `cpf` and `is_admin`, returned to any
/// authenticated caller.
#[derive(Debug, Serialize, ToSchema)]
pub struct UserDetailResponse {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub is_admin: bool,
    pub cpf: String,
    pub profiles: Vec<ProfileResponse>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<UserDetail> for UserDetailResponse {
    fn from(user: UserDetail) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            is_admin: user.is_admin,
            cpf: user.cpf,
            profiles: user.profiles.into_iter().map(ProfileResponse::from).collect(),
            created_at: format_timestamp(&user.created_at),
            updated_at: format_timestamp(&user.updated_at),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct MessageResponse {
    #[schema(example = "Email sent if it exists")]
    pub message: String,
}
