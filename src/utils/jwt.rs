use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::JwtConfig;
use crate::error::{AppError, AppResult};

/// Token type enumeration
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TokenType {
    /// Access token for API authentication (short-lived)
    Access,
    /// Refresh token for obtaining new access tokens (long-lived)
    Refresh,
    /// Single-purpose token embedded in the password recovery link
    Recovery,
}

/// JWT Claims structure containing user information and token metadata
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: String,
    /// User email
    pub email: String,
    /// Token type (access, refresh or recovery)
    pub token_type: TokenType,
    /// Issued at (timestamp)
    pub iat: i64,
    /// Expiration time (timestamp)
    pub exp: i64,
    /// Password hash fingerprint; only recovery tokens carry it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pwd: Option<String>,
}

impl Claims {
    /// Creates new claims for a user
    ///
    /// # Arguments
    /// * `user_id` - The user's ID
    /// * `email` - The user's email
    /// * `token_type` - The kind of token being issued
    /// * `expiration_hours` - Token validity duration in hours
    pub fn new(user_id: Uuid, email: String, token_type: TokenType, expiration_hours: i64) -> Self {
        let now = Utc::now();
        let exp = now + Duration::hours(expiration_hours);

        Self {
            sub: user_id.to_string(),
            email,
            token_type,
            iat: now.timestamp(),
            exp: exp.timestamp(),
            pwd: None,
        }
    }

    /// Parses the subject back into a user id.
    pub fn user_id(&self) -> AppResult<Uuid> {
        Uuid::parse_str(&self.sub).map_err(|_| AppError::unauthorized("Invalid token subject"))
    }
}

/// Access/refresh pair returned on login and refresh.
#[derive(Debug, Clone)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
    /// Access token lifetime in seconds
    pub expires_in: i64,
}

/// Generates a JWT token for a user
///
/// # Arguments
/// * `user_id` - The user's ID
/// * `email` - The user's email
/// * `token_type` - The kind of token being issued
/// * `secret` - The secret key for signing the token
/// * `expiration_hours` - Token validity duration in hours
///
/// # Returns
/// The encoded JWT token string
pub fn generate_token(
    user_id: Uuid,
    email: String,
    token_type: TokenType,
    secret: &str,
    expiration_hours: i64,
) -> AppResult<String> {
    encode_claims(
        &Claims::new(user_id, email, token_type, expiration_hours),
        secret,
    )
}

fn encode_claims(claims: &Claims, secret: &str) -> AppResult<String> {
    encode(
        &Header::default(),
        claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| AppError::Internal {
        source: anyhow::anyhow!("Failed to generate JWT token: {}", e),
    })
}

/// Generates both access and refresh tokens with the configured lifetimes.
pub fn generate_token_pair(user_id: Uuid, email: String, config: &JwtConfig) -> AppResult<TokenPair> {
    let access_token = generate_token(
        user_id,
        email.clone(),
        TokenType::Access,
        &config.secret,
        config.access_token_expiration,
    )?;

    let refresh_token = generate_token(
        user_id,
        email,
        TokenType::Refresh,
        &config.secret,
        config.refresh_token_expiration,
    )?;

    Ok(TokenPair {
        access_token,
        refresh_token,
        expires_in: config.access_token_expiration * 3600,
    })
}

/// Generates the token embedded in a password recovery link.
///
/// `password_fingerprint` ties the token to the current password hash, so
/// the token stops working once the password changes.
pub fn generate_recovery_token(
    user_id: Uuid,
    email: String,
    password_fingerprint: String,
    config: &JwtConfig,
) -> AppResult<String> {
    let mut claims = Claims::new(
        user_id,
        email,
        TokenType::Recovery,
        config.recovery_token_expiration,
    );
    claims.pwd = Some(password_fingerprint);
    encode_claims(&claims, &config.secret)
}

/// Validates and decodes a JWT token
///
/// # Arguments
/// * `token` - The JWT token string to validate
/// * `secret` - The secret key for verifying the token
/// * `expected_type` - Optional expected token type to validate against
///
/// # Returns
/// The decoded claims if the token is valid
pub fn validate_token(
    token: &str,
    secret: &str,
    expected_type: Option<TokenType>,
) -> AppResult<Claims> {
    let claims = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|e| match e.kind() {
        jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
            AppError::unauthorized("Token has expired")
        }
        jsonwebtoken::errors::ErrorKind::InvalidToken => AppError::unauthorized("Invalid token"),
        jsonwebtoken::errors::ErrorKind::InvalidSignature => {
            AppError::unauthorized("Invalid token signature")
        }
        _ => AppError::unauthorized(format!("Token validation failed: {}", e)),
    })?;

    if let Some(expected) = expected_type {
        if claims.token_type != expected {
            return Err(AppError::unauthorized(format!(
                "Invalid token type: expected {:?}, got {:?}",
                expected, claims.token_type
            )));
        }
    }

    Ok(claims)
}

pub fn validate_access_token(token: &str, secret: &str) -> AppResult<Claims> {
    validate_token(token, secret, Some(TokenType::Access))
}

pub fn validate_refresh_token(token: &str, secret: &str) -> AppResult<Claims> {
    validate_token(token, secret, Some(TokenType::Refresh))
}

pub fn validate_recovery_token(token: &str, secret: &str) -> AppResult<Claims> {
    validate_token(token, secret, Some(TokenType::Recovery))
}
