use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};

use crate::error::{AppError, AppResult};

fn hashing_error(e: argon2::password_hash::Error) -> AppError {
    AppError::Internal {
        source: anyhow::anyhow!("Password hashing failed: {}", e),
    }
}

/// Hash a password using Argon2id with a fresh random salt
///
/// CPU-bound; async callers run it on `spawn_blocking`.
///
/// # Example
/// ```ignore
/// let hashed = hash_password("my_secure_password")?;
/// ```
pub fn hash_password(password: &str) -> AppResult<String> {
    let salt = SaltString::generate(&mut OsRng);

    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(hashing_error)
}

/// Verify a password against a hash
///
/// Returns `Ok(false)` on mismatch; a malformed hash is an error.
pub fn verify_password(password: &str, password_hash: &str) -> AppResult<bool> {
    let parsed_hash = PasswordHash::new(password_hash).map_err(hashing_error)?;

    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

/// Short identifier of a stored hash that changes whenever the password is rehashed.
///
/// This is the encoded salt, which is fresh for every `hash_password` call.
pub fn fingerprint(password_hash: &str) -> AppResult<String> {
    let parsed_hash = PasswordHash::new(password_hash).map_err(hashing_error)?;
    parsed_hash
        .salt
        .map(|salt| salt.as_str().to_string())
        .ok_or_else(|| AppError::Internal {
            source: anyhow::anyhow!("Stored password hash has no salt"),
        })
}

/// Hashes on the blocking pool.
pub async fn hash_password_blocking(password: String) -> AppResult<String> {
    tokio::task::spawn_blocking(move || hash_password(&password)).await?
}

pub async fn verify_password_blocking(password: String, password_hash: String) -> AppResult<bool> {
    tokio::task::spawn_blocking(move || verify_password(&password, &password_hash)).await?
}
