//! User account business logic.
//!
//! Covers registration, self-or-admin mutation, login and the password
//! recovery flow. Password hashing runs on the blocking pool and the
//! recovery email is dispatched on a detached task.

use std::sync::Arc;

use uuid::Uuid;

use crate::config::JwtConfig;
use crate::error::{AppError, AppResult};
use crate::models::{NewUser, UpdateUser, User, UserDetail, UserSummary};
use crate::repositories::UserStore;
use crate::services::authorization::{Caller, require_owner_or_admin};
use crate::services::mailer::{Mailer, OutgoingEmail};
use crate::services::recovery_message::recovery_password_message;
use crate::utils::jwt::{self, TokenPair};
use crate::utils::password::{self, hash_password_blocking, verify_password_blocking};

/// Returned by the recovery endpoint whether or not the address is known.
pub const RECOVERY_RESPONSE: &str = "Email sent if it exists";
pub const RECOVERY_SENDER: &str = "GameDevs <gamedevs.recovery@outlook.com>";
pub const RECOVERY_SUBJECT: &str = "Recuperar Senha";

const INVALID_CREDENTIALS: &str = "Invalid email or password";

/// Cloning only bumps reference counts.
#[derive(Clone)]
pub struct UserService {
    repo: Arc<dyn UserStore>,
    mailer: Arc<dyn Mailer>,
    jwt_config: JwtConfig,
}

impl UserService {
    pub fn new(repo: Arc<dyn UserStore>, mailer: Arc<dyn Mailer>, jwt_config: JwtConfig) -> Self {
        Self {
            repo,
            mailer,
            jwt_config,
        }
    }

    /// Registers a user, storing only the password hash.
    ///
    /// Signup is open, so `is_admin` is dropped unless an admin is the caller.
    pub async fn create(
        &self,
        mut new_user: NewUser,
        caller: Option<&Caller>,
    ) -> AppResult<UserSummary> {
        if !caller.is_some_and(|caller| caller.is_admin) {
            new_user.is_admin = false;
        }
        new_user.password = hash_password_blocking(new_user.password).await?;

        let user = self.repo.create(new_user).await?;
        tracing::info!(user_id = %user.id, "User created");
        Ok(user.into())
    }

    pub async fn find_all(&self) -> AppResult<Vec<UserSummary>> {
        let users = self.repo.find_all().await?;
        Ok(users.into_iter().map(UserSummary::from).collect())
    }

    /// Loads the extended projection used for authorization decisions.
    ///
    /// # Returns
    /// The user with `is_admin`, `cpf` and profiles, or `NotFound`
    pub async fn verify_id_and_return_user(&self, id: Uuid) -> AppResult<UserDetail> {
        let user = self.load(id).await?;
        let profiles = self.repo.find_profiles(id).await?;
        Ok(UserDetail::new(user, profiles))
    }

    pub async fn find_one(&self, id: Uuid) -> AppResult<UserDetail> {
        self.verify_id_and_return_user(id).await
    }

    /// Updates a user on behalf of themselves or an admin.
    ///
    /// A new password is re-hashed. `is_admin` is only honored for admins.
    pub async fn update(
        &self,
        id: Uuid,
        mut changes: UpdateUser,
        caller: &Caller,
    ) -> AppResult<UserSummary> {
        let target = self.verify_id_and_return_user(id).await?;
        require_owner_or_admin(caller, target.id)?;

        if !caller.is_admin {
            changes.is_admin = None;
        }
        if let Some(password) = changes.password.take() {
            changes.password = Some(hash_password_blocking(password).await?);
        }

        let user = self
            .repo
            .update(id, changes)
            .await?
            .ok_or_else(|| AppError::not_found("user", "id", id))?;
        tracing::info!(user_id = %id, caller_id = %caller.id, "User updated");
        Ok(user.into())
    }

    /// Deletes a user on behalf of themselves or an admin; profiles cascade.
    pub async fn remove(&self, id: Uuid, caller: &Caller) -> AppResult<UserSummary> {
        let target = self.verify_id_and_return_user(id).await?;
        require_owner_or_admin(caller, target.id)?;

        let user = self
            .repo
            .delete(id)
            .await?
            .ok_or_else(|| AppError::not_found("user", "id", id))?;
        tracing::info!(user_id = %id, caller_id = %caller.id, "User removed");
        Ok(user.into())
    }

    /// Starts password recovery for `email`.
    ///
    /// The reply never reveals whether the address is registered. Delivery
    /// runs on a detached task and its failures are only logged.
    pub async fn find_user_for_email(&self, email: &str) -> AppResult<&'static str> {
        let Some(user) = self.repo.find_by_email(email).await? else {
            tracing::debug!("Recovery requested for unknown email");
            return Ok(RECOVERY_RESPONSE);
        };

        let token = jwt::generate_recovery_token(
            user.id,
            user.email.clone(),
            password::fingerprint(&user.password)?,
            &self.jwt_config,
        )?;
        let message = recovery_password_message(&user.name, user.id, &token);

        let service = self.clone();
        let to = user.email;
        tokio::spawn(async move {
            if let Err(e) = service.send_email(&to, &message.text, &message.html).await {
                tracing::error!(error = ?e, "Failed to send recovery email");
            }
        });

        tracing::info!(user_id = %user.id, "Recovery email dispatched");
        Ok(RECOVERY_RESPONSE)
    }

    /// Sends one recovery email; transport errors propagate.
    pub async fn send_email(&self, to: &str, text: &str, html: &str) -> AppResult<()> {
        let email = OutgoingEmail {
            from: RECOVERY_SENDER.to_string(),
            to: to.to_string(),
            subject: RECOVERY_SUBJECT.to_string(),
            text: text.to_string(),
            html: html.to_string(),
        };
        self.mailer.send(&email).await
    }

    /// Stores a new password for the holder of a valid recovery token.
    ///
    /// A token works once: the reset rehashes the password, which changes the
    /// fingerprint the token was issued for.
    pub async fn reset_password(&self, token: &str, new_password: String) -> AppResult<()> {
        let claims = jwt::validate_recovery_token(token, &self.jwt_config.secret)?;

        let user = self
            .repo
            .find_by_email(&claims.email)
            .await?
            .filter(|user| user.id.to_string() == claims.sub)
            .ok_or_else(|| AppError::unauthorized("Invalid recovery token"))?;

        let current = password::fingerprint(&user.password)?;
        if claims.pwd.as_deref() != Some(current.as_str()) {
            tracing::warn!(user_id = %user.id, "Stale recovery token rejected");
            return Err(AppError::unauthorized("Recovery token is no longer valid"));
        }

        let changes = UpdateUser {
            password: Some(hash_password_blocking(new_password).await?),
            ..UpdateUser::default()
        };
        self.repo.update(user.id, changes).await?;

        tracing::info!(user_id = %user.id, "Password reset via recovery token");
        Ok(())
    }

    /// Verifies credentials and issues an access/refresh pair.
    pub async fn authenticate(&self, email: &str, password: &str) -> AppResult<(UserSummary, TokenPair)> {
        let user = self
            .repo
            .find_by_email(email)
            .await?
            .ok_or_else(|| AppError::unauthorized(INVALID_CREDENTIALS))?;

        let valid = verify_password_blocking(password.to_string(), user.password.clone()).await?;
        if !valid {
            tracing::warn!(user_id = %user.id, "Login with wrong password");
            return Err(AppError::unauthorized(INVALID_CREDENTIALS));
        }

        let tokens = jwt::generate_token_pair(user.id, user.email.clone(), &self.jwt_config)?;
        Ok((user.into(), tokens))
    }

    /// Trades a refresh token for a new pair; the user must still exist.
    pub async fn refresh(&self, refresh_token: &str) -> AppResult<TokenPair> {
        let claims = jwt::validate_refresh_token(refresh_token, &self.jwt_config.secret)?;
        let user_id = claims.user_id()?;

        let user = self
            .repo
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::unauthorized("User no longer exists"))?;

        jwt::generate_token_pair(user.id, user.email, &self.jwt_config)
    }

    async fn load(&self, id: Uuid) -> AppResult<User> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("user", "id", id))
    }
}
