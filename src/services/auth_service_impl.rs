//! Store-backed implementation of [`AuthService`].

use crate::api::types::UserDto;
use crate::config::SecurityConfig;
use crate::db::Store;
use crate::models::NewUser;
use crate::services::{AuthError, AuthService};
use tracing::info;

pub struct StoreAuthService {
    store: Store,
    security: SecurityConfig,
}

impl StoreAuthService {
    #[must_use]
    pub const fn new(store: Store, security: SecurityConfig) -> Self {
        Self { store, security }
    }

    fn validate_registration(&self, new_user: &NewUser) -> Result<(), AuthError> {
        if new_user.username.trim().is_empty() {
            return Err(AuthError::Validation("Username is required".to_string()));
        }

        if new_user.password.len() < self.security.min_password_length {
            return Err(AuthError::Validation(format!(
                "Password must be at least {} characters",
                self.security.min_password_length
            )));
        }

        if let Some(email) = &new_user.email
            && !email.contains('@')
        {
            return Err(AuthError::Validation("Invalid email address".to_string()));
        }

        Ok(())
    }
}

#[async_trait::async_trait]
impl AuthService for StoreAuthService {
    async fn register(&self, new_user: NewUser) -> Result<UserDto, AuthError> {
        self.validate_registration(&new_user)?;

        if self.store.username_exists(&new_user.username).await? {
            return Err(AuthError::UsernameTaken);
        }

        if let Some(email) = &new_user.email
            && self.store.email_exists(email).await?
        {
            return Err(AuthError::EmailTaken);
        }

        let user = self.store.create_user(&new_user, &self.security).await?;
        info!("Registered user: {}", user.username);

        Ok(UserDto::from(&user))
    }

    async fn login(&self, username: &str, password: &str) -> Result<UserDto, AuthError> {
        let is_valid = self.store.verify_user_password(username, password).await?;
        if !is_valid {
            return Err(AuthError::InvalidCredentials);
        }

        let user = self
            .store
            .get_user_by_username(username)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        Ok(UserDto::from(&user))
    }

    async fn get_user(&self, id: &str) -> Result<UserDto, AuthError> {
        let user = self.store.get_user(id).await?.ok_or(AuthError::UserNotFound)?;
        Ok(UserDto::from(&user))
    }

    async fn change_password(
        &self,
        username: &str,
        current_password: &str,
        new_password: &str,
    ) -> Result<(), AuthError> {
        if new_password.len() < self.security.min_password_length {
            return Err(AuthError::Validation(format!(
                "New password must be at least {} characters",
                self.security.min_password_length
            )));
        }

        if current_password == new_password {
            return Err(AuthError::Validation(
                "New password must be different from current password".to_string(),
            ));
        }

        let is_valid = self
            .store
            .verify_user_password(username, current_password)
            .await?;
        if !is_valid {
            return Err(AuthError::Validation(
                "Current password is incorrect".to_string(),
            ));
        }

        self.store
            .update_user_password(username, new_password, &self.security)
            .await?;

        info!("Password changed for user: {username}");
        Ok(())
    }
}
