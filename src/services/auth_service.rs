//! Domain service for authentication and account management.
//!
//! Handles registration, credential verification, and password changes.
//! Session handling stays at the API boundary.

use crate::api::types::UserDto;
use crate::models::NewUser;
use thiserror::Error;

/// Errors specific to authentication operations.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Username already exists")]
    UsernameTaken,

    #[error("Email already exists")]
    EmailTaken,

    #[error("User not found")]
    UserNotFound,

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<sea_orm::DbErr> for AuthError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::Database(err.to_string())
    }
}

impl From<anyhow::Error> for AuthError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(err.to_string())
    }
}

/// Domain service trait for authentication.
#[async_trait::async_trait]
pub trait AuthService: Send + Sync {
    /// Creates a new account.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::UsernameTaken`] / [`AuthError::EmailTaken`] on
    /// duplicate unique fields, [`AuthError::Validation`] on a bad payload.
    async fn register(&self, new_user: NewUser) -> Result<UserDto, AuthError>;

    /// Verifies credentials and returns the account.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::InvalidCredentials`] if verification fails.
    async fn login(&self, username: &str, password: &str) -> Result<UserDto, AuthError>;

    /// Gets an account by id.
    async fn get_user(&self, id: &str) -> Result<UserDto, AuthError>;

    /// Changes a user's password after verifying the current one.
    async fn change_password(
        &self,
        username: &str,
        current_password: &str,
        new_password: &str,
    ) -> Result<(), AuthError>;
}
