//! Domain service for IPO applications: a user committing to a share count
//! and amount on a listing. Applications are only ever created and listed.

use crate::api::types::ApplicationDto;
use crate::domain::IpoId;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApplicationError {
    #[error("IPO not found: {0}")]
    IpoNotFound(IpoId),

    #[error("Invalid application: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(String),
}

impl From<anyhow::Error> for ApplicationError {
    fn from(err: anyhow::Error) -> Self {
        Self::Database(err.to_string())
    }
}

#[async_trait::async_trait]
pub trait ApplicationService: Send + Sync {
    /// Records an application against a listing.
    ///
    /// # Errors
    ///
    /// Returns [`ApplicationError::IpoNotFound`] when the listing is absent,
    /// [`ApplicationError::Validation`] for non-positive shares or a
    /// negative amount.
    async fn apply(
        &self,
        ipo_id: IpoId,
        user_id: &str,
        shares: i32,
        amount: f64,
    ) -> Result<ApplicationDto, ApplicationError>;

    /// All applications a user has made, newest first.
    async fn for_user(&self, user_id: &str) -> Result<Vec<ApplicationDto>, ApplicationError>;

    /// All applications against a listing, newest first.
    async fn for_ipo(&self, ipo_id: IpoId) -> Result<Vec<ApplicationDto>, ApplicationError>;
}
