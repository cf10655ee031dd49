//! Store-backed implementation of [`ApplicationService`].

use crate::api::types::ApplicationDto;
use crate::db::Store;
use crate::domain::IpoId;
use crate::models::NewApplication;
use crate::services::{ApplicationError, ApplicationService};

pub struct StoreApplicationService {
    store: Store,
}

impl StoreApplicationService {
    #[must_use]
    pub const fn new(store: Store) -> Self {
        Self { store }
    }
}

#[async_trait::async_trait]
impl ApplicationService for StoreApplicationService {
    async fn apply(
        &self,
        ipo_id: IpoId,
        user_id: &str,
        shares: i32,
        amount: f64,
    ) -> Result<ApplicationDto, ApplicationError> {
        if shares <= 0 {
            return Err(ApplicationError::Validation(
                "Shares must be a positive integer".to_string(),
            ));
        }
        if amount < 0.0 || !amount.is_finite() {
            return Err(ApplicationError::Validation(
                "Amount must be a non-negative number".to_string(),
            ));
        }

        if self.store.get_ipo(ipo_id.as_str()).await?.is_none() {
            return Err(ApplicationError::IpoNotFound(ipo_id));
        }

        let new = NewApplication {
            ipo_id: ipo_id.into_inner(),
            user_id: user_id.to_string(),
            shares,
            amount,
        };

        let application = self.store.create_application(&new).await?;
        Ok(ApplicationDto::from(&application))
    }

    async fn for_user(&self, user_id: &str) -> Result<Vec<ApplicationDto>, ApplicationError> {
        let rows = self.store.applications_for_user(user_id).await?;
        Ok(rows.iter().map(ApplicationDto::from).collect())
    }

    async fn for_ipo(&self, ipo_id: IpoId) -> Result<Vec<ApplicationDto>, ApplicationError> {
        if self.store.get_ipo(ipo_id.as_str()).await?.is_none() {
            return Err(ApplicationError::IpoNotFound(ipo_id));
        }

        let rows = self.store.applications_for_ipo(ipo_id.as_str()).await?;
        Ok(rows.iter().map(ApplicationDto::from).collect())
    }
}
