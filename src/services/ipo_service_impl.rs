//! Store-backed implementation of [`IpoService`].

use crate::api::types::IpoDto;
use crate::db::Store;
use crate::domain::{Broadcaster, IpoId, NotificationEvent};
use crate::models::{IpoDraft, IpoPatch, ListFilter, StatusCounts};
use crate::services::{IpoError, IpoService};
use tracing::debug;

pub struct StoreIpoService {
    store: Store,
    broadcaster: Broadcaster,
}

impl StoreIpoService {
    #[must_use]
    pub const fn new(store: Store, broadcaster: Broadcaster) -> Self {
        Self { store, broadcaster }
    }
}

#[async_trait::async_trait]
impl IpoService for StoreIpoService {
    async fn list(&self, filter: ListFilter) -> Result<Vec<IpoDto>, IpoError> {
        let records = self.store.list_ipos(&filter).await?;
        Ok(records.iter().map(IpoDto::from).collect())
    }

    async fn search(&self, text: &str) -> Result<Vec<IpoDto>, IpoError> {
        let records = self.store.search_ipos(text).await?;
        Ok(records.iter().map(IpoDto::from).collect())
    }

    async fn get(&self, id: IpoId) -> Result<IpoDto, IpoError> {
        let record = self
            .store
            .get_ipo(id.as_str())
            .await?
            .ok_or(IpoError::NotFound(id))?;

        Ok(IpoDto::from(&record))
    }

    async fn create(&self, draft: IpoDraft) -> Result<IpoDto, IpoError> {
        let record = self.store.create_ipo(&draft).await?;
        let dto = IpoDto::from(&record);

        let delivered = self
            .broadcaster
            .publish(NotificationEvent::IpoCreated(dto.clone()));
        debug!("IPO_CREATED broadcast to {} connections", delivered);

        Ok(dto)
    }

    async fn update(&self, id: IpoId, patch: IpoPatch) -> Result<IpoDto, IpoError> {
        let record = self
            .store
            .update_ipo(id.as_str(), &patch)
            .await?
            .ok_or(IpoError::NotFound(id))?;

        let dto = IpoDto::from(&record);

        let delivered = self
            .broadcaster
            .publish(NotificationEvent::IpoUpdated(dto.clone()));
        debug!("IPO_UPDATED broadcast to {} connections", delivered);

        Ok(dto)
    }

    async fn delete(&self, id: IpoId) -> Result<(), IpoError> {
        let removed = self.store.delete_ipo(id.as_str()).await?;
        if !removed {
            return Err(IpoError::NotFound(id));
        }

        let delivered = self.broadcaster.publish(NotificationEvent::IpoDeleted {
            id: id.into_inner(),
        });
        debug!("IPO_DELETED broadcast to {} connections", delivered);

        Ok(())
    }

    async fn stats(&self) -> Result<StatusCounts, IpoError> {
        Ok(self.store.ipo_status_counts().await?)
    }
}
