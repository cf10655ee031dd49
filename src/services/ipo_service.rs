//! Domain service for IPO catalogue operations.
//!
//! This module provides a clean domain layer abstraction over data access,
//! so handlers stay free of storage and broadcast concerns.

use crate::api::types::IpoDto;
use crate::domain::IpoId;
use crate::models::{IpoDraft, IpoPatch, ListFilter, StatusCounts};
use thiserror::Error;

/// Domain errors for IPO operations.
#[derive(Debug, Error)]
pub enum IpoError {
    #[error("IPO not found: {0}")]
    NotFound(IpoId),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Invalid IPO data: {0}")]
    InvalidData(String),
}

impl From<sea_orm::DbErr> for IpoError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::Database(err.to_string())
    }
}

impl From<anyhow::Error> for IpoError {
    fn from(err: anyhow::Error) -> Self {
        Self::Database(err.to_string())
    }
}

/// Domain service trait for IPO operations.
///
/// Successful mutations emit exactly one notification event to the
/// broadcaster after the store write commits.
#[async_trait::async_trait]
pub trait IpoService: Send + Sync {
    /// Lists records, newest first, narrowed by the given filters.
    async fn list(&self, filter: ListFilter) -> Result<Vec<IpoDto>, IpoError>;

    /// Case-insensitive substring search over company name, issue type,
    /// status, and sector.
    async fn search(&self, text: &str) -> Result<Vec<IpoDto>, IpoError>;

    /// Retrieves a single record.
    ///
    /// # Errors
    ///
    /// Returns [`IpoError::NotFound`] if the id is absent.
    async fn get(&self, id: IpoId) -> Result<IpoDto, IpoError>;

    /// Creates a record from a validated draft and broadcasts `IPO_CREATED`.
    async fn create(&self, draft: IpoDraft) -> Result<IpoDto, IpoError>;

    /// Applies a partial update and broadcasts `IPO_UPDATED`.
    ///
    /// # Errors
    ///
    /// Returns [`IpoError::NotFound`] if the id is absent.
    async fn update(&self, id: IpoId, patch: IpoPatch) -> Result<IpoDto, IpoError>;

    /// Hard-deletes a record and broadcasts `IPO_DELETED`.
    ///
    /// # Errors
    ///
    /// Returns [`IpoError::NotFound`] if the id is absent, so a repeated
    /// delete of the same id fails.
    async fn delete(&self, id: IpoId) -> Result<(), IpoError>;

    /// Aggregate counts grouped by status.
    async fn stats(&self) -> Result<StatusCounts, IpoError>;
}
