//! Client data layer for the IPO listings API.
//!
//! Fetches collections and records, caches them keyed by resource and
//! filter parameters, and converges on fresh data through two paths:
//!
//! - a local mutation invalidates the relevant cache entries the moment it
//!   succeeds, without waiting for its own broadcast echo;
//! - [`IpoClient::apply_event`] invalidates the same entries when a
//!   broadcast event arrives from another client's mutation. The transport
//!   feeding events in (a WebSocket read loop) is owned by the caller.
//!
//! The HTTP client keeps a cookie store, so the session cookie issued by
//! `login` rides along on subsequent requests.

pub mod cache;

use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;

use crate::api::types::{ApiResponse, ApplicationDto, IpoDto, UserDto};
use crate::domain::NotificationEvent;
use crate::models::StatusCounts;
use cache::{CacheKey, ViewCache};

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("Malformed response: {0}")]
    Malformed(String),
}

/// Filters for the list endpoint, mirroring the server's query parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListParams {
    pub search: Option<String>,
    pub status: Option<String>,
    pub sector: Option<String>,
}

impl ListParams {
    fn cache_key(&self) -> CacheKey {
        CacheKey::List {
            search: self.search.clone(),
            status: self.status.clone(),
            sector: self.sector.clone(),
        }
    }

    fn query(&self) -> Vec<(&'static str, String)> {
        let mut query = Vec::new();
        if let Some(search) = &self.search {
            query.push(("search", search.clone()));
        }
        if let Some(status) = &self.status {
            query.push(("status", status.clone()));
        }
        if let Some(sector) = &self.sector {
            query.push(("sector", sector.clone()));
        }
        query
    }
}

pub struct IpoClient {
    http: reqwest::Client,
    base_url: String,
    cache: ViewCache,
}

impl IpoClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder()
            .cookie_store(true)
            .build()?;

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            cache: ViewCache::new(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api{}", self.base_url, path)
    }

    async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ClientError> {
        let status = response.status();

        if !status.is_success() {
            let message = response
                .json::<ApiResponse<Value>>()
                .await
                .ok()
                .and_then(|body| body.error)
                .unwrap_or_else(|| status.to_string());
            return Err(ClientError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body: ApiResponse<T> = response.json().await?;
        body.data
            .ok_or_else(|| ClientError::Malformed("response carried no data".to_string()))
    }

    /// Authenticates and stores the session cookie for later requests.
    pub async fn login(&self, username: &str, password: &str) -> Result<UserDto, ClientError> {
        let response = self
            .http
            .post(self.url("/auth/login"))
            .json(&serde_json::json!({
                "username": username,
                "password": password,
            }))
            .send()
            .await?;

        Self::decode(response).await
    }

    /// Fetches a collection, serving from cache when the same filters were
    /// fetched before.
    pub async fn list_ipos(&self, params: &ListParams) -> Result<Vec<IpoDto>, ClientError> {
        let key = params.cache_key();
        if let Some(cached) = self.cache.get_list(&key) {
            return Ok(cached);
        }

        let response = self
            .http
            .get(self.url("/ipos"))
            .query(&params.query())
            .send()
            .await?;

        let records: Vec<IpoDto> = Self::decode(response).await?;
        self.cache.put_list(key, records.clone());
        Ok(records)
    }

    pub async fn get_ipo(&self, id: &str) -> Result<IpoDto, ClientError> {
        if let Some(cached) = self.cache.get_record(id) {
            return Ok(cached);
        }

        let response = self.http.get(self.url(&format!("/ipos/{id}"))).send().await?;

        let record: IpoDto = Self::decode(response).await?;
        self.cache.put_record(record.clone());
        Ok(record)
    }

    /// Creates a record and invalidates cached lists immediately; this
    /// client does not wait for its own broadcast echo.
    pub async fn create_ipo(&self, payload: Value) -> Result<IpoDto, ClientError> {
        let response = self
            .http
            .post(self.url("/ipos"))
            .json(&payload)
            .send()
            .await?;

        let record: IpoDto = Self::decode(response).await?;
        self.cache.invalidate_lists();
        self.cache.put_record(record.clone());
        Ok(record)
    }

    pub async fn update_ipo(&self, id: &str, payload: Value) -> Result<IpoDto, ClientError> {
        let response = self
            .http
            .put(self.url(&format!("/ipos/{id}")))
            .json(&payload)
            .send()
            .await?;

        let record: IpoDto = Self::decode(response).await?;
        self.cache.invalidate_record(id);
        self.cache.invalidate_lists();
        self.cache.put_record(record.clone());
        Ok(record)
    }

    pub async fn delete_ipo(&self, id: &str) -> Result<(), ClientError> {
        let response = self
            .http
            .delete(self.url(&format!("/ipos/{id}")))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .json::<ApiResponse<Value>>()
                .await
                .ok()
                .and_then(|body| body.error)
                .unwrap_or_else(|| status.to_string());
            return Err(ClientError::Api {
                status: status.as_u16(),
                message,
            });
        }

        self.cache.invalidate_record(id);
        self.cache.invalidate_lists();
        Ok(())
    }

    pub async fn stats(&self) -> Result<StatusCounts, ClientError> {
        let response = self.http.get(self.url("/dashboard/stats")).send().await?;
        Self::decode(response).await
    }

    pub async fn apply_to_ipo(
        &self,
        id: &str,
        shares: i32,
        amount: f64,
    ) -> Result<ApplicationDto, ClientError> {
        let response = self
            .http
            .post(self.url(&format!("/ipos/{id}/applications")))
            .json(&serde_json::json!({"shares": shares, "amount": amount}))
            .send()
            .await?;

        Self::decode(response).await
    }

    /// Feeds a broadcast event into the cache. Call this from whatever owns
    /// the WebSocket read loop.
    pub fn apply_event(&self, event: &NotificationEvent) {
        self.cache.invalidate_for_event(event);
    }

    /// The underlying view cache, exposed for inspection.
    #[must_use]
    pub fn cache(&self) -> &ViewCache {
        &self.cache
    }
}
