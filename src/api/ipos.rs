//! HTTP endpoints for the IPO catalogue.
//!
//! Reads are public; mutations require an authenticated admin session.
//! Handlers only translate between HTTP and the [`IpoService`]; broadcast
//! and storage concerns live behind the service trait.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;
use tower_sessions::Session;

use super::{ApiError, ApiResponse, AppState, auth, validation};
use crate::api::types::IpoDto;
use crate::domain::IpoId;
use crate::models::ListFilter;
use crate::services::IpoError;

impl From<IpoError> for ApiError {
    fn from(err: IpoError) -> Self {
        match err {
            IpoError::NotFound(id) => Self::ipo_not_found(id),
            IpoError::Database(msg) => Self::DatabaseError(msg),
            IpoError::InvalidData(msg) => Self::ValidationError(msg),
        }
    }
}

/// Query parameters for the list endpoint. `search` wins over the
/// status/sector filters when both are supplied.
#[derive(Debug, Deserialize)]
pub struct IpoListQuery {
    pub search: Option<String>,
    pub status: Option<String>,
    pub sector: Option<String>,
}

/// GET /api/ipos
pub async fn list_ipos(
    State(state): State<Arc<AppState>>,
    Query(query): Query<IpoListQuery>,
) -> Result<Json<ApiResponse<Vec<IpoDto>>>, ApiError> {
    if let Some(search) = query.search.as_deref().map(str::trim)
        && !search.is_empty()
    {
        let results = state.ipo_service().search(search).await?;
        return Ok(Json(ApiResponse::success(results)));
    }

    let mut filter = ListFilter::default();

    if let Some(status) = query.status.as_deref().map(str::trim)
        && !status.is_empty()
        && status != "all"
    {
        let status = status.parse().map_err(|_| {
            ApiError::validation(format!(
                "Invalid status filter: {status}. Expected one of: upcoming, ongoing, listed, closed"
            ))
        })?;
        filter.status = Some(status);
    }

    filter.sector = query
        .sector
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty());

    let results = state.ipo_service().list(filter).await?;
    Ok(Json(ApiResponse::success(results)))
}

/// GET /api/ipos/{id}
pub async fn get_ipo(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<IpoDto>>, ApiError> {
    let ipo = state.ipo_service().get(IpoId::from(id)).await?;
    Ok(Json(ApiResponse::success(ipo)))
}

/// POST /api/ipos
/// Requires an admin session; 201 on success, 400 with field errors on a
/// bad payload.
pub async fn create_ipo(
    State(state): State<Arc<AppState>>,
    session: Session,
    Json(payload): Json<Value>,
) -> Result<impl IntoResponse, ApiError> {
    auth::admin_user(&session).await?;

    let draft = validation::validate_create(&payload).map_err(ApiError::FieldErrors)?;
    let ipo = state.ipo_service().create(draft).await?;

    Ok((StatusCode::CREATED, Json(ApiResponse::success(ipo))))
}

/// PUT /api/ipos/{id}
/// Partial update; fields absent from the payload stay untouched.
pub async fn update_ipo(
    State(state): State<Arc<AppState>>,
    session: Session,
    Path(id): Path<String>,
    Json(payload): Json<Value>,
) -> Result<Json<ApiResponse<IpoDto>>, ApiError> {
    auth::admin_user(&session).await?;

    let patch = validation::validate_update(&payload).map_err(ApiError::FieldErrors)?;
    let ipo = state.ipo_service().update(IpoId::from(id), patch).await?;

    Ok(Json(ApiResponse::success(ipo)))
}

/// DELETE /api/ipos/{id}
/// Hard delete. A second delete of the same id returns 404.
pub async fn delete_ipo(
    State(state): State<Arc<AppState>>,
    session: Session,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    auth::admin_user(&session).await?;

    state.ipo_service().delete(IpoId::from(id)).await?;
    Ok(StatusCode::NO_CONTENT)
}
