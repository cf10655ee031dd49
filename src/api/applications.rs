//! Endpoints for IPO applications. Append-only: records are created and
//! listed, never changed.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Deserialize;
use std::sync::Arc;
use tower_sessions::Session;

use super::{ApiError, ApiResponse, AppState, auth};
use crate::api::types::ApplicationDto;
use crate::domain::IpoId;
use crate::services::ApplicationError;

impl From<ApplicationError> for ApiError {
    fn from(err: ApplicationError) -> Self {
        match err {
            ApplicationError::IpoNotFound(id) => Self::ipo_not_found(id),
            ApplicationError::Validation(msg) => Self::ValidationError(msg),
            ApplicationError::Database(msg) => Self::DatabaseError(msg),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ApplyRequest {
    pub shares: i32,
    pub amount: f64,
}

/// POST /api/ipos/{id}/applications
/// Any authenticated user may apply against a listing.
pub async fn apply(
    State(state): State<Arc<AppState>>,
    session: Session,
    Path(id): Path<String>,
    Json(payload): Json<ApplyRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let user = auth::session_user(&session).await?;

    let application = state
        .application_service()
        .apply(IpoId::from(id), &user.id, payload.shares, payload.amount)
        .await?;

    Ok((StatusCode::CREATED, Json(ApiResponse::success(application))))
}

/// GET /api/ipos/{id}/applications
/// Admin view of every application against a listing.
pub async fn list_for_ipo(
    State(state): State<Arc<AppState>>,
    session: Session,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<Vec<ApplicationDto>>>, ApiError> {
    auth::admin_user(&session).await?;

    let applications = state.application_service().for_ipo(IpoId::from(id)).await?;
    Ok(Json(ApiResponse::success(applications)))
}

/// GET /api/applications
/// The caller's own applications.
pub async fn my_applications(
    State(state): State<Arc<AppState>>,
    session: Session,
) -> Result<Json<ApiResponse<Vec<ApplicationDto>>>, ApiError> {
    let user = auth::session_user(&session).await?;

    let applications = state.application_service().for_user(&user.id).await?;
    Ok(Json(ApiResponse::success(applications)))
}
