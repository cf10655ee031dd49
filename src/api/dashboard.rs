//! Aggregate counts for the admin dashboard.

use axum::{Json, extract::State};
use std::sync::Arc;
use tower_sessions::Session;

use super::{ApiError, ApiResponse, AppState, auth};
use crate::models::StatusCounts;

/// GET /api/dashboard/stats
/// Counts grouped by status; requires an authenticated session.
pub async fn get_stats(
    State(state): State<Arc<AppState>>,
    session: Session,
) -> Result<Json<ApiResponse<StatusCounts>>, ApiError> {
    auth::session_user(&session).await?;

    let stats = state.ipo_service().stats().await?;
    Ok(Json(ApiResponse::success(stats)))
}
