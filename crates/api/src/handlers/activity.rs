//! Handler for the activity log feed.

use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::Json;
use seatfinder_core::limits::{clamp_limit, FEED_DEFAULT_LIMIT, MAX_LIMIT};
use seatfinder_db::repositories::ActivityLogRepo;

use crate::error::AppResult;
use crate::middleware::rbac::RequireAdmin;
use crate::query::LimitParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/admin/activity-logs
///
/// Most recent entries first.
pub async fn list_activity_logs(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Query(params): Query<LimitParams>,
) -> AppResult<impl IntoResponse> {
    let limit = clamp_limit(params.limit, FEED_DEFAULT_LIMIT, MAX_LIMIT);
    let logs = ActivityLogRepo::list_recent(&state.pool, limit).await?;
    Ok(Json(DataResponse { data: logs }))
}
