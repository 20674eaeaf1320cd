//! Status page feed.

use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::Json;
use seatfinder_core::limits::{clamp_limit, FEED_DEFAULT_LIMIT, MAX_LIMIT};
use seatfinder_db::repositories::KeepAliveLogRepo;

use crate::error::AppResult;
use crate::query::LimitParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/status/uptime
///
/// Recent keep-alive probe results, newest first.
pub async fn uptime(
    State(state): State<AppState>,
    Query(params): Query<LimitParams>,
) -> AppResult<impl IntoResponse> {
    let limit = clamp_limit(params.limit, FEED_DEFAULT_LIMIT, MAX_LIMIT);
    let logs = KeepAliveLogRepo::list_recent(&state.pool, limit).await?;
    Ok(Json(DataResponse { data: logs }))
}
