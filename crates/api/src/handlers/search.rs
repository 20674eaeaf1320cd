//! Public lookups: exam seat by roll number, teacher directory.

use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::Json;
use seatfinder_core::error::CoreError;
use seatfinder_core::limits::{clamp_limit, FEED_DEFAULT_LIMIT, MAX_LIMIT};
use seatfinder_db::repositories::{DirectoryRepo, SearchLogRepo};
use serde::Deserialize;
use validator::Validate;

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize, Validate)]
pub struct SeatSearchParams {
    #[validate(length(max = 64, message = "roll_number is too long"))]
    #[serde(default)]
    pub roll_number: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct TeacherSearchParams {
    #[validate(length(max = 100, message = "q is too long"))]
    pub q: Option<String>,
    pub limit: Option<i64>,
}

/// GET /api/v1/search/seat?roll_number=
///
/// Every search is logged with its outcome. No match is a 404.
pub async fn search_seat(
    State(state): State<AppState>,
    Query(params): Query<SeatSearchParams>,
) -> AppResult<impl IntoResponse> {
    params.validate()?;
    let roll_number = params.roll_number.trim();
    if roll_number.is_empty() {
        return Err(CoreError::Validation("roll_number is required".into()).into());
    }

    let seat = DirectoryRepo::find_seat(&state.pool, roll_number).await?;

    if let Err(e) = SearchLogRepo::record(&state.pool, roll_number, seat.is_some()).await {
        tracing::warn!(error = %e, roll_number = %roll_number, "Failed to record search");
    }

    let seat = seat.ok_or_else(|| CoreError::NotFound {
        entity: "Student",
        id: roll_number.to_string(),
    })?;
    Ok(Json(DataResponse { data: seat }))
}

/// GET /api/v1/teachers?q=&limit=
pub async fn search_teachers(
    State(state): State<AppState>,
    Query(params): Query<TeacherSearchParams>,
) -> AppResult<impl IntoResponse> {
    params.validate()?;
    let limit = clamp_limit(params.limit, FEED_DEFAULT_LIMIT, MAX_LIMIT);
    let q = params.q.as_deref().unwrap_or_default().trim();
    let teachers = DirectoryRepo::search_teachers(&state.pool, q, limit).await?;
    Ok(Json(DataResponse { data: teachers }))
}
