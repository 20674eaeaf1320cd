//! Handlers for the admin record pages (`/admin/records/{resource}`).
//!
//! Same gateway as the table browser, plus form validation and one activity
//! log entry per successful mutation. The log write is best-effort and never
//! delays or fails the response.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use seatfinder_core::activity::{describe, ActivityAction};
use seatfinder_core::error::CoreError;
use seatfinder_core::limits::{clamp_limit, BROWSE_DEFAULT_LIMIT, MAX_LIMIT};
use seatfinder_core::resources::{editable_fields, find_resource, AdminResource};
use seatfinder_core::tables::TableDescriptor;
use seatfinder_core::types::UserId;
use seatfinder_core::value::Row;
use seatfinder_db::models::activity_log::CreateActivityLog;
use seatfinder_db::repositories::RowRepo;

use super::tables::{registry_table, RowSetResponse};
use crate::error::AppResult;
use crate::middleware::rbac::RequireAdmin;
use crate::query::LimitParams;
use crate::response::DataResponse;
use crate::state::AppState;

fn resource(slug: &str) -> AppResult<(&'static AdminResource, &'static TableDescriptor)> {
    let resource = find_resource(slug).ok_or_else(|| CoreError::NotFound {
        entity: "Resource",
        id: slug.to_string(),
    })?;
    Ok((resource, registry_table(resource.table)?))
}

fn log_activity(
    state: &AppState,
    user_id: UserId,
    action: ActivityAction,
    resource: &AdminResource,
    entity_id: &str,
    label: &str,
) {
    state.activity.record(CreateActivityLog {
        user_id: Some(user_id),
        action: action.as_str().to_string(),
        entity_type: resource.entity_type.to_string(),
        entity_id: Some(entity_id.to_string()),
        details: Some(describe(action, resource.entity_type, label)),
    });
}

/// GET /api/v1/admin/records/{resource}
pub async fn list_records(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(slug): Path<String>,
    Query(params): Query<LimitParams>,
) -> AppResult<impl IntoResponse> {
    let (resource, table) = resource(&slug)?;
    let limit = clamp_limit(params.limit, BROWSE_DEFAULT_LIMIT, MAX_LIMIT);
    let columns = RowRepo::columns(&state.pool, table).await?;
    let rows = RowRepo::list(
        &state.pool,
        table,
        limit,
        Some(resource.order_column),
        false,
    )
    .await?;

    Ok(Json(DataResponse {
        data: RowSetResponse { columns, rows },
    }))
}

/// POST /api/v1/admin/records/{resource}
pub async fn create_record(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(slug): Path<String>,
    Json(form): Json<Row>,
) -> AppResult<impl IntoResponse> {
    let (resource, table) = resource(&slug)?;
    let fields = editable_fields(&form)?;
    resource.validate(&fields, false)?;

    let row = RowRepo::insert(&state.pool, table, &fields).await?;
    let id = seatfinder_core::value::row_id(&row).unwrap_or_default();
    log_activity(
        &state,
        admin.user_id,
        ActivityAction::Insert,
        resource,
        &id,
        &resource.label(&row),
    );

    tracing::info!(resource = %slug, id = %id, user_id = %admin.user_id, "Record created");
    Ok((StatusCode::CREATED, Json(DataResponse { data: row })))
}

/// PUT /api/v1/admin/records/{resource}/{id}
pub async fn update_record(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path((slug, id)): Path<(String, String)>,
    Json(form): Json<Row>,
) -> AppResult<impl IntoResponse> {
    let (resource, table) = resource(&slug)?;
    let fields = editable_fields(&form)?;
    if fields.is_empty() {
        return Err(CoreError::Validation("No editable fields supplied".into()).into());
    }
    resource.validate(&fields, true)?;

    let row = RowRepo::update(&state.pool, table, &id, &fields)
        .await?
        .ok_or_else(|| CoreError::NotFound {
            entity: "Record",
            id: id.clone(),
        })?;
    log_activity(
        &state,
        admin.user_id,
        ActivityAction::Update,
        resource,
        &id,
        &resource.label(&row),
    );

    tracing::info!(resource = %slug, id = %id, user_id = %admin.user_id, "Record updated");
    Ok(Json(DataResponse { data: row }))
}

/// DELETE /api/v1/admin/records/{resource}/{id}
///
/// The row is read first so the log entry can name what was deleted.
pub async fn delete_record(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path((slug, id)): Path<(String, String)>,
) -> AppResult<StatusCode> {
    let (resource, table) = resource(&slug)?;
    let existing = RowRepo::find(&state.pool, table, &id).await?;
    let label = existing
        .as_ref()
        .map(|row| resource.label(row))
        .unwrap_or_default();

    if !RowRepo::delete(&state.pool, table, &id).await? {
        return Err(CoreError::NotFound {
            entity: "Record",
            id,
        }
        .into());
    }
    log_activity(
        &state,
        admin.user_id,
        ActivityAction::Delete,
        resource,
        &id,
        &label,
    );

    tracing::info!(resource = %slug, id = %id, user_id = %admin.user_id, "Record deleted");
    Ok(StatusCode::NO_CONTENT)
}
