//! Handlers for the generic table browser (`/admin/tables`).
//!
//! Any registry table can be listed and exported. Mutations are refused
//! with 403 `READ_ONLY` unless the registry marks the table editable.
//! Browser mutations are not written to the activity log; the admin record
//! pages are.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use seatfinder_core::browser::{filtered_sorted, to_csv, SortState};
use seatfinder_core::error::CoreError;
use seatfinder_core::limits::{clamp_limit, BROWSE_DEFAULT_LIMIT, MAX_LIMIT};
use seatfinder_core::resources::editable_fields;
use seatfinder_core::tables::{find_table, is_plain_identifier, TableDescriptor, TABLES};
use seatfinder_core::value::Row;
use seatfinder_db::repositories::RowRepo;
use serde::{Deserialize, Serialize};

use crate::error::AppResult;
use crate::middleware::rbac::RequireAdmin;
use crate::response::{CsvDownload, DataResponse};
use crate::state::AppState;

/// Upper bound on rows pulled for a CSV export.
const EXPORT_ROW_LIMIT: i64 = 10_000;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct ListRowsParams {
    pub limit: Option<i64>,
    pub order: Option<String>,
    #[serde(default)]
    pub desc: bool,
}

#[derive(Debug, Deserialize)]
pub struct ExportParams {
    /// Search text, matched against every column.
    pub q: Option<String>,
    pub sort: Option<String>,
    #[serde(default)]
    pub desc: bool,
}

/// Rows plus the table's catalog column list.
#[derive(Debug, Serialize)]
pub struct RowSetResponse {
    pub columns: Vec<String>,
    pub rows: Vec<Row>,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

pub(crate) fn registry_table(name: &str) -> AppResult<&'static TableDescriptor> {
    find_table(name).ok_or_else(|| {
        CoreError::NotFound {
            entity: "Table",
            id: name.to_string(),
        }
        .into()
    })
}

fn editable_table(name: &str) -> AppResult<&'static TableDescriptor> {
    let table = registry_table(name)?;
    if !table.editable {
        tracing::warn!(table = %name, "Mutation refused on read-only table");
        return Err(CoreError::ReadOnly(name.to_string()).into());
    }
    Ok(table)
}

/// Check that `column` exists on the table so it can be spliced into SQL.
fn known_column(column: &str, columns: &[String]) -> AppResult<()> {
    if is_plain_identifier(column) && columns.iter().any(|c| c == column) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!("Unknown column: {column}")).into())
    }
}

// ---------------------------------------------------------------------------
// Registry
// ---------------------------------------------------------------------------

/// GET /api/v1/admin/tables
pub async fn list_tables(
    RequireAdmin(_admin): RequireAdmin,
) -> Json<DataResponse<&'static [TableDescriptor]>> {
    Json(DataResponse { data: TABLES })
}

// ---------------------------------------------------------------------------
// Rows
// ---------------------------------------------------------------------------

/// GET /api/v1/admin/tables/{table}/rows
///
/// At most `limit` rows (default 500), optionally ordered by `order`.
pub async fn list_rows(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(table): Path<String>,
    Query(params): Query<ListRowsParams>,
) -> AppResult<impl IntoResponse> {
    let table = registry_table(&table)?;
    let columns = RowRepo::columns(&state.pool, table).await?;
    if let Some(order) = params.order.as_deref() {
        known_column(order, &columns)?;
    }

    let limit = clamp_limit(params.limit, BROWSE_DEFAULT_LIMIT, MAX_LIMIT);
    let rows = RowRepo::list(
        &state.pool,
        table,
        limit,
        params.order.as_deref(),
        params.desc,
    )
    .await?;

    Ok(Json(DataResponse {
        data: RowSetResponse { columns, rows },
    }))
}

/// POST /api/v1/admin/tables/{table}/rows
///
/// System columns in the body are ignored.
pub async fn insert_row(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(table): Path<String>,
    Json(fields): Json<Row>,
) -> AppResult<impl IntoResponse> {
    let table = editable_table(&table)?;
    let fields = editable_fields(&fields)?;
    let row = RowRepo::insert(&state.pool, table, &fields).await?;

    tracing::info!(table = %table.name, user_id = %admin.user_id, "Row inserted");
    Ok((StatusCode::CREATED, Json(DataResponse { data: row })))
}

/// PUT /api/v1/admin/tables/{table}/rows/{id}
pub async fn update_row(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path((table, id)): Path<(String, String)>,
    Json(fields): Json<Row>,
) -> AppResult<impl IntoResponse> {
    let table = editable_table(&table)?;
    let fields = editable_fields(&fields)?;
    if fields.is_empty() {
        return Err(CoreError::Validation("No editable fields supplied".into()).into());
    }

    let row = RowRepo::update(&state.pool, table, &id, &fields)
        .await?
        .ok_or_else(|| CoreError::NotFound {
            entity: "Row",
            id: id.clone(),
        })?;

    tracing::info!(table = %table.name, id = %id, user_id = %admin.user_id, "Row updated");
    Ok(Json(DataResponse { data: row }))
}

/// DELETE /api/v1/admin/tables/{table}/rows/{id}
///
/// A missing id is 404, not a silent success.
pub async fn delete_row(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path((table, id)): Path<(String, String)>,
) -> AppResult<StatusCode> {
    let table = editable_table(&table)?;
    if !RowRepo::delete(&state.pool, table, &id).await? {
        return Err(CoreError::NotFound {
            entity: "Row",
            id,
        }
        .into());
    }

    tracing::info!(table = %table.name, id = %id, user_id = %admin.user_id, "Row deleted");
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Export
// ---------------------------------------------------------------------------

/// GET /api/v1/admin/tables/{table}/export
///
/// CSV of the filtered, sorted set across all pages.
pub async fn export_rows(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(table): Path<String>,
    Query(params): Query<ExportParams>,
) -> AppResult<CsvDownload> {
    let table = registry_table(&table)?;
    let columns = RowRepo::columns(&state.pool, table).await?;
    if let Some(sort) = params.sort.as_deref() {
        known_column(sort, &columns)?;
    }

    let rows = RowRepo::list(&state.pool, table, EXPORT_ROW_LIMIT, None, false).await?;
    let sort = SortState {
        column: params.sort,
        descending: params.desc,
    };
    let kept = filtered_sorted(&rows, params.q.as_deref().unwrap_or_default(), &sort);

    Ok(CsvDownload {
        filename: format!("{}.csv", table.name),
        body: to_csv(&columns, &kept),
    })
}
