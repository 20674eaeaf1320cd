//! Route definitions for the admin back office.

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::{activity, records, tables};
use crate::state::AppState;

/// Admin routes mounted at `/admin`.
///
/// Every handler requires a role assignment (`RequireAdmin`).
///
/// ```text
/// GET              /tables                           -> list_tables
/// GET, POST        /tables/{table}/rows              -> list_rows, insert_row
/// PUT, DELETE      /tables/{table}/rows/{id}         -> update_row, delete_row
/// GET              /tables/{table}/export            -> export_rows (CSV)
/// GET, POST        /records/{resource}               -> list_records, create_record
/// PUT, DELETE      /records/{resource}/{id}          -> update_record, delete_record
/// GET              /activity-logs                    -> list_activity_logs
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/tables", get(tables::list_tables))
        .route(
            "/tables/{table}/rows",
            get(tables::list_rows).post(tables::insert_row),
        )
        .route(
            "/tables/{table}/rows/{id}",
            put(tables::update_row).delete(tables::delete_row),
        )
        .route("/tables/{table}/export", get(tables::export_rows))
        .route(
            "/records/{resource}",
            get(records::list_records).post(records::create_record),
        )
        .route(
            "/records/{resource}/{id}",
            put(records::update_record).delete(records::delete_record),
        )
        .route("/activity-logs", get(activity::list_activity_logs))
}
