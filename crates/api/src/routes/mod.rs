pub mod admin;
pub mod functions;
pub mod health;
pub mod public;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /search/seat                                     seat lookup (public)
/// /teachers                                        teacher directory (public)
/// /status/uptime                                   keep-alive history (public)
/// /auth/roles                                      caller's role rows (auth)
///
/// /admin/tables                                    table registry
/// /admin/tables/{table}/rows                       list, insert
/// /admin/tables/{table}/rows/{id}                  update, delete
/// /admin/tables/{table}/export                     CSV export
/// /admin/records/{resource}                        list, create (+ activity log)
/// /admin/records/{resource}/{id}                   update, delete (+ activity log)
/// /admin/activity-logs                             recent activity
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(public::router())
        .nest("/admin", admin::router())
}
