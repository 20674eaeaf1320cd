//! Route definitions for the unauthenticated pages and the caller's roles.

use axum::routing::get;
use axum::Router;

use crate::handlers::{auth, search, status};
use crate::state::AppState;

/// ```text
/// GET /search/seat?roll_number=   -> search_seat
/// GET /teachers?q=&limit=         -> search_teachers
/// GET /status/uptime?limit=       -> uptime
/// GET /auth/roles                 -> my_roles (requires auth)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/search/seat", get(search::search_seat))
        .route("/teachers", get(search::search_teachers))
        .route("/status/uptime", get(status::uptime))
        .route("/auth/roles", get(auth::my_roles))
}
