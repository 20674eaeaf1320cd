//! Handler for the caller's own role assignments.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use seatfinder_core::roles::grants_admin;
use seatfinder_core::types::UserId;
use seatfinder_db::models::role::RoleAssignment;
use seatfinder_db::repositories::RoleRepo;
use serde::Serialize;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct MyRoles {
    pub user_id: UserId,
    pub is_admin: bool,
    pub roles: Vec<RoleAssignment>,
}

/// GET /api/v1/auth/roles
pub async fn my_roles(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<impl IntoResponse> {
    let roles = RoleRepo::list_for_user(&state.pool, user.user_id).await?;
    let names: Vec<&str> = roles.iter().map(|r| r.role.as_str()).collect();

    Ok(Json(DataResponse {
        data: MyRoles {
            user_id: user.user_id,
            is_admin: grants_admin(&names),
            roles,
        },
    }))
}
