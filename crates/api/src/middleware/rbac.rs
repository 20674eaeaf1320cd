//! Back-office access check.
//!
//! The token only proves identity. Admin status is read from `user_roles`
//! on every request, so revoking a role takes effect immediately.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use seatfinder_core::error::CoreError;
use seatfinder_core::roles::grants_admin;
use seatfinder_db::repositories::RoleRepo;

use super::auth::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

/// An authenticated caller holding at least one role row.
///
/// No token is 401 (from [`AuthUser`]); a token without a role row is 403.
pub struct RequireAdmin(pub AuthUser);

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, AppError> {
        let caller = AuthUser::from_request_parts(parts, state).await?;
        let roles = RoleRepo::role_names(&state.pool, caller.user_id).await?;

        if grants_admin(&roles) {
            Ok(RequireAdmin(caller))
        } else {
            tracing::warn!(user_id = %caller.user_id, path = %parts.uri.path(), "Back office refused: no role");
            Err(CoreError::Forbidden("Admin role required".into()).into())
        }
    }
}
