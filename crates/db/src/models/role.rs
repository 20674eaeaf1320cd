//! Role assignment model.

use seatfinder_core::types::{DbId, Timestamp, UserId};
use serde::Serialize;
use sqlx::FromRow;

/// A row from `user_roles`. A user may hold several.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct RoleAssignment {
    pub id: DbId,
    pub user_id: UserId,
    pub role: String,
    pub granted_at: Timestamp,
}
