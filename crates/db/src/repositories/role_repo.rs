//! Repository for the `user_roles` table.

use seatfinder_core::types::UserId;
use sqlx::PgPool;

use crate::models::role::RoleAssignment;

const COLUMNS: &str = "id, user_id, role, granted_at";

/// Role lookups for the admin gates.
pub struct RoleRepo;

impl RoleRepo {
    /// All role rows held by `user_id`, oldest grant first.
    pub async fn list_for_user(
        pool: &PgPool,
        user_id: UserId,
    ) -> Result<Vec<RoleAssignment>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM user_roles WHERE user_id = $1 ORDER BY granted_at ASC");
        sqlx::query_as::<_, RoleAssignment>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// Just the role names held by `user_id`.
    pub async fn role_names(pool: &PgPool, user_id: UserId) -> Result<Vec<String>, sqlx::Error> {
        sqlx::query_scalar::<_, String>("SELECT role FROM user_roles WHERE user_id = $1")
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// Grant `role` to `user_id`. Re-granting an existing role is a no-op
    /// that returns the existing row.
    pub async fn grant(
        pool: &PgPool,
        user_id: UserId,
        role: &str,
    ) -> Result<RoleAssignment, sqlx::Error> {
        let query = format!(
            "INSERT INTO user_roles (user_id, role) VALUES ($1, $2) \
             ON CONFLICT ON CONSTRAINT uq_user_roles_user_role \
             DO UPDATE SET role = EXCLUDED.role \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, RoleAssignment>(&query)
            .bind(user_id)
            .bind(role)
            .fetch_one(pool)
            .await
    }
}
