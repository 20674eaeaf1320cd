//! Repository for the append-only `activity_logs` table.

use sqlx::PgPool;

use crate::models::activity_log::{ActivityLog, CreateActivityLog};

const COLUMNS: &str = "id, user_id, action, entity_type, entity_id, details, created_at";

pub struct ActivityLogRepo;

impl ActivityLogRepo {
    pub async fn create(
        pool: &PgPool,
        input: &CreateActivityLog,
    ) -> Result<ActivityLog, sqlx::Error> {
        let query = format!(
            "INSERT INTO activity_logs (user_id, action, entity_type, entity_id, details) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ActivityLog>(&query)
            .bind(input.user_id)
            .bind(&input.action)
            .bind(&input.entity_type)
            .bind(&input.entity_id)
            .bind(&input.details)
            .fetch_one(pool)
            .await
    }

    /// Most recent entries first.
    pub async fn list_recent(pool: &PgPool, limit: i64) -> Result<Vec<ActivityLog>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM activity_logs ORDER BY created_at DESC, id DESC LIMIT $1"
        );
        sqlx::query_as::<_, ActivityLog>(&query)
            .bind(limit)
            .fetch_all(pool)
            .await
    }
}
