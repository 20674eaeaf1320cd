//! Repository for `keep_alive_logs`.

use sqlx::PgPool;

use crate::models::keep_alive_log::{CreateKeepAliveLog, KeepAliveLog};

const COLUMNS: &str = "id, status, response_time_ms, error_message, record_count, created_at";

pub struct KeepAliveLogRepo;

impl KeepAliveLogRepo {
    pub async fn create(
        pool: &PgPool,
        input: &CreateKeepAliveLog,
    ) -> Result<KeepAliveLog, sqlx::Error> {
        let query = format!(
            "INSERT INTO keep_alive_logs (status, response_time_ms, error_message, record_count) \
             VALUES ($1, $2, $3, $4) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, KeepAliveLog>(&query)
            .bind(&input.status)
            .bind(input.response_time_ms)
            .bind(&input.error_message)
            .bind(input.record_count)
            .fetch_one(pool)
            .await
    }

    /// Most recent probes first, for the status page.
    pub async fn list_recent(pool: &PgPool, limit: i64) -> Result<Vec<KeepAliveLog>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM keep_alive_logs ORDER BY created_at DESC, id DESC LIMIT $1"
        );
        sqlx::query_as::<_, KeepAliveLog>(&query)
            .bind(limit)
            .fetch_all(pool)
            .await
    }

    /// The probe query itself: a count over `site_settings`.
    pub async fn count_settings(pool: &PgPool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*)::BIGINT FROM site_settings")
            .fetch_one(pool)
            .await
    }
}
