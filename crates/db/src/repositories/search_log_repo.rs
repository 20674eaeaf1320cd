//! Repository for `search_logs`.

use sqlx::PgPool;

use crate::models::search_log::SearchLog;

const COLUMNS: &str = "id, roll_number, found, searched_at";

pub struct SearchLogRepo;

impl SearchLogRepo {
    /// Record one public search and its outcome.
    pub async fn record(pool: &PgPool, roll_number: &str, found: bool) -> Result<SearchLog, sqlx::Error> {
        let query = format!(
            "INSERT INTO search_logs (roll_number, found) VALUES ($1, $2) RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, SearchLog>(&query)
            .bind(roll_number)
            .bind(found)
            .fetch_one(pool)
            .await
    }
}
