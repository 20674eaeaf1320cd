//! Fire-and-forget activity log writes.
//!
//! A CRUD request never waits for, or fails because of, its activity log
//! entry. Each write runs on its own task; a failed write is logged at
//! `warn` and counted, and the count is reported by `/health`.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use seatfinder_db::models::activity_log::CreateActivityLog;
use seatfinder_db::repositories::ActivityLogRepo;
use sqlx::PgPool;
use tokio::task::JoinHandle;

#[derive(Clone)]
pub struct ActivityRecorder {
    pool: PgPool,
    dropped: Arc<AtomicU64>,
}

impl ActivityRecorder {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            dropped: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Queue one entry. The handle is only useful to tests that need to
    /// observe the write.
    pub fn record(&self, entry: CreateActivityLog) -> JoinHandle<()> {
        let pool = self.pool.clone();
        let dropped = Arc::clone(&self.dropped);
        tokio::spawn(async move {
            if let Err(e) = ActivityLogRepo::create(&pool, &entry).await {
                let total = dropped.fetch_add(1, Ordering::Relaxed) + 1;
                tracing::warn!(
                    error = %e,
                    action = %entry.action,
                    entity_type = %entry.entity_type,
                    entity_id = ?entry.entity_id,
                    dropped_total = total,
                    "Dropped activity log write",
                );
            }
        })
    }

    /// Number of entries that failed to persist since startup.
    pub fn dropped_writes(&self) -> u64 {
        self.dropped.load(Ordering::Relaxed)
    }
}
