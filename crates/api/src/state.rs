use std::sync::Arc;

use crate::background::activity::ActivityRecorder;
use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: seatfinder_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Best-effort activity log writer.
    pub activity: ActivityRecorder,
    /// Outbound HTTP client (SSL check).
    pub http: reqwest::Client,
}

impl AppState {
    pub fn new(pool: seatfinder_db::DbPool, config: ServerConfig) -> Self {
        Self {
            activity: ActivityRecorder::new(pool.clone()),
            pool,
            config: Arc::new(config),
            http: reqwest::Client::new(),
        }
    }
}
