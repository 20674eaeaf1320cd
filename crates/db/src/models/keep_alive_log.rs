//! Keep-alive probe results, charted by the status page.

use seatfinder_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

pub const STATUS_SUCCESS: &str = "success";
pub const STATUS_ERROR: &str = "error";

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct KeepAliveLog {
    pub id: DbId,
    pub status: String,
    pub response_time_ms: i32,
    pub error_message: Option<String>,
    pub record_count: Option<i64>,
    pub created_at: Timestamp,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateKeepAliveLog {
    pub status: String,
    pub response_time_ms: i32,
    pub error_message: Option<String>,
    pub record_count: Option<i64>,
}
