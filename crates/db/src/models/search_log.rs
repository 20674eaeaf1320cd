use seatfinder_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// One public seat search. `found = false` is a normal negative result.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct SearchLog {
    pub id: DbId,
    pub roll_number: String,
    pub found: bool,
    pub searched_at: Timestamp,
}
