//! Bounds for caller-supplied row limits.

/// Default page of rows for the generic table browser.
pub const BROWSE_DEFAULT_LIMIT: i64 = 500;

/// Hard cap on rows returned by any list endpoint.
pub const MAX_LIMIT: i64 = 1000;

/// Default for log and status feeds.
pub const FEED_DEFAULT_LIMIT: i64 = 50;

/// Clamp a user-provided limit to `0..=max`. Zero asks for no rows.
pub fn clamp_limit(limit: Option<i64>, default: i64, max: i64) -> i64 {
    limit.unwrap_or(default).clamp(0, max)
}
