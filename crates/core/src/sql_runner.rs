//! Constrained single-table SELECT runner for the admin SQL editor.
//!
//! This is not a SQL parser. Input must start with `select`; the first
//! table name after `from` and an optional numeric `limit` are extracted by
//! pattern match and everything else in the statement is ignored. Callers
//! dispatch the result to the row gateway's list operation. Clauses that
//! were typed but will not be applied are reported back so the caller can
//! warn the user.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::CoreError;
use crate::limits::MAX_LIMIT;

/// Row limit applied when the statement has no `limit`.
pub const DEFAULT_LIMIT: i64 = 100;

/// Help text shown beside the editor.
pub const HELP_TEXT: &str = "Runs `SELECT ... FROM <table> [LIMIT n]` against a single table. \
Only the table name and LIMIT are honored; column lists, WHERE, JOIN, GROUP BY, \
ORDER BY and OFFSET are ignored.";

pub const ERR_ONLY_SELECT: &str = "Only SELECT queries are permitted";
pub const ERR_NO_TABLE: &str = "Could not determine table name";

static FROM_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"\bfrom\s+(?:public\.)?"?([a-z_][a-z0-9_]*)"?"#).expect("valid regex")
});

static LIMIT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\blimit\s+(\d+)").expect("valid regex"));

static COLUMNS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^select\s+(.*?)\s+from\b").expect("valid regex"));

/// Clauses recognized only so they can be reported as ignored.
static IGNORED_CLAUSES: LazyLock<Vec<(&'static str, Regex)>> = LazyLock::new(|| {
    [
        ("WHERE", r"\bwhere\b"),
        ("JOIN", r"\bjoin\b"),
        ("GROUP BY", r"\bgroup\s+by\b"),
        ("HAVING", r"\bhaving\b"),
        ("ORDER BY", r"\border\s+by\b"),
        ("OFFSET", r"\boffset\b"),
    ]
    .into_iter()
    .map(|(name, pattern)| (name, Regex::new(pattern).expect("valid regex")))
    .collect()
});

/// What the runner will actually execute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunnerQuery {
    pub table: String,
    pub limit: i64,
    /// Parts of the statement that were typed but are not applied.
    pub ignored: Vec<&'static str>,
}

impl RunnerQuery {
    /// Warning to show next to the result: ignored clauses, and a `limit`
    /// above what the row gateway will return.
    pub fn warning(&self) -> Option<String> {
        let mut parts = Vec::new();
        if !self.ignored.is_empty() {
            parts.push(format!(
                "Only the table name and LIMIT were applied; ignored: {}",
                self.ignored.join(", ")
            ));
        }
        if self.limit > MAX_LIMIT {
            parts.push(format!(
                "LIMIT {} exceeds the maximum; at most {MAX_LIMIT} rows are returned",
                self.limit
            ));
        }
        if parts.is_empty() {
            None
        } else {
            Some(parts.join(". "))
        }
    }
}

/// Validate and reduce free-text input to a table name and row limit.
///
/// No network access happens here; failures are validation errors.
pub fn parse_select(input: &str) -> Result<RunnerQuery, CoreError> {
    let sql = input.trim().to_lowercase();
    if !sql.starts_with("select") {
        return Err(CoreError::Validation(ERR_ONLY_SELECT.into()));
    }

    let table = FROM_RE
        .captures(&sql)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string())
        .ok_or_else(|| CoreError::Validation(ERR_NO_TABLE.into()))?;

    let limit = match LIMIT_RE.captures(&sql).and_then(|c| c.get(1)) {
        Some(m) => m
            .as_str()
            .parse::<i64>()
            .map_err(|_| CoreError::Validation(format!("Invalid LIMIT value: {}", m.as_str())))?,
        None => DEFAULT_LIMIT,
    };

    let mut ignored = Vec::new();
    if COLUMNS_RE
        .captures(&sql)
        .and_then(|c| c.get(1))
        .is_some_and(|m| m.as_str().trim() != "*")
    {
        ignored.push("column list");
    }
    ignored.extend(
        IGNORED_CLAUSES
            .iter()
            .filter(|(_, re)| re.is_match(&sql))
            .map(|(name, _)| *name),
    );

    Ok(RunnerQuery {
        table,
        limit,
        ignored,
    })
}
