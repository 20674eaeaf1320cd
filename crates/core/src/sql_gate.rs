//! Statement safety gate for the privileged SQL execution gateway.
//!
//! Two modes:
//!
//! - [`GateMode::Denylist`] (default): blocks a fixed set of dangerous
//!   patterns and lets everything else through. Unscoped destructive DML
//!   such as `DELETE FROM search_logs` or `DROP TABLE x` is **not** blocked;
//!   any admin or super_admin credential is trusted with it.
//! - [`GateMode::Allowlist`]: a single read-only statement, or clearing a
//!   read-only log table with `DELETE FROM <table>`. The denylist still
//!   applies on top.

use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;

use crate::tables;

/// Message returned to the caller for any gate rejection.
pub const ERR_NOT_PERMITTED: &str = "This SQL command is not permitted";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum GateMode {
    #[default]
    Denylist,
    Allowlist,
}

impl FromStr for GateMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "denylist" => Ok(GateMode::Denylist),
            "allowlist" => Ok(GateMode::Allowlist),
            other => Err(format!("unknown SQL gate mode '{other}' (expected denylist|allowlist)")),
        }
    }
}

/// Why a statement was refused; `rule` names the matching pattern for logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rejected {
    pub rule: &'static str,
}

static DENYLIST: LazyLock<Vec<(&'static str, Regex)>> = LazyLock::new(|| {
    [
        ("drop_database", r"(?i)\bdrop\s+database\b"),
        ("drop_schema", r"(?i)\bdrop\s+schema\b"),
        ("alter_database", r"(?i)\balter\s+database\b"),
        ("pg_read_file", r"(?i)pg_read_file"),
        ("pg_ls_dir", r"(?i)pg_ls_dir"),
        ("copy_to_from", r"(?is)\bcopy\b.*\b(to|from)\b"),
    ]
    .into_iter()
    .map(|(rule, pattern)| (rule, Regex::new(pattern).expect("valid regex")))
    .collect()
});

static WRITE_KEYWORDS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(insert|update|delete|merge|drop|alter|truncate|create|grant|revoke|copy|call|do|vacuum|into)\b",
    )
    .expect("valid regex")
});

static CLEAR_LOG_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^delete\s+from\s+(?:public\.)?([a-z_][a-z0-9_]*)$").expect("valid regex")
});

const READ_ONLY_LEADS: &[&str] = &["select", "with", "explain", "show"];

/// Check `sql` against the configured gate.
pub fn check(sql: &str, mode: GateMode) -> Result<(), Rejected> {
    if let Some((rule, _)) = DENYLIST.iter().find(|(_, re)| re.is_match(sql)) {
        return Err(Rejected { rule });
    }
    match mode {
        GateMode::Denylist => Ok(()),
        GateMode::Allowlist => check_allowlist(sql),
    }
}

fn check_allowlist(sql: &str) -> Result<(), Rejected> {
    let statement = sql.trim().trim_end_matches(';').trim();
    if statement.is_empty() || statement.contains(';') {
        return Err(Rejected {
            rule: "single_statement",
        });
    }

    if let Some(caps) = CLEAR_LOG_RE.captures(statement) {
        let target = caps.get(1).map(|m| m.as_str().to_ascii_lowercase());
        let is_log_table = target
            .as_deref()
            .and_then(tables::find_table)
            .is_some_and(|t| !t.editable);
        return if is_log_table {
            Ok(())
        } else {
            Err(Rejected {
                rule: "delete_outside_logs",
            })
        };
    }

    let lead = statement
        .split_whitespace()
        .next()
        .unwrap_or_default()
        .to_ascii_lowercase();
    if !READ_ONLY_LEADS.contains(&lead.as_str()) || WRITE_KEYWORDS.is_match(statement) {
        return Err(Rejected { rule: "read_only" });
    }
    Ok(())
}
