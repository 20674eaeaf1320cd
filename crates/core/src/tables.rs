//! Static catalog of the tables the back office may browse.
//!
//! The registry is the only authority on whether a table may be mutated
//! through the generic browser. Anything not listed here is unknown and
//! must not be reached by the row gateway.

use serde::Serialize;

/// Metadata describing one browsable table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TableDescriptor {
    pub name: &'static str,
    /// Human-readable label for navigation.
    pub label: &'static str,
    /// Whether insert/update/delete controls may be offered.
    pub editable: bool,
    pub icon: &'static str,
    pub color: &'static str,
}

pub const STUDENTS: &str = "students";
pub const TEACHERS: &str = "teachers";
pub const SITE_SETTINGS: &str = "site_settings";
pub const USER_ROLES: &str = "user_roles";
pub const SEARCH_LOGS: &str = "search_logs";
pub const ACTIVITY_LOGS: &str = "activity_logs";
pub const KEEP_ALIVE_LOGS: &str = "keep_alive_logs";

pub const TABLES: &[TableDescriptor] = &[
    TableDescriptor {
        name: STUDENTS,
        label: "Students",
        editable: true,
        icon: "graduation-cap",
        color: "blue",
    },
    TableDescriptor {
        name: TEACHERS,
        label: "Teachers",
        editable: true,
        icon: "user-check",
        color: "emerald",
    },
    TableDescriptor {
        name: SITE_SETTINGS,
        label: "Site Settings",
        editable: true,
        icon: "settings",
        color: "amber",
    },
    TableDescriptor {
        name: USER_ROLES,
        label: "Admin Roles",
        editable: true,
        icon: "shield",
        color: "violet",
    },
    TableDescriptor {
        name: SEARCH_LOGS,
        label: "Search Logs",
        editable: false,
        icon: "search",
        color: "slate",
    },
    TableDescriptor {
        name: ACTIVITY_LOGS,
        label: "Activity Logs",
        editable: false,
        icon: "activity",
        color: "rose",
    },
    TableDescriptor {
        name: KEEP_ALIVE_LOGS,
        label: "Uptime Logs",
        editable: false,
        icon: "heart-pulse",
        color: "teal",
    },
];

/// Columns maintained by the database; never part of an editable field set.
pub const SYSTEM_COLUMNS: &[&str] = &["id", "created_at", "updated_at"];

/// Look up a table by exact name.
pub fn find_table(name: &str) -> Option<&'static TableDescriptor> {
    TABLES.iter().find(|t| t.name == name)
}

/// Whether the generic browser may mutate `name`. Unknown tables are not editable.
pub fn is_editable(name: &str) -> bool {
    find_table(name).is_some_and(|t| t.editable)
}

pub fn is_system_column(column: &str) -> bool {
    SYSTEM_COLUMNS.contains(&column)
}

/// Whether the controls for insert, edit and delete should be offered.
///
/// Equivalent to [`is_editable`]; named for the call sites that decide what a
/// table view exposes.
pub fn shows_mutation_controls(table: &TableDescriptor) -> bool {
    table.editable
}

/// Whether `ident` is a plain lower-case SQL identifier (`[a-z_][a-z0-9_]*`).
///
/// Column and table names coming from requests are interpolated into SQL
/// text, so anything else is rejected before a statement is built.
pub fn is_plain_identifier(ident: &str) -> bool {
    let mut chars = ident.chars();
    match chars.next() {
        Some(c) if c.is_ascii_lowercase() || c == '_' => {}
        _ => return false,
    }
    ident.len() <= 63 && chars.all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_tables_are_read_only() {
        for name in [SEARCH_LOGS, ACTIVITY_LOGS, KEEP_ALIVE_LOGS] {
            let table = find_table(name).unwrap();
            assert!(!table.editable, "{name} must be read-only");
            assert!(!shows_mutation_controls(table));
        }
    }

    #[test]
    fn never_offers_mutation_controls_for_read_only_tables() {
        for table in TABLES {
            assert_eq!(shows_mutation_controls(table), table.editable);
            assert_eq!(is_editable(table.name), table.editable);
        }
    }

    #[test]
    fn unknown_tables_are_not_editable() {
        assert!(find_table("pg_authid").is_none());
        assert!(!is_editable("pg_authid"));
    }

    #[test]
    fn table_names_are_unique() {
        let mut names: Vec<_> = TABLES.iter().map(|t| t.name).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), TABLES.len());
    }

    #[test]
    fn plain_identifiers() {
        assert!(is_plain_identifier("roll_number"));
        assert!(is_plain_identifier("_x1"));
        assert!(!is_plain_identifier("1abc"));
        assert!(!is_plain_identifier("Name"));
        assert!(!is_plain_identifier("a;drop"));
        assert!(!is_plain_identifier("a\"b"));
        assert!(!is_plain_identifier(""));
    }
}
