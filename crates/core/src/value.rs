//! Untyped row model shared by every table the application touches.
//!
//! Rows are fetched from tables whose shape is only known at runtime, so a
//! row is an ordered map of column name to [`Value`], a closed sum of the
//! scalar kinds the backend can hand us. Nested JSON (arrays, objects) is
//! kept as its compact text form rather than widening the sum.

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};

use crate::types::Timestamp;

/// A single cell.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Null,
    Bool(bool),
    Number(serde_json::Number),
    String(String),
    Timestamp(Timestamp),
}

/// One row of a dynamically-shaped table, in fetch (column) order.
pub type Row = IndexMap<String, Value>;

/// Column every editable table carries as its mutation key.
pub const ID_COLUMN: &str = "id";

/// Suffix that marks a column as a timestamp for display purposes.
pub const TIMESTAMP_SUFFIX: &str = "_at";

impl Value {
    /// The plain string form used for searching, sorting and CSV export.
    ///
    /// `Null` maps to the empty string. Timestamps use RFC 3339.
    pub fn as_plain_string(&self) -> String {
        match self {
            Value::Null => String::new(),
            Value::Bool(b) => b.to_string(),
            Value::Number(n) => n.to_string(),
            Value::String(s) => s.clone(),
            Value::Timestamp(t) => t.to_rfc3339(),
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Convert back to JSON for binding into SQL payloads.
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Value::Null => serde_json::Value::Null,
            Value::Bool(b) => serde_json::Value::Bool(*b),
            Value::Number(n) => serde_json::Value::Number(n.clone()),
            Value::String(s) => serde_json::Value::String(s.clone()),
            Value::Timestamp(t) => serde_json::Value::String(t.to_rfc3339()),
        }
    }
}

impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => Value::Number(n),
            serde_json::Value::String(s) => Value::String(s),
            nested @ (serde_json::Value::Array(_) | serde_json::Value::Object(_)) => {
                Value::String(nested.to_string())
            }
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Number(n.into())
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        serde_json::Value::deserialize(deserializer).map(Value::from)
    }
}

/// Build a [`Row`] from an already-parsed JSON object.
///
/// Key order follows the `serde_json` map; parse text straight into [`Row`]
/// when column order matters. Returns `None` when `json` is not an object.
pub fn row_from_json(json: serde_json::Value) -> Option<Row> {
    match json {
        serde_json::Value::Object(map) => {
            Some(map.into_iter().map(|(k, v)| (k, Value::from(v))).collect())
        }
        _ => None,
    }
}

/// Render a row as a JSON object (used as an SQL `jsonb` payload).
pub fn row_to_json(row: &Row) -> serde_json::Value {
    serde_json::Value::Object(row.iter().map(|(k, v)| (k.clone(), v.to_json())).collect())
}

/// The mutation key of a row, if it has a non-null `id` column.
pub fn row_id(row: &Row) -> Option<String> {
    row.get(ID_COLUMN)
        .filter(|v| !v.is_null())
        .map(Value::as_plain_string)
}

/// Whether a column name denotes a timestamp under the `_at` naming convention.
pub fn is_timestamp_column(column: &str) -> bool {
    column.ends_with(TIMESTAMP_SUFFIX)
}

/// Format a cell for display.
///
/// This is the single place the `_at` suffix heuristic is applied: values in
/// such columns that parse as RFC 3339 are rendered as `YYYY-MM-DD HH:MM`
/// UTC. Everything else uses the plain string form, with `NULL` for nulls.
pub fn format_cell(column: &str, value: &Value) -> String {
    if is_timestamp_column(column) {
        match value {
            Value::Timestamp(t) => return format_timestamp(t),
            Value::String(s) => {
                if let Ok(parsed) = DateTime::parse_from_rfc3339(s) {
                    return format_timestamp(&parsed.with_timezone(&Utc));
                }
            }
            _ => {}
        }
    }
    match value {
        Value::Null => "NULL".to_string(),
        other => other.as_plain_string(),
    }
}

fn format_timestamp(t: &Timestamp) -> String {
    t.format("%Y-%m-%d %H:%M").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn nested_json_collapses_to_text() {
        let v = Value::from(serde_json::json!({"a": [1, 2]}));
        assert_eq!(v, Value::String(r#"{"a":[1,2]}"#.to_string()));
    }

    #[test]
    fn row_parsed_from_text_keeps_column_order() {
        let row: Row = serde_json::from_str(r#"{"zeta": 1, "alpha": "x", "mid": null}"#).unwrap();
        let keys: Vec<&str> = row.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["zeta", "alpha", "mid"]);
    }

    #[test]
    fn row_from_json_rejects_non_objects() {
        assert!(row_from_json(serde_json::json!([1, 2])).is_none());
        let row = row_from_json(serde_json::json!({"id": 3})).unwrap();
        assert_eq!(row["id"], Value::from(3));
    }

    #[test]
    fn row_id_ignores_null() {
        let mut row = Row::new();
        row.insert("id".into(), Value::Null);
        assert_eq!(row_id(&row), None);
        row.insert("id".into(), Value::from(7));
        assert_eq!(row_id(&row), Some("7".to_string()));
    }

    #[test]
    fn serializes_untagged() {
        let mut row = Row::new();
        row.insert("a".into(), Value::from("x"));
        row.insert("b".into(), Value::Null);
        row.insert("c".into(), Value::from(true));
        assert_eq!(
            serde_json::to_string(&row).unwrap(),
            r#"{"a":"x","b":null,"c":true}"#
        );
    }

    #[test]
    fn format_cell_applies_suffix_heuristic() {
        let ts = Value::from("2025-03-01T09:30:00+00:00");
        assert_eq!(format_cell("created_at", &ts), "2025-03-01 09:30");
        // Same text outside an `_at` column is left alone.
        assert_eq!(format_cell("note", &ts), "2025-03-01T09:30:00+00:00");
    }

    #[test]
    fn format_cell_handles_typed_timestamps_and_nulls() {
        let t = Utc.with_ymd_and_hms(2024, 12, 31, 23, 59, 0).unwrap();
        assert_eq!(format_cell("searched_at", &Value::Timestamp(t)), "2024-12-31 23:59");
        assert_eq!(format_cell("searched_at", &Value::Null), "NULL");
        assert_eq!(format_cell("updated_at", &Value::from("not a date")), "not a date");
    }
}
