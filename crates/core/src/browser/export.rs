//! CSV export of a browsed row set.
//!
//! The header is the bare column list in fetch order. Every data field is
//! wrapped in double quotes with embedded quotes doubled; nulls export as
//! an empty quoted field and timestamps keep their raw string form.

use crate::value::Row;

fn quote(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\""))
}

/// Render `rows` as CSV over `columns`. Lines are `\n`-separated.
pub fn to_csv<R: std::borrow::Borrow<Row>>(columns: &[String], rows: &[R]) -> String {
    let mut lines = Vec::with_capacity(rows.len() + 1);
    lines.push(columns.join(","));
    for row in rows {
        let row = row.borrow();
        let fields: Vec<String> = columns
            .iter()
            .map(|c| quote(&row.get(c).map(|v| v.as_plain_string()).unwrap_or_default()))
            .collect();
        lines.push(fields.join(","));
    }
    lines.join("\n")
}

/// Column names of a row set, taken from the first row.
///
/// An empty set yields no columns; prefer catalog columns where available.
pub fn columns_of(rows: &[Row]) -> Vec<String> {
    rows.first()
        .map(|r| r.keys().cloned().collect())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Value;

    #[test]
    fn quotes_commas_and_maps_null_to_empty() {
        let mut row = Row::new();
        row.insert("a".into(), Value::from("x,y"));
        row.insert("b".into(), Value::Null);
        let csv = to_csv(&["a".to_string(), "b".to_string()], &[row]);
        assert_eq!(csv, "a,b\n\"x,y\",\"\"");
    }

    #[test]
    fn doubles_embedded_quotes() {
        let mut row = Row::new();
        row.insert("note".into(), Value::from(r#"say "hi""#));
        let csv = to_csv(&["note".to_string()], &[&row]);
        assert_eq!(csv, "note\n\"say \"\"hi\"\"\"");
    }

    #[test]
    fn keeps_raw_timestamp_text_and_column_order() {
        let mut row = Row::new();
        row.insert("created_at".into(), Value::from("2025-01-02T03:04:05+00:00"));
        row.insert("id".into(), Value::from(1));
        let cols = columns_of(std::slice::from_ref(&row));
        assert_eq!(cols, vec!["created_at".to_string(), "id".to_string()]);
        assert_eq!(
            to_csv(&cols, &[row]),
            "created_at,id\n\"2025-01-02T03:04:05+00:00\",\"1\""
        );
    }

    #[test]
    fn missing_cells_export_empty() {
        let row = Row::new();
        assert_eq!(to_csv(&["x".to_string()], &[row]), "x\n\"\"");
    }

    #[test]
    fn empty_set_has_no_columns() {
        assert!(columns_of(&[]).is_empty());
    }
}
