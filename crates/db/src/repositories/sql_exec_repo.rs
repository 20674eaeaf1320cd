//! Raw statement execution for the privileged SQL gateway.
//!
//! Statements run through the simple query protocol, so results arrive in
//! text format. Each cell is read as text and converted to a [`Value`] based
//! on the column's reported type. Access checks and the statement gate live
//! in the caller; this runs whatever it is given with the pool's own
//! credentials.

use chrono::{DateTime, Utc};
use seatfinder_core::value::{Row, Value};
use sqlx::postgres::PgRow;
use sqlx::{Column, PgPool, Row as _, TypeInfo};

pub struct SqlExecRepo;

impl SqlExecRepo {
    /// Execute `sql` (possibly several `;`-separated statements) and collect
    /// every returned row. Statements without a result set contribute none.
    pub async fn execute(pool: &PgPool, sql: &str) -> Result<Vec<Row>, sqlx::Error> {
        let rows = sqlx::raw_sql(sql).fetch_all(pool).await?;
        rows.iter().map(pg_row_to_row).collect()
    }
}

fn pg_row_to_row(row: &PgRow) -> Result<Row, sqlx::Error> {
    let mut out = Row::with_capacity(row.columns().len());
    for column in row.columns() {
        let raw: Option<String> = row.try_get_unchecked(column.ordinal())?;
        let value = match raw {
            None => Value::Null,
            Some(text) => text_to_value(column.type_info().name(), text),
        };
        out.insert(column.name().to_string(), value);
    }
    Ok(out)
}

/// Convert a text-format cell to a [`Value`] by PostgreSQL type name.
///
/// Anything that does not parse cleanly stays a string.
fn text_to_value(type_name: &str, text: String) -> Value {
    match type_name {
        "BOOL" => match text.as_str() {
            "t" => Value::Bool(true),
            "f" => Value::Bool(false),
            _ => Value::String(text),
        },
        "INT2" | "INT4" | "INT8" | "FLOAT4" | "FLOAT8" | "NUMERIC" | "OID" => text
            .parse::<serde_json::Number>()
            .map(Value::Number)
            .unwrap_or(Value::String(text)),
        "JSON" | "JSONB" => serde_json::from_str::<serde_json::Value>(&text)
            .map(Value::from)
            .unwrap_or(Value::String(text)),
        "TIMESTAMPTZ" => DateTime::parse_from_str(&text, "%Y-%m-%d %H:%M:%S%.f%#z")
            .map(|t| Value::Timestamp(t.with_timezone(&Utc)))
            .unwrap_or(Value::String(text)),
        _ => Value::String(text),
    }
}
