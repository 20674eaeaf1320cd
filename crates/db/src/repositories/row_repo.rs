//! Row Data Gateway: generic CRUD over the registry tables.
//!
//! Rows are untyped, so every statement goes through PostgreSQL's JSON
//! functions: reads select `to_json(t)::text` and parse it into a [`Row`]
//! (which keeps column order), writes bind the field set as one `jsonb`
//! parameter and let `jsonb_populate_record` coerce each value to its
//! column type. Identifiers are never bound, so every table and column name
//! is checked with [`is_plain_identifier`] before it is spliced into SQL.
//!
//! Taking a [`TableDescriptor`] means the table is already known to the
//! registry. The editable policy is enforced by the caller; this layer
//! stays policy-free so the keep-alive and test paths can reuse it.

use seatfinder_core::tables::{is_plain_identifier, TableDescriptor};
use seatfinder_core::value::{row_to_json, Row};
use sqlx::PgPool;

/// Provides list/insert/update/delete over any registry table.
pub struct RowRepo;

fn quote_ident(name: &str) -> Result<String, sqlx::Error> {
    if is_plain_identifier(name) {
        Ok(format!("\"{name}\""))
    } else {
        Err(sqlx::Error::Protocol(format!("invalid identifier: {name}")))
    }
}

fn column_list(fields: &Row) -> Result<String, sqlx::Error> {
    fields
        .keys()
        .map(|c| quote_ident(c))
        .collect::<Result<Vec<_>, _>>()
        .map(|cols| cols.join(", "))
}

fn parse_row(text: &str) -> Result<Row, sqlx::Error> {
    serde_json::from_str(text).map_err(|e| sqlx::Error::Decode(Box::new(e)))
}

impl RowRepo {
    /// Fetch at most `limit` rows, optionally ordered by one column.
    pub async fn list(
        pool: &PgPool,
        table: &TableDescriptor,
        limit: i64,
        order: Option<&str>,
        descending: bool,
    ) -> Result<Vec<Row>, sqlx::Error> {
        let table_ident = quote_ident(table.name)?;
        let order_clause = match order {
            Some(column) => format!(
                "ORDER BY t.{} {}",
                quote_ident(column)?,
                if descending { "DESC" } else { "ASC" }
            ),
            None => String::new(),
        };
        let query =
            format!("SELECT to_json(t)::text FROM {table_ident} t {order_clause} LIMIT $1");
        let texts = sqlx::query_scalar::<_, String>(&query)
            .bind(limit)
            .fetch_all(pool)
            .await?;
        texts.iter().map(|t| parse_row(t)).collect()
    }

    /// Column names of `table` in ordinal order, from the catalog.
    ///
    /// Unlike deriving columns from the first row, this works for empty
    /// tables.
    pub async fn columns(pool: &PgPool, table: &TableDescriptor) -> Result<Vec<String>, sqlx::Error> {
        sqlx::query_scalar::<_, String>(
            "SELECT column_name::text FROM information_schema.columns \
             WHERE table_schema = current_schema() AND table_name = $1 \
             ORDER BY ordinal_position",
        )
        .bind(table.name)
        .fetch_all(pool)
        .await
    }

    /// Insert one row and return it as stored (with defaults filled in).
    pub async fn insert(
        pool: &PgPool,
        table: &TableDescriptor,
        fields: &Row,
    ) -> Result<Row, sqlx::Error> {
        let table_ident = quote_ident(table.name)?;
        let text = if fields.is_empty() {
            let query =
                format!("INSERT INTO {table_ident} AS t DEFAULT VALUES RETURNING to_json(t)::text");
            sqlx::query_scalar::<_, String>(&query).fetch_one(pool).await?
        } else {
            let cols = column_list(fields)?;
            let query = format!(
                "INSERT INTO {table_ident} AS t ({cols}) \
                 SELECT {cols} FROM jsonb_populate_record(NULL::{table_ident}, $1) \
                 RETURNING to_json(t)::text"
            );
            sqlx::query_scalar::<_, String>(&query)
                .bind(row_to_json(fields))
                .fetch_one(pool)
                .await?
        };
        parse_row(&text)
    }

    /// Update the row whose `id` equals `id` and return it, or `None` when
    /// no such row exists. `fields` must not be empty.
    pub async fn update(
        pool: &PgPool,
        table: &TableDescriptor,
        id: &str,
        fields: &Row,
    ) -> Result<Option<Row>, sqlx::Error> {
        let table_ident = quote_ident(table.name)?;
        let cols = column_list(fields)?;
        let query = format!(
            "UPDATE {table_ident} AS t SET ({cols}) = \
             (SELECT {cols} FROM jsonb_populate_record(NULL::{table_ident}, $1)) \
             WHERE t.id::text = $2 \
             RETURNING to_json(t)::text"
        );
        let text = sqlx::query_scalar::<_, String>(&query)
            .bind(row_to_json(fields))
            .bind(id)
            .fetch_optional(pool)
            .await?;
        text.as_deref().map(parse_row).transpose()
    }

    /// Delete by id. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, table: &TableDescriptor, id: &str) -> Result<bool, sqlx::Error> {
        let table_ident = quote_ident(table.name)?;
        let query = format!("DELETE FROM {table_ident} WHERE id::text = $1");
        let result = sqlx::query(&query).bind(id).execute(pool).await?;
        Ok(result.rows_affected() > 0)
    }

    /// Fetch one row by id.
    pub async fn find(
        pool: &PgPool,
        table: &TableDescriptor,
        id: &str,
    ) -> Result<Option<Row>, sqlx::Error> {
        let table_ident = quote_ident(table.name)?;
        let query = format!("SELECT to_json(t)::text FROM {table_ident} t WHERE t.id::text = $1");
        let text = sqlx::query_scalar::<_, String>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await?;
        text.as_deref().map(parse_row).transpose()
    }
}
