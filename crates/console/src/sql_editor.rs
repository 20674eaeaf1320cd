//! The "SQL editor" page: a single-table read dispatcher, not a SQL engine.
//!
//! Input is reduced to a table name and a row limit by
//! [`parse_select`]; everything else is reported back as ignored.

use std::sync::Arc;
use std::time::Instant;

use seatfinder_core::sql_runner::{parse_select, HELP_TEXT};
use seatfinder_core::value::Row;

use crate::backend::Backend;
use crate::error::ConsoleError;

/// What the result panel shows for one run.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryResult {
    pub table: String,
    /// Catalog columns, so an empty result still has a header.
    pub columns: Vec<String>,
    pub rows: Vec<Row>,
    pub row_count: usize,
    pub elapsed_ms: u64,
    /// Set when parts of the input were not applied.
    pub warning: Option<String>,
}

pub struct SqlEditor<B: Backend + ?Sized> {
    backend: Arc<B>,
}

impl<B: Backend + ?Sized> SqlEditor<B> {
    pub fn new(backend: Arc<B>) -> Self {
        Self { backend }
    }

    pub fn help(&self) -> &'static str {
        HELP_TEXT
    }

    /// Validate `input` locally, then fetch up to `limit` rows of its table.
    pub async fn run(&self, input: &str) -> Result<QueryResult, ConsoleError> {
        let query = parse_select(input)?;
        let warning = query.warning();
        if let Some(warning) = &warning {
            tracing::info!(table = %query.table, warning = %warning, "SQL editor ignored clauses");
        }

        let start = Instant::now();
        let set = self
            .backend
            .list_rows(&query.table, query.limit, None, false)
            .await?;
        let elapsed_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);

        Ok(QueryResult {
            table: query.table,
            row_count: set.rows.len(),
            columns: set.columns,
            rows: set.rows,
            elapsed_ms,
            warning,
        })
    }
}
