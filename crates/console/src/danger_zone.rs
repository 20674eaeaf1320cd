//! Clearing the read-only log tables.
//!
//! These are unscoped `DELETE FROM <table>` statements sent through the
//! privileged SQL gateway; only tables the registry marks read-only can be
//! named here.

use std::sync::Arc;

use seatfinder_core::tables::{find_table, TABLES};

use crate::backend::Backend;
use crate::error::ConsoleError;

pub struct DangerZone<B: Backend + ?Sized> {
    backend: Arc<B>,
}

impl<B: Backend + ?Sized> DangerZone<B> {
    pub fn new(backend: Arc<B>) -> Self {
        Self { backend }
    }

    /// Tables offered for clearing.
    pub fn log_tables() -> Vec<&'static str> {
        TABLES
            .iter()
            .filter(|t| !t.editable)
            .map(|t| t.name)
            .collect()
    }

    /// Remove every row of one log table.
    pub async fn clear_logs(&self, table: &str) -> Result<(), ConsoleError> {
        match find_table(table) {
            Some(t) if !t.editable => {}
            _ => {
                return Err(ConsoleError::Validation(format!(
                    "{table} is not a log table"
                )))
            }
        }

        let outcome = self
            .backend
            .execute_sql(&format!("DELETE FROM {table}"))
            .await?;
        tracing::warn!(table = %table, exec_ms = outcome.exec_ms, "Log table cleared");
        Ok(())
    }
}
