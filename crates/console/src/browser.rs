//! Table browser controller.
//!
//! Owns a [`BrowserState`] and drives it from backend calls. Every fetch
//! carries a [`LoadTicket`](seatfinder_core::browser::LoadTicket); a response
//! that arrives after a newer selection or reload is dropped.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use seatfinder_core::browser::BrowserState;
use seatfinder_core::limits::BROWSE_DEFAULT_LIMIT;
use seatfinder_core::tables::{find_table, shows_mutation_controls};
use seatfinder_core::value::Row;

use crate::backend::Backend;
use crate::error::ConsoleError;

/// Outcome of a bulk delete. Every selected id ends up in exactly one list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BulkDeleteReport {
    pub deleted: Vec<String>,
    /// `(id, message)` for each delete the server refused.
    pub failed: Vec<(String, String)>,
}

impl BulkDeleteReport {
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }

    /// One-line summary for the message banner.
    pub fn summary(&self) -> String {
        if self.failed.is_empty() {
            format!("Deleted {} row(s)", self.deleted.len())
        } else {
            format!(
                "Deleted {} row(s); {} failed",
                self.deleted.len(),
                self.failed.len()
            )
        }
    }
}

pub struct TableBrowser<B: Backend + ?Sized> {
    backend: Arc<B>,
    state: Mutex<BrowserState>,
}

impl<B: Backend + ?Sized> TableBrowser<B> {
    pub fn new(backend: Arc<B>) -> Self {
        Self {
            backend,
            state: Mutex::new(BrowserState::new()),
        }
    }

    fn state(&self) -> MutexGuard<'_, BrowserState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Read the current state (view, selection, error) under the lock.
    pub fn with_state<R>(&self, f: impl FnOnce(&BrowserState) -> R) -> R {
        f(&self.state())
    }

    /// Apply a local change: filter text, sort toggles, paging, selection.
    pub fn with_state_mut<R>(&self, f: impl FnOnce(&mut BrowserState) -> R) -> R {
        f(&mut self.state())
    }

    /// Switch to `table` and load it. Returns whether this response was the
    /// one applied; `false` means a newer selection superseded it.
    pub async fn select_table(&self, table: &str) -> bool {
        let ticket = self.state().select_table(table);
        let result = self
            .backend
            .list_rows(table, BROWSE_DEFAULT_LIMIT, None, false)
            .await
            .map_err(|e| e.to_string());
        let applied = self.state().finish_load(&ticket, result);
        if !applied {
            tracing::debug!(table = %table, generation = ticket.generation, "Dropped stale table response");
        }
        applied
    }

    /// Reload the current table, keeping filter, sort and page.
    pub async fn reload(&self) -> Result<bool, ConsoleError> {
        let ticket = self.state().reload().ok_or(ConsoleError::NoTable)?;
        let result = self
            .backend
            .list_rows(&ticket.table, BROWSE_DEFAULT_LIMIT, None, false)
            .await
            .map_err(|e| e.to_string());
        Ok(self.state().finish_load(&ticket, result))
    }

    /// Whether insert, edit and delete controls are offered for the
    /// current table.
    pub fn can_mutate(&self) -> bool {
        self.state()
            .table()
            .and_then(find_table)
            .is_some_and(shows_mutation_controls)
    }

    fn editable_table(&self) -> Result<String, ConsoleError> {
        let table = self
            .state()
            .table()
            .map(str::to_string)
            .ok_or(ConsoleError::NoTable)?;
        if !self.can_mutate() {
            return Err(ConsoleError::ReadOnly(table));
        }
        Ok(table)
    }

    pub async fn insert(&self, fields: &Row) -> Result<Row, ConsoleError> {
        let table = self.editable_table()?;
        let row = self.backend.insert_row(&table, fields).await?;
        self.reload().await?;
        Ok(row)
    }

    pub async fn update(&self, id: &str, fields: &Row) -> Result<Row, ConsoleError> {
        let table = self.editable_table()?;
        let row = self.backend.update_row(&table, id, fields).await?;
        self.reload().await?;
        Ok(row)
    }

    pub async fn delete(&self, id: &str) -> Result<(), ConsoleError> {
        let table = self.editable_table()?;
        self.backend.delete_row(&table, id).await?;
        self.state().deselect(&[id.to_string()]);
        self.reload().await?;
        Ok(())
    }

    /// Delete every selected row, one request at a time.
    ///
    /// A failed delete does not stop the batch. Deleted ids leave the
    /// selection; failed ones stay selected so they can be retried.
    pub async fn bulk_delete(&self) -> Result<BulkDeleteReport, ConsoleError> {
        let table = self.editable_table()?;
        let ids = self.state().selection().ids();

        let mut report = BulkDeleteReport::default();
        for id in ids {
            match self.backend.delete_row(&table, &id).await {
                Ok(()) => report.deleted.push(id),
                Err(e) => {
                    tracing::warn!(table = %table, id = %id, error = %e, "Bulk delete item failed");
                    report.failed.push((id, e.to_string()));
                }
            }
        }

        self.state().deselect(&report.deleted);
        self.reload().await?;
        Ok(report)
    }

    /// CSV of the filtered, sorted rows across all pages.
    pub fn export_csv(&self) -> String {
        self.state().export_csv()
    }
}
