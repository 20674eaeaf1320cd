//! Per-selection load state of the table browser.
//!
//! `Idle -> Loading -> Loaded`, back to `Loading` on a table change. Each
//! load is stamped with a generation; a result carrying an older generation
//! than the current one belongs to a superseded selection and is dropped,
//! so a slow response can never overwrite a newer table's rows.

use super::export::{columns_of, to_csv};
use super::selection::Selection;
use super::view::{derive_view, filtered_sorted, page_count, SortState, TableView};
use crate::value::{row_id, Row};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadPhase {
    Idle,
    Loading,
    Loaded,
}

/// Issued when a load starts; hand it back with the result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadTicket {
    pub table: String,
    pub generation: u64,
}

/// A fetched row set with its column list in fetch order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RowSet {
    pub columns: Vec<String>,
    pub rows: Vec<Row>,
}

impl RowSet {
    /// Build from rows alone; columns come from the first row.
    pub fn from_rows(rows: Vec<Row>) -> Self {
        Self {
            columns: columns_of(&rows),
            rows,
        }
    }
}

#[derive(Debug, Default)]
pub struct BrowserState {
    table: Option<String>,
    phase: Option<LoadPhase>,
    generation: u64,
    data: RowSet,
    error: Option<String>,
    filter: String,
    sort: SortState,
    page: usize,
    selection: Selection,
}

impl BrowserState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> LoadPhase {
        self.phase.unwrap_or(LoadPhase::Idle)
    }

    pub fn table(&self) -> Option<&str> {
        self.table.as_deref()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn columns(&self) -> &[String] {
        &self.data.columns
    }

    pub fn rows(&self) -> &[Row] {
        &self.data.rows
    }

    pub fn filter(&self) -> &str {
        &self.filter
    }

    pub fn sort(&self) -> &SortState {
        &self.sort
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// Switch to `table` and start loading it.
    ///
    /// Resets the page, sort and selection and discards the previous rows.
    /// The filter text is kept.
    pub fn select_table(&mut self, table: &str) -> LoadTicket {
        self.table = Some(table.to_string());
        self.page = 0;
        self.sort = SortState::default();
        self.selection.clear();
        self.data = RowSet::default();
        self.begin_load()
    }

    /// Reload the current table (after a mutation). `None` when idle.
    pub fn reload(&mut self) -> Option<LoadTicket> {
        self.table.is_some().then(|| self.begin_load())
    }

    fn begin_load(&mut self) -> LoadTicket {
        self.generation += 1;
        self.phase = Some(LoadPhase::Loading);
        self.error = None;
        LoadTicket {
            table: self.table.clone().unwrap_or_default(),
            generation: self.generation,
        }
    }

    /// Deliver the outcome of a load.
    ///
    /// Returns `false` and changes nothing when the ticket is stale.
    pub fn finish_load(&mut self, ticket: &LoadTicket, result: Result<RowSet, String>) -> bool {
        if ticket.generation != self.generation || self.table.as_deref() != Some(ticket.table.as_str()) {
            return false;
        }
        match result {
            Ok(data) => {
                self.data = data;
                self.error = None;
            }
            Err(message) => {
                self.data = RowSet::default();
                self.error = Some(message);
            }
        }
        self.phase = Some(LoadPhase::Loaded);
        true
    }

    /// Back to idle with nothing selected.
    pub fn clear(&mut self) {
        *self = Self {
            generation: self.generation + 1,
            ..Self::default()
        };
    }

    /// Change the search text. The page index is deliberately left alone.
    pub fn set_filter(&mut self, text: &str) {
        self.filter = text.to_string();
    }

    pub fn toggle_sort(&mut self, column: &str) {
        self.sort.toggle(column);
    }

    /// Navigate to `page`, clamped to the last existing page.
    pub fn set_page(&mut self, page: usize) {
        let pages = page_count(filtered_sorted(&self.data.rows, &self.filter, &self.sort).len());
        self.page = page.min(pages.saturating_sub(1));
    }

    pub fn view(&self) -> TableView<'_> {
        derive_view(&self.data.rows, &self.filter, &self.sort, self.page)
    }

    /// Ids of the rows on the current page.
    pub fn visible_ids(&self) -> Vec<String> {
        self.view().rows.into_iter().filter_map(row_id).collect()
    }

    pub fn toggle_row(&mut self, id: &str) {
        self.selection.toggle(id);
    }

    /// "Select all" for the visible page only.
    pub fn toggle_select_page(&mut self) {
        let ids = self.visible_ids();
        self.selection.toggle_page(&ids);
    }

    /// Forget selected ids that were deleted.
    pub fn deselect(&mut self, ids: &[String]) {
        for id in ids {
            self.selection.remove(id);
        }
    }

    /// CSV of the filtered, sorted set (all pages).
    pub fn export_csv(&self) -> String {
        let rows = filtered_sorted(&self.data.rows, &self.filter, &self.sort);
        to_csv(&self.data.columns, &rows)
    }
}
