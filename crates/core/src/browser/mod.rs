//! Client-side table browsing: paging, filtering, sorting, selection and
//! CSV export over a fetched row set, plus the load state machine.

pub mod export;
pub mod selection;
pub mod state;
pub mod view;

pub use export::{columns_of, to_csv};
pub use selection::Selection;
pub use state::{BrowserState, LoadPhase, LoadTicket, RowSet};
pub use view::{derive_view, filtered_sorted, natural_cmp, page_count, SortState, TableView, PAGE_SIZE};
