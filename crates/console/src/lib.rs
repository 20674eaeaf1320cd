//! Client library for the admin back office.
//!
//! Everything here talks to the server through the [`backend::Backend`]
//! trait; [`backend::HttpBackend`] is the production implementation.

pub mod backend;
pub mod browser;
pub mod danger_zone;
pub mod error;
pub mod session;
pub mod sql_editor;

#[cfg(test)]
pub(crate) mod fake;

pub use backend::{Backend, HttpBackend, SqlOutcome};
pub use browser::{BulkDeleteReport, TableBrowser};
pub use danger_zone::DangerZone;
pub use error::ConsoleError;
pub use session::Session;
pub use sql_editor::{QueryResult, SqlEditor};
