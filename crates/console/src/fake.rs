//! In-memory [`Backend`] for controller tests.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, AtomicI64, AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use seatfinder_core::browser::RowSet;
use seatfinder_core::value::{row_id, Row, Value};

use crate::backend::{Backend, SqlOutcome};
use crate::error::ConsoleError;

pub(crate) fn row(pairs: &[(&str, Value)]) -> Row {
    pairs.iter().map(|(k, v)| (k.to_string(), v.clone())).collect()
}

#[derive(Default)]
pub(crate) struct FakeBackend {
    pub tables: Mutex<HashMap<String, RowSet>>,
    pub delays: Mutex<HashMap<String, Duration>>,
    pub failing_ids: Mutex<HashSet<String>>,
    pub list_calls: Mutex<Vec<(String, i64)>>,
    pub executed: Mutex<Vec<String>>,
    pub token: Mutex<Option<String>>,
    pub role_fetches: AtomicUsize,
    pub admin: AtomicBool,
    next_id: AtomicI64,
}

impl FakeBackend {
    pub fn new() -> Self {
        Self {
            next_id: AtomicI64::new(1000),
            ..Self::default()
        }
    }

    pub fn with_table(self, table: &str, columns: &[&str], rows: Vec<Row>) -> Self {
        self.tables.lock().unwrap().insert(
            table.to_string(),
            RowSet {
                columns: columns.iter().map(|c| c.to_string()).collect(),
                rows,
            },
        );
        self
    }

    pub fn delay(&self, table: &str, delay: Duration) {
        self.delays.lock().unwrap().insert(table.to_string(), delay);
    }

    pub fn fail_delete(&self, id: &str) {
        self.failing_ids.lock().unwrap().insert(id.to_string());
    }

    pub fn ids(&self, table: &str) -> Vec<String> {
        self.tables.lock().unwrap()[table]
            .rows
            .iter()
            .filter_map(row_id)
            .collect()
    }

    fn missing(table: &str) -> ConsoleError {
        ConsoleError::Api {
            status: 404,
            message: format!("Table with id {table} not found"),
        }
    }
}

#[async_trait]
impl Backend for FakeBackend {
    fn set_access_token(&self, token: Option<String>) {
        *self.token.lock().unwrap() = token;
    }

    async fn list_rows(
        &self,
        table: &str,
        limit: i64,
        _order: Option<&str>,
        _descending: bool,
    ) -> Result<RowSet, ConsoleError> {
        self.list_calls.lock().unwrap().push((table.to_string(), limit));
        let delay = self.delays.lock().unwrap().get(table).copied();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        let tables = self.tables.lock().unwrap();
        let set = tables.get(table).ok_or_else(|| Self::missing(table))?;
        Ok(RowSet {
            columns: set.columns.clone(),
            rows: set.rows.iter().take(limit as usize).cloned().collect(),
        })
    }

    async fn insert_row(&self, table: &str, fields: &Row) -> Result<Row, ConsoleError> {
        let mut tables = self.tables.lock().unwrap();
        let set = tables.get_mut(table).ok_or_else(|| Self::missing(table))?;
        let mut row = row(&[("id", Value::from(self.next_id.fetch_add(1, Ordering::SeqCst)))]);
        row.extend(fields.clone());
        set.rows.push(row.clone());
        Ok(row)
    }

    async fn update_row(&self, table: &str, id: &str, fields: &Row) -> Result<Row, ConsoleError> {
        let mut tables = self.tables.lock().unwrap();
        let set = tables.get_mut(table).ok_or_else(|| Self::missing(table))?;
        let row = set
            .rows
            .iter_mut()
            .find(|r| row_id(r).as_deref() == Some(id))
            .ok_or_else(|| ConsoleError::Api {
                status: 404,
                message: format!("Row with id {id} not found"),
            })?;
        row.extend(fields.clone());
        Ok(row.clone())
    }

    async fn delete_row(&self, table: &str, id: &str) -> Result<(), ConsoleError> {
        if self.failing_ids.lock().unwrap().contains(id) {
            return Err(ConsoleError::Api {
                status: 400,
                message: "update or delete violates foreign key constraint".to_string(),
            });
        }
        let mut tables = self.tables.lock().unwrap();
        let set = tables.get_mut(table).ok_or_else(|| Self::missing(table))?;
        let before = set.rows.len();
        set.rows.retain(|r| row_id(r).as_deref() != Some(id));
        if set.rows.len() == before {
            return Err(ConsoleError::Api {
                status: 404,
                message: format!("Row with id {id} not found"),
            });
        }
        Ok(())
    }

    async fn fetch_is_admin(&self) -> Result<bool, ConsoleError> {
        self.role_fetches.fetch_add(1, Ordering::SeqCst);
        Ok(self.admin.load(Ordering::SeqCst))
    }

    async fn execute_sql(&self, sql: &str) -> Result<SqlOutcome, ConsoleError> {
        self.executed.lock().unwrap().push(sql.to_string());
        Ok(SqlOutcome {
            rows: Vec::new(),
            exec_ms: 1,
        })
    }
}
