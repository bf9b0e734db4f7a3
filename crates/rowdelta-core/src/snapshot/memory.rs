//! In-memory row provider for fixtures and tests.

use crate::errors::{DeltaError, Result};
use crate::model::DataSource;
use crate::snapshot::provider::{RowProvider, RowSet};
use crate::value::RawValue;
use std::collections::{BTreeMap, HashMap};

#[derive(Debug, Clone, Default)]
struct MemoryTable {
    name: String,
    pk: Vec<String>,
    data: RowSet,
}

/// Named tables and canned request results held in memory.
///
/// Table names are matched ignoring ASCII case. Rows keep insertion order;
/// requests are answered by their exact SQL text.
#[derive(Debug, Clone, Default)]
pub struct MemoryProvider {
    tables: BTreeMap<String, MemoryTable>,
    requests: HashMap<String, RowSet>,
}

impl MemoryProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create (or replace) an empty table
    pub fn create_table<C, K, S, T>(&mut self, name: &str, columns: C, primary_key: K) -> &mut Self
    where
        C: IntoIterator<Item = S>,
        K: IntoIterator<Item = T>,
        S: Into<String>,
        T: Into<String>,
    {
        let table = MemoryTable {
            name: name.to_string(),
            pk: primary_key.into_iter().map(Into::into).collect(),
            data: RowSet::new(columns),
        };
        self.tables.insert(name.to_ascii_lowercase(), table);
        self
    }

    /// # Errors
    ///
    /// `DataAccess` if the table does not exist or the row has the wrong width
    pub fn insert(&mut self, table: &str, row: Vec<RawValue>) -> Result<()> {
        let t = self.table_mut(table)?;
        if row.len() != t.data.columns.len() {
            return Err(access_error(
                table,
                format!(
                    "{} values supplied for {} columns",
                    row.len(),
                    t.data.columns.len()
                ),
            ));
        }
        t.data.rows.push(row);
        Ok(())
    }

    /// Set `column` to `value` on every row where `key_column` equals `key`.
    /// Returns the number of rows touched.
    ///
    /// # Errors
    ///
    /// `DataAccess` if the table or either column does not exist
    pub fn update_where(
        &mut self,
        table: &str,
        key_column: &str,
        key: &RawValue,
        column: &str,
        value: RawValue,
    ) -> Result<usize> {
        let t = self.table_mut(table)?;
        let key_index = column_index(table, &t.data, key_column)?;
        let target = column_index(table, &t.data, column)?;
        let mut touched = 0;
        for row in t.data.rows.iter_mut().filter(|r| &r[key_index] == key) {
            row[target] = value.clone();
            touched += 1;
        }
        Ok(touched)
    }

    /// Remove every row where `column` equals `value`. Returns the number
    /// of rows removed.
    ///
    /// # Errors
    ///
    /// `DataAccess` if the table or the column does not exist
    pub fn delete_where(&mut self, table: &str, column: &str, value: &RawValue) -> Result<usize> {
        let t = self.table_mut(table)?;
        let index = column_index(table, &t.data, column)?;
        let before = t.data.rows.len();
        t.data.rows.retain(|r| &r[index] != value);
        Ok(before - t.data.rows.len())
    }

    /// Register the rows returned for a request's SQL text
    pub fn set_request_result(&mut self, sql: impl Into<String>, rows: RowSet) -> &mut Self {
        self.requests.insert(sql.into(), rows);
        self
    }

    fn table(&self, name: &str) -> Result<&MemoryTable> {
        self.tables
            .get(&name.to_ascii_lowercase())
            .ok_or_else(|| access_error(name, "no such table"))
    }

    fn table_mut(&mut self, name: &str) -> Result<&mut MemoryTable> {
        self.tables
            .get_mut(&name.to_ascii_lowercase())
            .ok_or_else(|| access_error(name, "no such table"))
    }
}

impl RowProvider for MemoryProvider {
    fn read(&self, source: &DataSource) -> Result<RowSet> {
        match source {
            DataSource::Table(t) => Ok(self.table(t.name())?.data.clone()),
            DataSource::Request(r) => self
                .requests
                .get(r.sql())
                .cloned()
                .ok_or_else(|| access_error(r.sql(), "no result registered for request")),
        }
    }

    fn primary_key_columns(&self, table: &str) -> Result<Vec<String>> {
        Ok(self.table(table)?.pk.clone())
    }

    fn table_names(&self) -> Result<Vec<String>> {
        Ok(self.tables.values().map(|t| t.name.clone()).collect())
    }
}

fn column_index(table: &str, data: &RowSet, column: &str) -> Result<usize> {
    data.columns
        .iter()
        .position(|c| c.eq_ignore_ascii_case(column))
        .ok_or_else(|| access_error(table, format!("no such column: {}", column)))
}

fn access_error(source_name: &str, message: impl Into<String>) -> DeltaError {
    DeltaError::DataAccess {
        source_name: source_name.to_string(),
        message: message.into(),
    }
}
