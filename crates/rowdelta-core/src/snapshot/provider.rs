//! The read capability a capture is built on.

use crate::errors::Result;
use crate::model::DataSource;
use crate::value::RawValue;

/// Column names plus raw rows, in the order the provider returned them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RowSet {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<RawValue>>,
}

impl RowSet {
    pub fn new<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            columns: columns.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    pub fn with_row(mut self, row: Vec<RawValue>) -> Self {
        self.rows.push(row);
        self
    }
}

/// Synchronous access to an external data store.
///
/// Implementations perform reads only. Errors are returned as
/// [`crate::DeltaError::DataAccess`] and are never retried by the core.
pub trait RowProvider {
    /// Every currently visible record of `source`, in natural column order
    fn read(&self, source: &DataSource) -> Result<RowSet>;

    /// Primary-key column names of `table`, in key order; empty when the
    /// table has none
    fn primary_key_columns(&self, table: &str) -> Result<Vec<String>>;

    /// Names of every table the store exposes
    fn table_names(&self) -> Result<Vec<String>>;
}

impl<P: RowProvider + ?Sized> RowProvider for &P {
    fn read(&self, source: &DataSource) -> Result<RowSet> {
        (**self).read(source)
    }

    fn primary_key_columns(&self, table: &str) -> Result<Vec<String>> {
        (**self).primary_key_columns(table)
    }

    fn table_names(&self) -> Result<Vec<String>> {
        (**self).table_names()
    }
}
