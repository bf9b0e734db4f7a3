//! Column view over the rows of one capture.

use crate::errors::{DeltaError, Result};
use crate::value::Value;

/// The values of one field across every row of a capture, in row order.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    source_name: String,
    name: String,
    index: usize,
    values: Vec<Value>,
}

impl Column {
    pub(crate) fn new(source_name: String, name: String, index: usize, values: Vec<Value>) -> Self {
        Self {
            source_name,
            name,
            index,
            values,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Position of this column in the capture
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn values(&self) -> &[Value] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// # Errors
    ///
    /// `RowIndexOutOfRange` if `row_index` is past the last row
    pub fn value(&self, row_index: usize) -> Result<&Value> {
        self.values
            .get(row_index)
            .ok_or_else(|| DeltaError::RowIndexOutOfRange {
                source_name: self.source_name.clone(),
                index: row_index,
                len: self.values.len(),
            })
    }
}
