//! Rows of one capture.

use crate::config::LetterCase;
use crate::errors::{DeltaError, Result};
use crate::value::Value;
use serde::Serialize;
use std::sync::Arc;

/// Column layout shared by every row of one capture.
#[derive(Debug, Clone, PartialEq)]
pub struct RowLayout {
    source_name: String,
    column_names: Vec<String>,
    pk_names: Vec<String>,
    pk_indexes: Vec<usize>,
    column_case: LetterCase,
}

impl RowLayout {
    /// Build a layout; every primary-key name must resolve to a column.
    ///
    /// # Errors
    ///
    /// `PrimaryKeyColumnMissing` if a key column is not among `column_names`
    pub fn new(
        source_name: impl Into<String>,
        column_names: Vec<String>,
        pk_names: Vec<String>,
        column_case: LetterCase,
    ) -> Result<Self> {
        let source_name = source_name.into();
        let pk_indexes = pk_names
            .iter()
            .map(|pk| {
                column_case.position(&column_names, pk).ok_or_else(|| {
                    DeltaError::PrimaryKeyColumnMissing {
                        source_name: source_name.clone(),
                        column: pk.clone(),
                    }
                })
            })
            .collect::<Result<Vec<_>>>()?;
        // Key names take the captured spelling.
        let pk_names = pk_indexes.iter().map(|&i| column_names[i].clone()).collect();
        Ok(Self {
            source_name,
            column_names,
            pk_names,
            pk_indexes,
            column_case,
        })
    }

    pub fn source_name(&self) -> &str {
        &self.source_name
    }

    pub fn column_names(&self) -> &[String] {
        &self.column_names
    }

    pub fn pk_names(&self) -> &[String] {
        &self.pk_names
    }

    pub fn pk_indexes(&self) -> &[usize] {
        &self.pk_indexes
    }

    pub fn is_pk_index(&self, index: usize) -> bool {
        self.pk_indexes.contains(&index)
    }

    /// # Errors
    ///
    /// `ColumnNotFound` if no captured column matches `name`
    pub fn index_of(&self, name: &str) -> Result<usize> {
        self.column_case
            .position(&self.column_names, name)
            .ok_or_else(|| DeltaError::ColumnNotFound {
                source_name: self.source_name.clone(),
                column: name.to_string(),
            })
    }

    pub fn len(&self) -> usize {
        self.column_names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.column_names.is_empty()
    }
}

/// One record at one point in time.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Row {
    #[serde(skip)]
    layout: Arc<RowLayout>,
    index: usize,
    values: Vec<Value>,
}

impl Row {
    /// # Errors
    ///
    /// `ColumnCountMismatch` if `values` does not match the layout
    pub fn new(layout: Arc<RowLayout>, index: usize, values: Vec<Value>) -> Result<Self> {
        if values.len() != layout.len() {
            return Err(DeltaError::ColumnCountMismatch {
                source_name: layout.source_name().to_string(),
                row_index: index,
                expected: layout.len(),
                actual: values.len(),
            });
        }
        Ok(Self {
            layout,
            index,
            values,
        })
    }

    pub fn layout(&self) -> &Arc<RowLayout> {
        &self.layout
    }

    /// Position of this row in its capture
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn values(&self) -> &[Value] {
        &self.values
    }

    pub fn column_names(&self) -> &[String] {
        self.layout.column_names()
    }

    pub fn pk_names(&self) -> &[String] {
        self.layout.pk_names()
    }

    pub fn pk_values(&self) -> Vec<&Value> {
        self.layout
            .pk_indexes()
            .iter()
            .map(|&i| &self.values[i])
            .collect()
    }

    /// # Errors
    ///
    /// `ColumnIndexOutOfRange` if `index` is past the last column
    pub fn value(&self, index: usize) -> Result<&Value> {
        self.values
            .get(index)
            .ok_or_else(|| DeltaError::ColumnIndexOutOfRange {
                source_name: self.layout.source_name().to_string(),
                index,
                len: self.values.len(),
            })
    }

    /// # Errors
    ///
    /// `ColumnNotFound` if no captured column matches `name`
    pub fn value_by_name(&self, name: &str) -> Result<&Value> {
        let index = self.layout.index_of(name)?;
        self.value(index)
    }

    /// Whether every value equals the other row's value at the same position
    pub fn has_same_values(&self, other: &Row) -> bool {
        self.values.len() == other.values.len()
            && self
                .values
                .iter()
                .zip(&other.values)
                .all(|(a, b)| a.same_as(b))
    }
}
