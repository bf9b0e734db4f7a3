//! The materialized state of one data source at one instant.

use crate::errors::{DeltaError, Result};
use crate::model::{Column, Row, RowLayout};
use crate::value::{RawValue, Value};
use chrono::{DateTime, Utc};
use std::sync::Arc;

/// Every row of one data source at one capture point.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    layout: Arc<RowLayout>,
    rows: Vec<Row>,
    captured_at: DateTime<Utc>,
}

impl Snapshot {
    /// Materialize raw rows against `layout`, stamped with the current time.
    ///
    /// # Errors
    ///
    /// - `ColumnCountMismatch` if a row does not have one value per column
    /// - `NullPrimaryKeyValue` if a key column holds null
    pub fn from_raw_rows(layout: Arc<RowLayout>, raw_rows: Vec<Vec<RawValue>>) -> Result<Self> {
        let rows = raw_rows
            .into_iter()
            .enumerate()
            .map(|(row_index, raw)| {
                if raw.len() != layout.len() {
                    return Err(DeltaError::ColumnCountMismatch {
                        source_name: layout.source_name().to_string(),
                        row_index,
                        expected: layout.len(),
                        actual: raw.len(),
                    });
                }
                for &pk in layout.pk_indexes() {
                    if raw[pk].is_null() {
                        return Err(DeltaError::NullPrimaryKeyValue {
                            source_name: layout.source_name().to_string(),
                            column: layout.column_names()[pk].clone(),
                            row_index,
                        });
                    }
                }
                let values = raw
                    .into_iter()
                    .zip(layout.column_names())
                    .map(|(raw, name)| Value::new(raw, name.as_str(), row_index))
                    .collect();
                Row::new(Arc::clone(&layout), row_index, values)
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            layout,
            rows,
            captured_at: Utc::now(),
        })
    }

    pub fn source_name(&self) -> &str {
        self.layout.source_name()
    }

    pub fn layout(&self) -> &Arc<RowLayout> {
        &self.layout
    }

    pub fn captured_at(&self) -> DateTime<Utc> {
        self.captured_at
    }

    pub fn column_names(&self) -> &[String] {
        self.layout.column_names()
    }

    pub fn pk_names(&self) -> &[String] {
        self.layout.pk_names()
    }

    /// Whether rows are identified by a primary key rather than by content
    pub fn has_primary_key(&self) -> bool {
        !self.layout.pk_indexes().is_empty()
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// # Errors
    ///
    /// `RowIndexOutOfRange` if `index` is past the last row
    pub fn row(&self, index: usize) -> Result<&Row> {
        self.rows
            .get(index)
            .ok_or_else(|| DeltaError::RowIndexOutOfRange {
                source_name: self.source_name().to_string(),
                index,
                len: self.rows.len(),
            })
    }

    /// Transpose of the rows, one column per captured field
    pub fn columns(&self) -> Vec<Column> {
        (0..self.layout.len()).map(|i| self.build_column(i)).collect()
    }

    /// # Errors
    ///
    /// `ColumnIndexOutOfRange` if `index` is past the last column
    pub fn column(&self, index: usize) -> Result<Column> {
        if index >= self.layout.len() {
            return Err(DeltaError::ColumnIndexOutOfRange {
                source_name: self.source_name().to_string(),
                index,
                len: self.layout.len(),
            });
        }
        Ok(self.build_column(index))
    }

    /// # Errors
    ///
    /// `ColumnNotFound` if no captured column matches `name`
    pub fn column_by_name(&self, name: &str) -> Result<Column> {
        let index = self.layout.index_of(name)?;
        Ok(self.build_column(index))
    }

    fn build_column(&self, index: usize) -> Column {
        Column::new(
            self.source_name().to_string(),
            self.layout.column_names()[index].clone(),
            index,
            self.rows.iter().map(|r| r.values()[index].clone()).collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LetterCase;

    fn layout() -> Arc<RowLayout> {
        Arc::new(
            RowLayout::new(
                "movie",
                vec!["id".into(), "title".into()],
                vec!["id".into()],
                LetterCase::default(),
            )
            .unwrap(),
        )
    }

    #[test]
    fn test_columns_transpose_rows() {
        let snapshot = Snapshot::from_raw_rows(
            layout(),
            vec![
                vec![RawValue::Int(1), RawValue::from("Test2")],
                vec![RawValue::Int(2), RawValue::from("Test3")],
            ],
        )
        .unwrap();

        let titles = snapshot.column_by_name("TITLE").unwrap();
        assert_eq!(titles.index(), 1);
        assert_eq!(titles.len(), 2);
        assert_eq!(titles.value(1).unwrap().raw(), &RawValue::from("Test3"));
        assert_eq!(titles.value(1).unwrap().row_index(), 1);
        assert!(matches!(
            titles.value(2),
            Err(DeltaError::RowIndexOutOfRange { index: 2, len: 2, .. })
        ));
        assert_eq!(snapshot.columns().len(), 2);
    }

    #[test]
    fn test_null_primary_key_rejected() {
        let err = Snapshot::from_raw_rows(layout(), vec![vec![RawValue::Null, RawValue::from("x")]])
            .unwrap_err();
        assert_eq!(
            err,
            DeltaError::NullPrimaryKeyValue {
                source_name: "movie".into(),
                column: "id".into(),
                row_index: 0,
            }
        );
    }

    #[test]
    fn test_short_row_is_integrity_error() {
        let err = Snapshot::from_raw_rows(layout(), vec![vec![RawValue::Int(1)]]).unwrap_err();
        assert!(matches!(err, DeltaError::ColumnCountMismatch { expected: 2, actual: 1, .. }));
    }

    #[test]
    fn test_out_of_range_access() {
        let snapshot = Snapshot::from_raw_rows(layout(), Vec::new()).unwrap();
        assert!(snapshot.is_empty());
        assert!(matches!(snapshot.row(0), Err(DeltaError::RowIndexOutOfRange { .. })));
        assert!(matches!(
            snapshot.column(2),
            Err(DeltaError::ColumnIndexOutOfRange { .. })
        ));
    }
}
