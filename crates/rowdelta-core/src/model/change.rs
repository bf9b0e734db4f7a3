//! Detected row-level changes.

use crate::model::Row;
use crate::value::Value;
use serde::Serialize;

/// Classification of a change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ChangeType {
    /// Absent at the start point, present at the end point
    Creation,
    /// Present at both points with at least one differing column
    Modification,
    /// Present at the start point, absent at the end point
    Deletion,
}

impl std::fmt::Display for ChangeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            ChangeType::Creation => "CREATION",
            ChangeType::Modification => "MODIFICATION",
            ChangeType::Deletion => "DELETION",
        })
    }
}

/// One primary-key identity's before/after pair.
///
/// At least one of the two rows is always present; the type is derived from
/// which ones are.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Change {
    source_name: String,
    change_type: ChangeType,
    pk_names: Vec<String>,
    pk_values: Vec<Value>,
    row_at_start: Option<Row>,
    row_at_end: Option<Row>,
    modified_columns: Vec<usize>,
}

impl Change {
    pub(crate) fn creation(end: Row) -> Self {
        Self::build(ChangeType::Creation, &end, None, Some(end.clone()), Vec::new())
    }

    pub(crate) fn deletion(start: Row) -> Self {
        Self::build(ChangeType::Deletion, &start, Some(start.clone()), None, Vec::new())
    }

    /// Key values are taken from the end row; they match the start row's by construction.
    pub(crate) fn modification(start: Row, end: Row, modified_columns: Vec<usize>) -> Self {
        Self::build(
            ChangeType::Modification,
            &end,
            Some(start),
            Some(end.clone()),
            modified_columns,
        )
    }

    fn build(
        change_type: ChangeType,
        identity: &Row,
        row_at_start: Option<Row>,
        row_at_end: Option<Row>,
        modified_columns: Vec<usize>,
    ) -> Self {
        Self {
            source_name: identity.layout().source_name().to_string(),
            change_type,
            pk_names: identity.pk_names().to_vec(),
            pk_values: identity.pk_values().into_iter().cloned().collect(),
            row_at_start,
            row_at_end,
            modified_columns,
        }
    }

    /// Identity of the data source the change belongs to
    pub fn source_name(&self) -> &str {
        &self.source_name
    }

    pub fn change_type(&self) -> ChangeType {
        self.change_type
    }

    pub fn pk_names(&self) -> &[String] {
        &self.pk_names
    }

    pub fn pk_values(&self) -> &[Value] {
        &self.pk_values
    }

    pub fn row_at_start(&self) -> Option<&Row> {
        self.row_at_start.as_ref()
    }

    pub fn row_at_end(&self) -> Option<&Row> {
        self.row_at_end.as_ref()
    }

    /// Indexes of the non-key columns whose values differ (modifications only)
    pub fn modified_column_indexes(&self) -> &[usize] {
        &self.modified_columns
    }

    pub fn modified_column_names(&self) -> Vec<&str> {
        let Some(row) = self.row_at_end.as_ref().or(self.row_at_start.as_ref()) else {
            return Vec::new();
        };
        self.modified_columns
            .iter()
            .map(|&i| row.column_names()[i].as_str())
            .collect()
    }

    pub fn modified_column_count(&self) -> usize {
        self.modified_columns.len()
    }
}
