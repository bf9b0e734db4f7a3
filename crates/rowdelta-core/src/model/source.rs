//! Data-source descriptors: what a snapshot captures.

use crate::errors::{DeltaError, Result};
use crate::value::RawValue;
use serde::Serialize;

/// A table, with its primary key discovered from schema metadata.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableSource {
    name: String,
    columns_to_check: Option<Vec<String>>,
    columns_to_exclude: Vec<String>,
}

impl TableSource {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            columns_to_check: None,
            columns_to_exclude: Vec::new(),
        }
    }

    /// Restrict capture to these columns (primary-key columns are always kept)
    pub fn with_columns_to_check<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.columns_to_check = Some(columns.into_iter().map(Into::into).collect());
        self
    }

    /// Drop these columns from capture (primary-key columns are always kept)
    pub fn with_columns_to_exclude<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.columns_to_exclude = columns.into_iter().map(Into::into).collect();
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn columns_to_check(&self) -> Option<&[String]> {
        self.columns_to_check.as_deref()
    }

    pub fn columns_to_exclude(&self) -> &[String] {
        &self.columns_to_exclude
    }
}

impl From<&str> for TableSource {
    fn from(name: &str) -> Self {
        TableSource::new(name)
    }
}

impl From<String> for TableSource {
    fn from(name: String) -> Self {
        TableSource::new(name)
    }
}

/// An arbitrary query. Its primary key must be assigned explicitly.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RequestSource {
    sql: String,
    parameters: Vec<RawValue>,
    pk_columns: Option<Vec<String>>,
}

impl RequestSource {
    pub fn new(sql: impl Into<String>) -> Self {
        Self {
            sql: sql.into(),
            parameters: Vec::new(),
            pk_columns: None,
        }
    }

    pub fn with_parameters(mut self, parameters: Vec<RawValue>) -> Self {
        self.parameters = parameters;
        self
    }

    /// Assign the primary-key columns, in key order
    ///
    /// # Errors
    ///
    /// `BlankPrimaryKeyName` if any name is empty or whitespace
    pub fn with_primary_key<I, S>(mut self, columns: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let columns: Vec<String> = columns.into_iter().map(Into::into).collect();
        if let Some(position) = columns.iter().position(|c| c.trim().is_empty()) {
            return Err(DeltaError::BlankPrimaryKeyName {
                source_name: self.sql.clone(),
                position,
            });
        }
        self.pk_columns = Some(columns);
        Ok(self)
    }

    pub fn sql(&self) -> &str {
        &self.sql
    }

    pub fn parameters(&self) -> &[RawValue] {
        &self.parameters
    }

    pub fn pk_columns(&self) -> Option<&[String]> {
        self.pk_columns.as_deref()
    }
}

/// Anything a [`crate::Changes`] can monitor.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DataSource {
    Table(TableSource),
    Request(RequestSource),
}

impl DataSource {
    pub fn table(name: impl Into<String>) -> Self {
        DataSource::Table(TableSource::new(name))
    }

    /// Identity of the source: the table name or the query text
    pub fn name(&self) -> &str {
        match self {
            DataSource::Table(t) => t.name(),
            DataSource::Request(r) => r.sql(),
        }
    }

    /// Fail fast on sources that cannot be diffed
    ///
    /// # Errors
    ///
    /// `PrimaryKeyUnassigned` for a request without a primary key
    pub fn validate(&self) -> Result<()> {
        match self {
            DataSource::Table(_) => Ok(()),
            DataSource::Request(r) if r.pk_columns().map_or(true, <[String]>::is_empty) => {
                Err(DeltaError::PrimaryKeyUnassigned {
                    source_name: r.sql().to_string(),
                })
            }
            DataSource::Request(_) => Ok(()),
        }
    }
}

impl From<TableSource> for DataSource {
    fn from(t: TableSource) -> Self {
        DataSource::Table(t)
    }
}

impl From<RequestSource> for DataSource {
    fn from(r: RequestSource) -> Self {
        DataSource::Request(r)
    }
}
