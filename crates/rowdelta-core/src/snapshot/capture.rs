//! Snapshot capture component.
//!
//! Turns a provider's [`RowSet`] into a [`Snapshot`]: names are normalized
//! with the configured letter-case policies, table columns are projected to
//! the checked set, and primary keys are resolved and validated.

use crate::config::CaptureConfig;
use crate::errors::{DeltaError, Result};
use crate::model::{DataSource, RowLayout};
use crate::snapshot::model::Snapshot;
use crate::snapshot::provider::RowProvider;
use crate::value::RawValue;
use std::collections::HashMap;
use std::sync::Arc;

/// Captures snapshots with one fixed configuration.
///
/// Primary keys of tables are read from the provider's metadata once and
/// cached for the lifetime of the component.
#[derive(Debug, Clone, Default)]
pub struct SnapshotCapture {
    config: CaptureConfig,
    pk_cache: HashMap<String, Vec<String>>,
}

impl SnapshotCapture {
    pub fn new(config: CaptureConfig) -> Self {
        Self {
            config,
            pk_cache: HashMap::new(),
        }
    }

    pub fn config(&self) -> &CaptureConfig {
        &self.config
    }

    /// Identity under which snapshots of `source` are recorded
    pub fn source_name(&self, source: &DataSource) -> String {
        match source {
            DataSource::Table(t) => self.config.table_case.convert(t.name()),
            DataSource::Request(r) => r.sql().to_string(),
        }
    }

    /// Primary-key columns of `source`, as declared (before case conversion).
    ///
    /// # Errors
    ///
    /// - `PrimaryKeyUnassigned` for a request without a key
    /// - whatever the provider returns for a failed metadata read
    pub fn primary_key_columns<P: RowProvider + ?Sized>(
        &mut self,
        provider: &P,
        source: &DataSource,
    ) -> Result<Vec<String>> {
        match source {
            DataSource::Request(r) => match r.pk_columns() {
                Some(pk) if !pk.is_empty() => Ok(pk.to_vec()),
                _ => Err(DeltaError::PrimaryKeyUnassigned {
                    source_name: r.sql().to_string(),
                }),
            },
            DataSource::Table(t) => {
                let key = self.config.table_case.convert(t.name());
                if let Some(pk) = self.pk_cache.get(&key) {
                    return Ok(pk.clone());
                }
                let pk = provider.primary_key_columns(t.name())?;
                tracing::debug!(table = %key, pk_count = pk.len(), "primary key resolved");
                self.pk_cache.insert(key, pk.clone());
                Ok(pk)
            }
        }
    }

    pub fn clear_primary_key_cache(&mut self) {
        self.pk_cache.clear();
    }

    /// Read `source` through `provider` and materialize it.
    ///
    /// # Errors
    ///
    /// - `PrimaryKeyUnassigned` for a request without a key
    /// - `PrimaryKeyColumnMissing` if a key column is not among the read columns
    /// - `ColumnCountMismatch` if a row does not match the column list
    /// - `NullPrimaryKeyValue` if a key column holds null
    /// - `DataAccess` if the read fails
    pub fn capture<P: RowProvider + ?Sized>(
        &mut self,
        provider: &P,
        source: &DataSource,
    ) -> Result<Snapshot> {
        source.validate()?;
        let source_name = self.source_name(source);
        let declared_pk = self.primary_key_columns(provider, source)?;
        let set = provider.read(source)?;

        for (row_index, row) in set.rows.iter().enumerate() {
            if row.len() != set.columns.len() {
                return Err(DeltaError::ColumnCountMismatch {
                    source_name: source_name.clone(),
                    row_index,
                    expected: set.columns.len(),
                    actual: row.len(),
                });
            }
        }

        let kept = self.projection(source, &set.columns, &declared_pk);
        let column_names = set
            .columns
            .iter()
            .zip(&kept)
            .filter(|(_, keep)| **keep)
            .map(|(name, _)| self.config.column_case.convert(name))
            .collect();
        let pk_names = declared_pk
            .iter()
            .map(|name| self.config.primary_key_case.convert(name))
            .collect();
        let layout = Arc::new(RowLayout::new(
            source_name,
            column_names,
            pk_names,
            self.config.column_case,
        )?);

        let rows = if kept.iter().all(|k| *k) {
            set.rows
        } else {
            set.rows
                .into_iter()
                .map(|row| project(row, &kept))
                .collect()
        };

        let snapshot = Snapshot::from_raw_rows(layout, rows)?;
        tracing::debug!(
            source = snapshot.source_name(),
            row_count = snapshot.len(),
            column_count = snapshot.column_names().len(),
            "snapshot captured"
        );
        Ok(snapshot)
    }

    /// Mask of the columns kept for `source`; key columns are always kept.
    fn projection(&self, source: &DataSource, columns: &[String], pk: &[String]) -> Vec<bool> {
        let case = &self.config.column_case;
        let DataSource::Table(table) = source else {
            return vec![true; columns.len()];
        };
        columns
            .iter()
            .map(|name| {
                if pk.iter().any(|p| case.is_equal(p, name)) {
                    return true;
                }
                let checked = table
                    .columns_to_check()
                    .map_or(true, |check| check.iter().any(|c| case.is_equal(c, name)));
                let excluded = table
                    .columns_to_exclude()
                    .iter()
                    .any(|c| case.is_equal(c, name));
                checked && !excluded
            })
            .collect()
    }
}

fn project(row: Vec<RawValue>, kept: &[bool]) -> Vec<RawValue> {
    row.into_iter()
        .zip(kept)
        .filter(|(_, keep)| **keep)
        .map(|(value, _)| value)
        .collect()
}
