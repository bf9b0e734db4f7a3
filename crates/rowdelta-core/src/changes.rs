//! Start/end change tracking over a set of data sources.
//!
//! ## Logging Ownership
//!
//! `Changes` owns lifecycle logging for a cycle:
//! - `log_op_start!` at entry of `mark_start` / `mark_end`
//! - `log_op_end!` on success
//! - `log_op_error!` on failure
//!
//! Capture and diff use only `tracing::debug!()` for internal details.

use crate::config::CaptureConfig;
use crate::diff::diff_snapshots;
use crate::errors::{DeltaError, Result};
use crate::model::{Change, ChangeType, DataSource, RequestSource, TableSource};
use crate::snapshot::{RowProvider, Snapshot, SnapshotCapture};
use crate::{log_op_end, log_op_error, log_op_start};
use chrono::{DateTime, Utc};
use rowdelta_core_types::CycleId;

#[derive(Debug, Clone)]
enum Scope {
    Sources(Vec<DataSource>),
    Database,
}

#[derive(Debug, Clone)]
struct Cycle {
    id: CycleId,
    sources: Vec<DataSource>,
    started_at: DateTime<Utc>,
    at_start: Vec<Snapshot>,
    ended_at: Option<DateTime<Utc>>,
    at_end: Vec<Snapshot>,
    changes: Vec<Change>,
}

/// The changes made to monitored data sources between a start point and an
/// end point.
///
/// ```ignore
/// let mut changes = Changes::on_tables(provider, ["movie"]);
/// changes.mark_start()?;
/// // mutate the store
/// changes.mark_end()?;
/// assert_eq!(changes.count()?, 3);
/// ```
///
/// A new `mark_start` discards the previous cycle entirely.
#[derive(Debug)]
pub struct Changes<P: RowProvider> {
    provider: P,
    capture: SnapshotCapture,
    scope: Scope,
    cycle: Option<Cycle>,
}

impl<P: RowProvider> Changes<P> {
    /// Monitor the given tables, in this order
    pub fn on_tables<I, T>(provider: P, tables: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<TableSource>,
    {
        let sources = tables
            .into_iter()
            .map(|t| DataSource::Table(t.into()))
            .collect();
        Self::on_sources(provider, sources)
    }

    /// Monitor one query
    pub fn on_request(provider: P, request: RequestSource) -> Self {
        Self::on_sources(provider, vec![DataSource::Request(request)])
    }

    /// Monitor any mix of tables and queries, in this order
    pub fn on_sources(provider: P, sources: Vec<DataSource>) -> Self {
        Self::with_scope(provider, Scope::Sources(sources))
    }

    /// Monitor every table the provider lists when the start point is marked
    pub fn on_database(provider: P) -> Self {
        Self::with_scope(provider, Scope::Database)
    }

    fn with_scope(provider: P, scope: Scope) -> Self {
        Self {
            provider,
            capture: SnapshotCapture::default(),
            scope,
            cycle: None,
        }
    }

    /// Replace the capture configuration; clears any resolved primary keys
    pub fn with_config(mut self, config: CaptureConfig) -> Self {
        self.capture = SnapshotCapture::new(config);
        self
    }

    pub fn config(&self) -> &CaptureConfig {
        self.capture.config()
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Mutable access to the provider, e.g. to change an in-memory fixture
    /// between the two points
    pub fn provider_mut(&mut self) -> &mut P {
        &mut self.provider
    }

    /// Capture every monitored source and begin a new cycle.
    ///
    /// Request keys are validated before anything is read.
    ///
    /// # Errors
    ///
    /// - `NoDataSource` if the source list is empty
    /// - `PrimaryKeyUnassigned` for a request without a key
    /// - any capture error
    pub fn mark_start(&mut self) -> Result<()> {
        let cycle_id = CycleId::new();
        log_op_start!("changes_mark_start", cycle_id = %cycle_id);
        let start = std::time::Instant::now();

        let cycle = self.mark_start_impl(cycle_id.clone()).map_err(|e| {
            log_op_error!(
                "changes_mark_start",
                e.clone(),
                duration_ms = start.elapsed().as_millis() as u64,
                cycle_id = %cycle_id
            );
            e
        })?;

        log_op_end!(
            "changes_mark_start",
            duration_ms = start.elapsed().as_millis() as u64,
            cycle_id = %cycle_id,
            source_count = cycle.sources.len()
        );
        self.cycle = Some(cycle);
        Ok(())
    }

    fn mark_start_impl(&mut self, id: CycleId) -> Result<Cycle> {
        // A failed start leaves no cycle behind.
        self.cycle = None;

        let sources = match &self.scope {
            Scope::Sources(sources) if sources.is_empty() => return Err(DeltaError::NoDataSource),
            Scope::Sources(sources) => sources.clone(),
            Scope::Database => self
                .provider
                .table_names()?
                .into_iter()
                .map(DataSource::table)
                .collect(),
        };
        for source in &sources {
            source.validate()?;
        }

        let started_at = Utc::now();
        let at_start = self.capture_all(&sources)?;

        Ok(Cycle {
            id,
            sources,
            started_at,
            at_start,
            ended_at: None,
            at_end: Vec::new(),
            changes: Vec::new(),
        })
    }

    /// Capture every source again and compute the changes since the start
    /// point. Marking the end twice re-diffs against the same start point.
    ///
    /// # Errors
    ///
    /// - `StartNotMarked` if no cycle is open
    /// - any capture or diff error; the previous end state is kept
    pub fn mark_end(&mut self) -> Result<()> {
        let cycle_id = self.cycle_id().map(|c| c.to_string()).unwrap_or_default();
        log_op_start!("changes_mark_end", cycle_id = %cycle_id);
        let start = std::time::Instant::now();

        let count = self.mark_end_impl().map_err(|e| {
            log_op_error!(
                "changes_mark_end",
                e.clone(),
                duration_ms = start.elapsed().as_millis() as u64,
                cycle_id = %cycle_id
            );
            e
        })?;

        log_op_end!(
            "changes_mark_end",
            duration_ms = start.elapsed().as_millis() as u64,
            cycle_id = %cycle_id,
            change_count = count
        );
        Ok(())
    }

    fn mark_end_impl(&mut self) -> Result<usize> {
        let sources = match &self.cycle {
            Some(cycle) => cycle.sources.clone(),
            None => return Err(DeltaError::StartNotMarked),
        };

        let ended_at = Utc::now();
        let at_end = self.capture_all(&sources)?;

        let cycle = self.cycle.as_mut().ok_or(DeltaError::StartNotMarked)?;
        let mut changes = Vec::new();
        for (before, after) in cycle.at_start.iter().zip(&at_end) {
            changes.extend(diff_snapshots(before, after)?);
        }

        let count = changes.len();
        cycle.ended_at = Some(ended_at);
        cycle.at_end = at_end;
        cycle.changes = changes;
        Ok(count)
    }

    fn capture_all(&mut self, sources: &[DataSource]) -> Result<Vec<Snapshot>> {
        sources
            .iter()
            .map(|source| self.capture.capture(&self.provider, source))
            .collect()
    }

    /// The monitored sources. For [`Changes::on_database`] they are known
    /// only once the start point is marked.
    pub fn sources(&self) -> &[DataSource] {
        match (&self.cycle, &self.scope) {
            (Some(cycle), _) => &cycle.sources,
            (None, Scope::Sources(sources)) => sources,
            (None, Scope::Database) => &[],
        }
    }

    pub fn cycle_id(&self) -> Option<&CycleId> {
        self.cycle.as_ref().map(|c| &c.id)
    }

    pub fn started_at(&self) -> Option<DateTime<Utc>> {
        self.cycle.as_ref().map(|c| c.started_at)
    }

    pub fn ended_at(&self) -> Option<DateTime<Utc>> {
        self.cycle.as_ref().and_then(|c| c.ended_at)
    }

    /// Snapshots taken at the start point, one per source
    pub fn snapshots_at_start(&self) -> Option<&[Snapshot]> {
        self.cycle.as_ref().map(|c| c.at_start.as_slice())
    }

    /// Snapshots taken at the end point, one per source
    pub fn snapshots_at_end(&self) -> Option<&[Snapshot]> {
        self.cycle
            .as_ref()
            .filter(|c| c.ended_at.is_some())
            .map(|c| c.at_end.as_slice())
    }

    /// Every change of the current cycle, sources in registration order.
    ///
    /// # Errors
    ///
    /// `EndNotMarked` until `mark_end` succeeds for the current cycle
    pub fn changes(&self) -> Result<&[Change]> {
        match &self.cycle {
            Some(cycle) if cycle.ended_at.is_some() => Ok(&cycle.changes),
            _ => Err(DeltaError::EndNotMarked),
        }
    }

    /// # Errors
    ///
    /// `EndNotMarked` until `mark_end` succeeds for the current cycle
    pub fn count(&self) -> Result<usize> {
        Ok(self.changes()?.len())
    }

    /// # Errors
    ///
    /// `EndNotMarked` until `mark_end` succeeds for the current cycle
    pub fn changes_of_type(&self, change_type: ChangeType) -> Result<Vec<&Change>> {
        Ok(self
            .changes()?
            .iter()
            .filter(|c| c.change_type() == change_type)
            .collect())
    }

    /// Changes of one source, matched with the table letter-case policy
    ///
    /// # Errors
    ///
    /// `EndNotMarked` until `mark_end` succeeds for the current cycle
    pub fn changes_of_source(&self, source_name: &str) -> Result<Vec<&Change>> {
        let case = self.capture.config().table_case;
        Ok(self
            .changes()?
            .iter()
            .filter(|c| case.is_equal(c.source_name(), source_name))
            .collect())
    }

    /// # Errors
    ///
    /// `EndNotMarked` until `mark_end` succeeds for the current cycle
    pub fn creations(&self) -> Result<Vec<&Change>> {
        self.changes_of_type(ChangeType::Creation)
    }

    /// # Errors
    ///
    /// `EndNotMarked` until `mark_end` succeeds for the current cycle
    pub fn modifications(&self) -> Result<Vec<&Change>> {
        self.changes_of_type(ChangeType::Modification)
    }

    /// # Errors
    ///
    /// `EndNotMarked` until `mark_end` succeeds for the current cycle
    pub fn deletions(&self) -> Result<Vec<&Change>> {
        self.changes_of_type(ChangeType::Deletion)
    }
}
