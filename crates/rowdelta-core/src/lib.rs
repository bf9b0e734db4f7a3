//! rowdelta core - row-level change tracking for relational data
//!
//! This crate provides:
//! - A value model that classifies captured data and compares it with
//!   expected literals across representations
//! - Row, column and snapshot views of one capture
//! - Table and request data-source descriptors
//! - The snapshot capture component and the [`snapshot::RowProvider`] seam
//! - The diff engine classifying creations, modifications and deletions
//! - The [`Changes`] start/end lifecycle
//!
//! Database access lives in `rowdelta-store`.

pub mod changes;
pub mod config;
pub mod diff;
pub mod errors;
pub mod logging_facility;
pub mod model;
pub mod snapshot;
pub mod value;

// Re-export commonly used types
pub use changes::Changes;
pub use config::{CaptureConfig, CaseComparison, CaseConversion, LetterCase};
pub use diff::diff_snapshots;
pub use errors::{DeltaError, ExError, ExErrorKind, Result};
pub use model::{Change, ChangeType, Column, DataSource, RequestSource, Row, TableSource};
pub use snapshot::{MemoryProvider, RowProvider, RowSet, Snapshot, SnapshotCapture};
pub use value::{
    Comparison, DateTimeValue, DateValue, Expected, RawValue, TimeValue, Value, ValueType,
};
