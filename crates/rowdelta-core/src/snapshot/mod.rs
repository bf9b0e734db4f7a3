//! Snapshot capture.
//!
//! ## Responsibilities
//!
//! - Read a data source through a [`RowProvider`] at one point in time
//! - Normalize names and resolve primary keys with one fixed [`crate::config::CaptureConfig`]
//! - Validate row widths and key values before the diff ever sees them
//!
//! ## Non-Responsibilities
//!
//! - SQL execution and schema metadata (handled by `rowdelta-store` or any
//!   other [`RowProvider`])
//! - Lifecycle logging (owned by [`crate::Changes`])

pub mod capture;
pub mod memory;
pub mod model;
pub mod provider;

pub use capture::SnapshotCapture;
pub use memory::MemoryProvider;
pub use model::Snapshot;
pub use provider::{RowProvider, RowSet};
