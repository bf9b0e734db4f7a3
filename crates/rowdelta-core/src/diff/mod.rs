//! Snapshot diff engine.
//!
//! Pairs the rows of two snapshots of one data source by primary-key tuple
//! and classifies each difference as a [`crate::model::Change`].
//!
//! ## Entry point
//!
//! ```ignore
//! use rowdelta_core::diff::diff_snapshots;
//!
//! let changes = diff_snapshots(&at_start, &at_end)?;
//! ```
//!
//! ## Guarantees
//!
//! - **Determinism**: identical inputs produce an identical change list.
//! - **Representation independence**: a column whose value changes only in
//!   representation (`1` to `1.0`) is not modified.
//! - **Key integrity**: a repeated key tuple fails the pass rather than
//!   pairing rows arbitrarily.

pub mod engine;
mod key;

pub use engine::diff_snapshots;
