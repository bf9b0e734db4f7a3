//! rowdelta store - SQLite row provider
//!
//! Provides:
//! - Connection helpers (`db`)
//! - [`SqliteProvider`], a [`rowdelta_core::RowProvider`] reading tables,
//!   parameterized queries and schema metadata through `rusqlite`

pub mod db;
pub mod errors;
pub mod provider;

// Re-export key types
pub use errors::Result;
pub use provider::SqliteProvider;
