//! Error handling for rowdelta-store
//!
//! Every `rusqlite` failure becomes a `DataAccess` error of the core
//! taxonomy. Nothing is retried.

use rowdelta_core::errors::DeltaError;

/// Result type alias using the core error
pub type Result<T> = std::result::Result<T, DeltaError>;

/// Source name used for failures not tied to one data source
pub const DATABASE: &str = "database";

/// Wrap a rusqlite error raised while reading `source_name`
pub fn from_rusqlite(source_name: &str, err: rusqlite::Error) -> DeltaError {
    DeltaError::DataAccess {
        source_name: source_name.to_string(),
        message: err.to_string(),
    }
}

/// `map_err` adapter for [`from_rusqlite`]
pub fn access(source_name: &str) -> impl Fn(rusqlite::Error) -> DeltaError + '_ {
    move |err| from_rusqlite(source_name, err)
}
