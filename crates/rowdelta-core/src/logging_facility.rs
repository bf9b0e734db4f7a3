//! Structured logging facility for rowdelta
//!
//! - Single initialization point via `init(profile)`
//! - Lifecycle macros (`log_op_start!`, `log_op_end!`, `log_op_error!`)
//!   carrying the canonical fields of `rowdelta_core_types::schema`
//! - In-memory capture layer for assertions in tests
//!
//! # Usage
//!
//! ```rust
//! use rowdelta_core::logging_facility::{init, Profile};
//!
//! init(Profile::Development);
//! ```
//!
//! Only [`crate::Changes`] emits lifecycle events; every other component
//! logs with `tracing::debug!` and returns its errors untouched.

pub mod init;
pub mod macros;
pub mod test_capture;

pub use init::{init, Profile};
pub use test_capture::{init_test_capture, CapturedEvent, TestCapture};
