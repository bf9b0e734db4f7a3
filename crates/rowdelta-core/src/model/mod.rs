//! Captured data and detected changes.

pub mod change;
pub mod column;
pub mod row;
pub mod source;

pub use change::{Change, ChangeType};
pub use column::Column;
pub use row::{Row, RowLayout};
pub use source::{DataSource, RequestSource, TableSource};
