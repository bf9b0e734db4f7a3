use crate::value::ValueType;
use thiserror::Error;

/// Result type alias using DeltaError
pub type Result<T> = std::result::Result<T, DeltaError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Every failure the core can produce falls into exactly one of these kinds.
/// Each kind maps to a stable error code usable by callers, tests and logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    /// Caller misuse: blank or unassigned primary key, bad index, bad config
    Configuration,
    /// Duplicate primary key within one snapshot, wrong column count
    DataIntegrity,
    /// A comparison against an incompatible expected literal
    TypeMismatch,
    /// The underlying read failed
    DataAccess,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::Configuration => "ERR_CONFIGURATION",
            ExErrorKind::DataIntegrity => "ERR_DATA_INTEGRITY",
            ExErrorKind::TypeMismatch => "ERR_TYPE_MISMATCH",
            ExErrorKind::DataAccess => "ERR_DATA_ACCESS",
        }
    }
}

/// Canonical structured error type
///
/// Carries the classification kind plus optional operation and data-source
/// context for programmatic handling and log output.
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    source_name: Option<String>,
    message: String,
}

impl ExError {
    /// Create a new error with the specified kind
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            source_name: None,
            message: String::new(),
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add data-source context (table name or request text)
    pub fn with_source_name(mut self, name: impl Into<String>) -> Self {
        self.source_name = Some(name.into());
        self
    }

    /// Add custom message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Get the error kind
    pub fn kind(&self) -> ExErrorKind {
        self.kind
    }

    /// Get the stable error code
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    /// Get the operation name, if any
    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    /// Get the data-source name, if any
    pub fn source_name(&self) -> Option<&str> {
        self.source_name.as_deref()
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for ExError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(source_name) = &self.source_name {
            write!(f, " (source: {})", source_name)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {}

// ========== End Error Facility ==========

/// Error taxonomy for capture, diff and comparison operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DeltaError {
    // ===== Configuration Errors =====
    /// A primary-key column name was empty or whitespace
    #[error("primary key must not be null: blank column name at position {position} for {source_name}")]
    BlankPrimaryKeyName { source_name: String, position: usize },

    /// A request was monitored without assigning its primary-key columns
    #[error("primary key must be assigned for request: {source_name}")]
    PrimaryKeyUnassigned { source_name: String },

    /// A primary-key column is not part of the captured columns
    #[error("primary key column {column} is not captured by {source_name}")]
    PrimaryKeyColumnMissing { source_name: String, column: String },

    /// A primary-key column held null in one row
    #[error("primary key must not be null: column {column} of row {row_index} in {source_name}")]
    NullPrimaryKeyValue {
        source_name: String,
        column: String,
        row_index: usize,
    },

    /// Row index outside the captured rows
    #[error("row index {index} out of range for {source_name} ({len} rows)")]
    RowIndexOutOfRange {
        source_name: String,
        index: usize,
        len: usize,
    },

    /// Column index outside the captured columns
    #[error("column index {index} out of range for {source_name} ({len} columns)")]
    ColumnIndexOutOfRange {
        source_name: String,
        index: usize,
        len: usize,
    },

    /// No column of that name was captured
    #[error("column {column} not found in {source_name}")]
    ColumnNotFound { source_name: String, column: String },

    /// `mark_end` was called before `mark_start`
    #[error("start point must be marked before the end point")]
    StartNotMarked,

    /// Changes were requested before the end point of the current cycle
    #[error("end point must be marked before changes are available")]
    EndNotMarked,

    /// A `Changes` was built without any data source
    #[error("at least one data source must be monitored")]
    NoDataSource,

    /// The capture configuration could not be read
    #[error("invalid capture configuration: {reason}")]
    InvalidConfig { reason: String },

    // ===== Data Integrity Errors =====
    /// Two rows of one snapshot share a primary-key tuple
    #[error("duplicate primary key {key} in {source_name} (rows {first_row} and {second_row})")]
    DuplicatePrimaryKey {
        source_name: String,
        key: String,
        first_row: usize,
        second_row: usize,
    },

    /// A row's value count differs from the captured column count
    #[error("row {row_index} of {source_name} has {actual} values, expected {expected}")]
    ColumnCountMismatch {
        source_name: String,
        row_index: usize,
        expected: usize,
        actual: usize,
    },

    // ===== Comparison Errors =====
    /// The expected literal is incompatible with the actual value type
    #[error("{actual} value cannot be compared with {expected} (accepts {})", join_types(.accepted))]
    TypeMismatch {
        actual: ValueType,
        expected: ValueType,
        accepted: Vec<ValueType>,
    },

    /// A literal could not be parsed into the requested type
    #[error("invalid {target} literal: {text:?}")]
    InvalidLiteral { target: ValueType, text: String },

    // ===== Data Access Errors =====
    /// The underlying read failed
    #[error("data access failed for {source_name}: {message}")]
    DataAccess {
        source_name: String,
        message: String,
    },
}

fn join_types(types: &[ValueType]) -> String {
    if types.is_empty() {
        return "no literal".to_string();
    }
    types
        .iter()
        .map(|t| t.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

impl DeltaError {
    /// The canonical kind this error belongs to
    pub fn kind(&self) -> ExErrorKind {
        match self {
            DeltaError::BlankPrimaryKeyName { .. }
            | DeltaError::PrimaryKeyUnassigned { .. }
            | DeltaError::PrimaryKeyColumnMissing { .. }
            | DeltaError::NullPrimaryKeyValue { .. }
            | DeltaError::RowIndexOutOfRange { .. }
            | DeltaError::ColumnIndexOutOfRange { .. }
            | DeltaError::ColumnNotFound { .. }
            | DeltaError::StartNotMarked
            | DeltaError::EndNotMarked
            | DeltaError::NoDataSource
            | DeltaError::InvalidConfig { .. } => ExErrorKind::Configuration,

            DeltaError::DuplicatePrimaryKey { .. } | DeltaError::ColumnCountMismatch { .. } => {
                ExErrorKind::DataIntegrity
            }

            DeltaError::TypeMismatch { .. } | DeltaError::InvalidLiteral { .. } => {
                ExErrorKind::TypeMismatch
            }

            DeltaError::DataAccess { .. } => ExErrorKind::DataAccess,
        }
    }

    fn source_name(&self) -> Option<&str> {
        match self {
            DeltaError::BlankPrimaryKeyName { source_name, .. }
            | DeltaError::PrimaryKeyUnassigned { source_name }
            | DeltaError::PrimaryKeyColumnMissing { source_name, .. }
            | DeltaError::NullPrimaryKeyValue { source_name, .. }
            | DeltaError::RowIndexOutOfRange { source_name, .. }
            | DeltaError::ColumnIndexOutOfRange { source_name, .. }
            | DeltaError::ColumnNotFound { source_name, .. }
            | DeltaError::DuplicatePrimaryKey { source_name, .. }
            | DeltaError::ColumnCountMismatch { source_name, .. }
            | DeltaError::DataAccess { source_name, .. } => Some(source_name),
            _ => None,
        }
    }
}

/// Conversion from DeltaError to ExError
impl From<DeltaError> for ExError {
    fn from(err: DeltaError) -> Self {
        let mut ex = ExError::new(err.kind()).with_message(err.to_string());
        if let Some(name) = err.source_name() {
            ex = ex.with_source_name(name);
        }
        ex
    }
}
