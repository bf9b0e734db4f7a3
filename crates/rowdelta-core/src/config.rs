//! Capture configuration
//!
//! A [`CaptureConfig`] is handed to the capture component when it is built and
//! stays fixed for its lifetime. It controls how table, column and
//! primary-key names are normalized and matched.
//!
//! ```toml
//! [column_case]
//! conversion = "lower"
//! comparison = "ignore"
//! ```

use crate::errors::{DeltaError, Result};
use serde::{Deserialize, Serialize};

/// How a name is rewritten when captured
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CaseConversion {
    #[default]
    None,
    Upper,
    Lower,
}

/// How two names are matched
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CaseComparison {
    Strict,
    #[default]
    Ignore,
}

/// Letter-case policy for one kind of name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LetterCase {
    pub conversion: CaseConversion,
    pub comparison: CaseComparison,
}

impl LetterCase {
    pub fn new(conversion: CaseConversion, comparison: CaseComparison) -> Self {
        Self {
            conversion,
            comparison,
        }
    }

    pub fn convert(&self, name: &str) -> String {
        match self.conversion {
            CaseConversion::None => name.to_string(),
            CaseConversion::Upper => name.to_uppercase(),
            CaseConversion::Lower => name.to_lowercase(),
        }
    }

    pub fn is_equal(&self, a: &str, b: &str) -> bool {
        match self.comparison {
            CaseComparison::Strict => a == b,
            CaseComparison::Ignore => a.to_lowercase() == b.to_lowercase(),
        }
    }

    /// Position of `name` in `names` under this policy
    pub fn position(&self, names: &[String], name: &str) -> Option<usize> {
        names.iter().position(|n| self.is_equal(n, name))
    }
}

/// Configuration of the capture component
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CaptureConfig {
    pub table_case: LetterCase,
    pub column_case: LetterCase,
    pub primary_key_case: LetterCase,
}

impl CaptureConfig {
    /// Read a configuration from TOML text; absent keys keep their defaults
    ///
    /// # Errors
    ///
    /// `InvalidConfig` if the text is not valid TOML for this structure
    pub fn from_toml_str(text: &str) -> Result<Self> {
        toml::from_str(text).map_err(|e| DeltaError::InvalidConfig {
            reason: e.to_string(),
        })
    }

    pub fn with_table_case(mut self, case: LetterCase) -> Self {
        self.table_case = case;
        self
    }

    pub fn with_column_case(mut self, case: LetterCase) -> Self {
        self.column_case = case;
        self
    }

    pub fn with_primary_key_case(mut self, case: LetterCase) -> Self {
        self.primary_key_case = case;
        self
    }
}
