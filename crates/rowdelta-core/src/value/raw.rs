//! Raw captured data and its classification.

use bigdecimal::BigDecimal;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

/// Semantic classification of a captured value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ValueType {
    Text,
    Number,
    Boolean,
    Date,
    Time,
    DateTime,
    Bytes,
    NotIdentified,
}

impl ValueType {
    /// Classify a raw value by its shape.
    ///
    /// Pure: the result depends only on the variant of `raw`.
    pub fn of(raw: &RawValue) -> ValueType {
        match raw {
            RawValue::Null => ValueType::NotIdentified,
            RawValue::Bytes(_) => ValueType::Bytes,
            RawValue::Bool(_) => ValueType::Boolean,
            RawValue::Int(_) | RawValue::Float(_) | RawValue::Decimal(_) => ValueType::Number,
            RawValue::Date(_) => ValueType::Date,
            RawValue::Time(_) => ValueType::Time,
            RawValue::DateTime(_) => ValueType::DateTime,
            RawValue::Text(_) => ValueType::Text,
            RawValue::Other { .. } => ValueType::NotIdentified,
        }
    }

    /// Whether ordering comparisons are defined for this type
    pub fn is_ordered(&self) -> bool {
        matches!(
            self,
            ValueType::Number | ValueType::Date | ValueType::Time | ValueType::DateTime
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ValueType::Text => "TEXT",
            ValueType::Number => "NUMBER",
            ValueType::Boolean => "BOOLEAN",
            ValueType::Date => "DATE",
            ValueType::Time => "TIME",
            ValueType::DateTime => "DATE_TIME",
            ValueType::Bytes => "BYTES",
            ValueType::NotIdentified => "NOT_IDENTIFIED",
        }
    }
}

impl std::fmt::Display for ValueType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Data exactly as a row provider delivered it.
///
/// The core does not interpret a raw value until it is classified with
/// [`ValueType::of`] or compared.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "data", rename_all = "snake_case")]
pub enum RawValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Decimal(BigDecimal),
    Text(String),
    Bytes(Vec<u8>),
    Date(NaiveDate),
    Time(NaiveTime),
    DateTime(NaiveDateTime),
    /// A value the provider could not map, kept as its type name and text
    Other { type_name: String, text: String },
}

impl RawValue {
    pub fn is_null(&self) -> bool {
        matches!(self, RawValue::Null)
    }
}

impl From<bool> for RawValue {
    fn from(v: bool) -> Self {
        RawValue::Bool(v)
    }
}

impl From<i32> for RawValue {
    fn from(v: i32) -> Self {
        RawValue::Int(i64::from(v))
    }
}

impl From<i64> for RawValue {
    fn from(v: i64) -> Self {
        RawValue::Int(v)
    }
}

impl From<f64> for RawValue {
    fn from(v: f64) -> Self {
        RawValue::Float(v)
    }
}

impl From<BigDecimal> for RawValue {
    fn from(v: BigDecimal) -> Self {
        RawValue::Decimal(v)
    }
}

impl From<&str> for RawValue {
    fn from(v: &str) -> Self {
        RawValue::Text(v.to_string())
    }
}

impl From<String> for RawValue {
    fn from(v: String) -> Self {
        RawValue::Text(v)
    }
}

impl From<Vec<u8>> for RawValue {
    fn from(v: Vec<u8>) -> Self {
        RawValue::Bytes(v)
    }
}

impl From<NaiveDate> for RawValue {
    fn from(v: NaiveDate) -> Self {
        RawValue::Date(v)
    }
}

impl From<NaiveTime> for RawValue {
    fn from(v: NaiveTime) -> Self {
        RawValue::Time(v)
    }
}

impl From<NaiveDateTime> for RawValue {
    fn from(v: NaiveDateTime) -> Self {
        RawValue::DateTime(v)
    }
}

impl<T: Into<RawValue>> From<Option<T>> for RawValue {
    fn from(v: Option<T>) -> Self {
        v.map_or(RawValue::Null, Into::into)
    }
}
