//! Expected literals for value comparison.
//!
//! An [`Expected`] is a tagged literal: the tag decides which row of the
//! compatibility matrix applies, so no runtime type inspection happens
//! during comparison.

use crate::value::number::decimal_from_f64;
use crate::value::temporal::{DateTimeValue, DateValue, TimeValue};
use crate::value::{RawValue, Value, ValueType};
use bigdecimal::BigDecimal;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

/// A literal an actual value is compared against.
#[derive(Debug, Clone, PartialEq)]
pub enum Expected {
    /// The absent value
    Null,
    Boolean(bool),
    Number(BigDecimal),
    /// A float that has no decimal form (NaN or infinite)
    NonFiniteNumber(f64),
    Text(String),
    Date(DateValue),
    Time(TimeValue),
    DateTime(DateTimeValue),
    Bytes(Vec<u8>),
}

impl Expected {
    /// The value type this literal represents
    pub fn kind(&self) -> ValueType {
        match self {
            Expected::Null => ValueType::NotIdentified,
            Expected::Boolean(_) => ValueType::Boolean,
            Expected::Number(_) | Expected::NonFiniteNumber(_) => ValueType::Number,
            Expected::Text(_) => ValueType::Text,
            Expected::Date(_) => ValueType::Date,
            Expected::Time(_) => ValueType::Time,
            Expected::DateTime(_) => ValueType::DateTime,
            Expected::Bytes(_) => ValueType::Bytes,
        }
    }

    /// Turn a captured value into a literal, so two captures can be compared.
    ///
    /// Values the core cannot identify become their text form.
    pub fn from_value(value: &Value) -> Self {
        Self::from_raw(value.raw())
    }

    pub fn from_raw(raw: &RawValue) -> Self {
        match raw {
            RawValue::Null => Expected::Null,
            RawValue::Bool(b) => Expected::Boolean(*b),
            RawValue::Int(i) => Expected::Number(BigDecimal::from(*i)),
            RawValue::Float(f) => Expected::from(*f),
            RawValue::Decimal(d) => Expected::Number(d.clone()),
            RawValue::Text(s) => Expected::Text(s.clone()),
            RawValue::Bytes(b) => Expected::Bytes(b.clone()),
            RawValue::Date(d) => Expected::Date(DateValue::from(*d)),
            RawValue::Time(t) => Expected::Time(TimeValue::from(*t)),
            RawValue::DateTime(dt) => Expected::DateTime(DateTimeValue::from(*dt)),
            RawValue::Other { text, .. } => Expected::Text(text.clone()),
        }
    }
}

impl std::fmt::Display for Expected {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Expected::Null => f.write_str("null"),
            Expected::Boolean(b) => write!(f, "{}", b),
            Expected::Number(n) => write!(f, "{}", n),
            Expected::NonFiniteNumber(n) => write!(f, "{}", n),
            Expected::Text(s) => write!(f, "{:?}", s),
            Expected::Date(d) => write!(f, "{}", d),
            Expected::Time(t) => write!(f, "{}", t),
            Expected::DateTime(dt) => write!(f, "{}", dt),
            Expected::Bytes(b) => write!(f, "<{} bytes>", b.len()),
        }
    }
}

macro_rules! expected_from_integer {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Expected {
                fn from(v: $t) -> Self {
                    Expected::Number(BigDecimal::from(v))
                }
            }
        )*
    };
}

expected_from_integer!(i8, i16, i32, i64, u8, u16, u32, u64);

impl From<f64> for Expected {
    fn from(v: f64) -> Self {
        decimal_from_f64(v).map_or(Expected::NonFiniteNumber(v), Expected::Number)
    }
}

impl From<f32> for Expected {
    fn from(v: f32) -> Self {
        // Widen through the f32's own shortest text, not the f64 expansion.
        v.to_string()
            .parse::<BigDecimal>()
            .map_or(Expected::NonFiniteNumber(f64::from(v)), Expected::Number)
    }
}

impl From<BigDecimal> for Expected {
    fn from(v: BigDecimal) -> Self {
        Expected::Number(v)
    }
}

impl From<bool> for Expected {
    fn from(v: bool) -> Self {
        Expected::Boolean(v)
    }
}

impl From<&str> for Expected {
    fn from(v: &str) -> Self {
        Expected::Text(v.to_string())
    }
}

impl From<String> for Expected {
    fn from(v: String) -> Self {
        Expected::Text(v)
    }
}

impl From<Vec<u8>> for Expected {
    fn from(v: Vec<u8>) -> Self {
        Expected::Bytes(v)
    }
}

impl From<&[u8]> for Expected {
    fn from(v: &[u8]) -> Self {
        Expected::Bytes(v.to_vec())
    }
}

impl From<DateValue> for Expected {
    fn from(v: DateValue) -> Self {
        Expected::Date(v)
    }
}

impl From<TimeValue> for Expected {
    fn from(v: TimeValue) -> Self {
        Expected::Time(v)
    }
}

impl From<DateTimeValue> for Expected {
    fn from(v: DateTimeValue) -> Self {
        Expected::DateTime(v)
    }
}

impl From<NaiveDate> for Expected {
    fn from(v: NaiveDate) -> Self {
        Expected::Date(v.into())
    }
}

impl From<NaiveTime> for Expected {
    fn from(v: NaiveTime) -> Self {
        Expected::Time(v.into())
    }
}

impl From<NaiveDateTime> for Expected {
    fn from(v: NaiveDateTime) -> Self {
        Expected::DateTime(v.into())
    }
}

impl<T: Into<Expected>> From<Option<T>> for Expected {
    fn from(v: Option<T>) -> Self {
        v.map_or(Expected::Null, Into::into)
    }
}
