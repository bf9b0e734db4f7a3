//! Cross-representation equality and ordering.
//!
//! Compatibility matrix (actual type -> accepted literal kinds):
//!
//! | Actual | Accepted |
//! |---|---|
//! | NUMBER | NUMBER, TEXT parseable as a number |
//! | BOOLEAN | BOOLEAN |
//! | TEXT | TEXT, NUMBER, DATE, TIME, DATE_TIME (text parsed into the literal's type) |
//! | DATE | DATE, TEXT parseable as an ISO date |
//! | TIME | TIME, TEXT parseable as an ISO time |
//! | DATE_TIME | DATE_TIME, DATE (at midnight), TEXT parseable as an ISO date or date-time |
//! | BYTES | BYTES |
//! | NOT_IDENTIFIED | null only |
//!
//! A null literal is compatible with every actual type. A failed text parse
//! is a type mismatch, never a plain inequality.

use crate::errors::{DeltaError, Result};
use crate::value::number::{decimal_from_f64, parse_decimal};
use crate::value::temporal::{DateTimeValue, DateValue, TimeValue};
use crate::value::{Expected, RawValue, ValueType};
use bigdecimal::BigDecimal;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use std::cmp::Ordering;

/// Outcome of comparing an actual value with an expected literal.
#[derive(Debug, Clone, PartialEq)]
pub enum Comparison {
    Equal,
    NotEqual,
    TypeMismatch(TypeMismatch),
}

impl Comparison {
    pub fn is_equal(&self) -> bool {
        matches!(self, Comparison::Equal)
    }

    /// Equality as a boolean, with a mismatch lifted into an error
    ///
    /// # Errors
    ///
    /// `TypeMismatch` if the literal's kind is not accepted
    pub fn into_result(self) -> Result<bool> {
        match self {
            Comparison::Equal => Ok(true),
            Comparison::NotEqual => Ok(false),
            Comparison::TypeMismatch(mismatch) => Err(mismatch.into()),
        }
    }
}

/// Why a literal could not be compared with an actual value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeMismatch {
    pub actual: ValueType,
    pub expected: ValueType,
    pub accepted: Vec<ValueType>,
}

impl From<TypeMismatch> for DeltaError {
    fn from(m: TypeMismatch) -> Self {
        DeltaError::TypeMismatch {
            actual: m.actual,
            expected: m.expected,
            accepted: m.accepted,
        }
    }
}

/// Literal kinds an actual type accepts for equality
pub fn accepted_for_equality(actual: ValueType) -> &'static [ValueType] {
    use ValueType::*;
    match actual {
        Number => &[Number, Text],
        Boolean => &[Boolean],
        Text => &[Text, Number, Date, Time, DateTime],
        Date => &[Date, Text],
        Time => &[Time, Text],
        DateTime => &[DateTime, Date, Text],
        Bytes => &[Bytes],
        NotIdentified => &[NotIdentified],
    }
}

/// Literal kinds an actual type accepts for ordering
pub fn accepted_for_ordering(actual: ValueType) -> &'static [ValueType] {
    use ValueType::*;
    match actual {
        Number => &[Number, Text],
        Date => &[Date, Text],
        Time => &[Time, Text],
        DateTime => &[DateTime, Date, Text],
        Text | Boolean | Bytes | NotIdentified => &[],
    }
}

/// A number in its widest available form.
#[derive(Debug, Clone)]
enum Num {
    Decimal(BigDecimal),
    Float(f64),
}

impl Num {
    fn of_f64(v: f64) -> Self {
        decimal_from_f64(v).map_or(Num::Float(v), Num::Decimal)
    }

    fn as_f64(&self) -> f64 {
        match self {
            Num::Decimal(d) => d.to_string().parse().unwrap_or(f64::NAN),
            Num::Float(f) => *f,
        }
    }

    fn partial_cmp(&self, other: &Num) -> Option<Ordering> {
        match (self, other) {
            (Num::Decimal(a), Num::Decimal(b)) => Some(a.cmp(b)),
            _ => self.as_f64().partial_cmp(&other.as_f64()),
        }
    }
}

/// Both sides normalized to one structured form.
enum Operands<'a> {
    Number(Num, Num),
    Boolean(bool, bool),
    Text(&'a str, &'a str),
    Date(NaiveDate, NaiveDate),
    Time(NaiveTime, NaiveTime),
    DateTime(NaiveDateTime, NaiveDateTime),
    Bytes(&'a [u8], &'a [u8]),
}

impl Operands<'_> {
    fn equal(&self) -> bool {
        match self {
            Operands::Number(a, b) => a.partial_cmp(b) == Some(Ordering::Equal),
            Operands::Boolean(a, b) => a == b,
            Operands::Text(a, b) => a == b,
            Operands::Date(a, b) => a == b,
            Operands::Time(a, b) => a == b,
            Operands::DateTime(a, b) => a == b,
            Operands::Bytes(a, b) => a == b,
        }
    }

    fn order(&self) -> Option<Ordering> {
        match self {
            Operands::Number(a, b) => a.partial_cmp(b),
            Operands::Date(a, b) => Some(a.cmp(b)),
            Operands::Time(a, b) => Some(a.cmp(b)),
            Operands::DateTime(a, b) => Some(a.cmp(b)),
            Operands::Boolean(..) | Operands::Text(..) | Operands::Bytes(..) => None,
        }
    }
}

fn mismatch(actual: ValueType, expected: &Expected, accepted: &[ValueType]) -> TypeMismatch {
    TypeMismatch {
        actual,
        expected: expected.kind(),
        accepted: accepted.to_vec(),
    }
}

fn actual_number(raw: &RawValue) -> Option<Num> {
    match raw {
        RawValue::Int(i) => Some(Num::Decimal(BigDecimal::from(*i))),
        RawValue::Float(f) => Some(Num::of_f64(*f)),
        RawValue::Decimal(d) => Some(Num::Decimal(d.clone())),
        _ => None,
    }
}

fn expected_number(expected: &Expected) -> Option<Num> {
    match expected {
        Expected::Number(d) => Some(Num::Decimal(d.clone())),
        Expected::NonFiniteNumber(f) => Some(Num::Float(*f)),
        Expected::Text(s) => parse_decimal(s).ok().map(Num::Decimal),
        _ => None,
    }
}

/// Pair a non-null actual value with a non-null literal, coercing text.
fn coerce<'a>(
    raw: &'a RawValue,
    expected: &'a Expected,
    accepted: &[ValueType],
) -> std::result::Result<Operands<'a>, TypeMismatch> {
    let actual = ValueType::of(raw);
    let fail = || mismatch(actual, expected, accepted);
    if !accepted.contains(&expected.kind()) {
        return Err(fail());
    }

    let operands = match (raw, expected) {
        (RawValue::Int(_) | RawValue::Float(_) | RawValue::Decimal(_), _) => {
            let a = actual_number(raw).ok_or_else(fail)?;
            let b = expected_number(expected).ok_or_else(fail)?;
            Operands::Number(a, b)
        }
        (RawValue::Bool(a), Expected::Boolean(b)) => Operands::Boolean(*a, *b),
        (RawValue::Bytes(a), Expected::Bytes(b)) => Operands::Bytes(a, b),

        (RawValue::Text(a), Expected::Text(b)) => Operands::Text(a, b),
        (RawValue::Text(a), Expected::Number(_) | Expected::NonFiniteNumber(_)) => {
            let parsed = match parse_decimal(a) {
                Ok(d) => Num::Decimal(d),
                Err(_) => Num::Float(a.trim().parse::<f64>().map_err(|_| fail())?),
            };
            Operands::Number(parsed, expected_number(expected).ok_or_else(fail)?)
        }
        (RawValue::Text(a), Expected::Date(b)) => {
            Operands::Date(DateValue::parse(a).map_err(|_| fail())?.naive(), b.naive())
        }
        (RawValue::Text(a), Expected::Time(b)) => {
            Operands::Time(TimeValue::parse(a).map_err(|_| fail())?.naive(), b.naive())
        }
        (RawValue::Text(a), Expected::DateTime(b)) => Operands::DateTime(
            DateTimeValue::parse(a).map_err(|_| fail())?.naive(),
            b.naive(),
        ),

        (RawValue::Date(a), Expected::Date(b)) => Operands::Date(*a, b.naive()),
        (RawValue::Date(a), Expected::Text(b)) => {
            Operands::Date(*a, DateValue::parse(b).map_err(|_| fail())?.naive())
        }

        (RawValue::Time(a), Expected::Time(b)) => Operands::Time(*a, b.naive()),
        (RawValue::Time(a), Expected::Text(b)) => {
            Operands::Time(*a, TimeValue::parse(b).map_err(|_| fail())?.naive())
        }

        (RawValue::DateTime(a), Expected::DateTime(b)) => Operands::DateTime(*a, b.naive()),
        (RawValue::DateTime(a), Expected::Date(b)) => {
            Operands::DateTime(*a, DateTimeValue::from(*b).naive())
        }
        (RawValue::DateTime(a), Expected::Text(b)) => {
            Operands::DateTime(*a, DateTimeValue::parse(b).map_err(|_| fail())?.naive())
        }

        _ => return Err(fail()),
    };
    Ok(operands)
}

/// Compare a raw value with a literal for equality.
pub fn compare(raw: &RawValue, expected: &Expected) -> Comparison {
    match (raw, expected) {
        (RawValue::Null, Expected::Null) => return Comparison::Equal,
        (_, Expected::Null) | (RawValue::Null, _) => return Comparison::NotEqual,
        _ => {}
    }

    let accepted = accepted_for_equality(ValueType::of(raw));
    match coerce(raw, expected, accepted) {
        Ok(operands) if operands.equal() => Comparison::Equal,
        Ok(_) => Comparison::NotEqual,
        Err(m) => Comparison::TypeMismatch(m),
    }
}

/// Order a raw value against a literal.
///
/// # Errors
///
/// `TypeMismatch` if the actual type is not ordered, the literal is not
/// accepted, or the two numbers are unordered (NaN)
pub fn order(raw: &RawValue, expected: &Expected) -> Result<Ordering> {
    let actual = ValueType::of(raw);
    let accepted = accepted_for_ordering(actual);
    let operands = coerce(raw, expected, accepted)?;
    operands
        .order()
        .ok_or_else(|| mismatch(actual, expected, accepted).into())
}

/// Equality between two captured raw values.
///
/// Identical data is always equal (including NaN and unidentified values);
/// a type mismatch counts as a difference. Symmetric: either side may act
/// as the literal, so a DATE and a DATE_TIME at midnight are the same
/// whichever snapshot holds which.
pub fn same(a: &RawValue, b: &RawValue) -> bool {
    match (a, b) {
        (RawValue::Float(x), RawValue::Float(y)) if x.is_nan() && y.is_nan() => true,
        (RawValue::Other { .. }, _) | (_, RawValue::Other { .. }) => a == b,
        _ => {
            compare(a, &Expected::from_raw(b)).is_equal()
                || compare(b, &Expected::from_raw(a)).is_equal()
        }
    }
}
