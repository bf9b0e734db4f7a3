//! Hashable identity of a row.

use crate::model::Row;
use crate::value::number::decimal_from_f64;
use crate::value::{RawValue, Value};
use bigdecimal::BigDecimal;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

/// One value reduced to a form where equal data hashes equally.
///
/// Numbers of every representation share one normalized decimal text, so
/// `1`, `1.0` and `Decimal(1.00)` are the same key. Text is kept verbatim:
/// `Text("1")` and `Int(1)` are different keys, as are `"1"` and `"01"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub(crate) enum KeyAtom {
    Null,
    Bool(bool),
    Number(String),
    NonFinite(String),
    Text(String),
    Bytes(Vec<u8>),
    Date(NaiveDate),
    Time(NaiveTime),
    DateTime(NaiveDateTime),
    Other(String, String),
}

impl KeyAtom {
    pub(crate) fn of(raw: &RawValue) -> Self {
        match raw {
            RawValue::Null => KeyAtom::Null,
            RawValue::Bool(b) => KeyAtom::Bool(*b),
            RawValue::Int(i) => number(&BigDecimal::from(*i)),
            RawValue::Float(f) => match decimal_from_f64(*f) {
                Some(d) => number(&d),
                None => KeyAtom::NonFinite(f.to_string()),
            },
            RawValue::Decimal(d) => number(d),
            RawValue::Text(s) => KeyAtom::Text(s.clone()),
            RawValue::Bytes(b) => KeyAtom::Bytes(b.clone()),
            RawValue::Date(d) => KeyAtom::Date(*d),
            RawValue::Time(t) => KeyAtom::Time(*t),
            RawValue::DateTime(dt) => KeyAtom::DateTime(*dt),
            RawValue::Other { type_name, text } => KeyAtom::Other(type_name.clone(), text.clone()),
        }
    }
}

fn number(d: &BigDecimal) -> KeyAtom {
    KeyAtom::Number(d.normalized().to_string())
}

pub(crate) type RowKey = Vec<KeyAtom>;

/// Primary-key tuple of `row`
pub(crate) fn primary_key(row: &Row) -> RowKey {
    row.pk_values().into_iter().map(|v| KeyAtom::of(v.raw())).collect()
}

/// Every value of `row`, for sources without a primary key
pub(crate) fn content(row: &Row) -> RowKey {
    row.values().iter().map(|v| KeyAtom::of(v.raw())).collect()
}

/// Human-readable key tuple for error messages
pub(crate) fn describe(values: &[&Value]) -> String {
    let parts: Vec<String> = values.iter().map(|v| v.to_string()).collect();
    format!("({})", parts.join(", "))
}
