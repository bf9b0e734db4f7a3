//! Widening of numeric representations to `BigDecimal`.

use crate::errors::{DeltaError, Result};
use crate::value::ValueType;
use bigdecimal::BigDecimal;
use std::borrow::Cow;
use std::str::FromStr;

/// Widen an `f64` through its shortest decimal text.
///
/// `0.1_f64` becomes exactly `0.1`, not its binary expansion. Returns `None`
/// for NaN and infinities.
pub fn decimal_from_f64(v: f64) -> Option<BigDecimal> {
    if !v.is_finite() {
        return None;
    }
    BigDecimal::from_str(&v.to_string()).ok()
}

/// Parse numeric text into a `BigDecimal`.
///
/// Surrounding whitespace and `_` digit separators are ignored.
///
/// # Errors
///
/// `InvalidLiteral` if the text is empty or not a number
pub fn parse_decimal(text: &str) -> Result<BigDecimal> {
    let trimmed = text.trim();
    let value = if trimmed.contains('_') {
        Cow::Owned(trimmed.replace('_', ""))
    } else {
        Cow::Borrowed(trimmed)
    };

    if value.is_empty() {
        return Err(invalid_number(text));
    }

    BigDecimal::from_str(&value).map_err(|_| invalid_number(text))
}

fn invalid_number(text: &str) -> DeltaError {
    DeltaError::InvalidLiteral {
        target: ValueType::Number,
        text: text.to_string(),
    }
}
