//! Captured values, their classification and comparison.
//!
//! - [`RawValue`] is the datum as a provider delivered it.
//! - [`ValueType::of`] classifies it.
//! - [`Value`] is a raw value bound to its column and row.
//! - [`Expected`] is a literal to compare against; [`Value::compare_to`]
//!   applies the compatibility matrix documented in [`compare`].

pub mod compare;
pub mod expected;
pub mod number;
pub mod raw;
pub mod temporal;

pub use compare::{Comparison, TypeMismatch};
pub use expected::Expected;
pub use raw::{RawValue, ValueType};
pub use temporal::{DateTimeValue, DateValue, TimeValue};

use crate::errors::Result;
use serde::Serialize;
use std::cmp::Ordering;

/// One captured scalar at a specific row and column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Value {
    raw: RawValue,
    column_name: String,
    row_index: usize,
}

impl Value {
    pub fn new(raw: RawValue, column_name: impl Into<String>, row_index: usize) -> Self {
        Self {
            raw,
            column_name: column_name.into(),
            row_index,
        }
    }

    pub fn raw(&self) -> &RawValue {
        &self.raw
    }

    pub fn column_name(&self) -> &str {
        &self.column_name
    }

    pub fn row_index(&self) -> usize {
        self.row_index
    }

    /// The classification, computed from the raw data on every call
    pub fn value_type(&self) -> ValueType {
        ValueType::of(&self.raw)
    }

    pub fn is_null(&self) -> bool {
        self.raw.is_null()
    }

    /// Compare with an expected literal; never fails
    pub fn compare_to(&self, expected: impl Into<Expected>) -> Comparison {
        compare::compare(&self.raw, &expected.into())
    }

    /// # Errors
    ///
    /// `TypeMismatch` if the literal is incompatible with this value's type
    pub fn is_equal_to(&self, expected: impl Into<Expected>) -> Result<bool> {
        self.compare_to(expected).into_result()
    }

    /// # Errors
    ///
    /// `TypeMismatch` if ordering is undefined for this pair
    pub fn order_against(&self, expected: impl Into<Expected>) -> Result<Ordering> {
        compare::order(&self.raw, &expected.into())
    }

    /// # Errors
    ///
    /// `TypeMismatch` if ordering is undefined for this pair
    pub fn is_before(&self, expected: impl Into<Expected>) -> Result<bool> {
        Ok(self.order_against(expected)? == Ordering::Less)
    }

    /// # Errors
    ///
    /// `TypeMismatch` if ordering is undefined for this pair
    pub fn is_before_or_equal(&self, expected: impl Into<Expected>) -> Result<bool> {
        Ok(self.order_against(expected)? != Ordering::Greater)
    }

    /// # Errors
    ///
    /// `TypeMismatch` if ordering is undefined for this pair
    pub fn is_after(&self, expected: impl Into<Expected>) -> Result<bool> {
        Ok(self.order_against(expected)? == Ordering::Greater)
    }

    /// # Errors
    ///
    /// `TypeMismatch` if ordering is undefined for this pair
    pub fn is_after_or_equal(&self, expected: impl Into<Expected>) -> Result<bool> {
        Ok(self.order_against(expected)? != Ordering::Less)
    }

    /// Equality with another captured value, as used by the diff
    pub fn same_as(&self, other: &Value) -> bool {
        compare::same(&self.raw, &other.raw)
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", Expected::from_raw(&self.raw))
    }
}
