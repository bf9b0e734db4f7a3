//! Value Comparison Tests
//!
//! ## Scenarios Covered
//!
//! 1. Numeric equality is representation independent
//! 2. ISO date-time text round-trips at every fraction precision
//! 3. DATE values against date literals, and against a boolean
//! 4. BOOLEAN never silently equals a non-boolean literal
//! 5. Ordering for ordered types, mismatch for the rest
//! 6. Text reinterpretation and its failure mode

#![allow(clippy::unwrap_used, clippy::expect_used)]

use bigdecimal::BigDecimal;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use rowdelta_core::value::compare::accepted_for_equality;
use rowdelta_core::{
    Comparison, DateTimeValue, DateValue, DeltaError, Expected, ExErrorKind, RawValue, TimeValue,
    Value, ValueType,
};
use std::str::FromStr;

fn value(raw: impl Into<RawValue>) -> Value {
    Value::new(raw.into(), "col", 0)
}

fn assert_mismatch(comparison: Comparison, actual: ValueType) {
    match comparison {
        Comparison::TypeMismatch(m) => {
            assert_eq!(m.actual, actual);
            assert_eq!(m.accepted, accepted_for_equality(actual).to_vec());
        }
        other => panic!("expected a type mismatch, got {:?}", other),
    }
}

#[test]
fn test_number_equal_across_representations() {
    let actual = value(1i64);
    assert_eq!(actual.compare_to(1), Comparison::Equal);
    assert_eq!(actual.compare_to(1.0), Comparison::Equal);
    assert_eq!(actual.compare_to("1"), Comparison::Equal);
    assert_eq!(actual.compare_to("1.000"), Comparison::Equal);
    assert_eq!(
        actual.compare_to(BigDecimal::from_str("1.0").unwrap()),
        Comparison::Equal
    );
    assert_eq!(actual.compare_to(2), Comparison::NotEqual);

    let decimal = value(BigDecimal::from_str("0.1").unwrap());
    assert_eq!(decimal.compare_to(0.1), Comparison::Equal);
    assert_eq!(decimal.compare_to(0.1f32), Comparison::Equal);
}

#[test]
fn test_number_against_unparseable_text_is_mismatch() {
    assert_mismatch(value(1i64).compare_to("one"), ValueType::Number);
}

#[test]
fn test_date_time_text_round_trip_at_every_precision() {
    let cases = [
        ("2007-12-23T09:01:06", 0),
        ("2007-12-23T09:01:06.123", 123_000_000),
        ("2007-12-23T09:01:06.123456", 123_456_000),
        ("2007-12-23T09:01:06.123456789", 123_456_789),
    ];
    for (text, nanos) in cases {
        let native = NaiveDate::from_ymd_opt(2007, 12, 23)
            .unwrap()
            .and_hms_nano_opt(9, 1, 6, nanos)
            .unwrap();
        let actual = value(native);

        assert_eq!(actual.compare_to(text), Comparison::Equal, "text {}", text);
        let parsed = DateTimeValue::parse(text).unwrap();
        assert_eq!(actual.compare_to(parsed), Comparison::Equal, "parsed {}", text);
    }
}

#[test]
fn test_date_time_accepts_every_iso_variant() {
    let midnight = value(NaiveDateTime::from_str("2007-12-23T00:00:00").unwrap());
    assert_eq!(midnight.compare_to("2007-12-23"), Comparison::Equal);
    assert_eq!(midnight.compare_to("2007-12-23T00:00"), Comparison::Equal);
    assert_eq!(midnight.compare_to("2007-12-23 00:00:00"), Comparison::Equal);
    assert_eq!(
        midnight.compare_to(DateValue::of(2007, 12, 23).unwrap()),
        Comparison::Equal
    );

    let morning = value(NaiveDateTime::from_str("2007-12-23T09:01:00").unwrap());
    assert_eq!(
        morning.compare_to(DateValue::of(2007, 12, 23).unwrap()),
        Comparison::NotEqual
    );
    assert_eq!(morning.compare_to("2007-12-23T09:01"), Comparison::Equal);
}

#[test]
fn test_date_scenario() {
    let actual = value(NaiveDate::from_ymd_opt(2014, 5, 24).unwrap());
    assert_eq!(actual.value_type(), ValueType::Date);
    assert_eq!(
        actual.compare_to(DateValue::of(2014, 5, 24).unwrap()),
        Comparison::Equal
    );
    assert_eq!(
        actual.compare_to(DateValue::of(2014, 5, 25).unwrap()),
        Comparison::NotEqual
    );
    assert_mismatch(actual.compare_to(true), ValueType::Date);
    assert_eq!(actual.compare_to("2014-05-24"), Comparison::Equal);
}

#[test]
fn test_boolean_rejects_non_boolean_literals() {
    let actual = value(true);
    assert_eq!(actual.compare_to(true), Comparison::Equal);
    assert_eq!(actual.compare_to(false), Comparison::NotEqual);
    assert_mismatch(actual.compare_to(1), ValueType::Boolean);
    assert_mismatch(actual.compare_to("true"), ValueType::Boolean);

    let err = actual.is_equal_to(1).unwrap_err();
    assert_eq!(err.kind(), ExErrorKind::TypeMismatch);
    assert_eq!(
        err.to_string(),
        "BOOLEAN value cannot be compared with NUMBER (accepts BOOLEAN)"
    );
}

#[test]
fn test_time_and_bytes() {
    let time = value(chrono::NaiveTime::from_hms_opt(9, 1, 6).unwrap());
    assert_eq!(time.compare_to("09:01:06"), Comparison::Equal);
    assert_eq!(
        time.compare_to(TimeValue::of(9, 1, 6).unwrap()),
        Comparison::Equal
    );
    assert_mismatch(time.compare_to("9 o'clock"), ValueType::Time);

    let bytes = value(vec![1u8, 2, 3]);
    assert_eq!(bytes.compare_to(vec![1u8, 2, 3]), Comparison::Equal);
    assert_eq!(bytes.compare_to(vec![1u8, 2]), Comparison::NotEqual);
    assert_mismatch(bytes.compare_to("\u{1}\u{2}\u{3}"), ValueType::Bytes);
}

#[test]
fn test_text_reinterpreted_for_typed_literals() {
    let text = value("2014-05-24");
    assert_eq!(
        text.compare_to(DateValue::of(2014, 5, 24).unwrap()),
        Comparison::Equal
    );
    assert_eq!(value("42").compare_to(42), Comparison::Equal);
    assert_mismatch(value("soon").compare_to(DateValue::of(2014, 5, 24).unwrap()), ValueType::Text);
    assert_mismatch(value("yes").compare_to(true), ValueType::Text);
}

#[test]
fn test_null_handling() {
    let null = value(RawValue::Null);
    assert_eq!(null.value_type(), ValueType::NotIdentified);
    assert_eq!(null.compare_to(Expected::Null), Comparison::Equal);
    assert_eq!(null.compare_to(Option::<i32>::None), Comparison::Equal);
    assert_eq!(null.compare_to(1), Comparison::NotEqual);
    assert_eq!(value(1i64).compare_to(Expected::Null), Comparison::NotEqual);

    let other = value(RawValue::Other {
        type_name: "INTERVAL".into(),
        text: "1 day".into(),
    });
    assert_mismatch(other.compare_to("1 day"), ValueType::NotIdentified);
}

#[test]
fn test_ordering() {
    let n = value(10i64);
    assert!(n.is_after(9).unwrap());
    assert!(n.is_after_or_equal(10).unwrap());
    assert!(!n.is_after(10).unwrap());
    assert!(n.is_before("10.5").unwrap());
    assert!(n.is_before_or_equal(10.0).unwrap());

    let date_time = value(NaiveDateTime::from_str("2014-05-24T10:00:00").unwrap());
    assert!(date_time.is_after(DateValue::of(2014, 5, 24).unwrap()).unwrap());
    assert!(date_time.is_before("2014-05-24T10:00:01").unwrap());

    let err = value("abc").is_before("abd").unwrap_err();
    assert!(matches!(
        err,
        DeltaError::TypeMismatch {
            actual: ValueType::Text,
            ..
        }
    ));
    assert!(value(true).is_before(false).is_err());
}

#[test]
fn test_date_and_time_ordering() {
    let date = value(NaiveDate::from_ymd_opt(2014, 5, 24).unwrap());
    assert!(date.is_before(DateValue::of(2014, 5, 25).unwrap()).unwrap());
    assert!(!date.is_before(DateValue::of(2014, 5, 24).unwrap()).unwrap());
    assert!(date.is_before_or_equal("2014-05-24").unwrap());
    assert!(date.is_after("2014-05-23").unwrap());
    assert!(date.is_after_or_equal(DateValue::of(2014, 5, 24).unwrap()).unwrap());
    assert!(!date.is_after("2014-05-24").unwrap());

    let time = value(NaiveTime::from_hms_opt(9, 0, 0).unwrap());
    assert!(time.is_after(TimeValue::of(8, 59, 0).unwrap()).unwrap());
    assert!(time.is_after_or_equal("09:00").unwrap());
    assert!(time.is_before("09:00:00.000000001").unwrap());
    assert!(time.is_before_or_equal(TimeValue::of(9, 0, 0).unwrap()).unwrap());
    assert!(!time.is_before("09:00:00").unwrap());
}

#[test]
fn test_date_and_time_ordering_against_unparseable_text() {
    let date = value(NaiveDate::from_ymd_opt(2014, 5, 24).unwrap());
    let err = date.is_before("next tuesday").unwrap_err();
    assert!(matches!(
        err,
        DeltaError::TypeMismatch {
            actual: ValueType::Date,
            ..
        }
    ));

    let time = value(NaiveTime::from_hms_opt(9, 0, 0).unwrap());
    let err = time.is_after_or_equal("9am").unwrap_err();
    assert_eq!(err.kind(), ExErrorKind::TypeMismatch);
    assert!(time.is_before(true).is_err());
}

#[test]
fn test_invalid_literals_are_reported() {
    let err = DateValue::parse("2014-13-01").unwrap_err();
    assert_eq!(
        err,
        DeltaError::InvalidLiteral {
            target: ValueType::Date,
            text: "2014-13-01".into(),
        }
    );
    assert!(TimeValue::parse("25:00").is_err());
    assert!(DateTimeValue::parse("2014-05-24X10:00").is_err());
}
