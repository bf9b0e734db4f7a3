//! Date, time and date-time literals with ISO-8601 parsing.
//!
//! Accepted text forms:
//!
//! | Literal | Forms |
//! |---|---|
//! | date | `YYYY-MM-DD` |
//! | time | `HH:MM`, `HH:MM:SS`, `HH:MM:SS.f` (1 to 9 fraction digits) |
//! | date-time | any date form, or date + `T`/space + any time form |

use crate::errors::{DeltaError, Result};
use crate::value::ValueType;
use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use serde::{Deserialize, Serialize};

const DATE_FORMAT: &str = "%Y-%m-%d";
const TIME_FORMATS: &[&str] = &["%H:%M:%S%.f", "%H:%M:%S", "%H:%M"];

fn invalid(target: ValueType, text: &str) -> DeltaError {
    DeltaError::InvalidLiteral {
        target,
        text: text.to_string(),
    }
}

/// A calendar date without time of day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct DateValue(NaiveDate);

impl DateValue {
    /// Build a date from its fields
    ///
    /// # Errors
    ///
    /// `InvalidLiteral` if the fields do not form a calendar date
    pub fn of(year: i32, month: u32, day: u32) -> Result<Self> {
        NaiveDate::from_ymd_opt(year, month, day)
            .map(Self)
            .ok_or_else(|| invalid(ValueType::Date, &format!("{year}-{month}-{day}")))
    }

    /// Parse `YYYY-MM-DD`
    ///
    /// # Errors
    ///
    /// `InvalidLiteral` if `text` is not an ISO date
    pub fn parse(text: &str) -> Result<Self> {
        NaiveDate::parse_from_str(text.trim(), DATE_FORMAT)
            .map(Self)
            .map_err(|_| invalid(ValueType::Date, text))
    }

    pub fn naive(&self) -> NaiveDate {
        self.0
    }

    pub fn year(&self) -> i32 {
        self.0.year()
    }

    pub fn month(&self) -> u32 {
        self.0.month()
    }

    pub fn day(&self) -> u32 {
        self.0.day()
    }
}

impl From<NaiveDate> for DateValue {
    fn from(date: NaiveDate) -> Self {
        Self(date)
    }
}

impl std::fmt::Display for DateValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.format(DATE_FORMAT))
    }
}

/// A time of day without a date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TimeValue(NaiveTime);

impl TimeValue {
    /// Build a time from hour, minute and second
    ///
    /// # Errors
    ///
    /// `InvalidLiteral` if a field is out of range
    pub fn of(hour: u32, minute: u32, second: u32) -> Result<Self> {
        Self::with_nanos(hour, minute, second, 0)
    }

    /// Build a time with a nanosecond fraction
    ///
    /// # Errors
    ///
    /// `InvalidLiteral` if a field is out of range
    pub fn with_nanos(hour: u32, minute: u32, second: u32, nanos: u32) -> Result<Self> {
        NaiveTime::from_hms_nano_opt(hour, minute, second, nanos)
            .map(Self)
            .ok_or_else(|| {
                invalid(
                    ValueType::Time,
                    &format!("{hour}:{minute}:{second}.{nanos}"),
                )
            })
    }

    /// Parse `HH:MM`, `HH:MM:SS` or `HH:MM:SS.fffffffff`
    ///
    /// # Errors
    ///
    /// `InvalidLiteral` if `text` is not an ISO time
    pub fn parse(text: &str) -> Result<Self> {
        parse_time(text.trim())
            .map(Self)
            .ok_or_else(|| invalid(ValueType::Time, text))
    }

    pub fn naive(&self) -> NaiveTime {
        self.0
    }

    pub fn hour(&self) -> u32 {
        self.0.hour()
    }

    pub fn minute(&self) -> u32 {
        self.0.minute()
    }

    pub fn second(&self) -> u32 {
        self.0.second()
    }

    pub fn nanosecond(&self) -> u32 {
        self.0.nanosecond()
    }
}

impl From<NaiveTime> for TimeValue {
    fn from(time: NaiveTime) -> Self {
        Self(time)
    }
}

impl std::fmt::Display for TimeValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.format("%H:%M:%S%.f"))
    }
}

/// A date combined with a time of day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct DateTimeValue(NaiveDateTime);

impl DateTimeValue {
    pub fn of(date: DateValue, time: TimeValue) -> Self {
        Self(date.naive().and_time(time.naive()))
    }

    /// Parse any accepted ISO-8601 date or date-time form
    ///
    /// A date without a time is read as midnight.
    ///
    /// # Errors
    ///
    /// `InvalidLiteral` if `text` matches none of the forms
    pub fn parse(text: &str) -> Result<Self> {
        let trimmed = text.trim();
        let (date_part, time_part) = match trimmed.find(['T', ' ']) {
            Some(pos) => (&trimmed[..pos], Some(&trimmed[pos + 1..])),
            None => (trimmed, None),
        };
        let date = NaiveDate::parse_from_str(date_part, DATE_FORMAT)
            .map_err(|_| invalid(ValueType::DateTime, text))?;
        let time = match time_part {
            Some(t) => parse_time(t).ok_or_else(|| invalid(ValueType::DateTime, text))?,
            None => NaiveTime::MIN,
        };
        Ok(Self(date.and_time(time)))
    }

    pub fn naive(&self) -> NaiveDateTime {
        self.0
    }

    pub fn date(&self) -> DateValue {
        DateValue(self.0.date())
    }

    pub fn time(&self) -> TimeValue {
        TimeValue(self.0.time())
    }

    /// Whether the time of day is exactly midnight
    pub fn is_midnight(&self) -> bool {
        self.0.time() == NaiveTime::MIN
    }
}

impl From<NaiveDateTime> for DateTimeValue {
    fn from(date_time: NaiveDateTime) -> Self {
        Self(date_time)
    }
}

/// The date at midnight
impl From<DateValue> for DateTimeValue {
    fn from(date: DateValue) -> Self {
        Self(date.naive().and_time(NaiveTime::MIN))
    }
}

impl std::fmt::Display for DateTimeValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%dT%H:%M:%S%.f"))
    }
}

fn parse_time(text: &str) -> Option<NaiveTime> {
    TIME_FORMATS
        .iter()
        .find_map(|format| NaiveTime::parse_from_str(text, format).ok())
}
