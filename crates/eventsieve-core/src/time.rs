//! Start-time parsing for calendar events.
//!
//! Calendar APIs hand out event starts in two shapes: a full date-time
//! (RFC 3339, sometimes without an offset) or a plain calendar date for
//! all-day events. [`parse_start`] resolves both into an offset-aware
//! [`DateTime<FixedOffset>`], attaching UTC whenever the source carried no
//! offset of its own.

use std::borrow::Cow;

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, Utc};
use thiserror::Error;

const MILLIS_PER_DAY: i64 = 86_400_000;

/// Date-time layouts that carry an explicit offset.
///
/// A trailing `Z` is rewritten to `+00:00` before these are tried.
const OFFSET_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f%:z",
    "%Y-%m-%d %H:%M:%S%.f%:z",
    "%Y-%m-%dT%H:%M%:z",
    "%Y-%m-%d %H:%M%:z",
];

/// Date-time layouts without an offset; these resolve to UTC.
const NAIVE_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

const DATE_FORMAT: &str = "%Y-%m-%d";

/// A start value that matched neither the date-time nor the date layout.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unparseable start time: {value:?}")]
pub struct TimeParseError {
    /// The raw value as received.
    pub value: String,
}

/// Parses an event start value into an offset-aware datetime.
///
/// A full date-time parse is attempted first; if that fails the value is
/// read as a plain calendar date at midnight. Values without an offset are
/// pinned to UTC.
///
/// # Errors
///
/// Returns [`TimeParseError`] when the value fits neither layout.
pub fn parse_start(raw: &str) -> Result<DateTime<FixedOffset>, TimeParseError> {
    let value = raw.trim();
    parse_datetime(value)
        .or_else(|| parse_date(value))
        .ok_or_else(|| TimeParseError {
            value: raw.to_string(),
        })
}

fn parse_datetime(value: &str) -> Option<DateTime<FixedOffset>> {
    let value = match value.strip_suffix(['Z', 'z']) {
        Some(stripped) => Cow::Owned(format!("{stripped}+00:00")),
        None => Cow::Borrowed(value),
    };

    OFFSET_DATETIME_FORMATS
        .iter()
        .find_map(|fmt| DateTime::parse_from_str(&value, fmt).ok())
        .or_else(|| {
            NAIVE_DATETIME_FORMATS
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(&value, fmt).ok())
                .map(attach_utc)
        })
}

fn parse_date(value: &str) -> Option<DateTime<FixedOffset>> {
    let date = NaiveDate::parse_from_str(value, DATE_FORMAT).ok()?;
    date.and_hms_opt(0, 0, 0).map(attach_utc)
}

/// Pins a naive datetime to UTC.
pub fn attach_utc(naive: NaiveDateTime) -> DateTime<FixedOffset> {
    naive.and_utc().fixed_offset()
}

/// Whole days from `now` until `start`, rounded towards negative infinity.
///
/// An event twelve hours in the past is `-1` days away, an event
/// twenty-three hours ahead is `0`.
pub fn days_until(start: DateTime<FixedOffset>, now: DateTime<Utc>) -> i64 {
    start
        .signed_duration_since(now)
        .num_milliseconds()
        .div_euclid(MILLIS_PER_DAY)
}
