//! Clock and calendar parsing.
//!
//! Arrival times arrive as 12-hour strings (`"6:45 pm"`) next to a
//! `YYYY-MM-DD` date. They are combined into an absolute instant and
//! carried through the scheduler as milliseconds since the Unix epoch.
//!
//! # Time Representation
//! Airport-local naive time is interpreted as UTC; only differences
//! between instants matter to the scheduler.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Milliseconds per minute.
pub const MINUTE_MS: i64 = 60_000;

/// A wall-clock time in 24-hour notation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClockTime {
    /// Hour (0..24).
    pub hour: u32,
    /// Minute (0..60).
    pub minute: u32,
}

impl ClockTime {
    /// Converts to a `chrono` time of day.
    pub fn to_naive(self) -> NaiveTime {
        // Range is guaranteed by `parse_clock`.
        NaiveTime::from_hms_opt(self.hour, self.minute, 0).unwrap_or(NaiveTime::MIN)
    }
}

/// Parses a 12-hour clock string such as `"9:05 am"` or `"12:30PM"`.
///
/// # Errors
/// [`Error::InvalidTime`] when the hour or minute is not numeric, the
/// minute is outside 0–59, the hour is outside 1–12, or the am/pm marker
/// is missing.
///
/// # Example
/// ```
/// use u_baggage::timing::parse_clock;
///
/// let t = parse_clock("12:15 am").unwrap();
/// assert_eq!((t.hour, t.minute), (0, 15));
/// let t = parse_clock("1:07 pm").unwrap();
/// assert_eq!((t.hour, t.minute), (13, 7));
/// assert!(parse_clock("13:00 pm").is_err());
/// ```
pub fn parse_clock(text: &str) -> Result<ClockTime> {
    let invalid = |reason| Error::InvalidTime {
        input: text.to_string(),
        reason,
    };

    let trimmed = text.trim();
    let split = trimmed.len().saturating_sub(2);
    if trimmed.len() < 2 || !trimmed.is_char_boundary(split) {
        return Err(invalid("missing am/pm marker"));
    }
    let (clock, marker) = trimmed.split_at(split);
    let pm = match marker.to_ascii_lowercase().as_str() {
        "am" => false,
        "pm" => true,
        _ => return Err(invalid("missing am/pm marker")),
    };

    let (hour, minute) = clock
        .trim_end()
        .split_once(':')
        .ok_or_else(|| invalid("expected H:MM"))?;
    if minute.len() != 2 {
        return Err(invalid("minute must have two digits"));
    }
    let hour: u32 = hour.parse().map_err(|_| invalid("hour is not numeric"))?;
    let minute: u32 = minute
        .parse()
        .map_err(|_| invalid("minute is not numeric"))?;

    if !(1..=12).contains(&hour) {
        return Err(invalid("hour outside 1-12"));
    }
    if minute > 59 {
        return Err(invalid("minute outside 0-59"));
    }

    let hour = match (hour, pm) {
        (12, false) => 0,
        (12, true) => 12,
        (h, false) => h,
        (h, true) => h + 12,
    };
    Ok(ClockTime { hour, minute })
}

/// Parses a `YYYY-MM-DD` calendar date.
pub fn parse_date(text: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(text.trim(), "%Y-%m-%d").map_err(|source| Error::InvalidDate {
        input: text.to_string(),
        source,
    })
}

/// Combines a calendar date and a clock time into an absolute timestamp.
pub fn combine(date: NaiveDate, time: ClockTime) -> NaiveDateTime {
    date.and_time(time.to_naive())
}

/// Converts a timestamp to milliseconds since the Unix epoch.
#[inline]
pub fn to_epoch_ms(at: NaiveDateTime) -> i64 {
    at.and_utc().timestamp_millis()
}

/// Converts milliseconds since the Unix epoch back to a timestamp.
pub fn from_epoch_ms(ms: i64) -> Option<NaiveDateTime> {
    DateTime::from_timestamp_millis(ms).map(|dt| dt.naive_utc())
}

/// Formats an instant as `YYYY-MM-DD HH:MM`.
pub fn format_instant(ms: i64) -> String {
    match from_epoch_ms(ms) {
        Some(at) => at.format("%Y-%m-%d %H:%M").to_string(),
        None => ms.to_string(),
    }
}

/// Formats a span as `H:MM:SS` (hours are not wrapped at 24).
///
/// # Example
/// ```
/// use u_baggage::timing::format_span;
///
/// assert_eq!(format_span(95 * 60_000), "1:35:00");
/// ```
pub fn format_span(ms: i64) -> String {
    let sign = if ms < 0 { "-" } else { "" };
    let total_secs = ms.abs() / 1000;
    format!(
        "{sign}{}:{:02}:{:02}",
        total_secs / 3600,
        (total_secs / 60) % 60,
        total_secs % 60
    )
}

/// Parses an `H:MM:SS` span into milliseconds.
pub fn parse_span(text: &str) -> Option<i64> {
    let mut parts = text.trim().split(':');
    let hours: i64 = parts.next()?.parse().ok()?;
    let minutes: i64 = parts.next()?.parse().ok()?;
    let seconds: i64 = parts.next()?.parse().ok()?;
    if parts.next().is_some() || hours < 0 || !(0..60).contains(&minutes) || !(0..60).contains(&seconds) {
        return None;
    }
    Some(((hours * 60 + minutes) * 60 + seconds) * 1000)
}
