//! Timestamp parsing into local wall-clock time
//!
//! Rate slots are defined on the local clock of one reference zone, fixed per
//! deployment as a UTC offset. Text carrying its own offset (`Z`, `+02:00`) is
//! converted into that zone; naive text (the `datetime-local` form format) is
//! taken as already local.

use chrono::{DateTime, FixedOffset, NaiveDateTime, TimeZone};
use thiserror::Error;

/// Naive formats accepted, most specific first
const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// Offset-bearing formats outside RFC 3339 (no seconds, `+0800` offsets)
const OFFSET_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f%#z",
    "%Y-%m-%dT%H:%M%#z",
    "%Y-%m-%d %H:%M:%S%.f%#z",
    "%Y-%m-%d %H:%M%#z",
];

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TimestampError {
    #[error("Empty timestamp")]
    Empty,

    #[error("Unrecognized timestamp '{0}' (expected ISO 8601, e.g. 2024-06-10T19:00)")]
    Unrecognized(String),

    #[error("Invalid UTC offset '{0}' (expected +HH:MM, -HH:MM or Z)")]
    InvalidOffset(String),
}

/// Parse timestamp text into local wall-clock time at `offset`
///
/// # Example
/// ```
/// use downtime_ledger::timestamp::{parse_local, parse_utc_offset};
///
/// let cst = parse_utc_offset("+08:00").unwrap();
/// let local = parse_local("2024-06-10T11:00:00Z", cst).unwrap();
/// assert_eq!(local.to_string(), "2024-06-10 19:00:00");
///
/// let naive = parse_local("2024-06-10T19:00", cst).unwrap();
/// assert_eq!(naive, local);
/// ```
pub fn parse_local(text: &str, offset: FixedOffset) -> Result<NaiveDateTime, TimestampError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(TimestampError::Empty);
    }

    let with_offset = DateTime::parse_from_rfc3339(text).ok().or_else(|| {
        OFFSET_FORMATS
            .iter()
            .find_map(|format| DateTime::parse_from_str(text, format).ok())
    });
    if let Some(instant) = with_offset {
        return Ok(instant.with_timezone(&offset).naive_local());
    }

    // `Z` suffix on a short form, e.g. 2024-06-10T11:00Z
    if let Some(utc) = text.strip_suffix(|c: char| c == 'Z' || c == 'z') {
        if let Some(naive) = parse_naive(utc) {
            return Ok(offset.from_utc_datetime(&naive).naive_local());
        }
    }

    parse_naive(text).ok_or_else(|| TimestampError::Unrecognized(text.to_string()))
}

fn parse_naive(text: &str) -> Option<NaiveDateTime> {
    NAIVE_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(text, format).ok())
}

/// Parse a UTC offset such as `+08:00`, `-0530` or `Z`
pub fn parse_utc_offset(text: &str) -> Result<FixedOffset, TimestampError> {
    let trimmed = text.trim();
    let invalid = || TimestampError::InvalidOffset(text.to_string());

    if trimmed.eq_ignore_ascii_case("z") || trimmed.eq_ignore_ascii_case("utc") {
        return FixedOffset::east_opt(0).ok_or_else(invalid);
    }

    let (sign, rest) = match trimmed.chars().next() {
        Some('+') => (1, &trimmed[1..]),
        Some('-') => (-1, &trimmed[1..]),
        _ => return Err(invalid()),
    };

    let digits: String = rest.chars().filter(|c| *c != ':').collect();
    if digits.len() != 4 || !digits.chars().all(|c| c.is_ascii_digit()) {
        return Err(invalid());
    }

    let hours: i32 = digits[..2].parse().map_err(|_| invalid())?;
    let minutes: i32 = digits[2..].parse().map_err(|_| invalid())?;
    if minutes >= 60 {
        return Err(invalid());
    }

    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60)).ok_or_else(invalid)
}
