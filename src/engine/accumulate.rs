// Base cost accumulation over [start, recovery)
//
// Pricing points sit at start, start + 1min, start + 2min, ... and stop
// strictly before recovery. Each point is charged the rate of its local hour.
// A trailing partial minute therefore still counts as a full point, and an
// empty or inverted interval has no points at all.

use crate::rates::{RateSchedule, TimeSlot, GOLD_START_HOUR, SILVER_START_HOUR};
use chrono::{NaiveDateTime, NaiveTime, TimeDelta, Timelike};

/// Number of one-minute pricing points in `[start, end)`
///
/// Exact to the nanosecond: a span of 60s + 1ns holds two points.
pub fn minute_points(start: &NaiveDateTime, end: &NaiveDateTime) -> i64 {
    if start >= end {
        return 0;
    }
    let span = *end - *start;
    let secs = span.num_seconds();
    let whole = secs / 60;
    if secs % 60 > 0 || span.subsec_nanos() > 0 {
        whole + 1
    } else {
        whole
    }
}

/// Reference accumulation: one iteration per pricing point
///
/// Cost is linear in the incident length. Kept for verification against
/// [`accumulate_by_segments`], which the engine uses.
pub fn accumulate_per_minute(
    rates: &RateSchedule,
    start: &NaiveDateTime,
    end: &NaiveDateTime,
) -> f64 {
    let step = TimeDelta::minutes(1);
    let mut current = *start;
    let mut total = 0.0;

    while current < *end {
        total += rates.rate_at(&current);
        current += step;
    }

    total
}

/// Closed-form accumulation over slot boundaries
///
/// Walks from one slot boundary to the next and charges every pricing point
/// inside the stretch in one multiplication. Produces the same sum as
/// [`accumulate_per_minute`] for any rate table whose products are exact
/// (all integer rates).
pub fn accumulate_by_segments(
    rates: &RateSchedule,
    start: &NaiveDateTime,
    end: &NaiveDateTime,
) -> f64 {
    let mut remaining = minute_points(start, end);
    let mut cursor = *start;
    let mut total = 0.0;

    while remaining > 0 {
        let slot = TimeSlot::for_instant(&cursor);
        let boundary = next_slot_boundary(&cursor);
        let points = minute_points(&cursor, &boundary).min(remaining);

        total += points as f64 * rates.rate(slot);
        remaining -= points;

        match cursor.checked_add_signed(TimeDelta::minutes(points)) {
            Some(next) => cursor = next,
            None => break,
        }
    }

    total
}

/// First instant after `instant` at which the pricing slot changes
fn next_slot_boundary(instant: &NaiveDateTime) -> NaiveDateTime {
    let date = instant.date();
    let hour = instant.hour();

    let (date, boundary_hour) = if hour < SILVER_START_HOUR {
        (date, SILVER_START_HOUR)
    } else if hour < GOLD_START_HOUR {
        (date, GOLD_START_HOUR)
    } else {
        match date.succ_opt() {
            Some(next) => (next, 0),
            None => return NaiveDateTime::MAX,
        }
    };

    match NaiveTime::from_hms_opt(boundary_hour, 0, 0) {
        Some(time) => date.and_time(time),
        None => NaiveDateTime::MAX,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(day: u32, hour: u32, minute: u32, second: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, day)
            .unwrap()
            .and_hms_opt(hour, minute, second)
            .unwrap()
    }

    #[test]
    fn test_minute_points() {
        assert_eq!(minute_points(&at(1, 10, 0, 0), &at(1, 10, 0, 0)), 0);
        assert_eq!(minute_points(&at(1, 10, 0, 0), &at(1, 10, 5, 0)), 5);
        assert_eq!(minute_points(&at(1, 10, 0, 0), &at(1, 10, 5, 1)), 6);
        assert_eq!(minute_points(&at(1, 10, 0, 0), &at(1, 10, 0, 1)), 1);
        assert_eq!(minute_points(&at(1, 10, 5, 0), &at(1, 10, 0, 0)), 0);
    }

    #[test]
    fn test_slot_boundary_crossing() {
        let rates = RateSchedule::default();
        let start = at(1, 17, 58, 0);
        let end = at(1, 18, 5, 0);
        let expected = 2.0 * 555.0 + 5.0 * 1800.0;
        assert_eq!(accumulate_per_minute(&rates, &start, &end), expected);
        assert_eq!(accumulate_by_segments(&rates, &start, &end), expected);
    }

    #[test]
    fn test_midnight_crossing() {
        let rates = RateSchedule::default();
        let start = at(1, 23, 50, 0);
        let end = at(2, 0, 10, 0);
        let expected = 10.0 * 1800.0 + 10.0 * 200.0;
        assert_eq!(accumulate_per_minute(&rates, &start, &end), expected);
        assert_eq!(accumulate_by_segments(&rates, &start, &end), expected);
    }

    #[test]
    fn test_partial_trailing_minute_charged() {
        let rates = RateSchedule::default();
        let start = at(1, 10, 0, 0);
        let end = at(1, 10, 2, 30);
        assert_eq!(accumulate_per_minute(&rates, &start, &end), 3.0 * 555.0);
        assert_eq!(accumulate_by_segments(&rates, &start, &end), 3.0 * 555.0);
    }

    #[test]
    fn test_unaligned_start_straddles_boundary() {
        // Points at 08:59:30, 09:00:30, 09:01:30
        let rates = RateSchedule::default();
        let start = at(1, 8, 59, 30);
        let end = at(1, 9, 2, 0);
        let expected = 200.0 + 2.0 * 555.0;
        assert_eq!(accumulate_per_minute(&rates, &start, &end), expected);
        assert_eq!(accumulate_by_segments(&rates, &start, &end), expected);
    }

    #[test]
    fn test_full_day() {
        let rates = RateSchedule::default();
        let start = at(1, 0, 0, 0);
        let end = at(2, 0, 0, 0);
        let expected = 540.0 * 200.0 + 540.0 * 555.0 + 360.0 * 1800.0;
        assert_eq!(accumulate_per_minute(&rates, &start, &end), expected);
        assert_eq!(accumulate_by_segments(&rates, &start, &end), expected);
    }

    #[test]
    fn test_inverted_interval_is_free() {
        let rates = RateSchedule::default();
        let start = at(2, 12, 0, 0);
        let end = at(1, 12, 0, 0);
        assert_eq!(accumulate_per_minute(&rates, &start, &end), 0.0);
        assert_eq!(accumulate_by_segments(&rates, &start, &end), 0.0);
    }

    #[test]
    fn test_next_slot_boundary() {
        assert_eq!(next_slot_boundary(&at(1, 3, 15, 0)), at(1, 9, 0, 0));
        assert_eq!(next_slot_boundary(&at(1, 9, 0, 0)), at(1, 18, 0, 0));
        assert_eq!(next_slot_boundary(&at(1, 18, 0, 0)), at(2, 0, 0, 0));
    }
}
