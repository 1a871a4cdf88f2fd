//! Time-of-day rate schedule
//!
//! Downtime is priced per minute, and the price depends on which slot of the
//! local day the minute falls into. Evenings carry the most traffic and so the
//! highest rate; the overnight trough the lowest.
//!
//! | Slot   | Local hours     | Default rate / min |
//! |--------|-----------------|--------------------|
//! | Gold   | [18:00, 24:00)  | 1800               |
//! | Silver | [09:00, 18:00)  | 555                |
//! | Bronze | [00:00, 09:00)  | 200                |

use chrono::{NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};
use std::fmt;

/// First local hour of the Silver slot
pub const SILVER_START_HOUR: u32 = 9;

/// First local hour of the Gold slot
pub const GOLD_START_HOUR: u32 = 18;

/// Pricing slot of a local wall-clock hour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TimeSlot {
    /// Evening peak, 18:00 - 24:00
    Gold,
    /// Business hours, 09:00 - 18:00
    Silver,
    /// Overnight trough, 00:00 - 09:00
    Bronze,
}

impl TimeSlot {
    /// All slots in display order (most expensive first)
    pub const ALL: [TimeSlot; 3] = [TimeSlot::Gold, TimeSlot::Silver, TimeSlot::Bronze];

    /// Classify a local hour of day (0-23)
    ///
    /// Hours outside 0-23 cannot come out of `chrono`; anything at or past 18
    /// is treated as Gold.
    pub fn for_hour(hour: u32) -> Self {
        if hour >= GOLD_START_HOUR {
            TimeSlot::Gold
        } else if hour >= SILVER_START_HOUR {
            TimeSlot::Silver
        } else {
            TimeSlot::Bronze
        }
    }

    /// Classify the hour of a local wall-clock instant
    pub fn for_instant(instant: &NaiveDateTime) -> Self {
        Self::for_hour(instant.hour())
    }

    /// Half-open local hour range covered by this slot, as `(start, end)`
    pub fn hours(&self) -> (u32, u32) {
        match self {
            TimeSlot::Gold => (GOLD_START_HOUR, 24),
            TimeSlot::Silver => (SILVER_START_HOUR, GOLD_START_HOUR),
            TimeSlot::Bronze => (0, SILVER_START_HOUR),
        }
    }

    /// Human-readable label
    pub fn label(&self) -> &'static str {
        match self {
            TimeSlot::Gold => "Gold",
            TimeSlot::Silver => "Silver",
            TimeSlot::Bronze => "Bronze",
        }
    }
}

impl fmt::Display for TimeSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (start, end) = self.hours();
        write!(f, "{} ({:02}:00 - {:02}:00)", self.label(), start, end)
    }
}

/// Per-minute base rate for each slot
///
/// Loaded once at start-up and never mutated afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RateSchedule {
    /// Rate per minute during the Gold slot
    pub gold: f64,
    /// Rate per minute during the Silver slot
    pub silver: f64,
    /// Rate per minute during the Bronze slot
    pub bronze: f64,
}

impl Default for RateSchedule {
    fn default() -> Self {
        Self {
            gold: 1800.0,
            silver: 555.0,
            bronze: 200.0,
        }
    }
}

impl RateSchedule {
    /// Rate per minute for a slot
    pub fn rate(&self, slot: TimeSlot) -> f64 {
        match slot {
            TimeSlot::Gold => self.gold,
            TimeSlot::Silver => self.silver,
            TimeSlot::Bronze => self.bronze,
        }
    }

    /// Rate per minute for the minute starting at `instant`
    pub fn rate_at(&self, instant: &NaiveDateTime) -> f64 {
        self.rate(TimeSlot::for_instant(instant))
    }

    /// Validate rates (finite and non-negative)
    pub fn validate(&self) -> Result<(), String> {
        for slot in TimeSlot::ALL {
            let rate = self.rate(slot);
            if !rate.is_finite() || rate < 0.0 {
                return Err(format!(
                    "rate for {} slot must be a non-negative number, got {}",
                    slot.label(),
                    rate
                ));
            }
        }
        Ok(())
    }
}
