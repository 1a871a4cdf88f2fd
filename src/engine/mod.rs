// Incident financial calculation engine
//
// Turns an incident's time markers and policy flags into a monetary cost:
//
//   cost = round(base_cost × impact × mttr_coefficient × discovery_coefficient)
//
// base_cost is the sum of per-minute slot rates over [start, recovery). The
// engine is pure: no shared state, no I/O, and it never fails. Inverted
// intervals clamp to zero duration; impact is used exactly as given.

mod accumulate;
mod coefficients;

pub use accumulate::{accumulate_by_segments, accumulate_per_minute, minute_points};
pub use coefficients::{
    discovery_coefficient, mttr_coefficient, MTTR_DISASTER, MTTR_FAST, MTTR_INSTANT,
    MTTR_NORMAL, MTTR_SLOW, ZERO_TOLERANCE_FLOOR,
};

use crate::incident::DiscoveryChannel;
use crate::rates::RateSchedule;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Everything the engine needs to price one incident
///
/// Timestamps are local wall-clock values in the deployment's reference zone.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FinancialInput {
    /// Incident start (T0)
    pub start: NaiveDateTime,
    /// Detection (T1)
    pub detection: NaiveDateTime,
    /// Full recovery (T2)
    pub recovery: NaiveDateTime,
    /// Share of normal business affected, nominally 0.0 - 1.0
    pub impact_coefficient: f64,
    /// How the incident was first identified
    pub channel: DiscoveryChannel,
    /// No-leniency policy applies
    pub is_zero_tolerance: bool,
    /// Confined to a canary release; fully exempt
    pub is_gray_scale: bool,
}

/// Raw intermediate values behind a cost
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancialDetails {
    pub base_cost: f64,
    pub mttr_coefficient: f64,
    pub discovery_coefficient: f64,
}

/// Engine output
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancialResult {
    /// Final cost, rounded to whole currency units
    pub cost: i64,
    /// Detection to recovery, rounded minutes
    pub mttr_minutes: i64,
    /// Start to recovery, rounded minutes
    pub loss_duration_minutes: i64,
    /// Unrounded factors
    pub details: FinancialDetails,
}

/// Real minutes from `from` to `to`, floored at zero
pub fn minutes_between(from: &NaiveDateTime, to: &NaiveDateTime) -> f64 {
    let millis = (*to - *from).num_milliseconds();
    (millis as f64 / 60_000.0).max(0.0)
}

/// Price one incident
///
/// # Example
/// ```
/// use downtime_ledger::engine::{compute_financials, FinancialInput};
/// use downtime_ledger::incident::DiscoveryChannel;
/// use downtime_ledger::rates::RateSchedule;
/// use chrono::NaiveDate;
///
/// let day = NaiveDate::from_ymd_opt(2024, 6, 10).unwrap();
/// let input = FinancialInput {
///     start: day.and_hms_opt(19, 0, 0).unwrap(),
///     detection: day.and_hms_opt(19, 5, 0).unwrap(),
///     recovery: day.and_hms_opt(19, 20, 0).unwrap(),
///     impact_coefficient: 0.5,
///     channel: DiscoveryChannel::Monitoring,
///     is_zero_tolerance: false,
///     is_gray_scale: false,
/// };
///
/// let result = compute_financials(&RateSchedule::default(), &input);
/// assert_eq!(result.cost, 18_000);
/// assert_eq!(result.mttr_minutes, 15);
/// assert_eq!(result.loss_duration_minutes, 20);
/// ```
pub fn compute_financials(rates: &RateSchedule, input: &FinancialInput) -> FinancialResult {
    let loss_duration_minutes = minutes_between(&input.start, &input.recovery);
    let mttr_minutes = minutes_between(&input.detection, &input.recovery);

    if input.is_gray_scale {
        tracing::debug!(
            mttr_minutes,
            loss_duration_minutes,
            "gray-scale incident exempted"
        );
        return FinancialResult {
            cost: 0,
            mttr_minutes: mttr_minutes.round() as i64,
            loss_duration_minutes: loss_duration_minutes.round() as i64,
            details: FinancialDetails::default(),
        };
    }

    let base_cost = accumulate_by_segments(rates, &input.start, &input.recovery);
    let mttr_coef = mttr_coefficient(mttr_minutes, input.is_zero_tolerance);
    let discovery_coef = discovery_coefficient(input.channel);

    let cost = base_cost * input.impact_coefficient * mttr_coef * discovery_coef;

    tracing::debug!(
        base_cost,
        impact = input.impact_coefficient,
        mttr_coef,
        discovery_coef,
        cost,
        "priced incident"
    );

    FinancialResult {
        cost: cost.round() as i64,
        mttr_minutes: mttr_minutes.round() as i64,
        loss_duration_minutes: loss_duration_minutes.round() as i64,
        details: FinancialDetails {
            base_cost,
            mttr_coefficient: mttr_coef,
            discovery_coefficient: discovery_coef,
        },
    }
}

#[cfg(test)]
mod tests;
