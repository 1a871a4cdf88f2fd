// Engine scenarios taken from real incident reviews
//
// Each test prices a complete incident and checks both the cost and the
// breakdown a reviewer would see.

use super::*;
use chrono::{NaiveDate, TimeDelta};

fn at(day: u32, hour: u32, minute: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 6, day)
        .unwrap()
        .and_hms_opt(hour, minute, 0)
        .unwrap()
}

fn incident(
    start: NaiveDateTime,
    detection: NaiveDateTime,
    recovery: NaiveDateTime,
) -> FinancialInput {
    FinancialInput {
        start,
        detection,
        recovery,
        impact_coefficient: 1.0,
        channel: DiscoveryChannel::Monitoring,
        is_zero_tolerance: false,
        is_gray_scale: false,
    }
}

/// Login latency: 20 minutes in the Gold slot at half impact
#[test]
fn test_gold_slot_half_impact() {
    let input = FinancialInput {
        impact_coefficient: 0.5,
        ..incident(at(10, 19, 0), at(10, 19, 5), at(10, 19, 20))
    };

    let result = compute_financials(&RateSchedule::default(), &input);

    assert_eq!(result.loss_duration_minutes, 20);
    assert_eq!(result.mttr_minutes, 15);
    assert_eq!(result.details.base_cost, 36_000.0);
    assert_eq!(result.details.mttr_coefficient, 1.0);
    assert_eq!(result.details.discovery_coefficient, 1.0);
    assert_eq!(result.cost, 18_000);
}

/// Payment gateway: an hour of Silver, reported by customers, 30 min MTTR
#[test]
fn test_silver_slot_user_complaint() {
    let input = FinancialInput {
        channel: DiscoveryChannel::UserComplaint,
        ..incident(at(15, 14, 0), at(15, 14, 30), at(15, 15, 0))
    };

    let result = compute_financials(&RateSchedule::default(), &input);

    assert_eq!(result.loss_duration_minutes, 60);
    assert_eq!(result.mttr_minutes, 30);
    assert_eq!(result.details.base_cost, 33_300.0);
    assert_eq!(result.details.mttr_coefficient, 1.5);
    assert_eq!(result.details.discovery_coefficient, 1.5);
    assert_eq!(result.cost, 74_925);
}

#[test]
fn test_slot_boundary_base_cost() {
    let input = incident(at(3, 17, 58), at(3, 17, 58), at(3, 18, 5));
    let result = compute_financials(&RateSchedule::default(), &input);
    assert_eq!(result.details.base_cost, 10_110.0);
}

#[test]
fn test_gray_scale_overrides_everything() {
    let input = FinancialInput {
        is_gray_scale: true,
        is_zero_tolerance: true,
        channel: DiscoveryChannel::UserComplaint,
        ..incident(at(10, 19, 0), at(10, 19, 30), at(10, 21, 0))
    };

    let result = compute_financials(&RateSchedule::default(), &input);

    assert_eq!(result.cost, 0);
    assert_eq!(result.details, FinancialDetails::default());
    assert_eq!(result.loss_duration_minutes, 120);
    assert_eq!(result.mttr_minutes, 90);
}

#[test]
fn test_gray_scale_rounds_fractional_durations() {
    let start = at(10, 19, 0);
    let input = FinancialInput {
        is_gray_scale: true,
        ..incident(
            start,
            start + TimeDelta::seconds(30),
            start + TimeDelta::seconds(90),
        )
    };

    let result = compute_financials(&RateSchedule::default(), &input);

    // 1.5 min loss rounds up, 1.0 min MTTR stays
    assert_eq!(result.cost, 0);
    assert_eq!(result.details, FinancialDetails::default());
    assert_eq!(result.loss_duration_minutes, 2);
    assert_eq!(result.mttr_minutes, 1);

    let input = FinancialInput {
        recovery: start + TimeDelta::seconds(89),
        ..input
    };
    let result = compute_financials(&RateSchedule::default(), &input);
    assert_eq!(result.loss_duration_minutes, 1);
    assert_eq!(result.mttr_minutes, 1);
}

#[test]
fn test_fast_fix_is_free_unless_zero_tolerance() {
    let base = incident(at(10, 10, 0), at(10, 10, 0), at(10, 10, 3));
    let rates = RateSchedule::default();

    let lenient = compute_financials(&rates, &base);
    assert_eq!(lenient.cost, 0);
    assert_eq!(lenient.details.base_cost, 3.0 * 555.0);

    let strict = compute_financials(
        &rates,
        &FinancialInput {
            is_zero_tolerance: true,
            ..base
        },
    );
    assert_eq!(strict.details.mttr_coefficient, 1.0);
    assert_eq!(strict.cost, 1_665);
}

#[test]
fn test_start_equals_recovery() {
    let input = incident(at(10, 12, 0), at(10, 12, 0), at(10, 12, 0));
    let result = compute_financials(&RateSchedule::default(), &input);
    assert_eq!(result.loss_duration_minutes, 0);
    assert_eq!(result.details.base_cost, 0.0);
    assert_eq!(result.cost, 0);
}

#[test]
fn test_recovery_before_start_clamps() {
    let input = incident(at(10, 12, 0), at(10, 12, 10), at(10, 11, 0));
    let result = compute_financials(&RateSchedule::default(), &input);
    assert_eq!(result.loss_duration_minutes, 0);
    assert_eq!(result.mttr_minutes, 0);
    assert_eq!(result.details.base_cost, 0.0);
    assert_eq!(result.cost, 0);
}

#[test]
fn test_negative_impact_propagates() {
    let input = FinancialInput {
        impact_coefficient: -1.0,
        ..incident(at(10, 10, 0), at(10, 10, 0), at(10, 10, 20))
    };
    let result = compute_financials(&RateSchedule::default(), &input);
    assert_eq!(result.cost, -11_100);
}

#[test]
fn test_detection_before_start_uses_longer_mttr() {
    // Detection lagging recovery is impossible; detection preceding start is not.
    let input = incident(at(10, 10, 0), at(10, 9, 0), at(10, 10, 10));
    let result = compute_financials(&RateSchedule::default(), &input);
    assert_eq!(result.mttr_minutes, 70);
    assert_eq!(result.details.mttr_coefficient, 2.0);
}

#[test]
fn test_minutes_are_rounded_only_in_result() {
    // 29m40s MTTR: rounds to 30 for display but prices at the 1.0 tier
    let start = at(10, 10, 0);
    let recovery = start + chrono::TimeDelta::seconds(29 * 60 + 40);
    let input = incident(start, start, recovery);

    let result = compute_financials(&RateSchedule::default(), &input);

    assert_eq!(result.mttr_minutes, 30);
    assert_eq!(result.details.mttr_coefficient, 1.0);
    assert_eq!(result.details.base_cost, 30.0 * 555.0);
}

#[test]
fn test_custom_rates() {
    let rates = RateSchedule {
        gold: 100.0,
        silver: 10.0,
        bronze: 1.0,
    };
    let input = incident(at(10, 8, 0), at(10, 8, 0), at(10, 9, 30));
    let result = compute_financials(&rates, &input);
    assert_eq!(result.details.base_cost, 60.0 + 300.0);
}

#[test]
fn test_idempotent() {
    let input = FinancialInput {
        impact_coefficient: 0.37,
        channel: DiscoveryChannel::UserComplaint,
        ..incident(at(10, 17, 1), at(10, 17, 40), at(10, 19, 13))
    };
    let rates = RateSchedule::default();
    assert_eq!(
        compute_financials(&rates, &input),
        compute_financials(&rates, &input)
    );
}

#[test]
fn test_result_serializes_camel_case() {
    let input = incident(at(10, 19, 0), at(10, 19, 5), at(10, 19, 20));
    let result = compute_financials(&RateSchedule::default(), &input);
    let json = serde_json::to_string(&result).unwrap();
    assert!(json.contains("\"mttrMinutes\":15"));
    assert!(json.contains("\"lossDurationMinutes\":20"));
    assert!(json.contains("\"baseCost\":36000.0"));
}
