// MTTR and discovery multipliers
//
// Both are step functions over small closed inputs. The MTTR tiers are tested
// in order on the unrounded minutes: `< 5`, `< 15`, `< 30`, `<= 60`. That
// ordering puts exactly 30 minutes into the 1.5 tier.

use crate::incident::DiscoveryChannel;

/// Multiplier for remediation faster than 5 minutes
pub const MTTR_INSTANT: f64 = 0.0;
/// Multiplier for remediation in [5, 15) minutes
pub const MTTR_FAST: f64 = 0.5;
/// Multiplier for remediation in [15, 30) minutes
pub const MTTR_NORMAL: f64 = 1.0;
/// Multiplier for remediation in [30, 60] minutes
pub const MTTR_SLOW: f64 = 1.5;
/// Multiplier for remediation beyond 60 minutes
pub const MTTR_DISASTER: f64 = 2.0;

/// Lowest MTTR multiplier allowed under zero tolerance
pub const ZERO_TOLERANCE_FLOOR: f64 = 1.0;

/// MTTR multiplier
///
/// `mttr_minutes` is the unrounded detection-to-recovery time. Under zero
/// tolerance any discount (a multiplier below 1.0) is voided; penalties stay
/// exactly as the normal table assigns them.
///
/// # Example
/// ```
/// use downtime_ledger::engine::mttr_coefficient;
///
/// assert_eq!(mttr_coefficient(3.0, false), 0.0);
/// assert_eq!(mttr_coefficient(3.0, true), 1.0);
/// assert_eq!(mttr_coefficient(30.0, false), 1.5);
/// ```
pub fn mttr_coefficient(mttr_minutes: f64, is_zero_tolerance: bool) -> f64 {
    let normal = if mttr_minutes < 5.0 {
        MTTR_INSTANT
    } else if mttr_minutes < 15.0 {
        MTTR_FAST
    } else if mttr_minutes < 30.0 {
        MTTR_NORMAL
    } else if mttr_minutes <= 60.0 {
        MTTR_SLOW
    } else {
        MTTR_DISASTER
    };

    if is_zero_tolerance {
        normal.max(ZERO_TOLERANCE_FLOOR)
    } else {
        normal
    }
}

/// Reputational multiplier for how the incident surfaced
pub fn discovery_coefficient(channel: DiscoveryChannel) -> f64 {
    match channel {
        DiscoveryChannel::Monitoring => 1.0,
        DiscoveryChannel::UserComplaint => 1.5,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normal_tiers() {
        assert_eq!(mttr_coefficient(0.0, false), 0.0);
        assert_eq!(mttr_coefficient(4.99, false), 0.0);
        assert_eq!(mttr_coefficient(5.0, false), 0.5);
        assert_eq!(mttr_coefficient(14.99, false), 0.5);
        assert_eq!(mttr_coefficient(15.0, false), 1.0);
        assert_eq!(mttr_coefficient(29.99, false), 1.0);
        assert_eq!(mttr_coefficient(60.0, false), 1.5);
        assert_eq!(mttr_coefficient(60.01, false), 2.0);
        assert_eq!(mttr_coefficient(600.0, false), 2.0);
    }

    #[test]
    fn test_thirty_minutes_is_slow_tier() {
        assert_eq!(mttr_coefficient(30.0, false), 1.5);
        assert_eq!(mttr_coefficient(30.4, false), 1.5);
        assert_eq!(mttr_coefficient(30.0, true), 1.5);
    }

    #[test]
    fn test_zero_tolerance_voids_discounts() {
        assert_eq!(mttr_coefficient(1.0, true), 1.0);
        assert_eq!(mttr_coefficient(10.0, true), 1.0);
        assert_eq!(mttr_coefficient(20.0, true), 1.0);
    }

    #[test]
    fn test_zero_tolerance_keeps_penalties() {
        assert_eq!(mttr_coefficient(45.0, true), 1.5);
        assert_eq!(mttr_coefficient(90.0, true), 2.0);
    }

    #[test]
    fn test_discovery() {
        assert_eq!(discovery_coefficient(DiscoveryChannel::Monitoring), 1.0);
        assert_eq!(discovery_coefficient(DiscoveryChannel::UserComplaint), 1.5);
    }
}
