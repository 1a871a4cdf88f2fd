// Dashboard aggregates over recorded incidents
//
// Budget burn, quarterly red-line status, monthly cost trend and severity
// distribution. All figures derive from the stored `cost` and `mttr_minutes`
// of each incident; nothing here re-prices.

mod breakdown;
mod dashboard;

pub use breakdown::{
    monthly_trend, severity_distribution, MonthlyCost, MttrBand, Severity, SeverityBucket,
    MAJOR_COST_THRESHOLD, CRITICAL_COST_THRESHOLD,
};
pub use dashboard::{
    quarter_of, LedgerSummary, QuarterStatus, QuarterSummary, BUDGET_ALERT_PERCENT,
    RECENT_INCIDENTS,
};
