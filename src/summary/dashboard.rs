// Budget and quarterly status summary

use super::breakdown::{monthly_trend, severity_distribution, MonthlyCost, SeverityBucket};
use crate::budget::BudgetConfig;
use crate::currency::format_currency;
use crate::incident::Incident;
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// Budget usage above this percentage raises an alert
pub const BUDGET_ALERT_PERCENT: f64 = 80.0;

/// Number of incidents listed as recent
pub const RECENT_INCIDENTS: usize = 5;

/// Sum pinned at the `i64` limits; engine costs already saturate there
fn saturating_total(amounts: impl IntoIterator<Item = i64>) -> i64 {
    amounts.into_iter().fold(0, i64::saturating_add)
}

/// Calendar quarter (1-4) of a date
pub fn quarter_of(date: &NaiveDate) -> u32 {
    (date.month() - 1) / 3 + 1
}

/// Whether the quarter has crossed its red line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuarterStatus {
    Safe,
    Critical,
}

/// Losses of the calendar quarter containing the reference date
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuarterSummary {
    pub year: i32,
    pub quarter: u32,
    pub cost: i64,
    pub threshold: i64,
    pub status: QuarterStatus,
}

/// Dashboard figures for a set of incidents
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerSummary {
    pub total_cost: i64,
    /// May go negative once the budget is blown
    pub remaining_budget: i64,
    pub budget_usage_percent: f64,
    pub over_usage_alert: bool,
    pub incident_count: usize,
    /// Rounded mean of per-incident MTTR, 0 with no incidents
    pub average_mttr_minutes: i64,
    pub quarter: QuarterSummary,
    pub monthly: Vec<MonthlyCost>,
    pub severity: Vec<SeverityBucket>,
    /// Most recent incidents first
    pub recent: Vec<Incident>,
}

impl LedgerSummary {
    /// Summarise `incidents` (newest first) against the budget
    ///
    /// `as_of` selects the quarter whose losses are compared with the
    /// quarterly red line.
    pub fn build(incidents: &[Incident], budget: &BudgetConfig, as_of: NaiveDate) -> Self {
        let total_cost = saturating_total(incidents.iter().map(|i| i.cost));
        let budget_usage_percent = total_cost as f64 / budget.annual_total as f64 * 100.0;

        let average_mttr_minutes = if incidents.is_empty() {
            0
        } else {
            let sum = saturating_total(incidents.iter().map(|i| i.mttr_minutes));
            (sum as f64 / incidents.len() as f64).round() as i64
        };

        let year = as_of.year();
        let quarter = quarter_of(&as_of);
        let quarter_cost = saturating_total(
            incidents
                .iter()
                .filter(|i| {
                    let start = i.start_time.date();
                    start.year() == year && quarter_of(&start) == quarter
                })
                .map(|i| i.cost),
        );
        let status = if quarter_cost > budget.quarterly_warning {
            QuarterStatus::Critical
        } else {
            QuarterStatus::Safe
        };

        if status == QuarterStatus::Critical {
            tracing::warn!(
                year,
                quarter,
                quarter_cost,
                threshold = budget.quarterly_warning,
                "quarterly loss red line crossed"
            );
        }

        Self {
            total_cost,
            remaining_budget: budget.annual_total.saturating_sub(total_cost),
            budget_usage_percent,
            over_usage_alert: budget_usage_percent > BUDGET_ALERT_PERCENT,
            incident_count: incidents.len(),
            average_mttr_minutes,
            quarter: QuarterSummary {
                year,
                quarter,
                cost: quarter_cost,
                threshold: budget.quarterly_warning,
                status,
            },
            monthly: monthly_trend(incidents),
            severity: severity_distribution(incidents),
            recent: incidents.iter().take(RECENT_INCIDENTS).cloned().collect(),
        }
    }

    /// Generate human-readable report
    pub fn to_report_string(&self, symbol: &str) -> String {
        let money = |amount: i64| format_currency(amount, symbol);
        let mut report = String::new();

        report.push_str("=== Stability Budget ===\n");
        report.push_str(&format!(
            "Remaining annual budget: {}{}\n",
            money(self.remaining_budget),
            if self.over_usage_alert { "  [ALERT]" } else { "" }
        ));
        report.push_str(&format!(
            "Budget used: {:.1}% ({})\n",
            self.budget_usage_percent,
            money(self.total_cost)
        ));
        report.push_str(&format!("Incidents recorded: {}\n", self.incident_count));
        report.push_str(&format!(
            "Average MTTR: {} min\n",
            self.average_mttr_minutes
        ));
        report.push_str(&format!(
            "Q{} {} status: {} ({} of {} red line)\n",
            self.quarter.quarter,
            self.quarter.year,
            match self.quarter.status {
                QuarterStatus::Safe => "SAFE",
                QuarterStatus::Critical => "CRITICAL",
            },
            money(self.quarter.cost),
            money(self.quarter.threshold)
        ));

        if !self.monthly.is_empty() {
            report.push_str("\nMonthly cost:\n");
            for month in &self.monthly {
                report.push_str(&format!(
                    "  {}  {:>14}  ({} incidents)\n",
                    month.label(),
                    money(month.cost),
                    month.count
                ));
            }
        }

        if !self.severity.is_empty() {
            report.push_str("\nSeverity:\n");
            for bucket in &self.severity {
                report.push_str(&format!("  {:<18} {}\n", bucket.severity.to_string(), bucket.count));
            }
        }

        report.push_str("\nRecent incidents:\n");
        if self.recent.is_empty() {
            report.push_str("  No incidents recorded.\n");
        }
        for incident in &self.recent {
            report.push_str(&format!(
                "  {}  {:<32} {:>4} min  {:<14} {:>12}\n",
                incident.start_time.date(),
                incident.title,
                incident.mttr_minutes,
                incident.discovery_channel.to_string(),
                money(incident.cost)
            ));
        }

        report
    }
}
