// Grouping of incidents by month and by severity

use crate::incident::Incident;
use chrono::Datelike;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Costs above this are Critical
pub const CRITICAL_COST_THRESHOLD: i64 = 50_000;

/// Costs above this (and up to Critical) are Major
pub const MAJOR_COST_THRESHOLD: i64 = 10_000;

/// Severity class by final cost
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Critical,
    Major,
    Minor,
}

impl Severity {
    pub fn for_cost(cost: i64) -> Self {
        if cost > CRITICAL_COST_THRESHOLD {
            Severity::Critical
        } else if cost > MAJOR_COST_THRESHOLD {
            Severity::Major
        } else {
            Severity::Minor
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Critical => write!(f, "critical (>{})", CRITICAL_COST_THRESHOLD),
            Severity::Major => write!(f, "major (>{})", MAJOR_COST_THRESHOLD),
            Severity::Minor => write!(f, "minor (<={})", MAJOR_COST_THRESHOLD),
        }
    }
}

/// Recovery speed band used to flag slow fixes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MttrBand {
    /// 30 minutes or less
    Healthy,
    /// Over 30, up to 60 minutes
    Slow,
    /// Over an hour
    Disaster,
}

impl MttrBand {
    pub fn for_minutes(mttr_minutes: i64) -> Self {
        if mttr_minutes > 60 {
            MttrBand::Disaster
        } else if mttr_minutes > 30 {
            MttrBand::Slow
        } else {
            MttrBand::Healthy
        }
    }
}

/// Count of incidents in one severity class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeverityBucket {
    pub severity: Severity,
    pub count: usize,
}

/// Cost and count of incidents starting in one calendar month
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyCost {
    pub year: i32,
    pub month: u32,
    pub cost: i64,
    pub count: usize,
}

impl MonthlyCost {
    /// `YYYY-MM` label
    pub fn label(&self) -> String {
        format!("{:04}-{:02}", self.year, self.month)
    }
}

/// Severity distribution, most severe first, empty classes omitted
pub fn severity_distribution(incidents: &[Incident]) -> Vec<SeverityBucket> {
    let mut counts: BTreeMap<Severity, usize> = BTreeMap::new();
    for incident in incidents {
        *counts.entry(Severity::for_cost(incident.cost)).or_default() += 1;
    }

    counts
        .into_iter()
        .map(|(severity, count)| SeverityBucket { severity, count })
        .collect()
}

/// Monthly cost trend by incident start, oldest month first
pub fn monthly_trend(incidents: &[Incident]) -> Vec<MonthlyCost> {
    let mut months: BTreeMap<(i32, u32), (i64, usize)> = BTreeMap::new();
    for incident in incidents {
        let key = (incident.start_time.year(), incident.start_time.month());
        let entry = months.entry(key).or_default();
        entry.0 = entry.0.saturating_add(incident.cost);
        entry.1 += 1;
    }

    months
        .into_iter()
        .map(|((year, month), (cost, count))| MonthlyCost {
            year,
            month,
            cost,
            count,
        })
        .collect()
}
