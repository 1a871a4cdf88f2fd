//! CSV output format for incidents and monthly costs
//!
//! For spreadsheet import of the ledger.

use crate::engine::FinancialResult;
use crate::incident::{DiscoveryChannel, Incident};
use crate::summary::MonthlyCost;

/// CSV output formatter for the incident list
#[derive(Debug)]
pub struct CsvOutput {
    incidents: Vec<Incident>,
    include_description: bool,
}

impl CsvOutput {
    /// Create a new CSV output formatter
    pub fn new(include_description: bool) -> Self {
        Self {
            incidents: Vec::new(),
            include_description,
        }
    }

    /// Add an incident to the output
    pub fn add_incident(&mut self, incident: Incident) {
        self.incidents.push(incident);
    }

    /// Generate CSV header row based on enabled flags
    fn header(&self) -> String {
        let mut headers = vec!["id", "title"];

        if self.include_description {
            headers.push("description");
        }

        headers.extend([
            "start_time",
            "detection_time",
            "recovery_time",
            "impact_coefficient",
            "discovery_channel",
            "zero_tolerance",
            "gray_scale",
            "loss_minutes",
            "mttr_minutes",
            "cost",
        ]);

        headers.join(",")
    }

    /// Escape CSV field (handle commas, quotes, newlines)
    fn escape_field(field: &str) -> String {
        if field.contains(',') || field.contains('"') || field.contains('\n') {
            format!("\"{}\"", field.replace('"', "\"\""))
        } else {
            field.to_string()
        }
    }

    /// Format an incident as CSV row
    fn format_incident(&self, incident: &Incident) -> String {
        let mut fields = vec![
            Self::escape_field(&incident.id),
            Self::escape_field(&incident.title),
        ];

        if self.include_description {
            fields.push(Self::escape_field(&incident.description));
        }

        fields.extend([
            incident.start_time.to_string(),
            incident.detection_time.to_string(),
            incident.recovery_time.to_string(),
            incident.impact_coefficient.to_string(),
            match incident.discovery_channel {
                DiscoveryChannel::Monitoring => "MONITORING".to_string(),
                DiscoveryChannel::UserComplaint => "USER_COMPLAINT".to_string(),
            },
            incident.is_zero_tolerance.to_string(),
            incident.is_gray_scale.to_string(),
            incident.loss_duration_minutes.to_string(),
            incident.mttr_minutes.to_string(),
            incident.cost.to_string(),
        ]);

        fields.join(",")
    }

    /// Generate CSV output as string
    pub fn to_csv(&self) -> String {
        let mut output = String::new();

        output.push_str(&self.header());
        output.push('\n');

        for incident in &self.incidents {
            output.push_str(&self.format_incident(incident));
            output.push('\n');
        }

        output
    }
}

/// Monthly cost trend as CSV
pub fn monthly_to_csv(months: &[MonthlyCost]) -> String {
    let mut output = String::from("month,incidents,cost\n");

    for month in months {
        output.push_str(&month.label());
        output.push(',');
        output.push_str(&month.count.to_string());
        output.push(',');
        output.push_str(&month.cost.to_string());
        output.push('\n');
    }

    output
}

/// Single priced preview as a one-row CSV
pub fn preview_to_csv(result: &FinancialResult) -> String {
    format!(
        "loss_minutes,mttr_minutes,base_cost,mttr_coefficient,discovery_coefficient,cost\n{},{},{},{},{},{}\n",
        result.loss_duration_minutes,
        result.mttr_minutes,
        result.details.base_cost,
        result.details.mttr_coefficient,
        result.details.discovery_coefficient,
        result.cost
    )
}
