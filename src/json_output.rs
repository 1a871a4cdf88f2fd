//! JSON output format for incidents, previews and summaries

use crate::engine::FinancialResult;
use crate::incident::Incident;
use crate::summary::LedgerSummary;
use serde::{Deserialize, Serialize};

/// Format name written into every document
pub const JSON_FORMAT: &str = "downtime-ledger-json-v1";

/// Root JSON output structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonOutput {
    /// Format version identifier
    pub version: String,
    /// Format name
    pub format: String,
    /// Incidents, most recent first
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub incidents: Vec<Incident>,
    /// Live cost preview (not stored)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preview: Option<FinancialResult>,
    /// Dashboard summary
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<LedgerSummary>,
}

impl JsonOutput {
    /// Create a new JSON output structure
    pub fn new() -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            format: JSON_FORMAT.to_string(),
            incidents: Vec::new(),
            preview: None,
            summary: None,
        }
    }

    /// Add an incident to the output
    pub fn add_incident(&mut self, incident: Incident) {
        self.incidents.push(incident);
    }

    pub fn set_preview(&mut self, preview: FinancialResult) {
        self.preview = Some(preview);
    }

    pub fn set_summary(&mut self, summary: LedgerSummary) {
        self.summary = Some(summary);
    }

    /// Serialize to pretty JSON string
    pub fn to_json(&self) -> anyhow::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl Default for JsonOutput {
    fn default() -> Self {
        Self::new()
    }
}
