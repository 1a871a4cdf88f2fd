//! Incident records and the form draft they are created from
//!
//! A draft holds raw, possibly incomplete user input. Validation turns it
//! into an [`IncidentInput`]; the store prices that once and freezes the
//! result into an [`Incident`].

use crate::engine::{compute_financials, FinancialInput, FinancialResult};
use crate::error::{LedgerError, Result};
use crate::rates::RateSchedule;
use crate::timestamp::parse_local;
use chrono::{DateTime, FixedOffset, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// How an incident was first identified
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DiscoveryChannel {
    /// Caught by internal monitoring
    #[default]
    Monitoring,
    /// Surfaced by a customer complaint
    UserComplaint,
}

impl fmt::Display for DiscoveryChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiscoveryChannel::Monitoring => write!(f, "monitoring"),
            DiscoveryChannel::UserComplaint => write!(f, "user complaint"),
        }
    }
}

/// A priced incident, immutable once stored
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Incident {
    pub id: String,
    pub title: String,
    pub description: String,
    pub start_time: NaiveDateTime,
    pub detection_time: NaiveDateTime,
    pub recovery_time: NaiveDateTime,
    pub impact_coefficient: f64,
    pub discovery_channel: DiscoveryChannel,
    pub is_zero_tolerance: bool,
    pub is_gray_scale: bool,
    pub cost: i64,
    pub mttr_minutes: i64,
    pub loss_duration_minutes: i64,
    pub created_at: DateTime<Utc>,
}

impl Incident {
    /// Freeze validated input and its pricing into a record
    pub fn from_priced(
        id: String,
        input: IncidentInput,
        financials: &FinancialResult,
        created_at: DateTime<Utc>,
    ) -> Self {
        let IncidentInput {
            title,
            description,
            financial,
        } = input;

        Self {
            id,
            title,
            description,
            start_time: financial.start,
            detection_time: financial.detection,
            recovery_time: financial.recovery,
            impact_coefficient: financial.impact_coefficient,
            discovery_channel: financial.channel,
            is_zero_tolerance: financial.is_zero_tolerance,
            is_gray_scale: financial.is_gray_scale,
            cost: financials.cost,
            mttr_minutes: financials.mttr_minutes,
            loss_duration_minutes: financials.loss_duration_minutes,
            created_at,
        }
    }

    /// Engine input this record was priced from
    pub fn financial_input(&self) -> FinancialInput {
        FinancialInput {
            start: self.start_time,
            detection: self.detection_time,
            recovery: self.recovery_time,
            impact_coefficient: self.impact_coefficient,
            channel: self.discovery_channel,
            is_zero_tolerance: self.is_zero_tolerance,
            is_gray_scale: self.is_gray_scale,
        }
    }
}

/// Validated incident fields, ready for pricing
#[derive(Debug, Clone, PartialEq)]
pub struct IncidentInput {
    pub title: String,
    pub description: String,
    pub financial: FinancialInput,
}

/// Raw incident form fields
///
/// Timestamps stay as text until validation so that a partially filled form
/// can still be carried around and previewed.
#[derive(Debug, Clone, PartialEq)]
pub struct IncidentDraft {
    pub title: String,
    pub description: String,
    pub start_time: Option<String>,
    pub detection_time: Option<String>,
    pub recovery_time: Option<String>,
    /// `None` or NaN means the numeric field was left empty
    pub impact_coefficient: Option<f64>,
    pub discovery_channel: Option<DiscoveryChannel>,
    pub is_zero_tolerance: bool,
    pub is_gray_scale: bool,
}

impl Default for IncidentDraft {
    fn default() -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            start_time: None,
            detection_time: None,
            recovery_time: None,
            impact_coefficient: Some(1.0),
            discovery_channel: Some(DiscoveryChannel::Monitoring),
            is_zero_tolerance: false,
            is_gray_scale: false,
        }
    }
}

impl IncidentDraft {
    /// Create an empty draft with form defaults
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set start, detection and recovery text
    pub fn with_times(
        mut self,
        start: impl Into<String>,
        detection: impl Into<String>,
        recovery: impl Into<String>,
    ) -> Self {
        self.start_time = Some(start.into());
        self.detection_time = Some(detection.into());
        self.recovery_time = Some(recovery.into());
        self
    }

    pub fn with_impact(mut self, impact: f64) -> Self {
        self.impact_coefficient = Some(impact);
        self
    }

    pub fn with_channel(mut self, channel: DiscoveryChannel) -> Self {
        self.discovery_channel = Some(channel);
        self
    }

    pub fn with_zero_tolerance(mut self, on: bool) -> Self {
        self.is_zero_tolerance = on;
        self
    }

    pub fn with_gray_scale(mut self, on: bool) -> Self {
        self.is_gray_scale = on;
        self
    }

    /// Impact coefficient with an empty or non-numeric value replaced by 0.0
    ///
    /// Out-of-range finite values are passed through unchanged.
    pub fn effective_impact(&self) -> f64 {
        match self.impact_coefficient {
            Some(value) if !value.is_nan() => value,
            _ => {
                tracing::warn!("impact coefficient missing or not a number, using 0.0");
                0.0
            }
        }
    }

    /// Check required fields and parse timestamps
    ///
    /// Ordering of the three timestamps is deliberately not checked; the
    /// engine clamps inverted intervals to zero duration.
    pub fn validate(&self, offset: FixedOffset) -> Result<IncidentInput> {
        let title = required_text(&self.title, "title")?;
        let description = required_text(&self.description, "description")?;
        let start = required_time(self.start_time.as_deref(), "start time", offset)?;
        let detection = required_time(self.detection_time.as_deref(), "detection time", offset)?;
        let recovery = required_time(self.recovery_time.as_deref(), "recovery time", offset)?;
        let channel = self
            .discovery_channel
            .ok_or(LedgerError::MissingField("discovery channel"))?;

        if !(start <= detection && detection <= recovery) {
            tracing::warn!(%start, %detection, %recovery, "incident timestamps out of order");
        }

        Ok(IncidentInput {
            title,
            description,
            financial: FinancialInput {
                start,
                detection,
                recovery,
                impact_coefficient: self.effective_impact(),
                channel,
                is_zero_tolerance: self.is_zero_tolerance,
                is_gray_scale: self.is_gray_scale,
            },
        })
    }

    /// Live cost preview
    ///
    /// Available as soon as all three timestamps parse; title and description
    /// are not needed. Nothing is stored.
    pub fn preview(&self, rates: &RateSchedule, offset: FixedOffset) -> Option<FinancialResult> {
        let parse = |text: Option<&str>| text.and_then(|t| parse_local(t, offset).ok());

        let input = FinancialInput {
            start: parse(self.start_time.as_deref())?,
            detection: parse(self.detection_time.as_deref())?,
            recovery: parse(self.recovery_time.as_deref())?,
            impact_coefficient: self.effective_impact(),
            channel: self.discovery_channel.unwrap_or_default(),
            is_zero_tolerance: self.is_zero_tolerance,
            is_gray_scale: self.is_gray_scale,
        };

        Some(compute_financials(rates, &input))
    }
}

fn required_text(value: &str, field: &'static str) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(LedgerError::MissingField(field))
    } else {
        Ok(trimmed.to_string())
    }
}

fn required_time(
    value: Option<&str>,
    field: &'static str,
    offset: FixedOffset,
) -> Result<NaiveDateTime> {
    let text = match value {
        Some(text) if !text.trim().is_empty() => text,
        _ => return Err(LedgerError::MissingField(field)),
    };
    parse_local(text, offset).map_err(|source| LedgerError::InvalidTimestamp { field, source })
}
