//! In-process incident store
//!
//! Owns the ordered incident list (newest first) and the pricing context it
//! prices new incidents with. Mutation goes through `&mut self`; callers that
//! need sharing wrap the whole store, the engine itself holds no state.

use crate::engine::compute_financials;
use crate::error::Result;
use crate::incident::{DiscoveryChannel, Incident, IncidentDraft};
use crate::rates::RateSchedule;
use chrono::{DateTime, Datelike, FixedOffset, NaiveDate, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Length of generated incident identifiers
pub const ID_LENGTH: usize = 9;

const ID_ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Format tag written into ledger files
pub const LEDGER_FORMAT: &str = "downtime-ledger-v1";

/// On-disk ledger layout
#[derive(Debug, Clone, Serialize, Deserialize)]
struct LedgerFile {
    version: String,
    format: String,
    incidents: Vec<Incident>,
}

/// Ordered incident collection with its pricing context
#[derive(Debug, Clone)]
pub struct IncidentStore {
    incidents: Vec<Incident>,
    rates: RateSchedule,
    offset: FixedOffset,
}

impl IncidentStore {
    /// Create an empty store
    pub fn new(rates: RateSchedule, offset: FixedOffset) -> Self {
        Self {
            incidents: Vec::new(),
            rates,
            offset,
        }
    }

    /// Create a store seeded with the two reference incidents
    ///
    /// Login latency on the 10th (19:00 - 19:20, Gold) and a payment gateway
    /// outage on the 15th (14:00 - 15:00, Silver) of `month`'s month.
    pub fn with_samples(rates: RateSchedule, offset: FixedOffset, month: NaiveDate) -> Result<Self> {
        let mut store = Self::new(rates, offset);
        let day = |d: u32| month.with_day(d).unwrap_or(month).format("%Y-%m-%d").to_string();
        let (d10, d15) = (day(10), day(15));

        store.add_incident(
            &IncidentDraft::new()
                .with_title("Login service high latency")
                .with_description("Database connection pool saturated, logins timed out.")
                .with_times(
                    format!("{}T19:00", d10),
                    format!("{}T19:05", d10),
                    format!("{}T19:20", d10),
                )
                .with_impact(0.5),
        )?;

        store.add_incident(
            &IncidentDraft::new()
                .with_title("Payment gateway failure")
                .with_description("Third-party payment certificate expired, top-ups failed.")
                .with_times(
                    format!("{}T14:00", d15),
                    format!("{}T14:30", d15),
                    format!("{}T15:00", d15),
                )
                .with_channel(DiscoveryChannel::UserComplaint),
        )?;

        Ok(store)
    }

    /// Rates new incidents are priced with
    pub fn rates(&self) -> &RateSchedule {
        &self.rates
    }

    /// Reference zone for parsing timestamps
    pub fn offset(&self) -> FixedOffset {
        self.offset
    }

    /// Incidents, most recent first
    pub fn incidents(&self) -> &[Incident] {
        &self.incidents
    }

    /// Look up an incident by id
    pub fn get(&self, id: &str) -> Option<&Incident> {
        self.incidents.iter().find(|i| i.id == id)
    }

    pub fn len(&self) -> usize {
        self.incidents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.incidents.is_empty()
    }

    /// Validate, price and record an incident
    ///
    /// Nothing is stored if validation fails.
    pub fn add_incident(&mut self, draft: &IncidentDraft) -> Result<&Incident> {
        let id = self.generate_id();
        self.add_incident_with(draft, id, Utc::now())
    }

    /// Same as [`add_incident`](Self::add_incident) with caller-chosen id and
    /// creation time
    pub fn add_incident_with(
        &mut self,
        draft: &IncidentDraft,
        id: String,
        created_at: DateTime<Utc>,
    ) -> Result<&Incident> {
        let input = draft.validate(self.offset)?;
        let financials = compute_financials(&self.rates, &input.financial);
        let incident = Incident::from_priced(id, input, &financials, created_at);

        tracing::info!(
            id = %incident.id,
            title = %incident.title,
            cost = incident.cost,
            mttr_minutes = incident.mttr_minutes,
            "recorded incident"
        );

        self.incidents.insert(0, incident);
        Ok(&self.incidents[0])
    }

    /// Remove an incident, returning it if it existed
    pub fn delete_incident(&mut self, id: &str) -> Option<Incident> {
        let position = self.incidents.iter().position(|i| i.id == id)?;
        let removed = self.incidents.remove(position);
        tracing::info!(id = %removed.id, "deleted incident");
        Some(removed)
    }

    /// Load a ledger file; a missing file yields an empty store
    pub fn load(path: impl AsRef<Path>, rates: RateSchedule, offset: FixedOffset) -> Result<Self> {
        let path = path.as_ref();
        let mut store = Self::new(rates, offset);

        if !path.exists() {
            tracing::debug!(path = %path.display(), "no ledger file, starting empty");
            return Ok(store);
        }

        let content = fs::read_to_string(path)?;
        let file: LedgerFile = serde_json::from_str(&content)?;
        if file.format != LEDGER_FORMAT {
            tracing::warn!(format = %file.format, "unexpected ledger format tag");
        }

        store.incidents = file.incidents;
        Ok(store)
    }

    /// Write the ledger as pretty JSON
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let file = LedgerFile {
            version: env!("CARGO_PKG_VERSION").to_string(),
            format: LEDGER_FORMAT.to_string(),
            incidents: self.incidents.clone(),
        };
        let json = serde_json::to_string_pretty(&file)?;
        fs::write(path, json)?;
        Ok(())
    }

    fn generate_id(&self) -> String {
        let mut rng = rand::thread_rng();
        loop {
            let id: String = (0..ID_LENGTH)
                .map(|_| ID_ALPHABET[rng.gen_range(0..ID_ALPHABET.len())] as char)
                .collect();
            if self.get(&id).is_none() {
                return id;
            }
        }
    }
}
