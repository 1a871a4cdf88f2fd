//! Ledger configuration (ledger.toml)
//!
//! Rate table, budget and the reference time zone for slot classification.
//! Every section is optional; omitted values fall back to the standard policy.
//!
//! # Example ledger.toml
//!
//! ```toml
//! # Slot hours are read on this clock
//! utc_offset = "+08:00"
//!
//! [rates]
//! gold = 1800.0
//! silver = 555.0
//! bronze = 200.0
//!
//! [budget]
//! annual_total = 1500000
//! quarterly_warning = 375000
//! currency = "CNY"
//! ```

use crate::budget::BudgetConfig;
use crate::rates::RateSchedule;
use crate::timestamp::parse_utc_offset;
use anyhow::{Context, Result};
use chrono::{FixedOffset, Offset, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Reference zone used when none is configured
pub const DEFAULT_UTC_OFFSET: &str = "+08:00";

/// Root configuration, loaded once at start-up
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LedgerConfig {
    /// UTC offset of the clock the rate slots are defined on
    pub utc_offset: String,

    /// Per-minute rates by slot
    pub rates: RateSchedule,

    /// Budget limits shown on the dashboard
    pub budget: BudgetConfig,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            utc_offset: DEFAULT_UTC_OFFSET.to_string(),
            rates: RateSchedule::default(),
            budget: BudgetConfig::default(),
        }
    }
}

impl LedgerConfig {
    /// Load and validate configuration from a TOML file
    ///
    /// ```no_run
    /// use downtime_ledger::config::LedgerConfig;
    ///
    /// # fn main() -> anyhow::Result<()> {
    /// let config = LedgerConfig::from_file("ledger.toml")?;
    /// println!("Gold rate: {}", config.rates.gold);
    /// # Ok(())
    /// # }
    /// ```
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;

        Self::from_toml_str(&content)
            .with_context(|| format!("Invalid configuration in {}", path.display()))
    }

    /// Load and validate configuration from a TOML string
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).context("Failed to parse TOML")?;
        config.validate().map_err(|e| anyhow::anyhow!(e))?;
        Ok(config)
    }

    /// Reference offset for slot classification
    ///
    /// Falls back to UTC if the configured text does not parse; loaders reject
    /// such configs through [`validate`](Self::validate) first.
    pub fn offset(&self) -> FixedOffset {
        parse_utc_offset(&self.utc_offset).unwrap_or_else(|_| Utc.fix())
    }

    /// Validate configuration
    pub fn validate(&self) -> std::result::Result<(), String> {
        parse_utc_offset(&self.utc_offset).map_err(|e| e.to_string())?;
        self.rates.validate()?;
        self.budget.validate()?;
        Ok(())
    }
}
