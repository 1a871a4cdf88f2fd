//! CLI argument parsing for downtime-ledger

use crate::incident::{DiscoveryChannel, IncidentDraft};
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Output format for ledger reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text format (default)
    Text,
    /// JSON format for machine parsing
    Json,
    /// CSV format for spreadsheet analysis
    Csv,
}

#[derive(Parser, Debug)]
#[command(name = "downtime-ledger")]
#[command(version)]
#[command(about = "Price service reliability incidents and track them against a loss budget", long_about = None)]
pub struct Cli {
    /// Ledger configuration file (rates, budget, reference UTC offset)
    #[arg(short = 'C', long = "config", value_name = "FILE", global = true)]
    pub config: Option<PathBuf>,

    /// Ledger file holding recorded incidents
    #[arg(
        short = 'l',
        long = "ledger",
        value_name = "FILE",
        default_value = "ledger.json",
        global = true
    )]
    pub ledger: PathBuf,

    /// Output format
    #[arg(long = "format", value_enum, default_value = "text", global = true)]
    pub format: OutputFormat,

    /// Enable debug tracing on stderr
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Price an incident without recording it
    Preview(PricingArgs),

    /// Validate, price and record an incident
    Add(AddArgs),

    /// List recorded incidents, most recent first
    List,

    /// Delete a recorded incident by id
    Delete {
        /// Incident id as shown by `list`
        id: String,
    },

    /// Budget, quarterly status and cost breakdowns
    Summary {
        /// Reference date selecting the quarter (YYYY-MM-DD, default today)
        #[arg(long = "as-of", value_name = "DATE")]
        as_of: Option<String>,
    },

    /// Print the pricing rules in force
    Rules,

    /// Create a ledger file, optionally seeded with reference incidents
    Init {
        /// Seed the two reference incidents in the current month
        #[arg(long)]
        samples: bool,

        /// Overwrite an existing ledger file
        #[arg(long)]
        force: bool,
    },
}

/// Fields the engine prices from
#[derive(Args, Debug, Clone)]
pub struct PricingArgs {
    /// Incident start (ISO 8601, e.g. 2024-06-10T19:00)
    #[arg(long, value_name = "TIME")]
    pub start: Option<String>,

    /// Detection time
    #[arg(long, value_name = "TIME")]
    pub detection: Option<String>,

    /// Full recovery time
    #[arg(long, value_name = "TIME")]
    pub recovery: Option<String>,

    /// Share of normal business affected (0.0 - 1.0)
    #[arg(long, value_name = "COEF", default_value = "1.0", allow_negative_numbers = true)]
    pub impact: f64,

    /// How the incident was first identified
    #[arg(long, value_enum, default_value = "monitoring")]
    pub channel: DiscoveryChannel,

    /// Process violation: void any MTTR discount
    #[arg(long = "zero-tolerance")]
    pub zero_tolerance: bool,

    /// Confined to a gray-scale (canary) release: cost waived
    #[arg(long = "gray-scale")]
    pub gray_scale: bool,
}

#[derive(Args, Debug, Clone)]
pub struct AddArgs {
    /// Short incident title
    #[arg(long)]
    pub title: Option<String>,

    /// What happened
    #[arg(long)]
    pub description: Option<String>,

    #[command(flatten)]
    pub pricing: PricingArgs,
}

impl PricingArgs {
    /// Incident draft carrying only the priced fields
    pub fn to_draft(&self) -> IncidentDraft {
        IncidentDraft {
            start_time: self.start.clone(),
            detection_time: self.detection.clone(),
            recovery_time: self.recovery.clone(),
            impact_coefficient: Some(self.impact),
            discovery_channel: Some(self.channel),
            is_zero_tolerance: self.zero_tolerance,
            is_gray_scale: self.gray_scale,
            ..IncidentDraft::default()
        }
    }
}

impl AddArgs {
    pub fn to_draft(&self) -> IncidentDraft {
        let mut draft = self.pricing.to_draft();
        draft.title = self.title.clone().unwrap_or_default();
        draft.description = self.description.clone().unwrap_or_default();
        draft
    }
}
