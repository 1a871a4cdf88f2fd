use anyhow::{Context, Result};
use chrono::{Datelike, NaiveDate, Utc};
use clap::Parser;
use downtime_ledger::cli::{Cli, Command, OutputFormat};
use downtime_ledger::config::LedgerConfig;
use downtime_ledger::csv_output::{monthly_to_csv, preview_to_csv, CsvOutput};
use downtime_ledger::currency::format_currency;
use downtime_ledger::engine::FinancialResult;
use downtime_ledger::incident::Incident;
use downtime_ledger::json_output::JsonOutput;
use downtime_ledger::rules::render_rules;
use downtime_ledger::store::IncidentStore;
use downtime_ledger::summary::{LedgerSummary, MttrBand};
use std::path::Path;
use tracing_subscriber::EnvFilter;

/// Initialize tracing subscriber for debug output
fn init_tracing(debug: bool) {
    if debug {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::from_default_env().add_directive(tracing::Level::TRACE.into()),
            )
            .with_writer(std::io::stderr)
            .init();
    }
}

/// Print a cost breakdown for a priced incident
fn print_breakdown(result: &FinancialResult, impact: f64, symbol: &str) {
    println!("Loss duration:         {} min", result.loss_duration_minutes);
    println!("MTTR:                  {} min", result.mttr_minutes);
    println!(
        "Base cost:             {}",
        format_currency(result.details.base_cost.round() as i64, symbol)
    );
    println!("Impact coefficient:    {}", impact);
    println!("MTTR coefficient:      {:.1}x", result.details.mttr_coefficient);
    println!(
        "Discovery coefficient: {:.1}x",
        result.details.discovery_coefficient
    );
    println!("Estimated cost:        {}", format_currency(result.cost, symbol));
}

/// Print one incident as a list line
fn print_incident_line(incident: &Incident, symbol: &str) {
    let band = match MttrBand::for_minutes(incident.mttr_minutes) {
        MttrBand::Healthy => "",
        MttrBand::Slow => " (slow)",
        MttrBand::Disaster => " (disaster)",
    };
    let mut flags = Vec::new();
    if incident.is_zero_tolerance {
        flags.push("zero-tolerance");
    }
    if incident.is_gray_scale {
        flags.push("gray-scale");
    }

    println!(
        "{}  {}  {}  mttr {} min{}  {}  {}{}",
        incident.id,
        incident.start_time.format("%Y-%m-%d %H:%M"),
        incident.title,
        incident.mttr_minutes,
        band,
        incident.discovery_channel,
        format_currency(incident.cost, symbol),
        if flags.is_empty() {
            String::new()
        } else {
            format!("  [{}]", flags.join(", "))
        }
    );
}

fn print_incidents(incidents: &[Incident], format: OutputFormat, symbol: &str) -> Result<()> {
    match format {
        OutputFormat::Text => {
            if incidents.is_empty() {
                println!("No incidents recorded.");
            }
            for incident in incidents {
                print_incident_line(incident, symbol);
            }
        }
        OutputFormat::Json => {
            let mut output = JsonOutput::new();
            for incident in incidents {
                output.add_incident(incident.clone());
            }
            println!("{}", output.to_json()?);
        }
        OutputFormat::Csv => {
            let mut output = CsvOutput::new(true);
            for incident in incidents {
                output.add_incident(incident.clone());
            }
            print!("{}", output.to_csv());
        }
    }
    Ok(())
}

fn load_config(path: Option<&Path>) -> Result<LedgerConfig> {
    match path {
        Some(path) => LedgerConfig::from_file(path),
        None => Ok(LedgerConfig::default()),
    }
}

fn load_store(path: &Path, config: &LedgerConfig) -> Result<IncidentStore> {
    IncidentStore::load(path, config.rates, config.offset())
        .with_context(|| format!("Failed to load ledger {}", path.display()))
}

fn save_store(store: &IncidentStore, path: &Path) -> Result<()> {
    store
        .save(path)
        .with_context(|| format!("Failed to write ledger {}", path.display()))
}

fn main() -> Result<()> {
    let args = Cli::parse();

    // Initialize tracing if --debug flag is set
    init_tracing(args.debug);

    let config = load_config(args.config.as_deref())?;
    let symbol = config.budget.symbol().to_string();
    let today = Utc::now().with_timezone(&config.offset()).date_naive();

    match args.command {
        Command::Preview(pricing) => {
            let draft = pricing.to_draft();
            let Some(result) = draft.preview(&config.rates, config.offset()) else {
                anyhow::bail!(
                    "Preview needs parseable --start, --detection and --recovery timestamps"
                );
            };
            match args.format {
                OutputFormat::Json => {
                    let mut output = JsonOutput::new();
                    output.set_preview(result);
                    println!("{}", output.to_json()?);
                }
                OutputFormat::Csv => print!("{}", preview_to_csv(&result)),
                OutputFormat::Text => {
                    print_breakdown(&result, draft.effective_impact(), &symbol);
                }
            }
        }
        Command::Add(add) => {
            let mut store = load_store(&args.ledger, &config)?;
            let incident = store.add_incident(&add.to_draft())?.clone();
            save_store(&store, &args.ledger)?;
            print_incidents(std::slice::from_ref(&incident), args.format, &symbol)?;
        }
        Command::List => {
            let store = load_store(&args.ledger, &config)?;
            print_incidents(store.incidents(), args.format, &symbol)?;
        }
        Command::Delete { id } => {
            let mut store = load_store(&args.ledger, &config)?;
            match store.delete_incident(&id) {
                Some(removed) => {
                    save_store(&store, &args.ledger)?;
                    println!("Deleted {} ({})", removed.id, removed.title);
                }
                None => println!("No incident with id {}", id),
            }
        }
        Command::Summary { as_of } => {
            let as_of = match as_of {
                Some(text) => NaiveDate::parse_from_str(&text, "%Y-%m-%d")
                    .with_context(|| format!("Invalid --as-of date '{}'", text))?,
                None => today,
            };
            let store = load_store(&args.ledger, &config)?;
            let summary = LedgerSummary::build(store.incidents(), &config.budget, as_of);
            match args.format {
                OutputFormat::Text => print!("{}", summary.to_report_string(&symbol)),
                OutputFormat::Json => {
                    let mut output = JsonOutput::new();
                    output.set_summary(summary);
                    println!("{}", output.to_json()?);
                }
                OutputFormat::Csv => print!("{}", monthly_to_csv(&summary.monthly)),
            }
        }
        Command::Rules => {
            print!("{}", render_rules(&config));
        }
        Command::Init { samples, force } => {
            if args.ledger.exists() && !force {
                anyhow::bail!(
                    "Ledger {} already exists (use --force to overwrite)",
                    args.ledger.display()
                );
            }
            let store = if samples {
                let month = today.with_day(1).unwrap_or(today);
                IncidentStore::with_samples(config.rates, config.offset(), month)?
            } else {
                IncidentStore::new(config.rates, config.offset())
            };
            save_store(&store, &args.ledger)?;
            println!(
                "Initialized {} with {} incidents",
                args.ledger.display(),
                store.len()
            );
        }
    }

    Ok(())
}
