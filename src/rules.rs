//! Policy reference text
//!
//! Renders the pricing rules from the active configuration so the printed
//! numbers always match what the engine charges.

use crate::config::LedgerConfig;
use crate::currency::format_currency;
use crate::engine::{
    discovery_coefficient, MTTR_DISASTER, MTTR_FAST, MTTR_INSTANT, MTTR_NORMAL, MTTR_SLOW,
};
use crate::incident::DiscoveryChannel;
use crate::rates::TimeSlot;

/// Process violations that void every MTTR discount
pub const ZERO_TOLERANCE_CLAUSES: &[&str] = &[
    "Repeat failure from the same root cause as an earlier incident",
    "Direct write or delete against a production database",
    "Test environment configuration shipped to production",
    "Code or configuration released without code review",
];

/// Render the rules as plain text
pub fn render_rules(config: &LedgerConfig) -> String {
    let symbol = config.budget.symbol();
    let money = |amount: f64| format_currency(amount.round() as i64, symbol);
    let mut text = String::new();

    text.push_str("=== 1. Per-minute pricing ===\n");
    text.push_str(&format!("Slot hours are local time at UTC{}\n", config.utc_offset));
    for slot in TimeSlot::ALL {
        text.push_str(&format!(
            "  {:<24} {:>10} / min\n",
            slot.to_string(),
            money(config.rates.rate(slot))
        ));
    }

    text.push_str("\n=== 2. MTTR coefficient ===\n");
    let tiers = [
        ("< 5 min", MTTR_INSTANT),
        ("5 - 15 min", MTTR_FAST),
        ("15 - 30 min", MTTR_NORMAL),
        ("30 - 60 min", MTTR_SLOW),
        ("> 60 min", MTTR_DISASTER),
    ];
    for (range, coefficient) in tiers {
        text.push_str(&format!("  {:<14} {:.1}x\n", range, coefficient));
    }
    text.push_str("  Exactly 30 min falls in the 1.5x tier.\n");

    text.push_str("\n=== 3. Zero tolerance ===\n");
    text.push_str("No MTTR discount applies (coefficient floor 1.0x) when:\n");
    for clause in ZERO_TOLERANCE_CLAUSES {
        text.push_str(&format!("  - {}\n", clause));
    }

    text.push_str("\n=== 4. Exemptions and multipliers ===\n");
    text.push_str("  Gray-scale (canary) release: cost waived entirely\n");
    text.push_str(&format!(
        "  Discovered by user complaint: {:.1}x\n",
        discovery_coefficient(DiscoveryChannel::UserComplaint)
    ));

    text.push_str("\n=== 5. Budget ===\n");
    text.push_str(&format!(
        "  Annual pool:        {}\n",
        format_currency(config.budget.annual_total, symbol)
    ));
    text.push_str(&format!(
        "  Quarterly red line: {} (mandatory stability review when exceeded)\n",
        format_currency(config.budget.quarterly_warning, symbol)
    ));

    text
}
