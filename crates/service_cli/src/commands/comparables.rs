//! Comparables command implementation
//!
//! Values the company from peer median multiples.

use serde::Serialize;
use tracing::info;
use valuation_core::types::MultipleKind;
use valuation_engine::comparables::{ComparablesValuator, PeerSummary};
use valuation_engine::ValuationSettings;

use crate::case::load_case;
use crate::output::{amount, multiple, print_json, OutputFormat, Table};
use crate::Result;

#[derive(Serialize)]
struct ImpliedValue {
    multiple: MultipleKind,
    value: f64,
}

#[derive(Serialize)]
struct ComparablesOutput<'a> {
    company: &'a str,
    multiple: MultipleKind,
    value: f64,
    implied_values: Vec<ImpliedValue>,
    peers: Vec<PeerSummary>,
}

/// Run the comparables command
pub fn run(case_path: &str, settings: &ValuationSettings, format: OutputFormat) -> Result<()> {
    info!("Starting comparables valuation...");
    info!("  Case: {}", case_path);
    info!("  Headline multiple: {}", settings.multiple);

    let case = load_case(case_path)?;
    let valuator = ComparablesValuator::new(&case.peers);
    valuator.validate()?;

    let peers = valuator.summaries();
    let implied_values: Vec<ImpliedValue> = peers
        .iter()
        .map(|s| ImpliedValue {
            multiple: s.multiple,
            value: valuator.value(&case.financials, s.multiple),
        })
        .collect();
    let value = valuator.value(&case.financials, settings.multiple);

    match format {
        OutputFormat::Json => print_json(&ComparablesOutput {
            company: &case.company,
            multiple: settings.multiple,
            value,
            implied_values,
            peers,
        })?,
        OutputFormat::Table => {
            peers
                .iter()
                .zip(&implied_values)
                .fold(
                    Table::new(["Multiple", "Peers", "Mean", "Median", "Implied value"]),
                    |table, (summary, implied)| {
                        table.row([
                            summary.multiple.to_string(),
                            summary.count.to_string(),
                            multiple(summary.mean),
                            summary.median.map(multiple).unwrap_or_default(),
                            amount(implied.value),
                        ])
                    },
                )
                .print();
            println!(
                "\n{} value ({}): {}",
                case.company,
                settings.multiple,
                amount(value)
            );
        }
    }

    info!("Comparables valuation complete ({} peers)", case.peers.len());
    Ok(())
}
