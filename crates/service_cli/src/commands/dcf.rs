//! DCF command implementation
//!
//! Projects free cash flow over the case schedule and discounts it.

use serde::Serialize;
use tracing::info;
use valuation_core::types::DcfMethodology;
use valuation_engine::dcf::{DcfBreakdown, DcfValuator};
use valuation_engine::report::dcf_methodology;
use valuation_engine::ValuationSettings;

use crate::case::load_case;
use crate::output::{amount, multiple, percent, print_json, OutputFormat, Table};
use crate::Result;

#[derive(Serialize)]
struct DcfOutput<'a> {
    company: &'a str,
    wacc: f64,
    terminal_growth: f64,
    breakdown: &'a DcfBreakdown,
    methodology: &'a DcfMethodology,
}

/// Run the dcf command
pub fn run(case_path: &str, settings: &ValuationSettings, format: OutputFormat) -> Result<()> {
    info!("Starting DCF valuation...");
    info!("  Case: {}", case_path);
    info!("  WACC: {}", settings.wacc);
    info!("  Terminal growth: {}", settings.terminal_growth);

    let case = load_case(case_path)?;
    let schedule = case.schedule(settings.projection_years)?;
    let breakdown =
        DcfValuator::new(settings.wacc, settings.terminal_growth).breakdown(&schedule)?;
    let methodology = dcf_methodology(breakdown.enterprise_value, &case.financials);

    match format {
        OutputFormat::Json => print_json(&DcfOutput {
            company: &case.company,
            wacc: settings.wacc,
            terminal_growth: settings.terminal_growth,
            breakdown: &breakdown,
            methodology: &methodology,
        })?,
        OutputFormat::Table => {
            breakdown
                .years
                .iter()
                .fold(
                    Table::new(["Year", "EBITDA", "EBIT", "Tax", "D&A", "Free cash flow"]),
                    |table, y| {
                        table.row([
                            y.year.to_string(),
                            amount(y.ebitda),
                            amount(y.ebit),
                            amount(y.tax),
                            amount(y.depreciation),
                            amount(y.free_cash_flow),
                        ])
                    },
                )
                .print();

            Table::new(["DCF", case.company.as_str()])
                .row(["WACC".to_string(), percent(settings.wacc)])
                .row(["Terminal growth".to_string(), percent(settings.terminal_growth)])
                .row(["PV of cash flows".to_string(), amount(breakdown.present_value_of_cash_flows)])
                .row(["Terminal value".to_string(), amount(breakdown.terminal_value)])
                .row(["PV of terminal value".to_string(), amount(breakdown.present_value_of_terminal_value)])
                .row(["Enterprise value".to_string(), amount(breakdown.enterprise_value)])
                .row(["Equity value".to_string(), amount(methodology.equity_value)])
                .row(["Implied EV/EBITDA".to_string(), multiple(methodology.implied_multiples.ev_to_ebitda)])
                .row(["Implied EV/EBIT".to_string(), multiple(methodology.implied_multiples.ev_to_ebit)])
                .row(["Implied P/E".to_string(), multiple(methodology.implied_multiples.pe_ratio)])
                .print();
        }
    }

    info!("DCF valuation complete");
    Ok(())
}
