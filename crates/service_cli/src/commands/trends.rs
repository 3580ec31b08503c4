//! Trends command implementation
//!
//! Computes growth, volatility and stability over the case history.

use tracing::info;
use valuation_engine::trends::analyze_trends;

use crate::case::load_case;
use crate::output::{percent, print_json, OutputFormat, Table};
use crate::Result;

/// Run the trends command
pub fn run(case_path: &str, format: OutputFormat) -> Result<()> {
    info!("Starting trend analysis...");
    info!("  Case: {}", case_path);

    let case = load_case(case_path)?;
    let history = case.history_points();
    let report = analyze_trends(&history)?;

    match format {
        OutputFormat::Json => print_json(&report)?,
        OutputFormat::Table => {
            println!(
                "\n{} history: {} points, {} to {}",
                case.company, report.points, report.start, report.end
            );
            report
                .series
                .iter()
                .fold(
                    Table::new(["Series", "CAGR", "Volatility", "Stability"]),
                    |table, (series, trend)| {
                        let cagr = match &trend.cagr {
                            Ok(rate) => percent(*rate),
                            Err(_) => "undefined".to_string(),
                        };
                        table.row([
                            series.to_string(),
                            cagr,
                            format!("{:.4}", trend.volatility),
                            format!("{:.4}", trend.stability),
                        ])
                    },
                )
                .print();
        }
    }

    info!("Trend analysis complete");
    Ok(())
}
