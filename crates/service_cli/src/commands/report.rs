//! Report command implementation
//!
//! Builds the full valuation report for a case.

use tracing::info;
use valuation_engine::{ValuationReport, ValuationSettings};

use crate::case::load_case;
use crate::output::{amount, multiple, percent, print_json, OutputFormat, Table};
use crate::Result;

/// Run the report command
pub fn run(case_path: &str, settings: &ValuationSettings, format: OutputFormat) -> Result<()> {
    info!("Generating valuation report...");
    info!("  Case: {}", case_path);

    let case = load_case(case_path)?;
    let report = ValuationReport::build(&case, settings)?;

    match format {
        OutputFormat::Json => print_json(&report)?,
        OutputFormat::Table => print_tables(&report, settings),
    }

    info!("Report complete");
    Ok(())
}

fn print_tables(report: &ValuationReport, settings: &ValuationSettings) {
    let result = &report.result;
    let dcf = &result.methodologies.dcf;
    let comps = &result.methodologies.comparables;

    println!("\n{} ({})", report.company, report.sector);
    Table::new(["Valuation", "Value"])
        .row(["DCF enterprise value".to_string(), amount(result.dcf_value)])
        .row([format!("Comparables ({})", settings.multiple), amount(result.comparables_value)])
        .row(["Average".to_string(), amount(result.average_value)])
        .row(["DCF equity value".to_string(), amount(dcf.equity_value)])
        .row(["Implied EV/EBITDA".to_string(), multiple(dcf.implied_multiples.ev_to_ebitda)])
        .row(["Implied P/E".to_string(), multiple(dcf.implied_multiples.pe_ratio)])
        .row(["EV/EBITDA value".to_string(), amount(comps.ev_to_ebitda_value)])
        .row(["EV/EBIT value".to_string(), amount(comps.ev_to_ebit_value)])
        .row(["P/E value".to_string(), amount(comps.pe_value)])
        .print();

    let matrix = &result.sensitivity_matrix;
    println!(
        "\nSensitivity: {} x {} grid, {} cells defined",
        matrix.rows(),
        matrix.cols(),
        matrix.valid_cells()
    );

    if let Some(trends) = &report.trends {
        trends
            .series
            .iter()
            .fold(Table::new(["Series", "CAGR", "Stability"]), |table, (series, trend)| {
                let cagr = trend
                    .cagr
                    .as_ref()
                    .map(|rate| percent(*rate))
                    .unwrap_or_else(|_| "undefined".to_string());
                table.row([series.to_string(), cagr, format!("{:.4}", trend.stability)])
            })
            .print();
    }

    if !report.benchmark_positions.is_empty() {
        report
            .benchmark_positions
            .iter()
            .fold(Table::new(["Benchmark", "Position"]), |table, (path, position)| {
                table.row([path.clone(), format!("{:?}", position)])
            })
            .print();
    }

    let findings: Vec<_> = report
        .findings
        .iter()
        .chain(&report.industry_findings)
        .collect();
    if !findings.is_empty() {
        findings
            .iter()
            .fold(Table::new(["Kind", "Field", "Message"]), |table, f| {
                table.row([f.kind.to_string(), f.field.clone(), f.message.clone()])
            })
            .print();
    }
    println!("\nValid: {}", report.is_valid());
}
