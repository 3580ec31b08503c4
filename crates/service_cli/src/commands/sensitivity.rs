//! Sensitivity command implementation
//!
//! Tabulates DCF enterprise values over the configured WACC x growth grid.

use tracing::info;
use valuation_engine::sensitivity::SensitivityAnalyzer;
use valuation_engine::ValuationSettings;

use crate::case::load_case;
use crate::output::{amount, percent, print_json, OutputFormat, Table};
use crate::Result;

/// Run the sensitivity command
pub fn run(case_path: &str, settings: &ValuationSettings, format: OutputFormat) -> Result<()> {
    info!("Starting sensitivity analysis...");
    info!("  Case: {}", case_path);
    info!(
        "  Grid: {} WACC x {} growth",
        settings.grid.wacc.len(),
        settings.grid.growth.len()
    );

    let case = load_case(case_path)?;
    let schedule = case.schedule(settings.projection_years)?;
    let matrix = SensitivityAnalyzer::new(settings.sensitivity.clone()).analyze(
        &schedule,
        &settings.grid.wacc,
        &settings.grid.growth,
    );

    match format {
        OutputFormat::Json => print_json(&matrix)?,
        OutputFormat::Table => {
            let headers = std::iter::once("WACC \\ g".to_string())
                .chain(matrix.growth.iter().map(|&g| percent(g)));
            matrix
                .wacc
                .iter()
                .zip(&matrix.results)
                .fold(Table::new(headers), |table, (&wacc, row)| {
                    table.row(std::iter::once(percent(wacc)).chain(
                        row.iter()
                            .map(|cell| cell.map(amount).unwrap_or_else(|| "n/a".to_string())),
                    ))
                })
                .print();
        }
    }

    info!(
        "Sensitivity analysis complete ({} of {} cells defined)",
        matrix.valid_cells(),
        matrix.rows() * matrix.cols()
    );
    Ok(())
}
