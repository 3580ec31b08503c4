//! Sector command implementation
//!
//! Computes the KPIs of the case's sector from its operational data.

use tracing::{info, warn};
use valuation_core::types::SectorMetrics;
use valuation_engine::sector::compute_sector_metrics;

use crate::case::load_case;
use crate::output::{print_json, OutputFormat, Table};
use crate::Result;

/// Run the sector command
pub fn run(case_path: &str, format: OutputFormat) -> Result<()> {
    info!("Starting sector metrics...");
    info!("  Case: {}", case_path);

    let case = load_case(case_path)?;
    let metrics = match &case.sector_data {
        Some(data) => compute_sector_metrics(&case.sector, data),
        None => {
            warn!(sector = %case.sector, "case has no sector data");
            SectorMetrics::Empty
        }
    };

    match format {
        OutputFormat::Json => print_json(&metrics)?,
        OutputFormat::Table => {
            let title = format!("{} KPI", metrics.prefix().unwrap_or("sector"));
            metrics
                .fields()
                .into_iter()
                .fold(Table::new([title.as_str(), "Value"]), |table, (name, value)| {
                    table.row([name, format!("{:.4}", value)])
                })
                .print();
        }
    }

    info!("Sector metrics complete");
    Ok(())
}
