//! Validate command implementation
//!
//! Runs the generic, sector and industry rules over the case.

use serde::Serialize;
use tracing::{info, warn};
use valuation_core::types::SectorMetrics;
use valuation_engine::sector::compute_sector_metrics;
use valuation_engine::validation::{RuleKind, ValidationEngine, ValidationFinding};
use valuation_engine::ValuationSettings;

use crate::case::load_case;
use crate::output::{print_json, OutputFormat, Table};
use crate::{CliError, Result};

#[derive(Serialize)]
struct ValidationOutput<'a> {
    company: &'a str,
    valid: bool,
    findings: &'a [ValidationFinding],
}

/// Run the validate command
///
/// Fails with [`CliError::ValidationFailed`] when any error-kind rule fails.
pub fn run(case_path: &str, settings: &ValuationSettings, format: OutputFormat) -> Result<()> {
    info!("Starting validation...");
    info!("  Case: {}", case_path);

    let case = load_case(case_path)?;
    let sector_metrics = match &case.sector_data {
        Some(data) => compute_sector_metrics(&case.sector, data),
        None => SectorMetrics::Empty,
    };

    let engine = ValidationEngine::new(settings.rules.clone());
    let mut findings =
        engine.validate_company(&case.sector, &case.financials, &case.ratios(), &sector_metrics);
    if let Some(industry) = &case.industry {
        findings.extend(engine.validate_industry(industry));
    }
    let errors = findings
        .iter()
        .filter(|f| f.kind == RuleKind::Error)
        .count();

    match format {
        OutputFormat::Json => print_json(&ValidationOutput {
            company: &case.company,
            valid: errors == 0,
            findings: &findings,
        })?,
        OutputFormat::Table => {
            findings
                .iter()
                .fold(
                    Table::new(["Kind", "Severity", "Field", "Value", "Message"]),
                    |table, f| {
                        table.row([
                            f.kind.to_string(),
                            f.severity.level().to_string(),
                            f.field.clone(),
                            format!("{:.4}", f.value),
                            f.message.clone(),
                        ])
                    },
                )
                .print();
        }
    }

    if errors > 0 {
        warn!("{} error finding(s) for {}", errors, case.company);
        return Err(CliError::ValidationFailed(errors));
    }
    info!("Validation complete ({} finding(s))", findings.len());
    Ok(())
}
