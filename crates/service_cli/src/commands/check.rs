//! Check command implementation
//!
//! Prints the effective configuration and the registered sector formula sets.

use serde::Serialize;
use tracing::info;
use valuation_engine::sector::SectorRegistry;

use crate::config::EngineConfig;
use crate::output::{print_json, OutputFormat};
use crate::Result;

#[derive(Serialize)]
struct CheckOutput<'a> {
    config: &'a EngineConfig,
    sectors: Vec<&'a str>,
}

/// Run the check command
pub fn run(config: &EngineConfig, format: OutputFormat) -> Result<()> {
    info!("Checking configuration...");

    let registry = SectorRegistry::with_defaults();
    let sectors = registry.sectors();

    match format {
        OutputFormat::Json => print_json(&CheckOutput { config, sectors })?,
        OutputFormat::Table => {
            println!("{}", toml::to_string_pretty(config)?);
            println!("# registered sectors: {}", sectors.join(", "));
        }
    }

    info!("Configuration OK ({} rules)", config.rules.iter().count());
    Ok(())
}
