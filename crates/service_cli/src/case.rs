//! Case file loading

use std::path::Path;
use tracing::debug;
use valuation_engine::ValuationCase;

use crate::{CliError, Result};

/// Read a JSON [`ValuationCase`] from `path`.
pub fn load_case(path: &str) -> Result<ValuationCase> {
    let file = Path::new(path);
    if !file.exists() {
        return Err(CliError::FileNotFound(path.to_string()));
    }
    if file.is_dir() {
        return Err(CliError::InvalidArgument(format!(
            "{} is a directory, expected a case file",
            path
        )));
    }
    let content = std::fs::read_to_string(path)?;
    let case: ValuationCase = serde_json::from_str(&content)?;
    debug!(
        company = %case.company,
        sector = %case.sector,
        years = case.cash_flows.len(),
        peers = case.peers.len(),
        history = case.history.len(),
        "case loaded"
    );
    Ok(case)
}
