//! Sector-specific KPI calculation.
//!
//! Formula sets implement [`SectorFormulaSet`] and are looked up by sector
//! tag in a [`SectorRegistry`]. Built-in sets:
//!
//! | Tag | Formula set |
//! |-----|-------------|
//! | `technology` | [`TechnologyFormulas`] |
//! | `manufacturing` | [`ManufacturingFormulas`] |
//! | `retail` | [`RetailFormulas`] |
//! | `healthcare` | [`HealthcareFormulas`] |
//! | `financial` | [`FinancialFormulas`] |
//!
//! Unknown sectors yield [`SectorMetrics::Empty`].

mod financial;
mod healthcare;
mod manufacturing;
mod retail;
mod technology;

pub use financial::{financial_metrics, FinancialFormulas};
pub use healthcare::{healthcare_metrics, HealthcareFormulas};
pub use manufacturing::{manufacturing_metrics, ManufacturingFormulas};
pub use retail::{retail_metrics, RetailFormulas};
pub use technology::{technology_metrics, TechnologyFormulas};

use std::collections::BTreeMap;
use std::fmt;
use std::sync::OnceLock;
use tracing::{debug, warn};
use valuation_core::traits::SectorFormulaSet;
use valuation_core::types::{SectorData, SectorMetrics};

/// Compute KPIs with the built-in registry.
///
/// # Examples
/// ```
/// use valuation_core::types::{SectorData, SectorMetrics, TechnologyData};
/// use valuation_engine::sector::compute_sector_metrics;
///
/// let data = SectorData::Technology(TechnologyData {
///     revenue: 1000.0,
///     active_users: 100.0,
///     churned_users: 5.0,
///     total_users: 100.0,
///     ..Default::default()
/// });
/// let SectorMetrics::Technology(m) = compute_sector_metrics("technology", &data) else {
///     panic!("expected technology metrics");
/// };
/// assert!((m.lifetime_value - m.arpu / m.churn_rate).abs() < 1e-9);
///
/// assert!(compute_sector_metrics("aerospace", &data).is_empty());
/// ```
pub fn compute_sector_metrics(sector: &str, data: &SectorData) -> SectorMetrics {
    static DEFAULT: OnceLock<SectorRegistry> = OnceLock::new();
    DEFAULT
        .get_or_init(SectorRegistry::with_defaults)
        .compute(sector, data)
}

/// Formula sets keyed by sector tag.
#[derive(Default)]
pub struct SectorRegistry {
    formulas: BTreeMap<String, Box<dyn SectorFormulaSet>>,
}

impl fmt::Debug for SectorRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SectorRegistry")
            .field("sectors", &self.sectors())
            .finish()
    }
}

impl SectorRegistry {
    /// Registry with no formula sets.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with every built-in formula set.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(TechnologyFormulas);
        registry.register(ManufacturingFormulas);
        registry.register(RetailFormulas);
        registry.register(HealthcareFormulas);
        registry.register(FinancialFormulas);
        registry
    }

    /// Register a formula set under its tag, returning any set it replaces.
    pub fn register<S>(&mut self, formulas: S) -> Option<Box<dyn SectorFormulaSet>>
    where
        S: SectorFormulaSet + 'static,
    {
        let tag = normalize(formulas.sector());
        self.formulas.insert(tag, Box::new(formulas))
    }

    /// Registered tags in sorted order.
    pub fn sectors(&self) -> Vec<&str> {
        self.formulas.keys().map(String::as_str).collect()
    }

    /// Whether a formula set is registered for `sector`.
    pub fn contains(&self, sector: &str) -> bool {
        self.formulas.contains_key(&normalize(sector))
    }

    /// KPIs for `sector`; empty when the sector is unknown or `data` belongs
    /// to a different sector.
    pub fn compute(&self, sector: &str, data: &SectorData) -> SectorMetrics {
        let Some(formulas) = self.formulas.get(&normalize(sector)) else {
            warn!(sector, "no formula set registered for sector");
            return SectorMetrics::Empty;
        };
        let metrics = formulas.compute_metrics(data);
        if metrics.is_empty() {
            debug!(sector, "sector data does not match formula set");
        }
        metrics
    }
}

fn normalize(sector: &str) -> String {
    sector.trim().to_lowercase()
}
