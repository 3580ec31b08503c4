//! Capability interface for sector formula sets.

use crate::types::{SectorData, SectorMetrics};

/// A set of KPI formulas for one sector.
///
/// Implementations are registered under [`SectorFormulaSet::sector`] in the
/// engine's registry; adding a sector means registering a new implementer.
///
/// Formula sets must be total: zero denominators resolve to zero, and data
/// for a different sector yields [`SectorMetrics::Empty`].
///
/// # Examples
/// ```
/// use std::collections::BTreeMap;
/// use valuation_core::traits::SectorFormulaSet;
/// use valuation_core::types::{SectorData, SectorMetrics};
///
/// struct Mining;
///
/// impl SectorFormulaSet for Mining {
///     fn sector(&self) -> &str {
///         "mining"
///     }
///
///     fn compute_metrics(&self, data: &SectorData) -> SectorMetrics {
///         let SectorData::Custom(raw) = data else {
///             return SectorMetrics::Empty;
///         };
///         let mut values = BTreeMap::new();
///         values.insert("reserve_life".to_string(), raw.get("reserves") / raw.get("annual_output"));
///         SectorMetrics::Custom { sector: "mining".to_string(), values }
///     }
/// }
///
/// assert!(Mining.compute_metrics(&SectorData::Unsupported).is_empty());
/// ```
pub trait SectorFormulaSet: Send + Sync {
    /// Sector tag this formula set answers to.
    fn sector(&self) -> &str;

    /// Compute the sector KPIs from raw operational data.
    fn compute_metrics(&self, data: &SectorData) -> SectorMetrics;
}
