//! Manufacturing KPIs.

use valuation_core::math::stats::safe_div;
use valuation_core::traits::SectorFormulaSet;
use valuation_core::types::{ManufacturingData, ManufacturingMetrics, SectorData, SectorMetrics};

/// Manufacturing formula set, registered as `"manufacturing"`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ManufacturingFormulas;

impl SectorFormulaSet for ManufacturingFormulas {
    fn sector(&self) -> &str {
        "manufacturing"
    }

    fn compute_metrics(&self, data: &SectorData) -> SectorMetrics {
        match data {
            SectorData::Manufacturing(d) => SectorMetrics::Manufacturing(manufacturing_metrics(d)),
            _ => SectorMetrics::Empty,
        }
    }
}

/// Capacity, supply-chain and quality KPIs.
///
/// Quality is one minus the defect rate, so it reads `1.0` when no units
/// were inspected.
pub fn manufacturing_metrics(d: &ManufacturingData) -> ManufacturingMetrics {
    ManufacturingMetrics {
        capacity_utilization: safe_div(d.actual_production, d.total_capacity),
        order_backlog: safe_div(d.order_backlog_value, d.revenue),
        supplier_concentration: safe_div(d.top_supplier_purchases, d.total_purchases),
        raw_material_costs: d.raw_material_costs,
        production_efficiency: safe_div(d.output_units, d.input_units),
        quality_metrics: 1.0 - safe_div(d.defective_units, d.total_units),
    }
}
