//! Sector identity, industry KPIs and quartile benchmarks.

use crate::traits::MetricSource;
use std::collections::BTreeMap;

/// Optional industry-level KPIs reported for a company.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct IndustryKpis {
    /// Market share, percent (0..100)
    pub market_share: Option<f64>,
    /// Revenue share of the largest customers
    pub customer_concentration: Option<f64>,
    /// Geographic diversification score
    pub geographic_diversification: Option<f64>,
    /// Product diversification score
    pub product_diversification: Option<f64>,
    /// Regulatory risk score
    pub regulatory_risk: Option<f64>,
    /// Cyclicality score
    pub cyclicality: Option<f64>,
    /// R&D spend / revenue
    pub rd_to_revenue: Option<f64>,
    /// Granted patents
    pub patent_count: Option<f64>,
    /// Revenue share of recently launched products
    pub new_product_revenue: Option<f64>,
    /// Carbon emissions (non-negative)
    pub carbon_emissions: Option<f64>,
    /// Energy efficiency score
    pub energy_efficiency: Option<f64>,
    /// Water usage
    pub water_usage: Option<f64>,
    /// Waste management score
    pub waste_management: Option<f64>,
    /// Employee turnover
    pub employee_turnover: Option<f64>,
    /// Digital revenue, percent of revenue (0..100)
    pub digital_revenue: Option<f64>,
    /// E-commerce share of sales
    pub ecommerce_share: Option<f64>,
    /// IT spending
    pub it_spending: Option<f64>,
}

impl MetricSource for IndustryKpis {
    fn metric(&self, path: &str) -> Option<f64> {
        match path {
            "market_share" => self.market_share,
            "customer_concentration" => self.customer_concentration,
            "geographic_diversification" => self.geographic_diversification,
            "product_diversification" => self.product_diversification,
            "regulatory_risk" => self.regulatory_risk,
            "cyclicality" => self.cyclicality,
            "rd_to_revenue" => self.rd_to_revenue,
            "patent_count" => self.patent_count,
            "new_product_revenue" => self.new_product_revenue,
            "carbon_emissions" => self.carbon_emissions,
            "energy_efficiency" => self.energy_efficiency,
            "water_usage" => self.water_usage,
            "waste_management" => self.waste_management,
            "employee_turnover" => self.employee_turnover,
            "digital_revenue" => self.digital_revenue,
            "ecommerce_share" => self.ecommerce_share,
            "it_spending" => self.it_spending,
            _ => None,
        }
    }
}

/// Benchmark ratio values keyed by ratio path (`profitability.ebitda_margin`).
///
/// Partial by nature: a benchmark provider rarely covers every ratio.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct BenchmarkSet(pub BTreeMap<String, f64>);

impl BenchmarkSet {
    /// Add or replace one benchmark value.
    pub fn with(mut self, path: impl Into<String>, value: f64) -> Self {
        self.0.insert(path.into(), value);
        self
    }
}

impl MetricSource for BenchmarkSet {
    fn metric(&self, path: &str) -> Option<f64> {
        self.0.get(path).copied()
    }
}

/// Quartile boundaries of a sector's ratio distribution.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct QuartileBenchmarks {
    /// First quartile
    pub q1: BenchmarkSet,
    /// Median
    pub median: BenchmarkSet,
    /// Third quartile
    pub q3: BenchmarkSet,
}

/// Sector benchmark ratios.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct IndustryBenchmarks {
    /// Sector average ratios
    pub ratios: BenchmarkSet,
    /// Quartile boundaries
    pub quartiles: QuartileBenchmarks,
}

/// Sector identity, KPIs and benchmarks for one company.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IndustryMetrics {
    /// Sector tag, e.g. "technology"
    pub sector: String,
    /// Optional subsector
    #[cfg_attr(feature = "serde", serde(default))]
    pub subsector: Option<String>,
    /// Industry KPIs
    #[cfg_attr(feature = "serde", serde(default))]
    pub metrics: IndustryKpis,
    /// Sector benchmarks
    #[cfg_attr(feature = "serde", serde(default))]
    pub benchmarks: IndustryBenchmarks,
}

impl IndustryMetrics {
    /// Locate a company ratio within the sector quartiles.
    ///
    /// Returns `None` when `value_source` lacks the path or the benchmarks
    /// lack any of the three boundaries for it.
    pub fn quartile_position(&self, value_source: &dyn MetricSource, path: &str) -> Option<QuartilePosition> {
        let value = value_source.metric(path)?;
        let q = &self.benchmarks.quartiles;
        Some(QuartilePosition::locate(
            value,
            q.q1.metric(path)?,
            q.median.metric(path)?,
            q.q3.metric(path)?,
        ))
    }
}

impl MetricSource for IndustryMetrics {
    fn metric(&self, path: &str) -> Option<f64> {
        self.metrics.metric(path)
    }
}

/// Where a value falls relative to quartile boundaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum QuartilePosition {
    /// Strictly below Q1
    BelowQ1,
    /// Between Q1 (inclusive) and the median
    Q1ToMedian,
    /// Between the median (inclusive) and Q3
    MedianToQ3,
    /// At or above Q3
    AboveQ3,
}

impl QuartilePosition {
    /// Place `value` against the boundaries.
    ///
    /// # Examples
    /// ```
    /// use valuation_core::types::QuartilePosition;
    ///
    /// assert_eq!(QuartilePosition::locate(0.05, 0.10, 0.15, 0.20), QuartilePosition::BelowQ1);
    /// assert_eq!(QuartilePosition::locate(0.15, 0.10, 0.15, 0.20), QuartilePosition::MedianToQ3);
    /// assert_eq!(QuartilePosition::locate(0.25, 0.10, 0.15, 0.20), QuartilePosition::AboveQ3);
    /// ```
    pub fn locate(value: f64, q1: f64, median: f64, q3: f64) -> Self {
        if value < q1 {
            QuartilePosition::BelowQ1
        } else if value < median {
            QuartilePosition::Q1ToMedian
        } else if value < q3 {
            QuartilePosition::MedianToQ3
        } else {
            QuartilePosition::AboveQ3
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::FinancialRatios;

    fn metrics() -> IndustryMetrics {
        IndustryMetrics {
            sector: "technology".to_string(),
            subsector: None,
            metrics: IndustryKpis {
                market_share: Some(12.5),
                ..Default::default()
            },
            benchmarks: IndustryBenchmarks {
                ratios: BenchmarkSet::default().with("profitability.ebitda_margin", 0.18),
                quartiles: QuartileBenchmarks {
                    q1: BenchmarkSet::default().with("profitability.ebitda_margin", 0.10),
                    median: BenchmarkSet::default().with("profitability.ebitda_margin", 0.18),
                    q3: BenchmarkSet::default().with("profitability.ebitda_margin", 0.25),
                },
            },
        }
    }

    #[test]
    fn test_kpi_lookup() {
        let m = metrics();
        assert_eq!(m.metric("market_share"), Some(12.5));
        assert_eq!(m.metric("carbon_emissions"), None);
        assert_eq!(m.metric_or_zero("carbon_emissions"), 0.0);
    }

    #[test]
    fn test_quartile_position_of_company_ratio() {
        let mut ratios = FinancialRatios::default();
        ratios.profitability.ebitda_margin = 0.20;
        let position = metrics().quartile_position(&ratios, "profitability.ebitda_margin");
        assert_eq!(position, Some(QuartilePosition::MedianToQ3));
    }

    #[test]
    fn test_quartile_position_missing_benchmark() {
        let ratios = FinancialRatios::default();
        assert_eq!(metrics().quartile_position(&ratios, "profitability.roe"), None);
    }

    #[test]
    fn test_locate_boundaries() {
        assert_eq!(QuartilePosition::locate(0.10, 0.10, 0.15, 0.20), QuartilePosition::Q1ToMedian);
        assert_eq!(QuartilePosition::locate(0.20, 0.10, 0.15, 0.20), QuartilePosition::AboveQ3);
    }
}
