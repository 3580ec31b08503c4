//! Value records of the valuation engine.
//!
//! This module provides:
//! - `financials`: statement snapshots (`FinancialData`) and ratio groups (`FinancialRatios`)
//! - `cash_flow`: projection-year assumptions and the validated `CashFlowSchedule`
//! - `comparables`: peer companies and the `MultipleKind` selector
//! - `history`: dated observations for trend analysis
//! - `industry`: industry KPIs, quartile benchmarks and `QuartilePosition`
//! - `sector`: per-sector operational inputs and KPI records
//! - `valuation`: `SensitivityMatrix` and `ValuationResult`
//! - `error`: the `ValuationError` domain error
//!
//! All records are plain values; nothing holds a reference to an engine component.

pub mod cash_flow;
pub mod comparables;
pub mod error;
pub mod financials;
pub mod history;
pub mod industry;
pub mod sector;
pub mod valuation;

pub use cash_flow::{CashFlowAssumption, CashFlowSchedule};
pub use comparables::{ComparableCompany, MultipleKind};
pub use error::ValuationError;
pub use financials::{
    EfficiencyRatios, FinancialData, FinancialRatios, GrowthRatios, LeverageRatios,
    LiquidityRatios, ProfitabilityRatios,
};
pub use history::{history_from_financials, sort_by_date, HistoricalPoint};
pub use industry::{
    BenchmarkSet, IndustryBenchmarks, IndustryKpis, IndustryMetrics, QuartileBenchmarks,
    QuartilePosition,
};
pub use sector::{
    FinancialSectorData, FinancialSectorMetrics, HealthcareData, HealthcareMetrics,
    ManufacturingData, ManufacturingMetrics, RawFields, RetailData, RetailMetrics, SectorData,
    SectorMetrics, TechnologyData, TechnologyMetrics,
};
pub use valuation::{
    ComparablesMethodology, DcfMethodology, ImpliedMultiples, Methodologies, SensitivityMatrix,
    ValuationResult,
};
