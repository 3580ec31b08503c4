//! # valuation_engine: Calculation Layer of the Valuer Engine
//!
//! Pure, synchronous valuation logic over the `valuation_core` data model.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │          valuation_engine (L2)          │
//! ├─────────────────────────────────────────┤
//! │  dcf/          - FCF projection, DCF    │
//! │  comparables/  - peer median multiples  │
//! │  sensitivity/  - WACC x growth grid     │
//! │  trends/       - CAGR, volatility       │
//! │  sector/       - sector KPI registry    │
//! │  validation/   - rule engine, presets   │
//! │  report/       - full case valuation    │
//! └─────────────────────────────────────────┘
//!          ↓
//! ┌─────────────────────────────────────────┐
//! │           valuation_core (L1)           │
//! │  records, errors, statistics, traits    │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Entry points
//!
//! - [`dcf::project_free_cash_flow`], [`dcf::valuate_dcf`]
//! - [`comparables::valuate_comparable`]
//! - [`sensitivity::build_sensitivity_matrix`]
//! - [`trends::analyze_trends`]
//! - [`sector::compute_sector_metrics`]
//! - [`validation::validate`]
//! - [`report::ValuationReport::build`]
//!
//! ## Example
//!
//! ```
//! use valuation_core::types::{CashFlowAssumption, CashFlowSchedule};
//! use valuation_engine::dcf::valuate_dcf;
//! use valuation_engine::sensitivity::{build_sensitivity_matrix, SensitivityGrid};
//!
//! let schedule = CashFlowSchedule::project(
//!     CashFlowAssumption {
//!         year: 2025,
//!         revenue: 1_000_000.0,
//!         growth_rate: 0.05,
//!         ebitda_margin: 0.15,
//!         depreciation_rate: 0.03,
//!         tax_rate: 0.25,
//!         capex: 50_000.0,
//!         working_capital_investment: 10_000.0,
//!     },
//!     5,
//! );
//!
//! let value = valuate_dcf(&schedule, 0.10, 0.02).unwrap();
//! assert!(value > 0.0);
//!
//! let grid = SensitivityGrid::default();
//! let matrix = build_sensitivity_matrix(&schedule, &grid.wacc, &grid.growth);
//! assert_eq!(matrix.get(2, 2), Some(value));
//! ```
//!
//! ## Logging
//!
//! Components emit `tracing` events (`debug!` for completed work, `warn!`
//! for permissive inputs such as `wacc < g`). No subscriber is installed
//! here.

#![deny(missing_docs)]

pub mod comparables;
pub mod dcf;
pub mod report;
pub mod sector;
pub mod sensitivity;
pub mod trends;
pub mod validation;

pub use comparables::valuate_comparable;
pub use dcf::{project_free_cash_flow, valuate_dcf};
pub use report::{ValuationCase, ValuationReport, ValuationSettings};
pub use sector::compute_sector_metrics;
pub use sensitivity::build_sensitivity_matrix;
pub use trends::analyze_trends;
pub use validation::validate;
