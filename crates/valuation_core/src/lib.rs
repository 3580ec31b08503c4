//! # valuation_core: Foundation Layer of the Valuer Engine
//!
//! ## Layer 1 (Foundation) Role
//!
//! valuation_core is the bottom layer of the workspace, providing:
//! - Value records: statements, ratios, projections, peers, history,
//!   industry and sector data (`types`)
//! - The `ValuationError` domain error (`types::error`)
//! - Total statistics helpers: safe division, mean, population standard
//!   deviation, CAGR, trend stability, upper median (`math::stats`)
//! - Traits: `MetricSource` for field-path lookups and `SectorFormulaSet`
//!   for pluggable sector KPIs (`traits`)
//!
//! ## Zero Dependency Principle
//!
//! Layer 1 has no dependencies on other workspace crates, with minimal
//! external dependencies:
//! - num-traits: generic numeric helpers
//! - chrono: dates of historical observations
//! - thiserror: error derivation
//! - serde: serialisation support (optional)
//!
//! ## Usage Examples
//!
//! ```rust
//! use valuation_core::math::stats::{cagr, population_std_dev};
//! use valuation_core::types::{CashFlowAssumption, CashFlowSchedule};
//!
//! let base = CashFlowAssumption {
//!     year: 1,
//!     revenue: 1_000_000.0,
//!     growth_rate: 0.05,
//!     ebitda_margin: 0.15,
//!     ..Default::default()
//! };
//! let schedule = CashFlowSchedule::project(base, 5);
//! assert_eq!(schedule.len(), 5);
//!
//! let revenues: Vec<f64> = schedule.iter().map(|cf| cf.revenue).collect();
//! let growth = cagr(&revenues).unwrap();
//! assert!((growth - 0.05).abs() < 1e-12);
//! assert!(population_std_dev(&revenues) > 0.0);
//! ```
//!
//! ## Feature Flags
//!
//! - `serde` (default): Serialize/Deserialize for all records and errors

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod math;
pub mod traits;
pub mod types;
