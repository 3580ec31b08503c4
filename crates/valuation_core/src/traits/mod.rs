//! Core traits shared by the engine layers.
//!
//! This module defines:
//! - Generic floating-point operations (`Float` re-export)
//! - Field-path lookup over numeric records (`MetricSource`)
//! - Sector formula sets (`SectorFormulaSet`)

/// Generic floating-point trait used by the statistics helpers.
///
/// # Examples
/// ```
/// use valuation_core::traits::Float;
///
/// fn discount<T: Float>(rate: T, years: T) -> T {
///     (T::one() + rate).powf(-years)
/// }
///
/// let df: f64 = discount(0.10, 1.0);
/// assert!((df - 1.0 / 1.1).abs() < 1e-12);
/// ```
pub use num_traits::Float;

pub mod metrics;
pub mod sector;

pub use metrics::{CompositeSource, MetricSource};
pub use sector::SectorFormulaSet;
