//! Mathematical helpers for the valuation engine.
//!
//! - `stats`: means, dispersion, compound growth and the upper median used
//!   for peer multiples

pub mod stats;

pub use stats::{cagr, mean, population_std_dev, safe_div, trend_stability, upper_median};
