//! WACC x terminal-growth sensitivity analysis.
//!
//! Cell `[i][j]` is the DCF value at `wacc[i]` and `growth[j]`, computed by
//! exactly the same routine as a point valuation. Pairs without a
//! meaningful terminal value hold `None` instead of aborting the grid.
//!
//! Large grids are filled with Rayon (see [`parallel`]); output is identical
//! to sequential evaluation.

pub mod parallel;

pub use parallel::{map_with_config, ParallelConfig};

use crate::dcf::valuate_dcf;
use tracing::debug;
use valuation_core::types::{CashFlowAssumption, SensitivityMatrix};

/// Build a sensitivity matrix with the default [`SensitivityConfig`].
///
/// # Examples
/// ```
/// use valuation_core::types::CashFlowAssumption;
/// use valuation_engine::dcf::valuate_dcf;
/// use valuation_engine::sensitivity::build_sensitivity_matrix;
///
/// let cash_flows = vec![CashFlowAssumption {
///     year: 1,
///     revenue: 1000.0,
///     ebitda_margin: 0.2,
///     tax_rate: 0.25,
///     ..Default::default()
/// }];
/// let matrix = build_sensitivity_matrix(&cash_flows, &[0.08, 0.10, 0.12], &[0.01, 0.02]);
/// assert_eq!(matrix.rows(), 3);
/// assert_eq!(matrix.cols(), 2);
/// assert_eq!(matrix.get(1, 1), Some(valuate_dcf(&cash_flows, 0.10, 0.02).unwrap()));
/// ```
pub fn build_sensitivity_matrix(
    cash_flows: &[CashFlowAssumption],
    wacc_values: &[f64],
    growth_values: &[f64],
) -> SensitivityMatrix {
    SensitivityAnalyzer::default().analyze(cash_flows, wacc_values, growth_values)
}

/// Sensitivity analysis settings.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SensitivityConfig {
    /// Parallel evaluation thresholds
    pub parallel: ParallelConfig,
    /// Blank every cell with `wacc <= g`. When false only DCF errors
    /// (`wacc == g`, empty schedule, overflow) are blanked.
    pub strict_terminal_growth: bool,
}

impl Default for SensitivityConfig {
    fn default() -> Self {
        Self {
            parallel: ParallelConfig::default(),
            strict_terminal_growth: true,
        }
    }
}

/// Re-values a projection over a rate grid.
#[derive(Clone, Debug, Default)]
pub struct SensitivityAnalyzer {
    config: SensitivityConfig,
}

impl SensitivityAnalyzer {
    /// Create an analyzer with explicit settings.
    pub fn new(config: SensitivityConfig) -> Self {
        Self { config }
    }

    /// Active settings.
    pub fn config(&self) -> &SensitivityConfig {
        &self.config
    }

    /// Value `cash_flows` at every (wacc, growth) pair.
    pub fn analyze(
        &self,
        cash_flows: &[CashFlowAssumption],
        wacc_values: &[f64],
        growth_values: &[f64],
    ) -> SensitivityMatrix {
        let cells = wacc_values.len() * growth_values.len();
        debug!(
            rows = wacc_values.len(),
            cols = growth_values.len(),
            parallel = self.config.parallel.should_parallelize(cells),
            "building sensitivity matrix"
        );

        let results: Vec<Vec<Option<f64>>> =
            map_with_config(wacc_values, cells, &self.config.parallel, |&wacc| {
                growth_values
                    .iter()
                    .map(|&growth| self.cell(cash_flows, wacc, growth))
                    .collect()
            });

        SensitivityMatrix {
            wacc: wacc_values.to_vec(),
            growth: growth_values.to_vec(),
            results,
        }
    }

    /// Value one (wacc, growth) pair, `None` when it has no meaningful value.
    pub fn cell(&self, cash_flows: &[CashFlowAssumption], wacc: f64, growth: f64) -> Option<f64> {
        if self.config.strict_terminal_growth && wacc <= growth {
            return None;
        }
        valuate_dcf(cash_flows, wacc, growth).ok()
    }
}

/// Axis values for a sensitivity grid.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SensitivityGrid {
    /// Discount rates (rows)
    pub wacc: Vec<f64>,
    /// Terminal growth rates (columns)
    pub growth: Vec<f64>,
}

impl Default for SensitivityGrid {
    /// WACC 8..12% in 1% steps, growth 1..3% in 0.5% steps.
    fn default() -> Self {
        Self::around(0.10, 0.02, 0.01, 0.005, 2)
    }
}

impl SensitivityGrid {
    /// Ascending values `center + k * step` for `k` in `-steps_each_side..=steps_each_side`.
    ///
    /// # Examples
    /// ```
    /// use valuation_engine::sensitivity::SensitivityGrid;
    ///
    /// let axis = SensitivityGrid::centered(0.10, 0.01, 2);
    /// assert_eq!(axis.len(), 5);
    /// assert_eq!(axis[2], 0.10);
    /// assert!((axis[0] - 0.08).abs() < 1e-12);
    /// ```
    pub fn centered(center: f64, step: f64, steps_each_side: usize) -> Vec<f64> {
        let side = steps_each_side as i64;
        (-side..=side).map(|k| center + step * k as f64).collect()
    }

    /// Grid centered on a base case.
    pub fn around(wacc: f64, growth: f64, wacc_step: f64, growth_step: f64, steps_each_side: usize) -> Self {
        Self {
            wacc: Self::centered(wacc, wacc_step, steps_each_side),
            growth: Self::centered(growth, growth_step, steps_each_side),
        }
    }

    /// Number of cells.
    pub fn cells(&self) -> usize {
        self.wacc.len() * self.growth.len()
    }
}
