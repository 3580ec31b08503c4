//! Free cash flow projection and discounted cash flow valuation.
//!
//! ## Free cash flow
//!
//! ```text
//! EBITDA       = revenue x ebitda_margin
//! EBIT         = EBITDA x (1 - depreciation_rate)
//! tax          = EBIT x tax_rate
//! depreciation = revenue x depreciation_rate
//! FCF          = EBIT - tax + depreciation - capex - working_capital_investment
//! ```
//!
//! ## Enterprise value
//!
//! Year `i` (1-based position in the schedule, not the year label) is
//! discounted by `(1 + wacc)^i`. The terminal value is a Gordon-growth
//! perpetuity on the last year's cash flow, discounted by `(1 + wacc)^N`.

use tracing::{debug, warn};
use valuation_core::types::{CashFlowAssumption, ValuationError};

/// Free cash flow for one projection year.
///
/// Total over its numeric domain: negative margins propagate into a
/// negative cash flow.
///
/// # Examples
/// ```
/// use valuation_core::types::CashFlowAssumption;
/// use valuation_engine::dcf::project_free_cash_flow;
///
/// let year = CashFlowAssumption {
///     year: 1,
///     revenue: 1000.0,
///     ebitda_margin: 0.2,
///     depreciation_rate: 0.1,
///     tax_rate: 0.25,
///     capex: 30.0,
///     working_capital_investment: 10.0,
///     ..Default::default()
/// };
/// // EBITDA 200, EBIT 180, tax 45, depreciation 100
/// assert!((project_free_cash_flow(&year) - 195.0).abs() < 1e-9);
/// ```
pub fn project_free_cash_flow(assumption: &CashFlowAssumption) -> f64 {
    FreeCashFlow::project(assumption).free_cash_flow
}

/// Discounted cash flow enterprise value.
///
/// Shorthand for `DcfValuator::new(wacc, terminal_growth).value(cash_flows)`.
///
/// # Errors
///
/// See [`DcfValuator::breakdown`].
pub fn valuate_dcf(
    cash_flows: &[CashFlowAssumption],
    wacc: f64,
    terminal_growth: f64,
) -> Result<f64, ValuationError> {
    DcfValuator::new(wacc, terminal_growth).value(cash_flows)
}

/// Intermediate figures of one projected year.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FreeCashFlow {
    /// Projection year label
    pub year: u32,
    /// Revenue x EBITDA margin
    pub ebitda: f64,
    /// EBITDA net of depreciation
    pub ebit: f64,
    /// Tax on EBIT
    pub tax: f64,
    /// Revenue x depreciation rate
    pub depreciation: f64,
    /// Resulting free cash flow
    pub free_cash_flow: f64,
}

impl FreeCashFlow {
    /// Project one year's assumptions.
    pub fn project(a: &CashFlowAssumption) -> Self {
        let ebitda = a.revenue * a.ebitda_margin;
        let ebit = ebitda * (1.0 - a.depreciation_rate);
        let tax = ebit * a.tax_rate;
        let depreciation = a.revenue * a.depreciation_rate;
        let free_cash_flow = ebit - tax + depreciation - a.capex - a.working_capital_investment;
        Self {
            year: a.year,
            ebitda,
            ebit,
            tax,
            depreciation,
            free_cash_flow,
        }
    }
}

/// Components of a DCF valuation.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DcfBreakdown {
    /// Per-year projections in schedule order
    pub years: Vec<FreeCashFlow>,
    /// Sum of discounted yearly cash flows
    pub present_value_of_cash_flows: f64,
    /// Undiscounted terminal value at year N
    pub terminal_value: f64,
    /// Terminal value discounted by `(1 + wacc)^N`
    pub present_value_of_terminal_value: f64,
    /// Sum of the two present values
    pub enterprise_value: f64,
}

/// DCF valuator for a fixed discount rate and terminal growth rate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DcfValuator {
    wacc: f64,
    terminal_growth: f64,
}

impl DcfValuator {
    /// Create a valuator. Rates are fractions.
    pub fn new(wacc: f64, terminal_growth: f64) -> Self {
        Self {
            wacc,
            terminal_growth,
        }
    }

    /// Discount rate.
    pub fn wacc(&self) -> f64 {
        self.wacc
    }

    /// Terminal growth rate.
    pub fn terminal_growth(&self) -> f64 {
        self.terminal_growth
    }

    /// Enterprise value of `cash_flows`.
    ///
    /// # Errors
    ///
    /// See [`DcfValuator::breakdown`].
    pub fn value(&self, cash_flows: &[CashFlowAssumption]) -> Result<f64, ValuationError> {
        self.breakdown(cash_flows).map(|b| b.enterprise_value)
    }

    /// Full valuation with per-year projections.
    ///
    /// `wacc < g` is computed as-is (the terminal value turns negative) and
    /// logged as a warning.
    ///
    /// # Errors
    ///
    /// - [`ValuationError::EmptyProjection`] for an empty schedule
    /// - [`ValuationError::TerminalGrowthEqualsDiscountRate`] when `wacc == g`
    /// - [`ValuationError::NonFiniteResult`] if the value overflows or is NaN
    pub fn breakdown(&self, cash_flows: &[CashFlowAssumption]) -> Result<DcfBreakdown, ValuationError> {
        let (wacc, g) = (self.wacc, self.terminal_growth);
        let last = cash_flows.last().ok_or(ValuationError::EmptyProjection)?;

        if (wacc - g).abs() <= f64::EPSILON {
            return Err(ValuationError::TerminalGrowthEqualsDiscountRate { rate: wacc });
        }
        if wacc < g {
            warn!(wacc, terminal_growth = g, "terminal growth exceeds discount rate");
        }

        let base = 1.0 + wacc;
        let mut discount = 1.0;
        let mut present_value_of_cash_flows = 0.0;
        let mut years = Vec::with_capacity(cash_flows.len());
        for assumption in cash_flows {
            discount *= base;
            let fcf = FreeCashFlow::project(assumption);
            present_value_of_cash_flows += fcf.free_cash_flow / discount;
            years.push(fcf);
        }

        let terminal_value = project_free_cash_flow(last) * (1.0 + g) / (wacc - g);
        let present_value_of_terminal_value = terminal_value / discount;
        let enterprise_value = present_value_of_cash_flows + present_value_of_terminal_value;

        if !enterprise_value.is_finite() {
            return Err(ValuationError::non_finite("DCF enterprise value"));
        }

        debug!(
            years = years.len(),
            wacc,
            terminal_growth = g,
            enterprise_value,
            "DCF valuation complete"
        );

        Ok(DcfBreakdown {
            years,
            present_value_of_cash_flows,
            terminal_value,
            present_value_of_terminal_value,
            enterprise_value,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn year(year: u32, revenue: f64) -> CashFlowAssumption {
        CashFlowAssumption {
            year,
            revenue,
            growth_rate: 0.05,
            ebitda_margin: 0.2,
            depreciation_rate: 0.05,
            tax_rate: 0.25,
            capex: 20.0,
            working_capital_investment: 5.0,
        }
    }

    #[test]
    fn test_free_cash_flow_components() {
        let fcf = FreeCashFlow::project(&year(1, 1000.0));
        assert_relative_eq!(fcf.ebitda, 200.0, epsilon = 1e-10);
        assert_relative_eq!(fcf.ebit, 190.0, epsilon = 1e-10);
        assert_relative_eq!(fcf.tax, 47.5, epsilon = 1e-10);
        assert_relative_eq!(fcf.depreciation, 50.0, epsilon = 1e-10);
        assert_relative_eq!(fcf.free_cash_flow, 167.5, epsilon = 1e-10);
    }

    #[test]
    fn test_negative_margin_propagates() {
        let mut a = year(1, 1000.0);
        a.ebitda_margin = -0.1;
        assert!(project_free_cash_flow(&a) < 0.0);
    }

    #[test]
    fn test_single_year_closed_form() {
        let cf = [year(1, 1000.0)];
        let fcf = project_free_cash_flow(&cf[0]);
        let (wacc, g) = (0.1, 0.02);
        let expected = fcf / 1.1 + fcf * (1.0 + g) / (wacc - g) / 1.1;
        assert_relative_eq!(valuate_dcf(&cf, wacc, g).unwrap(), expected, epsilon = 1e-9);
    }

    #[test]
    fn test_discounting_uses_position_not_year_label() {
        let labelled = [year(2030, 1000.0), year(2035, 1100.0)];
        let relabelled = [year(1, 1000.0), year(2, 1100.0)];
        assert_eq!(
            valuate_dcf(&labelled, 0.1, 0.02).unwrap(),
            valuate_dcf(&relabelled, 0.1, 0.02).unwrap()
        );
    }

    #[test]
    fn test_breakdown_sums_to_enterprise_value() {
        let cf = [year(1, 1000.0), year(2, 1050.0), year(3, 1102.5)];
        let b = DcfValuator::new(0.1, 0.02).breakdown(&cf).unwrap();
        assert_eq!(b.years.len(), 3);
        assert_relative_eq!(
            b.enterprise_value,
            b.present_value_of_cash_flows + b.present_value_of_terminal_value,
            epsilon = 1e-9
        );
        assert_relative_eq!(
            b.present_value_of_terminal_value,
            b.terminal_value / 1.1_f64.powi(3),
            epsilon = 1e-9
        );
    }

    #[test]
    fn test_empty_projection_is_error() {
        assert_eq!(valuate_dcf(&[], 0.1, 0.02), Err(ValuationError::EmptyProjection));
    }

    #[test]
    fn test_wacc_equal_growth_is_error() {
        let err = valuate_dcf(&[year(1, 1000.0)], 0.05, 0.05).unwrap_err();
        assert!(matches!(err, ValuationError::TerminalGrowthEqualsDiscountRate { .. }));
    }

    #[test]
    fn test_wacc_below_growth_is_permissive() {
        let value = valuate_dcf(&[year(1, 1000.0)], 0.02, 0.05).unwrap();
        assert!(value.is_finite());
        assert!(value < 0.0);
    }

    #[test]
    fn test_non_finite_is_error() {
        let cf = [year(1, f64::MAX)];
        let err = valuate_dcf(&cf, 0.1, 0.0999999).unwrap_err();
        assert!(matches!(err, ValuationError::NonFiniteResult { .. }));
    }
}
