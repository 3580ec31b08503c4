//! Projection-year assumptions and the validated schedule that orders them.

use crate::types::ValuationError;
use std::ops::Deref;

/// Operating assumptions for one projection year.
///
/// Rates are fractions of one (0.15 for 15%).
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CashFlowAssumption {
    /// Projection year label
    pub year: u32,
    /// Revenue for the year
    pub revenue: f64,
    /// Revenue growth carried into the next year
    pub growth_rate: f64,
    /// EBITDA / revenue
    pub ebitda_margin: f64,
    /// Depreciation as a share of revenue (and of EBITDA for EBIT)
    pub depreciation_rate: f64,
    /// Tax rate on EBIT
    pub tax_rate: f64,
    /// Capital expenditure
    pub capex: f64,
    /// Investment in working capital
    pub working_capital_investment: f64,
}

impl CashFlowAssumption {
    /// The assumption for the following year: revenue grown by this year's
    /// growth rate, every other assumption carried forward.
    ///
    /// # Examples
    /// ```
    /// use valuation_core::types::CashFlowAssumption;
    ///
    /// let y1 = CashFlowAssumption { year: 1, revenue: 1000.0, growth_rate: 0.05, ..Default::default() };
    /// let y2 = y1.next_year();
    /// assert_eq!(y2.year, 2);
    /// assert!((y2.revenue - 1050.0).abs() < 1e-9);
    /// ```
    pub fn next_year(&self) -> Self {
        Self {
            year: self.year + 1,
            revenue: self.revenue * (1.0 + self.growth_rate),
            ..*self
        }
    }
}

/// A projection schedule with strictly increasing, unique years.
///
/// Gaps between years are allowed. Dereferences to a slice of assumptions in
/// year order.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "Vec<CashFlowAssumption>", into = "Vec<CashFlowAssumption>"))]
pub struct CashFlowSchedule {
    years: Vec<CashFlowAssumption>,
}

impl CashFlowSchedule {
    /// Build a schedule, rejecting duplicate or out-of-order years.
    ///
    /// # Errors
    ///
    /// [`ValuationError::DuplicateYear`] or [`ValuationError::NonIncreasingYears`].
    pub fn new(years: Vec<CashFlowAssumption>) -> Result<Self, ValuationError> {
        for pair in years.windows(2) {
            let (previous, next) = (pair[0].year, pair[1].year);
            if next == previous {
                return Err(ValuationError::DuplicateYear { year: next });
            }
            if next < previous {
                return Err(ValuationError::NonIncreasingYears { previous, next });
            }
        }
        Ok(Self { years })
    }

    /// Project `count` consecutive years starting from `base`.
    ///
    /// # Examples
    /// ```
    /// use valuation_core::types::{CashFlowAssumption, CashFlowSchedule};
    ///
    /// let base = CashFlowAssumption { year: 2025, revenue: 100.0, growth_rate: 0.1, ..Default::default() };
    /// let schedule = CashFlowSchedule::project(base, 3);
    /// assert_eq!(schedule.len(), 3);
    /// assert_eq!(schedule[2].year, 2027);
    /// assert!((schedule[2].revenue - 121.0).abs() < 1e-9);
    /// ```
    pub fn project(base: CashFlowAssumption, count: usize) -> Self {
        let mut schedule = Self::default();
        if count == 0 {
            return schedule;
        }
        schedule.years.push(base);
        for _ in 1..count {
            schedule.extend_year();
        }
        schedule
    }

    /// Append the year after the last one. No-op on an empty schedule.
    pub fn extend_year(&mut self) {
        if let Some(last) = self.years.last() {
            let next = last.next_year();
            self.years.push(next);
        }
    }

    /// The assumptions in year order.
    pub fn as_slice(&self) -> &[CashFlowAssumption] {
        &self.years
    }

    /// Consume the schedule.
    pub fn into_inner(self) -> Vec<CashFlowAssumption> {
        self.years
    }
}

impl Deref for CashFlowSchedule {
    type Target = [CashFlowAssumption];

    fn deref(&self) -> &Self::Target {
        &self.years
    }
}

impl AsRef<[CashFlowAssumption]> for CashFlowSchedule {
    fn as_ref(&self) -> &[CashFlowAssumption] {
        &self.years
    }
}

impl TryFrom<Vec<CashFlowAssumption>> for CashFlowSchedule {
    type Error = ValuationError;

    fn try_from(years: Vec<CashFlowAssumption>) -> Result<Self, Self::Error> {
        Self::new(years)
    }
}

impl From<CashFlowSchedule> for Vec<CashFlowAssumption> {
    fn from(schedule: CashFlowSchedule) -> Self {
        schedule.years
    }
}
