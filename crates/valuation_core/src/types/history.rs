//! Dated historical observations.

use crate::types::{FinancialData, FinancialRatios};
use chrono::NaiveDate;

/// One dated observation: statement figures plus the ratios derived from them.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HistoricalPoint {
    /// Reporting date
    pub date: NaiveDate,
    /// Statement figures
    #[cfg_attr(feature = "serde", serde(default))]
    pub financials: FinancialData,
    /// Ratios for the same period
    #[cfg_attr(feature = "serde", serde(default))]
    pub ratios: FinancialRatios,
}

impl HistoricalPoint {
    /// An observation with explicitly supplied ratios.
    pub fn new(date: NaiveDate, financials: FinancialData, ratios: FinancialRatios) -> Self {
        Self {
            date,
            financials,
            ratios,
        }
    }
}

/// Sort observations by date (stable for equal dates).
pub fn sort_by_date(history: &mut [HistoricalPoint]) {
    history.sort_by_key(|p| p.date);
}

/// Build a dated history from statement snapshots, deriving each period's
/// ratios (including growth against the preceding period).
///
/// Input order does not matter; the result is sorted by date.
///
/// # Examples
/// ```
/// use chrono::NaiveDate;
/// use valuation_core::types::{history_from_financials, FinancialData};
///
/// let d = |y| NaiveDate::from_ymd_opt(y, 12, 31).unwrap();
/// let history = history_from_financials(vec![
///     (d(2024), FinancialData { revenue: 110.0, ebitda: 22.0, ..Default::default() }),
///     (d(2023), FinancialData { revenue: 100.0, ebitda: 20.0, ..Default::default() }),
/// ]);
/// assert_eq!(history[0].date, d(2023));
/// assert!((history[1].ratios.growth.revenue_growth - 0.1).abs() < 1e-12);
/// ```
pub fn history_from_financials(mut snapshots: Vec<(NaiveDate, FinancialData)>) -> Vec<HistoricalPoint> {
    snapshots.sort_by_key(|(date, _)| *date);
    let mut points: Vec<HistoricalPoint> = Vec::with_capacity(snapshots.len());
    for (date, financials) in snapshots {
        let previous = points.last().map(|p| p.financials);
        let ratios = FinancialRatios::derive(&financials, previous.as_ref());
        points.push(HistoricalPoint::new(date, financials, ratios));
    }
    points
}
