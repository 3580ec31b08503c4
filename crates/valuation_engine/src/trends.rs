//! Historical trend statistics.
//!
//! For each tracked series the analyzer reports:
//! - CAGR between the first and last observation
//! - Volatility: population standard deviation of the raw values
//! - Stability: `1 - mean(|x_i - x_{i-1}|)`
//!
//! Stability is only comparable between series in the same unit; on
//! currency-scale series it is large and negative.

use chrono::NaiveDate;
use std::collections::BTreeMap;
use std::fmt;
use tracing::debug;
use valuation_core::math::stats::{cagr, population_std_dev, trend_stability};
use valuation_core::types::{sort_by_date, HistoricalPoint, ValuationError};

/// Minimum observations for a trend.
pub const MIN_HISTORY_POINTS: usize = 2;

/// A tracked historical series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum TrendSeries {
    /// Revenue
    Revenue,
    /// EBITDA
    Ebitda,
    /// Net income
    NetIncome,
    /// EBITDA margin ratio
    EbitdaMargin,
    /// Debt / EBITDA ratio
    Leverage,
}

impl TrendSeries {
    /// Every series, in report order.
    pub const ALL: [TrendSeries; 5] = [
        TrendSeries::Revenue,
        TrendSeries::Ebitda,
        TrendSeries::NetIncome,
        TrendSeries::EbitdaMargin,
        TrendSeries::Leverage,
    ];

    /// The series value of one observation.
    pub fn extract(&self, point: &HistoricalPoint) -> f64 {
        match self {
            TrendSeries::Revenue => point.financials.revenue,
            TrendSeries::Ebitda => point.financials.ebitda,
            TrendSeries::NetIncome => point.financials.net_income,
            TrendSeries::EbitdaMargin => point.ratios.profitability.ebitda_margin,
            TrendSeries::Leverage => point.ratios.leverage.debt_to_ebitda,
        }
    }

    /// Display name.
    pub fn name(&self) -> &'static str {
        match self {
            TrendSeries::Revenue => "revenue",
            TrendSeries::Ebitda => "ebitda",
            TrendSeries::NetIncome => "net_income",
            TrendSeries::EbitdaMargin => "ebitda_margin",
            TrendSeries::Leverage => "leverage",
        }
    }
}

impl fmt::Display for TrendSeries {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Trend statistics of one series.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SeriesTrend {
    /// Growth rate, or why it is undefined for this series
    pub cagr: Result<f64, ValuationError>,
    /// Population standard deviation
    pub volatility: f64,
    /// Smoothness score
    pub stability: f64,
}

impl SeriesTrend {
    /// Statistics of a date-ordered series.
    pub fn from_values(values: &[f64]) -> Self {
        Self {
            cagr: cagr(values),
            volatility: population_std_dev(values),
            stability: trend_stability(values),
        }
    }
}

/// Trend statistics over a history.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TrendReport {
    /// Earliest observation date
    pub start: NaiveDate,
    /// Latest observation date
    pub end: NaiveDate,
    /// Number of observations
    pub points: usize,
    /// Per-series statistics
    pub series: BTreeMap<TrendSeries, SeriesTrend>,
}

impl TrendReport {
    /// Statistics of one series, if analysed.
    pub fn get(&self, series: TrendSeries) -> Option<&SeriesTrend> {
        self.series.get(&series)
    }
}

/// Analyse every [`TrendSeries`] over `history`.
///
/// # Errors
///
/// [`ValuationError::InsufficientHistory`] for fewer than two observations.
/// A series whose CAGR is undefined reports the error in its own
/// [`SeriesTrend::cagr`] without failing the analysis.
///
/// # Examples
/// ```
/// use chrono::NaiveDate;
/// use valuation_core::types::{history_from_financials, FinancialData};
/// use valuation_engine::trends::{analyze_trends, TrendSeries};
///
/// let d = |y| NaiveDate::from_ymd_opt(y, 12, 31).unwrap();
/// let fin = |revenue| FinancialData { revenue, ..Default::default() };
/// let history = history_from_financials(vec![(d(2023), fin(100.0)), (d(2024), fin(121.0))]);
///
/// let report = analyze_trends(&history).unwrap();
/// let revenue = report.get(TrendSeries::Revenue).unwrap();
/// assert!((revenue.cagr.clone().unwrap() - 0.21).abs() < 1e-12);
/// ```
pub fn analyze_trends(history: &[HistoricalPoint]) -> Result<TrendReport, ValuationError> {
    TrendAnalyzer::default().analyze(history)
}

/// Trend analysis over a configurable set of series.
#[derive(Debug, Clone)]
pub struct TrendAnalyzer {
    series: Vec<TrendSeries>,
}

impl Default for TrendAnalyzer {
    fn default() -> Self {
        Self {
            series: TrendSeries::ALL.to_vec(),
        }
    }
}

impl TrendAnalyzer {
    /// Analyzer over an explicit set of series.
    pub fn with_series(series: impl IntoIterator<Item = TrendSeries>) -> Self {
        Self {
            series: series.into_iter().collect(),
        }
    }

    /// Analyse `history`, sorting a copy by date first.
    ///
    /// # Errors
    ///
    /// See [`analyze_trends`].
    pub fn analyze(&self, history: &[HistoricalPoint]) -> Result<TrendReport, ValuationError> {
        if history.len() < MIN_HISTORY_POINTS {
            return Err(ValuationError::InsufficientHistory {
                got: history.len(),
                need: MIN_HISTORY_POINTS,
            });
        }

        let mut sorted = history.to_vec();
        sort_by_date(&mut sorted);

        let series: BTreeMap<TrendSeries, SeriesTrend> = self
            .series
            .iter()
            .map(|&s| {
                let values: Vec<f64> = sorted.iter().map(|p| s.extract(p)).collect();
                (s, SeriesTrend::from_values(&values))
            })
            .collect();

        debug!(points = sorted.len(), series = series.len(), "trend analysis complete");

        Ok(TrendReport {
            start: sorted[0].date,
            end: sorted[sorted.len() - 1].date,
            points: sorted.len(),
            series,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use valuation_core::types::{history_from_financials, FinancialData, FinancialRatios};

    fn date(y: i32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, 12, 31).unwrap()
    }

    fn snapshot(revenue: f64, ebitda: f64, net_income: f64, debt: f64) -> FinancialData {
        FinancialData {
            revenue,
            ebitda,
            net_income,
            total_debt: debt,
            ..Default::default()
        }
    }

    #[test]
    fn test_two_point_cagr() {
        let history = history_from_financials(vec![
            (date(2022), snapshot(100.0, 20.0, 10.0, 40.0)),
            (date(2023), snapshot(121.0, 25.0, 12.0, 40.0)),
        ]);
        let report = analyze_trends(&history).unwrap();
        let revenue = report.get(TrendSeries::Revenue).unwrap();
        assert_relative_eq!(revenue.cagr.clone().unwrap(), 0.21, epsilon = 1e-12);
        assert_eq!(report.points, 2);
        assert_eq!(report.start, date(2022));
    }

    #[test]
    fn test_unsorted_input_is_sorted() {
        let mut history = history_from_financials(vec![
            (date(2021), snapshot(100.0, 20.0, 10.0, 40.0)),
            (date(2022), snapshot(110.0, 22.0, 11.0, 40.0)),
            (date(2023), snapshot(121.0, 24.2, 12.1, 40.0)),
        ]);
        history.reverse();
        let report = analyze_trends(&history).unwrap();
        assert_relative_eq!(
            report.get(TrendSeries::Revenue).unwrap().cagr.clone().unwrap(),
            0.1,
            epsilon = 1e-12
        );
        assert_eq!(report.end, date(2023));
    }

    #[test]
    fn test_insufficient_history() {
        let history = history_from_financials(vec![(date(2023), snapshot(1.0, 1.0, 1.0, 1.0))]);
        assert_eq!(
            analyze_trends(&history),
            Err(ValuationError::InsufficientHistory { got: 1, need: 2 })
        );
        assert!(analyze_trends(&[]).is_err());
    }

    #[test]
    fn test_cagr_error_is_per_series() {
        let history = history_from_financials(vec![
            (date(2022), snapshot(100.0, 20.0, 0.0, 40.0)),
            (date(2023), snapshot(110.0, 22.0, 5.0, 40.0)),
        ]);
        let report = analyze_trends(&history).unwrap();
        assert!(matches!(
            report.get(TrendSeries::NetIncome).unwrap().cagr,
            Err(ValuationError::UndefinedGrowthRate { .. })
        ));
        assert!(report.get(TrendSeries::Revenue).unwrap().cagr.is_ok());
    }

    #[test]
    fn test_flat_ratio_series() {
        let history = history_from_financials(vec![
            (date(2021), snapshot(100.0, 20.0, 10.0, 40.0)),
            (date(2022), snapshot(200.0, 40.0, 20.0, 80.0)),
            (date(2023), snapshot(300.0, 60.0, 30.0, 120.0)),
        ]);
        let report = analyze_trends(&history).unwrap();
        let margin = report.get(TrendSeries::EbitdaMargin).unwrap();
        assert_relative_eq!(margin.volatility, 0.0, epsilon = 1e-12);
        assert_relative_eq!(margin.stability, 1.0, epsilon = 1e-12);
        let leverage = report.get(TrendSeries::Leverage).unwrap();
        assert_relative_eq!(leverage.cagr.clone().unwrap(), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_with_series_limits_report() {
        let history = vec![
            HistoricalPoint::new(date(2022), snapshot(100.0, 1.0, 1.0, 1.0), FinancialRatios::default()),
            HistoricalPoint::new(date(2023), snapshot(150.0, 1.0, 1.0, 1.0), FinancialRatios::default()),
        ];
        let report = TrendAnalyzer::with_series([TrendSeries::Revenue])
            .analyze(&history)
            .unwrap();
        assert_eq!(report.series.len(), 1);
        assert!(report.get(TrendSeries::Ebitda).is_none());
    }
}
