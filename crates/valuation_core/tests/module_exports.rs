//! Integration tests for module exports.
//!
//! Verify that public modules and types are reachable via absolute paths
//! and that the records compose as the engine uses them.

use chrono::NaiveDate;

/// Statistics helpers are accessible via absolute path.
#[test]
fn test_stats_module_exports() {
    use valuation_core::math::stats::{
        cagr, mean, population_std_dev, safe_div, trend_stability, upper_median,
    };

    assert_eq!(safe_div(1.0_f64, 0.0), 0.0);
    assert_eq!(mean(&[1.0_f64, 2.0, 3.0]), 2.0);
    assert_eq!(population_std_dev(&[2.0_f64, 2.0]), 0.0);
    assert_eq!(trend_stability(&[0.5_f64]), 1.0);
    assert!(cagr(&[100.0_f64, 121.0, 133.1]).is_ok());
    assert_eq!(upper_median(&[1.0_f64, 3.0]), Some(3.0));
}

/// Traits are accessible and usable via absolute path.
#[test]
fn test_traits_module_exports() {
    use valuation_core::traits::{CompositeSource, Float, MetricSource, SectorFormulaSet};
    use valuation_core::types::{SectorData, SectorMetrics};

    struct Noop;

    impl SectorFormulaSet for Noop {
        fn sector(&self) -> &str {
            "noop"
        }

        fn compute_metrics(&self, _data: &SectorData) -> SectorMetrics {
            SectorMetrics::Empty
        }
    }

    let registry: Vec<Box<dyn SectorFormulaSet>> = vec![Box::new(Noop)];
    assert_eq!(registry[0].sector(), "noop");
    assert!(registry[0].compute_metrics(&SectorData::Unsupported).is_empty());

    let empty = CompositeSource::new();
    assert!(empty.is_empty());
    assert_eq!(empty.metric("revenue"), None);

    fn generic_sqrt<T: Float>(x: T) -> T {
        x.sqrt()
    }
    assert_eq!(generic_sqrt(9.0_f64), 3.0);
}

/// Types module re-exports every record.
#[test]
fn test_types_module_exports() {
    use valuation_core::types::{
        CashFlowAssumption, CashFlowSchedule, ComparableCompany, FinancialData, FinancialRatios,
        MultipleKind, QuartilePosition, SensitivityMatrix, ValuationError, ValuationResult,
    };

    let base = CashFlowAssumption {
        year: 1,
        revenue: 100.0,
        growth_rate: 0.1,
        ..Default::default()
    };
    let schedule = CashFlowSchedule::project(base, 4);
    assert_eq!(schedule.len(), 4);
    assert_eq!(schedule[3].year, 4);

    let duplicate = CashFlowSchedule::new(vec![base, base]);
    assert_eq!(duplicate, Err(ValuationError::DuplicateYear { year: 1 }));

    let peer = ComparableCompany::new("Peer", 8.0, 15.0, 2.0);
    assert_eq!(peer.multiple(MultipleKind::EvToEbitda), Some(8.0));

    let ratios = FinancialRatios::derive(&FinancialData::default(), None);
    assert_eq!(ratios.profitability.ebitda_margin, 0.0);

    assert_eq!(
        QuartilePosition::locate(1.0, 0.0, 0.5, 0.9),
        QuartilePosition::AboveQ3
    );

    let result = ValuationResult::default();
    assert_eq!(result.sensitivity_matrix, SensitivityMatrix::default());
}

/// A company snapshot validates through one composite source.
#[test]
fn test_composite_snapshot_lookup() {
    use valuation_core::traits::{CompositeSource, MetricSource};
    use valuation_core::types::{FinancialData, FinancialRatios, IndustryMetrics};

    let financials = FinancialData {
        revenue: 200.0,
        ebitda: 50.0,
        ..Default::default()
    };
    let ratios = FinancialRatios::derive(&financials, None);
    let mut industry = IndustryMetrics::default();
    industry.metrics.market_share = Some(12.5);

    let snapshot = CompositeSource::new()
        .with(&financials)
        .with(&ratios)
        .with(&industry);

    assert_eq!(snapshot.metric("revenue"), Some(200.0));
    assert_eq!(snapshot.metric("profitability.ebitda_margin"), Some(0.25));
    assert_eq!(snapshot.metric("market_share"), Some(12.5));
    assert_eq!(snapshot.metric_or_zero("carbon_emissions"), 0.0);
}

/// History built from snapshots is date-ordered with growth ratios.
#[test]
fn test_history_exports() {
    use valuation_core::types::{history_from_financials, sort_by_date, FinancialData};

    let d = |y| NaiveDate::from_ymd_opt(y, 12, 31).unwrap();
    let fin = |revenue| FinancialData {
        revenue,
        ..Default::default()
    };

    let mut history = history_from_financials(vec![(d(2023), fin(120.0)), (d(2022), fin(100.0))]);
    assert_eq!(history[0].date, d(2022));
    assert!((history[1].ratios.growth.revenue_growth - 0.2).abs() < 1e-12);

    history.reverse();
    sort_by_date(&mut history);
    assert_eq!(history[0].date, d(2022));
}
