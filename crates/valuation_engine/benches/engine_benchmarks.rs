//! Criterion benchmarks for valuation_engine.
//!
//! Benchmarks cover:
//! - DCF valuation over projection lengths
//! - Sensitivity grids, sequential vs Rayon
//! - Comparables over peer set sizes
//! - Rule validation of a company snapshot

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use valuation_core::types::{
    CashFlowAssumption, CashFlowSchedule, ComparableCompany, FinancialData, FinancialRatios,
    MultipleKind, SectorMetrics,
};
use valuation_engine::comparables::valuate_comparable;
use valuation_engine::dcf::valuate_dcf;
use valuation_engine::sensitivity::{
    ParallelConfig, SensitivityAnalyzer, SensitivityConfig, SensitivityGrid,
};
use valuation_engine::validation::ValidationEngine;

fn schedule(years: usize) -> CashFlowSchedule {
    CashFlowSchedule::project(
        CashFlowAssumption {
            year: 1,
            revenue: 1_000_000.0,
            growth_rate: 0.05,
            ebitda_margin: 0.15,
            depreciation_rate: 0.03,
            tax_rate: 0.25,
            capex: 50_000.0,
            working_capital_investment: 10_000.0,
        },
        years,
    )
}

/// Synthetic peers with spread multiples.
fn peers(n: usize) -> Vec<ComparableCompany> {
    (0..n)
        .map(|i| {
            let k = ((i * 37) % 100) as f64 / 10.0;
            ComparableCompany::new(format!("Peer{}", i), 5.0 + k, 10.0 + k, 1.0 + k / 5.0)
        })
        .collect()
}

fn bench_dcf(c: &mut Criterion) {
    let mut group = c.benchmark_group("dcf");
    for years in [5, 10, 30] {
        let cf = schedule(years);
        group.bench_with_input(BenchmarkId::new("valuate_dcf", years), &cf, |b, cf| {
            b.iter(|| valuate_dcf(black_box(cf), black_box(0.10), black_box(0.02)))
        });
    }
    group.finish();
}

fn bench_sensitivity(c: &mut Criterion) {
    let mut group = c.benchmark_group("sensitivity");
    let cf = schedule(10);
    for steps in [2, 10, 25] {
        let grid = SensitivityGrid::around(0.10, 0.02, 0.001, 0.0005, steps);
        let label = format!("{}cells", grid.cells());

        let sequential = SensitivityAnalyzer::new(SensitivityConfig {
            parallel: ParallelConfig::sequential(),
            ..Default::default()
        });
        group.bench_with_input(BenchmarkId::new("sequential", &label), &grid, |b, grid| {
            b.iter(|| sequential.analyze(black_box(&cf), &grid.wacc, &grid.growth))
        });

        let parallel = SensitivityAnalyzer::new(SensitivityConfig {
            parallel: ParallelConfig::new(1, 0),
            ..Default::default()
        });
        group.bench_with_input(BenchmarkId::new("rayon", &label), &grid, |b, grid| {
            b.iter(|| parallel.analyze(black_box(&cf), &grid.wacc, &grid.growth))
        });
    }
    group.finish();
}

fn bench_comparables(c: &mut Criterion) {
    let mut group = c.benchmark_group("comparables");
    let company = FinancialData {
        ebitda: 200_000.0,
        ..Default::default()
    };
    for n in [10, 100, 1000] {
        let set = peers(n);
        group.bench_with_input(BenchmarkId::new("ev_to_ebitda", n), &set, |b, set| {
            b.iter(|| valuate_comparable(black_box(&company), set, MultipleKind::EvToEbitda))
        });
    }
    group.finish();
}

fn bench_validation(c: &mut Criterion) {
    let financials = FinancialData {
        revenue: 1_000_000.0,
        ebitda: 200_000.0,
        ..Default::default()
    };
    let ratios = FinancialRatios::derive(&financials, None);
    let engine = ValidationEngine::default();
    c.bench_function("validate_company", |b| {
        b.iter(|| {
            engine.validate_company(
                black_box("technology"),
                &financials,
                &ratios,
                &SectorMetrics::Empty,
            )
        })
    });
}

criterion_group!(
    benches,
    bench_dcf,
    bench_sensitivity,
    bench_comparables,
    bench_validation
);
criterion_main!(benches);
