//! Full valuation of one company case.
//!
//! [`ValuationReport::build`] runs every component over a [`ValuationCase`]:
//! DCF with its breakdown, comparables for every multiple, the sensitivity
//! grid, trends over the history, sector KPIs, rule validation and
//! benchmark positioning.

use crate::comparables::{ComparablesValuator, PeerSummary};
use crate::dcf::{DcfBreakdown, DcfValuator};
use crate::sector::SectorRegistry;
use crate::sensitivity::{SensitivityAnalyzer, SensitivityConfig, SensitivityGrid};
use crate::trends::{TrendAnalyzer, TrendReport};
use crate::validation::{RuleSet, ValidationEngine, ValidationFinding};
use chrono::NaiveDate;
use std::collections::BTreeMap;
use tracing::{info, warn};
use valuation_core::math::stats::safe_div;
use valuation_core::traits::CompositeSource;
use valuation_core::types::{
    history_from_financials, CashFlowAssumption, CashFlowSchedule, ComparableCompany,
    ComparablesMethodology, DcfMethodology, FinancialData, FinancialRatios, HistoricalPoint,
    ImpliedMultiples, IndustryMetrics, Methodologies, MultipleKind, QuartilePosition, SectorData,
    SectorMetrics, ValuationError, ValuationResult,
};

/// Statement figures of one past period.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HistoryEntry {
    /// Reporting date
    pub date: NaiveDate,
    /// Statement figures
    pub financials: FinancialData,
}

/// Everything known about the company being valued.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ValuationCase {
    /// Company name
    pub company: String,
    /// Sector tag, e.g. "technology"
    pub sector: String,
    /// Current-period statement figures
    pub financials: FinancialData,
    /// Projection years, strictly increasing
    pub cash_flows: Vec<CashFlowAssumption>,
    /// Peer set
    pub peers: Vec<ComparableCompany>,
    /// Prior periods, any order
    pub history: Vec<HistoryEntry>,
    /// Raw operational data for the sector KPIs
    pub sector_data: Option<SectorData>,
    /// Industry KPIs and benchmarks
    pub industry: Option<IndustryMetrics>,
}

impl ValuationCase {
    /// The projection schedule, extended to at least `min_years` rows.
    ///
    /// # Errors
    ///
    /// Duplicate or out-of-order years.
    pub fn schedule(&self, min_years: usize) -> Result<CashFlowSchedule, ValuationError> {
        let mut schedule = CashFlowSchedule::new(self.cash_flows.clone())?;
        while !schedule.is_empty() && schedule.len() < min_years {
            schedule.extend_year();
        }
        Ok(schedule)
    }

    /// Dated history with derived ratios, sorted by date.
    pub fn history_points(&self) -> Vec<HistoricalPoint> {
        history_from_financials(
            self.history
                .iter()
                .map(|entry| (entry.date, entry.financials))
                .collect(),
        )
    }

    /// Current-period ratios, with growth against the latest history entry.
    pub fn ratios(&self) -> FinancialRatios {
        let previous = self
            .history
            .iter()
            .max_by_key(|entry| entry.date)
            .map(|entry| entry.financials);
        FinancialRatios::derive(&self.financials, previous.as_ref())
    }
}

/// Valuation parameters.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ValuationSettings {
    /// Discount rate
    pub wacc: f64,
    /// Terminal growth rate
    pub terminal_growth: f64,
    /// Minimum projection length; shorter schedules are extended
    pub projection_years: usize,
    /// Multiple used for the headline comparables value
    pub multiple: MultipleKind,
    /// Sensitivity axes
    pub grid: SensitivityGrid,
    /// Sensitivity evaluation settings
    pub sensitivity: SensitivityConfig,
    /// Validation rule tables
    pub rules: RuleSet,
}

impl Default for ValuationSettings {
    fn default() -> Self {
        Self {
            wacc: 0.10,
            terminal_growth: 0.02,
            projection_years: 5,
            multiple: MultipleKind::EvToEbitda,
            grid: SensitivityGrid::default(),
            sensitivity: SensitivityConfig::default(),
            rules: RuleSet::default(),
        }
    }
}

/// Complete valuation of a [`ValuationCase`].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ValuationReport {
    /// Company name
    pub company: String,
    /// Sector tag
    pub sector: String,
    /// Headline values, sensitivity and methodologies
    pub result: ValuationResult,
    /// DCF components
    pub dcf: DcfBreakdown,
    /// Peer statistics per multiple
    pub peers: Vec<PeerSummary>,
    /// Current-period ratios
    pub ratios: FinancialRatios,
    /// Trend statistics; `None` with fewer than two history entries
    pub trends: Option<TrendReport>,
    /// Sector KPIs
    pub sector_metrics: SectorMetrics,
    /// Generic and sector rule failures
    pub findings: Vec<ValidationFinding>,
    /// Industry rule failures
    pub industry_findings: Vec<ValidationFinding>,
    /// Quartile position per benchmarked ratio path
    pub benchmark_positions: BTreeMap<String, QuartilePosition>,
}

impl ValuationReport {
    /// Build a report with the built-in sector registry.
    ///
    /// # Errors
    ///
    /// See [`ValuationReport::build_with_registry`].
    pub fn build(case: &ValuationCase, settings: &ValuationSettings) -> Result<Self, ValuationError> {
        Self::build_with_registry(case, settings, &SectorRegistry::with_defaults())
    }

    /// Build a report, resolving sector KPIs through `registry`.
    ///
    /// # Errors
    ///
    /// - malformed schedule or peer multiples
    /// - any DCF domain error at the base-case rates
    pub fn build_with_registry(
        case: &ValuationCase,
        settings: &ValuationSettings,
        registry: &SectorRegistry,
    ) -> Result<Self, ValuationError> {
        let schedule = case.schedule(settings.projection_years)?;
        let comparables = ComparablesValuator::new(&case.peers);
        comparables.validate()?;

        let dcf = DcfValuator::new(settings.wacc, settings.terminal_growth).breakdown(&schedule)?;
        let f = &case.financials;

        let dcf_methodology = dcf_methodology(dcf.enterprise_value, f);
        let comparables_methodology = ComparablesMethodology {
            ev_to_ebitda_value: comparables.value(f, MultipleKind::EvToEbitda),
            ev_to_ebit_value: comparables.value(f, MultipleKind::EvToEbit),
            pe_value: comparables.value(f, MultipleKind::PeRatio),
        };

        let comparables_value = comparables.value(f, settings.multiple);
        let sensitivity_matrix = SensitivityAnalyzer::new(settings.sensitivity.clone()).analyze(
            &schedule,
            &settings.grid.wacc,
            &settings.grid.growth,
        );

        let result = ValuationResult {
            dcf_value: dcf.enterprise_value,
            comparables_value,
            average_value: (dcf.enterprise_value + comparables_value) / 2.0,
            sensitivity_matrix,
            methodologies: Methodologies {
                dcf: dcf_methodology,
                comparables: comparables_methodology,
            },
        };

        let history = case.history_points();
        let trends = match TrendAnalyzer::default().analyze(&history) {
            Ok(report) => Some(report),
            Err(err) => {
                if !history.is_empty() {
                    warn!(error = %err, "trend analysis skipped");
                }
                None
            }
        };

        let sector_metrics = match &case.sector_data {
            Some(data) => registry.compute(&case.sector, data),
            None => SectorMetrics::Empty,
        };

        let ratios = case.ratios();
        let validator = ValidationEngine::new(settings.rules.clone());
        let findings = validator.validate_company(&case.sector, f, &ratios, &sector_metrics);
        let (industry_findings, benchmark_positions) = match &case.industry {
            Some(industry) => (
                validator.validate_industry(industry),
                benchmark_positions(industry, f, &ratios),
            ),
            None => (Vec::new(), BTreeMap::new()),
        };

        info!(
            company = %case.company,
            dcf_value = result.dcf_value,
            comparables_value = result.comparables_value,
            findings = findings.len() + industry_findings.len(),
            "valuation report built"
        );

        Ok(Self {
            company: case.company.clone(),
            sector: case.sector.clone(),
            result,
            dcf,
            peers: comparables.summaries(),
            ratios,
            trends,
            sector_metrics,
            findings,
            industry_findings,
            benchmark_positions,
        })
    }

    /// Whether no error-kind finding was raised.
    pub fn is_valid(&self) -> bool {
        use crate::validation::RuleKind;
        self.findings
            .iter()
            .chain(self.industry_findings.iter())
            .all(|f| f.kind != RuleKind::Error)
    }
}

/// Equity bridge and implied multiples of a DCF enterprise value.
pub fn dcf_methodology(enterprise_value: f64, financials: &FinancialData) -> DcfMethodology {
    let equity_value = enterprise_value - financials.net_debt();
    DcfMethodology {
        enterprise_value,
        equity_value,
        implied_multiples: ImpliedMultiples {
            ev_to_ebitda: safe_div(enterprise_value, financials.ebitda),
            ev_to_ebit: safe_div(enterprise_value, financials.ebit),
            pe_ratio: safe_div(equity_value, financials.net_income),
        },
    }
}

fn benchmark_positions(
    industry: &IndustryMetrics,
    financials: &FinancialData,
    ratios: &FinancialRatios,
) -> BTreeMap<String, QuartilePosition> {
    let company = CompositeSource::new().with(financials).with(ratios);
    industry
        .benchmarks
        .quartiles
        .median
        .0
        .keys()
        .filter_map(|path| {
            industry
                .quartile_position(&company, path)
                .map(|position| (path.clone(), position))
        })
        .collect()
}
