//! Rule-based validation of company metrics.
//!
//! Every rule is evaluated; failures become [`ValidationFinding`]s in rule
//! order. An empty finding list means the data is valid. Metrics absent
//! from the source are evaluated as zero.

pub mod presets;
pub mod rules;

pub use presets::RuleSet;
pub use rules::{Comparator, RuleKind, Severity, Threshold, ValidationFinding, ValidationRule};

use tracing::{debug, warn};
use valuation_core::traits::{CompositeSource, MetricSource};
use valuation_core::types::{FinancialData, FinancialRatios, IndustryMetrics, SectorMetrics};

/// Evaluate `rules` against `metrics`.
///
/// A malformed rule is reported as a high-severity error finding carrying
/// the reason, so it cannot pass silently.
///
/// # Examples
/// ```
/// use valuation_core::types::FinancialData;
/// use valuation_engine::validation::{validate, Comparator, RuleKind, Threshold, ValidationRule};
///
/// let rules = vec![ValidationRule::error(
///     "revenue",
///     Comparator::Gt,
///     Threshold::Value(0.0),
///     "Revenue must be positive",
/// )];
/// let data = FinancialData { revenue: -5.0, ..Default::default() };
/// let findings = validate(&data, &rules);
/// assert_eq!(findings.len(), 1);
/// assert_eq!(findings[0].kind, RuleKind::Error);
/// assert_eq!(findings[0].value, -5.0);
/// ```
pub fn validate(metrics: &dyn MetricSource, rules: &[ValidationRule]) -> Vec<ValidationFinding> {
    let findings: Vec<ValidationFinding> = rules
        .iter()
        .filter_map(|rule| evaluate(metrics, rule))
        .collect();
    debug!(rules = rules.len(), findings = findings.len(), "validation complete");
    findings
}

fn evaluate(metrics: &dyn MetricSource, rule: &ValidationRule) -> Option<ValidationFinding> {
    let value = metrics.metric_or_zero(&rule.field);
    match rule.passes(value) {
        Ok(true) => None,
        Ok(false) => Some(ValidationFinding {
            kind: rule.kind,
            field: rule.field.clone(),
            message: rule.message.clone(),
            severity: rule.severity,
            value,
        }),
        Err(err) => {
            warn!(field = %rule.field, error = %err, "malformed validation rule");
            Some(ValidationFinding {
                kind: RuleKind::Error,
                field: rule.field.clone(),
                message: err.to_string(),
                severity: Severity::HIGH,
                value,
            })
        }
    }
}

/// Applies a [`RuleSet`] to company snapshots and industry KPIs.
#[derive(Debug, Clone, Default)]
pub struct ValidationEngine {
    rules: RuleSet,
}

impl ValidationEngine {
    /// Engine over an explicit rule set.
    pub fn new(rules: RuleSet) -> Self {
        Self { rules }
    }

    /// Active rule set.
    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    /// Generic rules followed by the rules of `sector`, evaluated against
    /// statement figures, ratios and sector KPIs together.
    pub fn validate_company(
        &self,
        sector: &str,
        financials: &FinancialData,
        ratios: &FinancialRatios,
        sector_metrics: &SectorMetrics,
    ) -> Vec<ValidationFinding> {
        let snapshot = CompositeSource::new()
            .with(financials)
            .with(ratios)
            .with(sector_metrics);
        validate(&snapshot, &self.rules.rules_for_sector(sector))
    }

    /// Industry rules evaluated against industry KPIs.
    pub fn validate_industry(&self, industry: &IndustryMetrics) -> Vec<ValidationFinding> {
        validate(industry, &self.rules.industry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;
    use valuation_core::types::{IndustryKpis, TechnologyMetrics};

    fn company() -> (FinancialData, FinancialRatios) {
        let financials = FinancialData {
            revenue: 1000.0,
            ebitda: 200.0,
            ..Default::default()
        };
        let ratios = FinancialRatios::derive(&financials, None);
        (financials, ratios)
    }

    #[test]
    fn test_negative_revenue_single_finding() {
        let rules = vec![ValidationRule::warning(
            "revenue",
            Comparator::Gt,
            Threshold::Value(0.0),
            "Revenue must be positive",
        )];
        let mut metrics = BTreeMap::new();
        metrics.insert("revenue".to_string(), -5.0);
        let findings = validate(&metrics, &rules);
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].kind, RuleKind::Warning);
        assert_eq!(findings[0].field, "revenue");
    }

    #[test]
    fn test_absent_metric_is_zero() {
        let rules = vec![ValidationRule::error(
            "technology.arpu",
            Comparator::Gt,
            Threshold::Value(0.0),
            "ARPU must be positive",
        )];
        let findings = validate(&BTreeMap::<String, f64>::new(), &rules);
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].value, 0.0);
    }

    #[test]
    fn test_findings_keep_rule_order() {
        let rules = vec![
            ValidationRule::error("a", Comparator::Gt, Threshold::Value(1.0), "a"),
            ValidationRule::error("b", Comparator::Gt, Threshold::Value(1.0), "b"),
            ValidationRule::error("c", Comparator::Gt, Threshold::Value(-1.0), "c"),
            ValidationRule::error("d", Comparator::Gt, Threshold::Value(1.0), "d"),
        ];
        let fields: Vec<String> = validate(&BTreeMap::<String, f64>::new(), &rules)
            .into_iter()
            .map(|f| f.field)
            .collect();
        assert_eq!(fields, vec!["a", "b", "d"]);
    }

    #[test]
    fn test_malformed_rule_is_reported() {
        let rules = vec![ValidationRule::warning(
            "x",
            Comparator::Between,
            Threshold::Value(0.5),
            "x",
        )];
        let findings = validate(&BTreeMap::<String, f64>::new(), &rules);
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].kind, RuleKind::Error);
        assert_eq!(findings[0].severity, Severity::HIGH);
    }

    #[test]
    fn test_valid_technology_company() {
        let (financials, ratios) = company();
        let tech = SectorMetrics::Technology(TechnologyMetrics {
            arpu: 120.0,
            churn_rate: 0.05,
            ..Default::default()
        });
        let findings =
            ValidationEngine::default().validate_company("technology", &financials, &ratios, &tech);
        assert!(findings.is_empty(), "{:?}", findings);
    }

    #[test]
    fn test_high_churn_warns() {
        let (financials, ratios) = company();
        let tech = SectorMetrics::Technology(TechnologyMetrics {
            arpu: 120.0,
            churn_rate: 0.25,
            ..Default::default()
        });
        let findings =
            ValidationEngine::default().validate_company("technology", &financials, &ratios, &tech);
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].field, "technology.churn_rate");
        assert_eq!(findings[0].kind, RuleKind::Warning);
    }

    #[test]
    fn test_industry_rules() {
        let engine = ValidationEngine::default();
        let mut industry = IndustryMetrics::default();
        assert!(engine.validate_industry(&industry).is_empty());

        industry.metrics = IndustryKpis {
            market_share: Some(120.0),
            carbon_emissions: Some(-1.0),
            digital_revenue: Some(40.0),
            ..Default::default()
        };
        let fields: Vec<String> = engine
            .validate_industry(&industry)
            .into_iter()
            .map(|f| f.field)
            .collect();
        assert_eq!(fields, vec!["market_share", "carbon_emissions"]);
    }
}
