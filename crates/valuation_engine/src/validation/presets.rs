//! Built-in rule tables.
//!
//! Rule tables are configuration: a [`RuleSet`] can be replaced wholesale or
//! loaded from TOML, and [`RuleSet::default`] is only the preset. When
//! deserialising, each table present replaces the preset table; absent
//! tables keep the preset.
//!
//! Default tables:
//! - generic: revenue must be positive; EBITDA margin within 0..50%
//! - technology: churn below 15%; ARPU positive
//! - manufacturing: capacity utilisation within 70..100%
//! - industry: market share and digital revenue share within 0..100;
//!   carbon emissions non-negative

use super::rules::{Comparator, Threshold, ValidationRule};
use std::collections::BTreeMap;
use valuation_core::types::ValuationError;

/// Generic, industry and per-sector rule tables.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RuleSet {
    /// Rules applied to every company
    pub generic: Vec<ValidationRule>,
    /// Rules applied to industry KPIs
    pub industry: Vec<ValidationRule>,
    /// Extra rules keyed by sector tag
    pub sectors: BTreeMap<String, Vec<ValidationRule>>,
}

impl Default for RuleSet {
    fn default() -> Self {
        let mut sectors = BTreeMap::new();
        sectors.insert(
            "technology".to_string(),
            vec![
                ValidationRule::warning(
                    "technology.churn_rate",
                    Comparator::Lt,
                    Threshold::Value(0.15),
                    "Churn rate should be below industry average",
                ),
                ValidationRule::error(
                    "technology.arpu",
                    Comparator::Gt,
                    Threshold::Value(0.0),
                    "ARPU must be positive",
                ),
            ],
        );
        sectors.insert(
            "manufacturing".to_string(),
            vec![ValidationRule::warning(
                "manufacturing.capacity_utilization",
                Comparator::Between,
                Threshold::Range { min: 0.7, max: 1.0 },
                "Capacity utilization should be optimal",
            )],
        );

        Self {
            generic: vec![
                ValidationRule::error(
                    "revenue",
                    Comparator::Gt,
                    Threshold::Value(0.0),
                    "Revenue must be positive",
                ),
                ValidationRule::warning(
                    "profitability.ebitda_margin",
                    Comparator::Between,
                    Threshold::Range { min: 0.0, max: 0.5 },
                    "EBITDA margin should be reasonable",
                ),
            ],
            industry: vec![
                ValidationRule::error(
                    "market_share",
                    Comparator::Between,
                    Threshold::Range { min: 0.0, max: 100.0 },
                    "Market share must be between 0 and 100",
                ),
                ValidationRule::error(
                    "carbon_emissions",
                    Comparator::Gte,
                    Threshold::Value(0.0),
                    "Carbon emissions cannot be negative",
                ),
                ValidationRule::error(
                    "digital_revenue",
                    Comparator::Between,
                    Threshold::Range { min: 0.0, max: 100.0 },
                    "Digital revenue percentage must be between 0 and 100",
                ),
            ],
            sectors,
        }
    }
}

impl RuleSet {
    /// A rule set with no rules.
    pub fn empty() -> Self {
        Self {
            generic: Vec::new(),
            industry: Vec::new(),
            sectors: BTreeMap::new(),
        }
    }

    /// Generic rules followed by the rules of `sector` (case-insensitive).
    pub fn rules_for_sector(&self, sector: &str) -> Vec<ValidationRule> {
        let mut rules = self.generic.clone();
        if let Some(extra) = self.sectors.get(&sector.trim().to_lowercase()) {
            rules.extend(extra.iter().cloned());
        }
        rules
    }

    /// Every rule in every table.
    pub fn iter(&self) -> impl Iterator<Item = &ValidationRule> {
        self.generic
            .iter()
            .chain(self.industry.iter())
            .chain(self.sectors.values().flatten())
    }

    /// Check every rule is well-formed.
    ///
    /// # Errors
    ///
    /// The first [`ValuationError::InvalidRule`] found.
    pub fn validate(&self) -> Result<(), ValuationError> {
        self.iter().try_for_each(ValidationRule::validate)
    }
}
