//! Field-path access to numeric records.
//!
//! Validation rules address metrics by dotted path (`revenue`,
//! `profitability.ebitda_margin`, `technology.churn_rate`). Every record the
//! engine validates implements [`MetricSource`] so rules can be evaluated
//! without knowing the concrete record type.

use std::collections::BTreeMap;

/// A record whose numeric fields can be looked up by dotted path.
///
/// Returning `None` means the path is unknown to this record or the field is
/// absent; callers resolve absent values to zero.
///
/// # Examples
/// ```
/// use valuation_core::traits::MetricSource;
/// use valuation_core::types::FinancialData;
///
/// let data = FinancialData { revenue: 120.0, ..Default::default() };
/// assert_eq!(data.metric("revenue"), Some(120.0));
/// assert_eq!(data.metric("no_such_field"), None);
/// assert_eq!(data.metric_or_zero("no_such_field"), 0.0);
/// ```
pub trait MetricSource {
    /// Look up a metric by dotted path.
    fn metric(&self, path: &str) -> Option<f64>;

    /// Look up a metric, resolving absent values to zero.
    fn metric_or_zero(&self, path: &str) -> f64 {
        self.metric(path).unwrap_or(0.0)
    }
}

impl<S: MetricSource + ?Sized> MetricSource for &S {
    fn metric(&self, path: &str) -> Option<f64> {
        (**self).metric(path)
    }
}

/// Free-form metrics keyed by path.
impl MetricSource for BTreeMap<String, f64> {
    fn metric(&self, path: &str) -> Option<f64> {
        self.get(path).copied()
    }
}

/// Several sources consulted in order; the first one that knows the path wins.
///
/// Used to validate a company snapshot (financials, ratios and sector KPIs)
/// against one rule set.
///
/// # Examples
/// ```
/// use std::collections::BTreeMap;
/// use valuation_core::traits::{CompositeSource, MetricSource};
/// use valuation_core::types::FinancialData;
///
/// let data = FinancialData { revenue: 10.0, ..Default::default() };
/// let mut extra = BTreeMap::new();
/// extra.insert("custom.kpi".to_string(), 3.0);
///
/// let source = CompositeSource::new().with(&data).with(&extra);
/// assert_eq!(source.metric("revenue"), Some(10.0));
/// assert_eq!(source.metric("custom.kpi"), Some(3.0));
/// ```
#[derive(Default)]
pub struct CompositeSource<'a> {
    sources: Vec<&'a dyn MetricSource>,
}

impl<'a> CompositeSource<'a> {
    /// Create an empty composite.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a source; earlier sources take precedence.
    pub fn with(mut self, source: &'a dyn MetricSource) -> Self {
        self.sources.push(source);
        self
    }

    /// Number of underlying sources.
    pub fn len(&self) -> usize {
        self.sources.len()
    }

    /// Whether no source has been added.
    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }
}

impl MetricSource for CompositeSource<'_> {
    fn metric(&self, path: &str) -> Option<f64> {
        self.sources.iter().find_map(|s| s.metric(path))
    }
}
