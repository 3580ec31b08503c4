//! Comparable-company valuation.
//!
//! The implied value is the peer set's median multiple times the company's
//! matching base metric. The median is the element at index `floor(n / 2)`
//! of the ascending sort, i.e. the upper of the two central values for an
//! even peer count.

use tracing::warn;
use valuation_core::math::stats::{mean, upper_median};
use valuation_core::types::{ComparableCompany, FinancialData, MultipleKind, ValuationError};

/// Implied value from the peer median of `multiple`.
///
/// Returns exactly `0.0` when no peer reports the multiple (including an
/// empty peer set).
///
/// # Examples
/// ```
/// use valuation_core::types::{ComparableCompany, FinancialData, MultipleKind};
/// use valuation_engine::comparables::valuate_comparable;
///
/// let company = FinancialData { ebitda: 100.0, ..Default::default() };
/// let peers = vec![
///     ComparableCompany::new("A", 6.0, 12.0, 1.5),
///     ComparableCompany::new("B", 10.0, 18.0, 2.5),
///     ComparableCompany::new("C", 8.0, 15.0, 2.0),
/// ];
/// assert_eq!(valuate_comparable(&company, &peers, MultipleKind::EvToEbitda), 800.0);
/// assert_eq!(valuate_comparable(&company, &[], MultipleKind::EvToEbitda), 0.0);
/// ```
pub fn valuate_comparable(
    financials: &FinancialData,
    peers: &[ComparableCompany],
    multiple: MultipleKind,
) -> f64 {
    ComparablesValuator::new(peers).value(financials, multiple)
}

/// Statistics of one multiple across the peer set.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PeerSummary {
    /// The multiple summarised
    pub multiple: MultipleKind,
    /// Peers reporting it
    pub count: usize,
    /// Arithmetic mean, zero without peers
    pub mean: f64,
    /// Upper median, `None` without peers
    pub median: Option<f64>,
}

/// Valuator over a borrowed peer set.
#[derive(Debug, Clone, Copy)]
pub struct ComparablesValuator<'a> {
    peers: &'a [ComparableCompany],
}

impl<'a> ComparablesValuator<'a> {
    /// Wrap a peer set.
    pub fn new(peers: &'a [ComparableCompany]) -> Self {
        Self { peers }
    }

    /// Check every peer's multiples are positive and finite.
    ///
    /// # Errors
    ///
    /// The first [`ValuationError::InvalidMultiple`] encountered.
    pub fn validate(&self) -> Result<(), ValuationError> {
        self.peers.iter().try_for_each(ComparableCompany::validate)
    }

    /// Values of `multiple` across the peers that report it.
    pub fn multiples(&self, multiple: MultipleKind) -> Vec<f64> {
        let values: Vec<f64> = self
            .peers
            .iter()
            .filter_map(|p| p.multiple(multiple))
            .collect();
        let missing = self.peers.len() - values.len();
        if missing > 0 {
            warn!(%multiple, missing, "peers without the selected multiple are excluded");
        }
        values
    }

    /// Summary of one multiple.
    pub fn summary(&self, multiple: MultipleKind) -> PeerSummary {
        let values = self.multiples(multiple);
        PeerSummary {
            multiple,
            count: values.len(),
            mean: mean(&values),
            median: upper_median(&values),
        }
    }

    /// Summaries of every multiple that at least one peer reports.
    pub fn summaries(&self) -> Vec<PeerSummary> {
        MultipleKind::ALL
            .iter()
            .map(|&kind| self.summary(kind))
            .filter(|s| s.count > 0)
            .collect()
    }

    /// Implied value: peer median of `multiple` x the company's base metric.
    pub fn value(&self, financials: &FinancialData, multiple: MultipleKind) -> f64 {
        match upper_median(&self.multiples(multiple)) {
            Some(median) => median * multiple.base_metric(financials),
            None => 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn company() -> FinancialData {
        FinancialData {
            revenue: 1000.0,
            ebitda: 200.0,
            ebit: 150.0,
            net_income: 100.0,
            total_equity: 500.0,
            ..Default::default()
        }
    }

    fn peers() -> Vec<ComparableCompany> {
        vec![
            ComparableCompany::new("A", 6.0, 12.0, 1.0).with_ev_to_ebit(9.0),
            ComparableCompany::new("B", 9.0, 20.0, 3.0),
            ComparableCompany::new("C", 7.0, 14.0, 2.0).with_ev_to_ebit(11.0),
            ComparableCompany::new("D", 8.0, 16.0, 2.5),
        ]
    }

    #[test]
    fn test_empty_peers_exactly_zero() {
        for kind in MultipleKind::ALL {
            assert_eq!(valuate_comparable(&company(), &[], kind), 0.0);
        }
    }

    #[test]
    fn test_even_count_uses_upper_median() {
        // sorted EV/EBITDA: 6, 7, 8, 9 -> index 2 -> 8
        let value = valuate_comparable(&company(), &peers(), MultipleKind::EvToEbitda);
        assert_relative_eq!(value, 8.0 * 200.0, epsilon = 1e-10);
    }

    #[test]
    fn test_base_metrics() {
        let peers = peers();
        let v = ComparablesValuator::new(&peers);
        assert_relative_eq!(v.value(&company(), MultipleKind::PeRatio), 16.0 * 100.0);
        assert_relative_eq!(v.value(&company(), MultipleKind::EvToRevenue), 2.5 * 1000.0);
    }

    #[test]
    fn test_optional_multiple_excludes_missing_peers() {
        // only A and C report EV/EBIT: sorted 9, 11 -> index 1 -> 11
        let value = valuate_comparable(&company(), &peers(), MultipleKind::EvToEbit);
        assert_relative_eq!(value, 11.0 * 150.0, epsilon = 1e-10);
        assert_eq!(
            valuate_comparable(&company(), &peers(), MultipleKind::PriceToBook),
            0.0
        );
    }

    #[test]
    fn test_summary() {
        let peers = peers();
        let s = ComparablesValuator::new(&peers).summary(MultipleKind::EvToEbitda);
        assert_eq!(s.count, 4);
        assert_relative_eq!(s.mean, 7.5);
        assert_eq!(s.median, Some(8.0));
    }

    #[test]
    fn test_summaries_skip_unreported() {
        let peers = peers();
        let kinds: Vec<MultipleKind> = ComparablesValuator::new(&peers)
            .summaries()
            .iter()
            .map(|s| s.multiple)
            .collect();
        assert_eq!(
            kinds,
            vec![
                MultipleKind::EvToEbitda,
                MultipleKind::PeRatio,
                MultipleKind::EvToRevenue,
                MultipleKind::EvToEbit
            ]
        );
    }

    #[test]
    fn test_validate_rejects_non_positive() {
        let mut peers = peers();
        peers.push(ComparableCompany::new("Bad", -1.0, 10.0, 1.0));
        assert!(matches!(
            ComparablesValuator::new(&peers).validate(),
            Err(ValuationError::InvalidMultiple { .. })
        ));
    }
}
