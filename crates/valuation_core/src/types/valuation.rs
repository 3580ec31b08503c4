//! Valuation outputs: the sensitivity matrix and the assembled result.

/// Valuations over a WACC x terminal-growth grid.
///
/// `results[i][j]` is the valuation at `wacc[i]` and `growth[j]`. A `None`
/// cell marks a pair with no meaningful terminal value (`wacc <= g`, or a
/// DCF domain error); it serialises as `null`.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SensitivityMatrix {
    /// Discount rates, one per row
    pub wacc: Vec<f64>,
    /// Terminal growth rates, one per column
    pub growth: Vec<f64>,
    /// Grid indexed `[wacc_index][growth_index]`
    pub results: Vec<Vec<Option<f64>>>,
}

impl SensitivityMatrix {
    /// Number of rows (WACC values).
    pub fn rows(&self) -> usize {
        self.results.len()
    }

    /// Number of columns (growth values).
    pub fn cols(&self) -> usize {
        self.growth.len()
    }

    /// The cell at `[wacc_index][growth_index]`, `None` if out of range or invalid.
    pub fn get(&self, wacc_index: usize, growth_index: usize) -> Option<f64> {
        self.results.get(wacc_index)?.get(growth_index).copied().flatten()
    }

    /// Number of cells holding a value.
    pub fn valid_cells(&self) -> usize {
        self.results.iter().flatten().filter(|c| c.is_some()).count()
    }
}

/// Multiples implied by the DCF value.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ImpliedMultiples {
    /// Enterprise value / EBITDA
    pub ev_to_ebitda: f64,
    /// Enterprise value / EBIT
    pub ev_to_ebit: f64,
    /// Equity value / net income
    pub pe_ratio: f64,
}

/// DCF details.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DcfMethodology {
    /// Enterprise value from the DCF
    pub enterprise_value: f64,
    /// Enterprise value less net debt
    pub equity_value: f64,
    /// Multiples implied by those values
    pub implied_multiples: ImpliedMultiples,
}

/// Comparables details: implied value per multiple.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ComparablesMethodology {
    /// Value from the peer EV/EBITDA median
    pub ev_to_ebitda_value: f64,
    /// Value from the peer EV/EBIT median
    pub ev_to_ebit_value: f64,
    /// Value from the peer P/E median
    pub pe_value: f64,
}

/// Per-method breakdown.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Methodologies {
    /// DCF details
    pub dcf: DcfMethodology,
    /// Comparables details
    pub comparables: ComparablesMethodology,
}

/// A complete valuation of one company.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ValuationResult {
    /// DCF enterprise value
    pub dcf_value: f64,
    /// Comparables value for the selected multiple
    pub comparables_value: f64,
    /// Mean of the two
    pub average_value: f64,
    /// WACC x growth sensitivity
    pub sensitivity_matrix: SensitivityMatrix,
    /// Per-method breakdown
    pub methodologies: Methodologies,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matrix() -> SensitivityMatrix {
        SensitivityMatrix {
            wacc: vec![0.08, 0.10],
            growth: vec![0.01, 0.02, 0.08],
            results: vec![
                vec![Some(10.0), Some(11.0), None],
                vec![Some(8.0), Some(9.0), Some(40.0)],
            ],
        }
    }

    #[test]
    fn test_shape() {
        let m = matrix();
        assert_eq!(m.rows(), 2);
        assert_eq!(m.cols(), 3);
    }

    #[test]
    fn test_get() {
        let m = matrix();
        assert_eq!(m.get(1, 1), Some(9.0));
        assert_eq!(m.get(0, 2), None);
        assert_eq!(m.get(5, 0), None);
    }

    #[test]
    fn test_valid_cells() {
        assert_eq!(matrix().valid_cells(), 5);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_invalid_cell_serialises_as_null() {
        let json = serde_json::to_value(matrix()).unwrap();
        assert!(json["results"][0][2].is_null());
        assert_eq!(json["results"][1][0], 8.0);
    }
}
