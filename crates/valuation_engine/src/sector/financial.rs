//! Bank and lender KPIs.

use valuation_core::math::stats::safe_div;
use valuation_core::traits::SectorFormulaSet;
use valuation_core::types::{FinancialSectorData, FinancialSectorMetrics, SectorData, SectorMetrics};

/// Banking formula set, registered as `"financial"`.
#[derive(Debug, Clone, Copy, Default)]
pub struct FinancialFormulas;

impl SectorFormulaSet for FinancialFormulas {
    fn sector(&self) -> &str {
        "financial"
    }

    fn compute_metrics(&self, data: &SectorData) -> SectorMetrics {
        match data {
            SectorData::Financial(d) => SectorMetrics::Financial(financial_metrics(d)),
            _ => SectorMetrics::Empty,
        }
    }
}

/// Margin, asset quality, capital and funding KPIs.
pub fn financial_metrics(d: &FinancialSectorData) -> FinancialSectorMetrics {
    FinancialSectorMetrics {
        net_interest_margin: safe_div(d.interest_income - d.interest_expense, d.earning_assets),
        cost_of_funds: safe_div(d.interest_expense, d.interest_bearing_liabilities),
        non_performing_loans: safe_div(d.non_performing_loans, d.total_loans),
        capital_adequacy: safe_div(d.regulatory_capital, d.risk_weighted_assets),
        loan_to_deposit: safe_div(d.total_loans, d.total_deposits),
        fees_to_income: safe_div(d.fee_income, d.total_operating_income),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_financial_metrics() {
        let m = financial_metrics(&FinancialSectorData {
            interest_income: 500.0,
            interest_expense: 200.0,
            earning_assets: 10_000.0,
            interest_bearing_liabilities: 8_000.0,
            non_performing_loans: 150.0,
            total_loans: 7_500.0,
            regulatory_capital: 1_200.0,
            risk_weighted_assets: 9_600.0,
            total_deposits: 9_000.0,
            fee_income: 100.0,
            total_operating_income: 400.0,
        });
        assert_relative_eq!(m.net_interest_margin, 0.03, epsilon = 1e-12);
        assert_relative_eq!(m.cost_of_funds, 0.025, epsilon = 1e-12);
        assert_relative_eq!(m.non_performing_loans, 0.02, epsilon = 1e-12);
        assert_relative_eq!(m.capital_adequacy, 0.125, epsilon = 1e-12);
        assert_relative_eq!(m.loan_to_deposit, 7_500.0 / 9_000.0, epsilon = 1e-12);
        assert_relative_eq!(m.fees_to_income, 0.25, epsilon = 1e-12);
    }
}
