//! Statement snapshots and the ratio groups derived from them.

use crate::math::safe_div;
use crate::traits::MetricSource;

/// Days used to turn turnover ratios into day counts.
const DAYS_PER_YEAR: f64 = 365.0;

/// A snapshot of a company's core statement figures.
///
/// All fields share one currency unit. Absent fields deserialise to zero.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct FinancialData {
    /// Revenue
    pub revenue: f64,
    /// EBITDA
    pub ebitda: f64,
    /// EBIT
    pub ebit: f64,
    /// Net income
    pub net_income: f64,
    /// Total assets
    pub total_assets: f64,
    /// Total financial debt
    pub total_debt: f64,
    /// Total shareholders' equity
    pub total_equity: f64,
    /// Cash and cash equivalents
    pub cash_and_equivalents: f64,
    /// Working capital
    pub working_capital: f64,
    /// Capital expenditure
    pub capex: f64,
    /// Depreciation and amortisation
    pub depreciation: f64,
    /// Inventory
    pub inventory: f64,
    /// Accounts receivable
    pub accounts_receivable: f64,
    /// Accounts payable
    pub accounts_payable: f64,
    /// Interest expense
    pub interest_expense: f64,
}

impl FinancialData {
    /// Total debt less cash.
    #[inline]
    pub fn net_debt(&self) -> f64 {
        self.total_debt - self.cash_and_equivalents
    }
}

impl MetricSource for FinancialData {
    fn metric(&self, path: &str) -> Option<f64> {
        let value = match path {
            "revenue" => self.revenue,
            "ebitda" => self.ebitda,
            "ebit" => self.ebit,
            "net_income" => self.net_income,
            "total_assets" => self.total_assets,
            "total_debt" => self.total_debt,
            "total_equity" => self.total_equity,
            "cash_and_equivalents" => self.cash_and_equivalents,
            "working_capital" => self.working_capital,
            "capex" => self.capex,
            "depreciation" => self.depreciation,
            "inventory" => self.inventory,
            "accounts_receivable" => self.accounts_receivable,
            "accounts_payable" => self.accounts_payable,
            "interest_expense" => self.interest_expense,
            "net_debt" => self.net_debt(),
            _ => return None,
        };
        Some(value)
    }
}

/// Profitability ratios, as fractions.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ProfitabilityRatios {
    /// Gross margin
    pub gross_margin: f64,
    /// EBITDA / revenue
    pub ebitda_margin: f64,
    /// EBIT / revenue
    pub operating_margin: f64,
    /// Net income / revenue
    pub net_margin: f64,
    /// Net income / total assets
    pub roa: f64,
    /// Net income / total equity
    pub roe: f64,
    /// Return on invested capital
    pub roic: f64,
}

/// Liquidity ratios.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct LiquidityRatios {
    /// Current assets / current liabilities
    pub current_ratio: f64,
    /// Quick assets / current liabilities
    pub quick_ratio: f64,
    /// Cash / current liabilities
    pub cash_ratio: f64,
    /// Working capital / total assets
    pub working_capital_ratio: f64,
}

/// Efficiency ratios.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EfficiencyRatios {
    /// Revenue / total assets
    pub asset_turnover: f64,
    /// Revenue / inventory
    pub inventory_turnover: f64,
    /// Revenue / receivables
    pub receivables_turnover: f64,
    /// Revenue / payables
    pub payables_turnover: f64,
    /// Inventory days + receivable days - payable days
    pub cash_conversion_cycle: f64,
}

/// Leverage ratios.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct LeverageRatios {
    /// Total debt / total equity
    pub debt_to_equity: f64,
    /// Total debt / EBITDA
    pub debt_to_ebitda: f64,
    /// EBIT / interest expense
    pub interest_coverage: f64,
    /// Net debt / EBITDA
    pub net_debt_to_ebitda: f64,
}

/// Period-over-period growth, as fractions.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GrowthRatios {
    /// Revenue growth
    pub revenue_growth: f64,
    /// EBITDA growth
    pub ebitda_growth: f64,
    /// Net income growth
    pub net_income_growth: f64,
}

/// Grouped financial ratios. Percentages are stored as fractions (0.20 for 20%).
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct FinancialRatios {
    /// Profitability group
    pub profitability: ProfitabilityRatios,
    /// Liquidity group
    pub liquidity: LiquidityRatios,
    /// Efficiency group
    pub efficiency: EfficiencyRatios,
    /// Leverage group
    pub leverage: LeverageRatios,
    /// Growth group
    pub growth: GrowthRatios,
}

impl FinancialRatios {
    /// Derive the ratios computable from a statement snapshot.
    ///
    /// Gross margin and the current/quick/cash ratios need figures that
    /// [`FinancialData`] does not carry and are left at zero. ROIC is
    /// pre-tax: EBIT over invested capital (debt + equity - cash). Turnover
    /// ratios use revenue as the activity base. Growth is measured against
    /// `previous` and is zero without one. Every zero denominator yields zero.
    ///
    /// # Examples
    /// ```
    /// use valuation_core::types::{FinancialData, FinancialRatios};
    ///
    /// let data = FinancialData {
    ///     revenue: 1000.0,
    ///     ebitda: 200.0,
    ///     total_debt: 400.0,
    ///     ..Default::default()
    /// };
    /// let ratios = FinancialRatios::derive(&data, None);
    /// assert!((ratios.profitability.ebitda_margin - 0.2).abs() < 1e-12);
    /// assert!((ratios.leverage.debt_to_ebitda - 2.0).abs() < 1e-12);
    /// assert_eq!(ratios.leverage.interest_coverage, 0.0);
    /// ```
    pub fn derive(current: &FinancialData, previous: Option<&FinancialData>) -> Self {
        let d = current;

        let profitability = ProfitabilityRatios {
            gross_margin: 0.0,
            ebitda_margin: safe_div(d.ebitda, d.revenue),
            operating_margin: safe_div(d.ebit, d.revenue),
            net_margin: safe_div(d.net_income, d.revenue),
            roa: safe_div(d.net_income, d.total_assets),
            roe: safe_div(d.net_income, d.total_equity),
            roic: safe_div(d.ebit, d.total_debt + d.total_equity - d.cash_and_equivalents),
        };

        let liquidity = LiquidityRatios {
            working_capital_ratio: safe_div(d.working_capital, d.total_assets),
            ..Default::default()
        };

        let inventory_turnover = safe_div(d.revenue, d.inventory);
        let receivables_turnover = safe_div(d.revenue, d.accounts_receivable);
        let payables_turnover = safe_div(d.revenue, d.accounts_payable);
        let efficiency = EfficiencyRatios {
            asset_turnover: safe_div(d.revenue, d.total_assets),
            inventory_turnover,
            receivables_turnover,
            payables_turnover,
            cash_conversion_cycle: safe_div(DAYS_PER_YEAR, inventory_turnover)
                + safe_div(DAYS_PER_YEAR, receivables_turnover)
                - safe_div(DAYS_PER_YEAR, payables_turnover),
        };

        let leverage = LeverageRatios {
            debt_to_equity: safe_div(d.total_debt, d.total_equity),
            debt_to_ebitda: safe_div(d.total_debt, d.ebitda),
            interest_coverage: safe_div(d.ebit, d.interest_expense),
            net_debt_to_ebitda: safe_div(d.net_debt(), d.ebitda),
        };

        let growth = previous
            .map(|p| GrowthRatios {
                revenue_growth: period_growth(d.revenue, p.revenue),
                ebitda_growth: period_growth(d.ebitda, p.ebitda),
                net_income_growth: period_growth(d.net_income, p.net_income),
            })
            .unwrap_or_default();

        Self {
            profitability,
            liquidity,
            efficiency,
            leverage,
            growth,
        }
    }
}

/// Growth relative to the magnitude of the previous value, so a loss that
/// narrows reads as positive growth.
fn period_growth(current: f64, previous: f64) -> f64 {
    safe_div(current - previous, previous.abs())
}

impl MetricSource for FinancialRatios {
    fn metric(&self, path: &str) -> Option<f64> {
        let (group, field) = path.split_once('.')?;
        let value = match (group, field) {
            ("profitability", "gross_margin") => self.profitability.gross_margin,
            ("profitability", "ebitda_margin") => self.profitability.ebitda_margin,
            ("profitability", "operating_margin") => self.profitability.operating_margin,
            ("profitability", "net_margin") => self.profitability.net_margin,
            ("profitability", "roa") => self.profitability.roa,
            ("profitability", "roe") => self.profitability.roe,
            ("profitability", "roic") => self.profitability.roic,
            ("liquidity", "current_ratio") => self.liquidity.current_ratio,
            ("liquidity", "quick_ratio") => self.liquidity.quick_ratio,
            ("liquidity", "cash_ratio") => self.liquidity.cash_ratio,
            ("liquidity", "working_capital_ratio") => self.liquidity.working_capital_ratio,
            ("efficiency", "asset_turnover") => self.efficiency.asset_turnover,
            ("efficiency", "inventory_turnover") => self.efficiency.inventory_turnover,
            ("efficiency", "receivables_turnover") => self.efficiency.receivables_turnover,
            ("efficiency", "payables_turnover") => self.efficiency.payables_turnover,
            ("efficiency", "cash_conversion_cycle") => self.efficiency.cash_conversion_cycle,
            ("leverage", "debt_to_equity") => self.leverage.debt_to_equity,
            ("leverage", "debt_to_ebitda") => self.leverage.debt_to_ebitda,
            ("leverage", "interest_coverage") => self.leverage.interest_coverage,
            ("leverage", "net_debt_to_ebitda") => self.leverage.net_debt_to_ebitda,
            ("growth", "revenue_growth") => self.growth.revenue_growth,
            ("growth", "ebitda_growth") => self.growth.ebitda_growth,
            ("growth", "net_income_growth") => self.growth.net_income_growth,
            _ => return None,
        };
        Some(value)
    }
}
