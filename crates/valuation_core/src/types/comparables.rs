//! Peer companies and the multiples used to value against them.

use crate::types::{FinancialData, ValuationError};
use std::fmt;

/// A peer company's trading multiples.
///
/// The three core multiples are required; the others are optional and peers
/// without them are left out of that multiple's median.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ComparableCompany {
    /// Peer name
    pub name: String,
    /// Enterprise value / EBITDA
    pub ev_to_ebitda: f64,
    /// Price / earnings
    pub pe_ratio: f64,
    /// Enterprise value / revenue
    pub ev_to_revenue: f64,
    /// Enterprise value / EBIT
    #[cfg_attr(feature = "serde", serde(default))]
    pub ev_to_ebit: Option<f64>,
    /// Price / book value
    #[cfg_attr(feature = "serde", serde(default))]
    pub price_to_book: Option<f64>,
    /// Price / sales
    #[cfg_attr(feature = "serde", serde(default))]
    pub price_to_sales: Option<f64>,
    /// Dividend yield, as a fraction
    #[cfg_attr(feature = "serde", serde(default))]
    pub dividend_yield: Option<f64>,
}

impl ComparableCompany {
    /// A peer with the three core multiples.
    pub fn new(name: impl Into<String>, ev_to_ebitda: f64, pe_ratio: f64, ev_to_revenue: f64) -> Self {
        Self {
            name: name.into(),
            ev_to_ebitda,
            pe_ratio,
            ev_to_revenue,
            ..Default::default()
        }
    }

    /// Set the EV/EBIT multiple.
    pub fn with_ev_to_ebit(mut self, value: f64) -> Self {
        self.ev_to_ebit = Some(value);
        self
    }

    /// Set the price/book multiple.
    pub fn with_price_to_book(mut self, value: f64) -> Self {
        self.price_to_book = Some(value);
        self
    }

    /// Set the price/sales multiple.
    pub fn with_price_to_sales(mut self, value: f64) -> Self {
        self.price_to_sales = Some(value);
        self
    }

    /// The peer's value for `kind`, if it has one.
    pub fn multiple(&self, kind: MultipleKind) -> Option<f64> {
        match kind {
            MultipleKind::EvToEbitda => Some(self.ev_to_ebitda),
            MultipleKind::PeRatio => Some(self.pe_ratio),
            MultipleKind::EvToRevenue => Some(self.ev_to_revenue),
            MultipleKind::EvToEbit => self.ev_to_ebit,
            MultipleKind::PriceToBook => self.price_to_book,
            MultipleKind::PriceToSales => self.price_to_sales,
        }
    }

    /// Check that every present multiple is positive (dividend yield may be zero).
    ///
    /// # Errors
    ///
    /// [`ValuationError::InvalidMultiple`] for the first offending multiple.
    pub fn validate(&self) -> Result<(), ValuationError> {
        for kind in MultipleKind::ALL {
            if let Some(value) = self.multiple(kind) {
                if !(value > 0.0) || !value.is_finite() {
                    return Err(ValuationError::InvalidMultiple {
                        peer: self.name.clone(),
                        multiple: kind.label().to_string(),
                        value,
                    });
                }
            }
        }
        if let Some(dy) = self.dividend_yield {
            if dy < 0.0 || !dy.is_finite() {
                return Err(ValuationError::InvalidMultiple {
                    peer: self.name.clone(),
                    multiple: "dividend yield".to_string(),
                    value: dy,
                });
            }
        }
        Ok(())
    }
}

/// Valuation multiple selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum MultipleKind {
    /// EV / EBITDA, applied to EBITDA
    #[default]
    EvToEbitda,
    /// P / E, applied to net income
    PeRatio,
    /// EV / revenue, applied to revenue
    EvToRevenue,
    /// EV / EBIT, applied to EBIT
    EvToEbit,
    /// P / B, applied to total equity
    PriceToBook,
    /// P / S, applied to revenue
    PriceToSales,
}

impl MultipleKind {
    /// Every selector, core multiples first.
    pub const ALL: [MultipleKind; 6] = [
        MultipleKind::EvToEbitda,
        MultipleKind::PeRatio,
        MultipleKind::EvToRevenue,
        MultipleKind::EvToEbit,
        MultipleKind::PriceToBook,
        MultipleKind::PriceToSales,
    ];

    /// Display label.
    pub fn label(&self) -> &'static str {
        match self {
            MultipleKind::EvToEbitda => "EV/EBITDA",
            MultipleKind::PeRatio => "P/E",
            MultipleKind::EvToRevenue => "EV/Revenue",
            MultipleKind::EvToEbit => "EV/EBIT",
            MultipleKind::PriceToBook => "P/B",
            MultipleKind::PriceToSales => "P/S",
        }
    }

    /// The company figure this multiple is applied to.
    pub fn base_metric(&self, financials: &FinancialData) -> f64 {
        match self {
            MultipleKind::EvToEbitda => financials.ebitda,
            MultipleKind::PeRatio => financials.net_income,
            MultipleKind::EvToRevenue | MultipleKind::PriceToSales => financials.revenue,
            MultipleKind::EvToEbit => financials.ebit,
            MultipleKind::PriceToBook => financials.total_equity,
        }
    }
}

impl fmt::Display for MultipleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl std::str::FromStr for MultipleKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace(['-', '/'], "_").as_str() {
            "ev_to_ebitda" | "ev_ebitda" => Ok(MultipleKind::EvToEbitda),
            "pe_ratio" | "pe" | "p_e" => Ok(MultipleKind::PeRatio),
            "ev_to_revenue" | "ev_revenue" => Ok(MultipleKind::EvToRevenue),
            "ev_to_ebit" | "ev_ebit" => Ok(MultipleKind::EvToEbit),
            "price_to_book" | "pb" | "p_b" => Ok(MultipleKind::PriceToBook),
            "price_to_sales" | "ps" | "p_s" => Ok(MultipleKind::PriceToSales),
            other => Err(format!("Unknown multiple: {}", other)),
        }
    }
}
