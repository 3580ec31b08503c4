//! Error types for structured error handling.
//!
//! This module provides:
//! - `ValuationError`: domain errors raised by a single valuation calculation
//!
//! Domain errors are fatal to the calculation that raised them and nothing
//! else. Missing inputs and zero denominators are not errors (they resolve to
//! zero), and validation findings are returned as data.

use thiserror::Error;

/// Categorised valuation errors.
///
/// # Variants
/// - `EmptyProjection`: DCF called without any projection year
/// - `TerminalGrowthEqualsDiscountRate`: terminal value denominator is zero
/// - `NonFiniteResult`: a calculation produced NaN or infinity
/// - `UndefinedGrowthRate`: CAGR has no real-valued solution
/// - `InsufficientHistory`: not enough historical points for trends
/// - `DuplicateYear` / `NonIncreasingYears`: malformed projection schedule
/// - `InvalidMultiple`: non-positive peer multiple
/// - `InvalidRule`: malformed validation rule
///
/// # Examples
/// ```
/// use valuation_core::types::ValuationError;
///
/// let err = ValuationError::TerminalGrowthEqualsDiscountRate { rate: 0.05 };
/// assert_eq!(
///     format!("{}", err),
///     "Discount rate equals terminal growth rate (0.05): terminal value is undefined"
/// );
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "snake_case"))]
pub enum ValuationError {
    /// A DCF needs at least one projected year.
    #[error("Projection schedule is empty: at least one year is required")]
    EmptyProjection,

    /// `wacc == g` makes the Gordon-growth denominator zero.
    #[error("Discount rate equals terminal growth rate ({rate}): terminal value is undefined")]
    TerminalGrowthEqualsDiscountRate {
        /// The shared rate
        rate: f64,
    },

    /// The computation overflowed or produced NaN.
    #[error("Non-finite result in {context}")]
    NonFiniteResult {
        /// Calculation that produced the value
        context: String,
    },

    /// CAGR base is zero, or the growth ratio is negative under a fractional exponent.
    #[error("Growth rate undefined for first value {first} and last value {last} over {periods} periods")]
    UndefinedGrowthRate {
        /// First observation
        first: f64,
        /// Last observation
        last: f64,
        /// Number of compounding periods (n - 1)
        periods: usize,
    },

    /// Trend statistics need at least two observations.
    #[error("Insufficient history: got {got} points, need at least {need}")]
    InsufficientHistory {
        /// Number of points provided
        got: usize,
        /// Minimum number of points required
        need: usize,
    },

    /// Two projection rows share a year.
    #[error("Duplicate projection year: {year}")]
    DuplicateYear {
        /// The repeated year
        year: u32,
    },

    /// Projection rows are not in ascending year order.
    #[error("Projection years must be strictly increasing: {previous} followed by {next}")]
    NonIncreasingYears {
        /// Year of the earlier row
        previous: u32,
        /// Year of the offending row
        next: u32,
    },

    /// A peer multiple is zero or negative.
    #[error("Invalid {multiple} multiple for peer '{peer}': {value} (must be positive)")]
    InvalidMultiple {
        /// Peer company name
        peer: String,
        /// Multiple label, e.g. "EV/EBITDA"
        multiple: String,
        /// The rejected value
        value: f64,
    },

    /// A validation rule cannot be evaluated as written.
    #[error("Invalid validation rule for '{field}': {reason}")]
    InvalidRule {
        /// Target field path of the rule
        field: String,
        /// What is wrong with it
        reason: String,
    },
}

impl ValuationError {
    /// Build a `NonFiniteResult` error.
    pub fn non_finite(context: impl Into<String>) -> Self {
        ValuationError::NonFiniteResult {
            context: context.into(),
        }
    }

    /// Build an `InvalidRule` error.
    pub fn invalid_rule(field: impl Into<String>, reason: impl Into<String>) -> Self {
        ValuationError::InvalidRule {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Whether this error comes from a degenerate rate/growth configuration
    /// that a caller could fix by adjusting the inputs and retrying.
    pub fn is_rate_error(&self) -> bool {
        matches!(
            self,
            ValuationError::TerminalGrowthEqualsDiscountRate { .. }
                | ValuationError::UndefinedGrowthRate { .. }
        )
    }
}
