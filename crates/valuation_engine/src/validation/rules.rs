//! Validation rule model.

use std::fmt;
use valuation_core::types::ValuationError;

/// Tolerance of the `eq` comparator, relative to the threshold magnitude.
pub const EQ_TOLERANCE: f64 = 1e-9;

/// Whether a failed rule blocks or merely flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum RuleKind {
    /// Invalid data
    Error,
    /// Suspicious data
    Warning,
}

impl fmt::Display for RuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuleKind::Error => f.write_str("error"),
            RuleKind::Warning => f.write_str("warning"),
        }
    }
}

/// Condition the field value must satisfy against the threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Comparator {
    /// value > threshold
    Gt,
    /// value < threshold
    Lt,
    /// value == threshold, within [`EQ_TOLERANCE`]
    Eq,
    /// value >= threshold
    Gte,
    /// value <= threshold
    Lte,
    /// min <= value <= max
    Between,
}

impl Comparator {
    /// Operator symbol for messages.
    pub fn symbol(&self) -> &'static str {
        match self {
            Comparator::Gt => ">",
            Comparator::Lt => "<",
            Comparator::Eq => "==",
            Comparator::Gte => ">=",
            Comparator::Lte => "<=",
            Comparator::Between => "in",
        }
    }
}

/// Rule threshold: a scalar, or an inclusive range for `between`.
///
/// Deserialises from either a number or `{ min, max }`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum Threshold {
    /// Scalar bound
    Value(f64),
    /// Inclusive range
    Range {
        /// Lower bound
        min: f64,
        /// Upper bound
        max: f64,
    },
}

impl fmt::Display for Threshold {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Threshold::Value(v) => write!(f, "{}", v),
            Threshold::Range { min, max } => write!(f, "[{}, {}]", min, max),
        }
    }
}

/// Rule severity, 1 (low) to 3 (high).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "u8", into = "u8"))]
pub struct Severity(u8);

impl Severity {
    /// Informational
    pub const LOW: Severity = Severity(1);
    /// Should be reviewed
    pub const MEDIUM: Severity = Severity(2);
    /// Must be fixed
    pub const HIGH: Severity = Severity(3);

    /// Numeric level.
    pub fn level(&self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for Severity {
    type Error = String;

    fn try_from(level: u8) -> Result<Self, Self::Error> {
        match level {
            1..=3 => Ok(Severity(level)),
            other => Err(format!("severity must be 1..=3, got {}", other)),
        }
    }
}

impl From<Severity> for u8 {
    fn from(severity: Severity) -> Self {
        severity.0
    }
}

/// A declarative check on one metric.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ValidationRule {
    /// Error or warning
    pub kind: RuleKind,
    /// Dotted metric path, e.g. `profitability.ebitda_margin`
    pub field: String,
    /// Message reported when the rule fails
    pub message: String,
    /// Condition to satisfy
    pub comparator: Comparator,
    /// Bound(s) of the condition
    pub threshold: Threshold,
    /// 1..=3
    pub severity: Severity,
}

impl ValidationRule {
    /// A high-severity error rule.
    pub fn error(
        field: impl Into<String>,
        comparator: Comparator,
        threshold: Threshold,
        message: impl Into<String>,
    ) -> Self {
        Self {
            kind: RuleKind::Error,
            field: field.into(),
            message: message.into(),
            comparator,
            threshold,
            severity: Severity::HIGH,
        }
    }

    /// A medium-severity warning rule.
    pub fn warning(
        field: impl Into<String>,
        comparator: Comparator,
        threshold: Threshold,
        message: impl Into<String>,
    ) -> Self {
        Self {
            kind: RuleKind::Warning,
            severity: Severity::MEDIUM,
            ..Self::error(field, comparator, threshold, message)
        }
    }

    /// Override the severity.
    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    /// Check that comparator and threshold fit together.
    ///
    /// # Errors
    ///
    /// [`ValuationError::InvalidRule`] when `between` lacks a range, a
    /// scalar comparator has a range, a range is inverted, or a bound is NaN.
    pub fn validate(&self) -> Result<(), ValuationError> {
        match (self.comparator, self.threshold) {
            (Comparator::Between, Threshold::Value(_)) => Err(ValuationError::invalid_rule(
                &self.field,
                "between requires a { min, max } range",
            )),
            (Comparator::Between, Threshold::Range { min, max }) => {
                if min.is_nan() || max.is_nan() {
                    Err(ValuationError::invalid_rule(&self.field, "range bound is NaN"))
                } else if min > max {
                    Err(ValuationError::invalid_rule(
                        &self.field,
                        format!("range minimum {} exceeds maximum {}", min, max),
                    ))
                } else {
                    Ok(())
                }
            }
            (_, Threshold::Range { .. }) => Err(ValuationError::invalid_rule(
                &self.field,
                format!("comparator '{}' requires a scalar threshold", self.comparator.symbol()),
            )),
            (_, Threshold::Value(v)) if v.is_nan() => {
                Err(ValuationError::invalid_rule(&self.field, "threshold is NaN"))
            }
            _ => Ok(()),
        }
    }

    /// Whether `value` satisfies the rule.
    ///
    /// # Errors
    ///
    /// See [`ValidationRule::validate`].
    pub fn passes(&self, value: f64) -> Result<bool, ValuationError> {
        self.validate()?;
        let passed = match (self.comparator, self.threshold) {
            (Comparator::Between, Threshold::Range { min, max }) => value >= min && value <= max,
            (Comparator::Gt, Threshold::Value(t)) => value > t,
            (Comparator::Lt, Threshold::Value(t)) => value < t,
            (Comparator::Gte, Threshold::Value(t)) => value >= t,
            (Comparator::Lte, Threshold::Value(t)) => value <= t,
            (Comparator::Eq, Threshold::Value(t)) => {
                (value - t).abs() <= EQ_TOLERANCE * t.abs().max(1.0)
            }
            _ => false,
        };
        Ok(passed)
    }
}

/// A failed rule.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ValidationFinding {
    /// Kind of the failed rule
    pub kind: RuleKind,
    /// Metric path
    pub field: String,
    /// Rule message
    pub message: String,
    /// Rule severity
    pub severity: Severity,
    /// Observed value (zero when the metric was absent)
    pub value: f64,
}
