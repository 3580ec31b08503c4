//! Descriptive statistics over financial series.
//!
//! All helpers are generic over [`Float`] and total over their inputs:
//! empty slices and zero denominators resolve to zero instead of NaN.
//! The only fallible helper is [`cagr`], whose failure modes are genuine
//! domain errors.

use crate::types::ValuationError;
use num_traits::Float;
use std::cmp::Ordering;

/// Divide, resolving a zero denominator (or any non-finite quotient) to zero.
///
/// # Examples
/// ```
/// use valuation_core::math::stats::safe_div;
///
/// assert_eq!(safe_div(10.0_f64, 4.0), 2.5);
/// assert_eq!(safe_div(10.0_f64, 0.0), 0.0);
/// ```
#[inline]
pub fn safe_div<T: Float>(numerator: T, denominator: T) -> T {
    if denominator == T::zero() {
        return T::zero();
    }
    let quotient = numerator / denominator;
    if quotient.is_finite() {
        quotient
    } else {
        T::zero()
    }
}

/// Arithmetic mean. Zero for an empty slice.
pub fn mean<T: Float>(values: &[T]) -> T {
    if values.is_empty() {
        return T::zero();
    }
    let sum = values.iter().fold(T::zero(), |acc, &x| acc + x);
    sum / count_as(values.len())
}

/// Population standard deviation of the raw values:
/// `sqrt(mean((x_i - mean(x))^2))`.
///
/// # Examples
/// ```
/// use valuation_core::math::stats::population_std_dev;
///
/// let sd = population_std_dev(&[2.0_f64, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]);
/// assert!((sd - 2.0).abs() < 1e-12);
/// ```
pub fn population_std_dev<T: Float>(values: &[T]) -> T {
    if values.is_empty() {
        return T::zero();
    }
    let mu = mean(values);
    let squared: Vec<T> = values.iter().map(|&x| (x - mu) * (x - mu)).collect();
    mean(&squared).sqrt()
}

/// Heuristic smoothness score: `1 - mean(|x_i - x_{i-1}|)` over the
/// successive differences.
///
/// A flat series scores exactly one. The score is only comparable between
/// series expressed in the same unit; it is not bounded below.
pub fn trend_stability<T: Float>(values: &[T]) -> T {
    if values.len() < 2 {
        return T::one();
    }
    let diffs: Vec<T> = values.windows(2).map(|w| (w[1] - w[0]).abs()).collect();
    T::one() - mean(&diffs)
}

/// Compound annual growth rate between the first and last observation:
/// `(last / first)^(1 / (n - 1)) - 1`.
///
/// # Errors
///
/// - [`ValuationError::InsufficientHistory`] for fewer than two values
/// - [`ValuationError::UndefinedGrowthRate`] when `first` is zero, or when
///   `last / first` is negative and the exponent is fractional
/// - [`ValuationError::NonFiniteResult`] if the power overflows
///
/// # Examples
/// ```
/// use valuation_core::math::stats::cagr;
///
/// let growth = cagr(&[100.0_f64, 121.0]).unwrap();
/// assert!((growth - 0.21).abs() < 1e-12);
/// ```
pub fn cagr<T: Float>(values: &[T]) -> Result<T, ValuationError> {
    let n = values.len();
    if n < 2 {
        return Err(ValuationError::InsufficientHistory { got: n, need: 2 });
    }
    let periods = n - 1;
    let first = values[0];
    let last = values[n - 1];

    let undefined = || ValuationError::UndefinedGrowthRate {
        first: first.to_f64().unwrap_or(f64::NAN),
        last: last.to_f64().unwrap_or(f64::NAN),
        periods,
    };

    if first == T::zero() {
        return Err(undefined());
    }
    let ratio = last / first;
    let growth = if periods == 1 {
        // exponent is exactly one, so negative ratios are still defined
        ratio - T::one()
    } else if ratio < T::zero() {
        return Err(undefined());
    } else {
        ratio.powf(T::one() / count_as(periods)) - T::one()
    };

    if growth.is_finite() {
        Ok(growth)
    } else {
        Err(ValuationError::non_finite("compound annual growth rate"))
    }
}

/// Element at index `floor(n / 2)` of the ascending sort.
///
/// For even `n` this is the upper of the two central values, not their
/// average. Returns `None` for an empty input.
///
/// # Examples
/// ```
/// use valuation_core::math::stats::upper_median;
///
/// assert_eq!(upper_median(&[9.0_f64, 5.0, 7.0]), Some(7.0));
/// assert_eq!(upper_median(&[4.0_f64, 1.0, 3.0, 2.0]), Some(3.0));
/// assert_eq!(upper_median::<f64>(&[]), None);
/// ```
pub fn upper_median<T: Float>(values: &[T]) -> Option<T> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));
    Some(sorted[sorted.len() / 2])
}

#[inline]
fn count_as<T: Float>(n: usize) -> T {
    T::from(n).unwrap_or_else(T::nan)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_safe_div_zero_denominator() {
        assert_eq!(safe_div(5.0_f64, 0.0), 0.0);
        assert_eq!(safe_div(0.0_f64, 0.0), 0.0);
        assert_eq!(safe_div(-5.0_f64, -0.0), 0.0);
    }

    #[test]
    fn test_safe_div_overflow_resolves_to_zero() {
        assert_eq!(safe_div(f64::MAX, 1e-300), 0.0);
    }

    #[test]
    fn test_mean_empty_is_zero() {
        assert_eq!(mean::<f64>(&[]), 0.0);
        assert_relative_eq!(mean(&[1.0_f64, 2.0, 3.0]), 2.0);
    }

    #[test]
    fn test_population_std_dev_constant_series() {
        assert_eq!(population_std_dev(&[3.0_f64, 3.0, 3.0]), 0.0);
    }

    #[test]
    fn test_population_std_dev_not_sample() {
        // sample std dev of [1, 3] would be sqrt(2)
        assert_relative_eq!(population_std_dev(&[1.0_f64, 3.0]), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_trend_stability_flat_series() {
        assert_eq!(trend_stability(&[0.2_f64, 0.2, 0.2]), 1.0);
    }

    #[test]
    fn test_trend_stability_averages_over_differences() {
        // diffs: 0.1, 0.3 -> mean 0.2
        assert_relative_eq!(
            trend_stability(&[0.1_f64, 0.2, -0.1]),
            0.8,
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_cagr_two_points() {
        assert_relative_eq!(cagr(&[100.0_f64, 121.0]).unwrap(), 0.21, epsilon = 1e-12);
    }

    #[test]
    fn test_cagr_three_points() {
        assert_relative_eq!(
            cagr(&[100.0_f64, 999.0, 121.0]).unwrap(),
            0.10,
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_cagr_zero_base_is_error() {
        let err = cagr(&[0.0_f64, 10.0]).unwrap_err();
        assert!(matches!(err, ValuationError::UndefinedGrowthRate { periods: 1, .. }));
    }

    #[test]
    fn test_cagr_negative_ratio_fractional_exponent_is_error() {
        let err = cagr(&[100.0_f64, 50.0, -20.0]).unwrap_err();
        assert!(matches!(err, ValuationError::UndefinedGrowthRate { periods: 2, .. }));
    }

    #[test]
    fn test_cagr_negative_ratio_integer_exponent_is_defined() {
        assert_relative_eq!(cagr(&[100.0_f64, -50.0]).unwrap(), -1.5, epsilon = 1e-12);
    }

    #[test]
    fn test_cagr_single_point_is_insufficient() {
        assert_eq!(
            cagr(&[100.0_f64]).unwrap_err(),
            ValuationError::InsufficientHistory { got: 1, need: 2 }
        );
    }

    #[test]
    fn test_upper_median_even_takes_upper() {
        assert_eq!(upper_median(&[10.0_f64, 8.0]), Some(10.0));
    }

    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #![proptest_config(ProptestConfig::with_cases(500))]

            #[test]
            fn test_upper_median_is_a_member(values in prop::collection::vec(-1e6..1e6_f64, 1..40)) {
                let m = upper_median(&values).unwrap();
                prop_assert!(values.contains(&m));
                let below = values.iter().filter(|&&v| v < m).count();
                prop_assert!(below <= values.len() / 2);
            }

            #[test]
            fn test_std_dev_non_negative(values in prop::collection::vec(-1e6..1e6_f64, 0..40)) {
                prop_assert!(population_std_dev(&values) >= 0.0);
            }

            #[test]
            fn test_stability_at_most_one(values in prop::collection::vec(-1e3..1e3_f64, 2..40)) {
                prop_assert!(trend_stability(&values) <= 1.0);
            }
        }
    }
}
