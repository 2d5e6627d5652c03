// Statistical hypothesis-testing primitives.
//
// Each routine computes its test statistic in-crate and converts it to a
// p-value through statrs distribution CDFs (normal, t, F, chi-squared).
// Everything here is pure: slices in, `TestSummary` out, `StatError` for
// inputs a test cannot handle (too small, degenerate, non-finite).
//
// Callers decide what a failure means. The diagnostics layer downgrades
// a failed normality test to "normality not established"; the runner
// surfaces a failed comparison as a non-fatal TestNotComputable outcome.

mod anova;
mod normality;
mod rank;
mod ttest;
mod tukey;
mod variance;

pub use anova::{one_way_anova, AnovaSummary};
pub use normality::{shapiro_wilk, ShapiroWilk};
pub use rank::{kruskal_wallis, mann_whitney_u};
pub(crate) use rank::pool_ranks;
pub use ttest::two_sample_t_test;
pub use tukey::studentized_range_cdf;
pub use variance::levene;

use statrs::function::erf::erfc;
use thiserror::Error;

/// Failure modes of the statistical routines.
///
/// These never cross the `analyze` boundary; the pipeline converts them
/// into diagnostic flags or a `TestNotComputable` limitation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StatError {
    #[error("need at least {min} values, got {got}")]
    TooFewValues { min: usize, got: usize },

    #[error("supports at most {max} values, got {got}")]
    TooManyValues { max: usize, got: usize },

    #[error("need at least {min} groups, got {got}")]
    TooFewGroups { min: usize, got: usize },

    #[error("degenerate sample: {0}")]
    Degenerate(String),

    #[error("non-finite value in sample")]
    NonFinite,

    #[error("distribution not computable: {0}")]
    Distribution(String),
}

/// Statistic, degrees of freedom, and two-sided p-value of a single test.
///
/// `df` is `None` for rank tests evaluated through the normal
/// approximation, fractional for Welch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TestSummary {
    pub statistic: f64,
    pub df: Option<f64>,
    pub p_value: f64,
}

/// Standard normal CDF via the complementary error function.
///
/// `erfc` keeps precision in the tails where `0.5 * (1 + erf)` would
/// cancel.
pub(crate) fn standard_normal_cdf(z: f64) -> f64 {
    0.5 * erfc(-z / std::f64::consts::SQRT_2)
}

pub(crate) fn check_finite(values: &[f64]) -> Result<(), StatError> {
    if values.iter().any(|v| !v.is_finite()) {
        return Err(StatError::NonFinite);
    }
    Ok(())
}

pub(crate) fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

/// Sample variance (n-1 denominator).
pub(crate) fn variance(values: &[f64]) -> f64 {
    let m = mean(values);
    values.iter().map(|&v| (v - m).powi(2)).sum::<f64>() / (values.len() - 1) as f64
}

pub(crate) fn median(values: &[f64]) -> f64 {
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let n = sorted.len();
    if n % 2 == 1 {
        sorted[n / 2]
    } else {
        (sorted[n / 2 - 1] + sorted[n / 2]) / 2.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mean_and_variance() {
        let v = [2.0, 4.0, 6.0, 8.0];
        assert!((mean(&v) - 5.0).abs() < 1e-12);
        // Sample variance: 20 / 3
        assert!((variance(&v) - 20.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_median_odd_even() {
        assert!((median(&[1.0, 3.0, 5.0, 7.0, 9.0]) - 5.0).abs() < 1e-12);
        assert!((median(&[1.0, 2.0, 3.0, 4.0]) - 2.5).abs() < 1e-12);
    }

    #[test]
    fn test_standard_normal_cdf_anchors() {
        assert!((standard_normal_cdf(0.0) - 0.5).abs() < 1e-12);
        assert!((standard_normal_cdf(1.96) - 0.975).abs() < 1e-3);
        assert!((standard_normal_cdf(-1.96) - 0.025).abs() < 1e-3);
        assert!(standard_normal_cdf(-8.0) > 0.0);
        assert!(standard_normal_cdf(-8.0) < 1e-14);
    }

    #[test]
    fn test_check_finite_rejects_nan() {
        assert_eq!(check_finite(&[1.0, f64::NAN]), Err(StatError::NonFinite));
        assert!(check_finite(&[1.0, 2.0]).is_ok());
    }
}
