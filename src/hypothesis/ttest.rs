// Two-sample t-tests: Student's pooled-variance form and Welch's
// unequal-variance form, both two-sided.

use super::{check_finite, mean, variance, StatError, TestSummary};
use statrs::distribution::{ContinuousCDF, StudentsT};

/// Two-sided independent two-sample t-test.
///
/// `pooled = true` runs Student's test (homogeneous variances, df =
/// n1 + n2 - 2); `pooled = false` runs Welch's test with
/// Welch-Satterthwaite degrees of freedom.
pub fn two_sample_t_test(a: &[f64], b: &[f64], pooled: bool) -> Result<TestSummary, StatError> {
    let n1 = a.len();
    let n2 = b.len();
    if n1 < 2 {
        return Err(StatError::TooFewValues { min: 2, got: n1 });
    }
    if n2 < 2 {
        return Err(StatError::TooFewValues { min: 2, got: n2 });
    }
    check_finite(a)?;
    check_finite(b)?;

    let n1f = n1 as f64;
    let n2f = n2 as f64;
    let mean_diff = mean(a) - mean(b);
    let var1 = variance(a);
    let var2 = variance(b);

    let (se_sq, df) = if pooled {
        let df = n1f + n2f - 2.0;
        let pooled_var = ((n1f - 1.0) * var1 + (n2f - 1.0) * var2) / df;
        (pooled_var * (1.0 / n1f + 1.0 / n2f), df)
    } else {
        let v1 = var1 / n1f;
        let v2 = var2 / n2f;
        let df = (v1 + v2).powi(2) / (v1 * v1 / (n1f - 1.0) + v2 * v2 / (n2f - 1.0));
        (v1 + v2, df)
    };

    if se_sq < 1e-300 || !df.is_finite() || df <= 0.0 {
        return Err(StatError::Degenerate(
            "zero standard error in both samples".into(),
        ));
    }

    let t = mean_diff / se_sq.sqrt();
    let dist = StudentsT::new(0.0, 1.0, df).map_err(|e| StatError::Distribution(e.to_string()))?;
    let p_value = (2.0 * dist.cdf(-t.abs())).clamp(0.0, 1.0);

    Ok(TestSummary {
        statistic: t,
        df: Some(df),
        p_value,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_student_clear_difference() {
        let a = [100.0, 102.0, 98.0, 105.0, 95.0];
        let b = [80.0, 85.0, 78.0, 82.0, 88.0];
        let r = two_sample_t_test(&a, &b, true).unwrap();
        assert!(r.statistic > 5.0, "t = {}", r.statistic);
        assert_eq!(r.df, Some(8.0));
        assert!(r.p_value < 0.001, "p = {}", r.p_value);
    }

    #[test]
    fn test_identical_samples_give_zero_t() {
        let s = [1.0, 2.0, 3.0, 4.0, 5.0];
        let r = two_sample_t_test(&s, &s, true).unwrap();
        assert!(r.statistic.abs() < 1e-12);
        assert!((r.p_value - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_welch_fractional_df() {
        let a = [1.0, 2.0, 3.0, 4.0, 5.0];
        let b = [10.0, 30.0, 50.0];
        let r = two_sample_t_test(&a, &b, false).unwrap();
        let df = r.df.unwrap();
        assert!(df > 1.0 && df < 6.0, "df = {df}");
        assert!(r.statistic < 0.0);
    }

    #[test]
    fn test_welch_vs_student_same_variances_agree() {
        let a = [5.0, 6.0, 7.0, 8.0, 9.0];
        let b = [6.0, 7.0, 8.0, 9.0, 10.0];
        let student = two_sample_t_test(&a, &b, true).unwrap();
        let welch = two_sample_t_test(&a, &b, false).unwrap();
        // Balanced equal-variance design: identical t, nearly identical p.
        assert!((student.statistic - welch.statistic).abs() < 1e-9);
        assert!((student.p_value - welch.p_value).abs() < 0.01);
    }

    #[test]
    fn test_both_constant_is_degenerate() {
        let a = [3.0, 3.0, 3.0];
        let b = [3.0, 3.0, 3.0];
        assert!(matches!(
            two_sample_t_test(&a, &b, true),
            Err(StatError::Degenerate(_))
        ));
    }

    #[test]
    fn test_too_small_sample() {
        assert!(matches!(
            two_sample_t_test(&[1.0], &[2.0, 3.0], true),
            Err(StatError::TooFewValues { .. })
        ));
    }
}
