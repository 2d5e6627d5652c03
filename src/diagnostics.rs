//! Distributional diagnostics feeding the test selector.
//!
//! Per-group Shapiro-Wilk normality checks and one cross-group Levene
//! variance-homogeneity check. A check that cannot be computed (for
//! example a zero-variance group) downgrades to "assumption not
//! established" instead of failing the analysis.

use crate::hypothesis::{levene, shapiro_wilk, StatError};
use crate::sample::{Sample, SampleSet};
use serde::Serialize;
use tracing::debug;

/// Assumption threshold for every diagnostic and test in the pipeline.
/// Fixed policy, deliberately not configurable.
pub const SIGNIFICANCE_LEVEL: f64 = 0.05;

/// Normality verdict for one group.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NormalityCheck {
    pub group: String,
    /// `None` when the test was not computable for this group.
    pub p_value: Option<f64>,
    /// p > 0.05; always `false` when the test was not computable.
    pub normal: bool,
}

/// Diagnostic flags for one analysis run. Immutable once computed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DiagnosticReport {
    /// Per-group checks, in sample insertion order.
    pub normality: Vec<NormalityCheck>,
    /// True iff every group's normality p-value exceeds 0.05.
    pub all_normal: bool,
    /// Levene's test p-value across all groups; `None` if not computable.
    pub variance_p_value: Option<f64>,
    /// Levene p > 0.05; `false` when not computable.
    pub equal_variance: bool,
}

/// Shapiro-Wilk p-value for one group.
pub fn evaluate_normality(sample: &Sample) -> Result<f64, StatError> {
    shapiro_wilk(sample.values()).map(|r| r.p_value)
}

/// Levene p-value across all groups of the set, evaluated simultaneously
/// rather than pairwise.
pub fn evaluate_variance_homogeneity(set: &SampleSet) -> Result<f64, StatError> {
    levene(&set.value_groups()).map(|r| r.p_value)
}

/// Run every diagnostic for a set. Pure; failures become flags.
pub fn run_diagnostics(set: &SampleSet) -> DiagnosticReport {
    let normality: Vec<NormalityCheck> = set
        .samples()
        .iter()
        .map(|sample| match evaluate_normality(sample) {
            Ok(p) => NormalityCheck {
                group: sample.name().to_string(),
                p_value: Some(p),
                normal: p > SIGNIFICANCE_LEVEL,
            },
            Err(e) => {
                debug!(group = sample.name(), error = %e, "normality not computable");
                NormalityCheck {
                    group: sample.name().to_string(),
                    p_value: None,
                    normal: false,
                }
            }
        })
        .collect();

    let all_normal = normality.iter().all(|c| c.normal);

    let (variance_p_value, equal_variance) = match evaluate_variance_homogeneity(set) {
        Ok(p) => (Some(p), p > SIGNIFICANCE_LEVEL),
        Err(e) => {
            debug!(error = %e, "variance homogeneity not computable");
            (None, false)
        }
    };

    debug!(all_normal, equal_variance, "diagnostics complete");
    DiagnosticReport {
        normality,
        all_normal,
        variance_p_value,
        equal_variance,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn demo_set() -> SampleSet {
        SampleSet::from_groups([
            ("Control", vec![100.0, 102.0, 98.0, 105.0, 95.0]),
            ("Target", vec![80.0, 85.0, 78.0, 82.0, 88.0]),
        ])
    }

    #[test]
    fn test_demo_groups_pass_both_diagnostics() {
        let report = run_diagnostics(&demo_set());
        assert!(report.all_normal);
        assert!(report.equal_variance);
        for check in &report.normality {
            assert!(check.p_value.unwrap() > 0.05);
        }
        assert!(report.variance_p_value.unwrap() > 0.05);
    }

    #[test]
    fn test_zero_variance_group_downgrades_not_crashes() {
        let set = SampleSet::from_groups([
            ("Flat", vec![5.0, 5.0, 5.0]),
            ("Spread", vec![1.0, 2.0, 3.0, 4.0]),
        ]);
        let report = run_diagnostics(&set);
        let flat = &report.normality[0];
        assert_eq!(flat.p_value, None);
        assert!(!flat.normal);
        assert!(!report.all_normal);
    }

    #[test]
    fn test_skewed_group_breaks_all_normal() {
        let set = SampleSet::from_groups([
            ("Normalish", vec![10.0, 11.0, 9.0, 10.5, 9.5, 10.2]),
            ("Skewed", vec![1.0, 1.1, 1.2, 1.3, 1.15, 1.25, 55.0, 60.0]),
        ]);
        let report = run_diagnostics(&set);
        assert!(report.normality[0].normal);
        assert!(!report.normality[1].normal);
        assert!(!report.all_normal);
    }

    #[test]
    fn test_report_is_deterministic() {
        let a = run_diagnostics(&demo_set());
        let b = run_diagnostics(&demo_set());
        assert_eq!(a, b);
    }

    #[test]
    fn test_order_matches_insertion() {
        let set = SampleSet::from_groups([
            ("B", vec![1.0, 2.0, 3.0, 4.0]),
            ("A", vec![2.0, 3.0, 4.0, 5.0]),
        ]);
        let report = run_diagnostics(&set);
        assert_eq!(report.normality[0].group, "B");
        assert_eq!(report.normality[1].group, "A");
    }
}
