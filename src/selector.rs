//! The test-selection decision table.
//!
//! A pure function of (group count, all-normal flag, equal-variance
//! flag). Every reachable input combination maps to exactly one
//! [`Selection`]; the single unsupported cell — three or more normal
//! groups with heterogeneous variances — is reported, never papered over
//! with an ANOVA whose homogeneity assumption it would violate.

use serde::Serialize;
use std::fmt;
use tracing::debug;

/// The comparison test chosen for a sample set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum TestChoice {
    /// Two groups, normal, equal variance: Student's unpaired t-test.
    StudentT,
    /// Two groups, normal, unequal variance: Welch's t-test.
    WelchT,
    /// Two groups, non-normal: Mann-Whitney U rank-sum test.
    MannWhitneyU,
    /// 3+ groups, normal, equal variance: one-way ANOVA with Tukey HSD
    /// post-hoc.
    AnovaTukey,
    /// 3+ groups, non-normal: Kruskal-Wallis with Dunn post-hoc
    /// (Bonferroni-adjusted).
    KruskalDunn,
}

impl TestChoice {
    /// Human-readable test name for reports.
    pub fn description(&self) -> &'static str {
        match self {
            Self::StudentT => "Student's t-test (unpaired, equal variance)",
            Self::WelchT => "Welch's t-test (unpaired, unequal variance)",
            Self::MannWhitneyU => "Mann-Whitney U test (non-parametric)",
            Self::AnovaTukey => "One-way ANOVA with Tukey HSD post-hoc",
            Self::KruskalDunn => "Kruskal-Wallis test with Dunn post-hoc",
        }
    }
}

impl fmt::Display for TestChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

/// Outcome of the decision table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Selection {
    Chosen(TestChoice),
    /// No supported test for this configuration.
    Unsupported { reason: String },
}

/// Map diagnostic flags and group count to a test.
///
/// Callers guarantee `group_count >= 2` (the [`SampleSet`]
/// analyzability invariant).
///
/// [`SampleSet`]: crate::sample::SampleSet
pub fn select(group_count: usize, all_normal: bool, equal_variance: bool) -> Selection {
    debug_assert!(group_count >= 2, "decision table is defined for 2+ groups");
    let selection = match (group_count, all_normal, equal_variance) {
        (2, true, true) => Selection::Chosen(TestChoice::StudentT),
        (2, true, false) => Selection::Chosen(TestChoice::WelchT),
        (2, false, _) => Selection::Chosen(TestChoice::MannWhitneyU),
        (_, true, true) => Selection::Chosen(TestChoice::AnovaTukey),
        (_, true, false) => Selection::Unsupported {
            reason: format!(
                "no supported test for {group_count} normal groups with \
                 heterogeneous variances; a Welch-type ANOVA is not implemented"
            ),
        },
        (_, false, _) => Selection::Chosen(TestChoice::KruskalDunn),
    };
    debug!(group_count, all_normal, equal_variance, ?selection, "test selected");
    selection
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_two_group_rows() {
        assert_eq!(select(2, true, true), Selection::Chosen(TestChoice::StudentT));
        assert_eq!(select(2, true, false), Selection::Chosen(TestChoice::WelchT));
        assert_eq!(
            select(2, false, true),
            Selection::Chosen(TestChoice::MannWhitneyU)
        );
        assert_eq!(
            select(2, false, false),
            Selection::Chosen(TestChoice::MannWhitneyU)
        );
    }

    #[test]
    fn test_multi_group_rows() {
        for count in [3, 4, 10] {
            assert_eq!(
                select(count, true, true),
                Selection::Chosen(TestChoice::AnovaTukey)
            );
            assert_eq!(
                select(count, false, true),
                Selection::Chosen(TestChoice::KruskalDunn)
            );
            assert_eq!(
                select(count, false, false),
                Selection::Chosen(TestChoice::KruskalDunn)
            );
            assert!(matches!(
                select(count, true, false),
                Selection::Unsupported { .. }
            ));
        }
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "2+ groups")]
    fn test_below_domain_group_count_asserts() {
        select(1, true, true);
    }

    #[test]
    fn test_unsupported_reason_names_the_gap() {
        match select(3, true, false) {
            Selection::Unsupported { reason } => {
                assert!(reason.contains("heterogeneous variances"));
            }
            other => panic!("expected Unsupported, got {other:?}"),
        }
    }
}
