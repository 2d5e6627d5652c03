//! The analysis pipeline: diagnostics, selection, test execution,
//! post-hoc, labeling.
//!
//! One invocation owns its own report and result structures; nothing is
//! shared across runs and the whole pipeline is deterministic for a
//! given input. The only error that crosses [`analyze`] is
//! [`AnalysisError::InsufficientData`]; every numeric failure inside the
//! pipeline resolves to a well-formed [`AnalysisResult`] with a
//! [`Limitation`] set.

use crate::diagnostics::{run_diagnostics, DiagnosticReport, SIGNIFICANCE_LEVEL};
use crate::hypothesis::{
    kruskal_wallis, mann_whitney_u, one_way_anova, two_sample_t_test, StatError,
};
use crate::posthoc::{dunn_bonferroni, tukey_hsd, PostHocTable};
use crate::sample::{SampleSet, MIN_GROUP_COUNT};
use crate::selector::{select, Selection, TestChoice};
use crate::significance::SignificanceLabel;
use serde::Serialize;
use std::fmt;
use thiserror::Error;
use tracing::debug;

/// The analysis could not start at all.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnalysisError {
    #[error("not enough data: {0}")]
    InsufficientData(String),
}

/// A non-fatal gap in an otherwise well-formed result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Limitation {
    /// The decision table has no supported test for this configuration.
    UnsupportedConfiguration { detail: String },
    /// A statistical routine failed numerically on this input.
    TestNotComputable { detail: String },
}

impl fmt::Display for Limitation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnsupportedConfiguration { detail } => {
                write!(f, "unsupported configuration: {detail}")
            }
            Self::TestNotComputable { detail } => write!(f, "test not computable: {detail}"),
        }
    }
}

/// Structured outcome of one analysis run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisResult {
    pub diagnostics: DiagnosticReport,
    /// `None` only for an unsupported configuration.
    pub choice: Option<TestChoice>,
    /// Primary (omnibus, for 3+ groups) p-value; `None` when the test
    /// was unsupported or not computable.
    pub p_value: Option<f64>,
    pub label: Option<SignificanceLabel>,
    /// Present only when the omnibus test was significant and there
    /// were 3+ groups.
    pub post_hoc: Option<PostHocTable>,
    pub limitation: Option<Limitation>,
}

/// Run the full pipeline on a validated sample set.
pub fn analyze(set: &SampleSet) -> Result<AnalysisResult, AnalysisError> {
    if !set.is_analyzable() {
        let mut message = format!(
            "{} usable group(s), need at least {MIN_GROUP_COUNT}",
            set.len()
        );
        if !set.dropped().is_empty() {
            message.push_str(&format!("; excluded: {}", set.dropped().join(", ")));
        }
        return Err(AnalysisError::InsufficientData(message));
    }

    let diagnostics = run_diagnostics(set);
    let selection = select(set.len(), diagnostics.all_normal, diagnostics.equal_variance);

    let choice = match selection {
        Selection::Unsupported { reason } => {
            return Ok(AnalysisResult {
                diagnostics,
                choice: None,
                p_value: None,
                label: None,
                post_hoc: None,
                limitation: Some(Limitation::UnsupportedConfiguration { detail: reason }),
            });
        }
        Selection::Chosen(choice) => choice,
    };

    let (p_value, post_hoc, limitation) = run_chosen_test(set, choice);
    let label = p_value.map(SignificanceLabel::from_p_value);
    debug!(?choice, ?p_value, ?label, "analysis complete");

    Ok(AnalysisResult {
        diagnostics,
        choice: Some(choice),
        p_value,
        label,
        post_hoc,
        limitation,
    })
}

/// Convenience entry point over raw `(name, values)` pairs. Groups that
/// fail validation are dropped before the pipeline runs.
pub fn analyze_groups<N, I>(groups: I) -> Result<AnalysisResult, AnalysisError>
where
    N: Into<String>,
    I: IntoIterator<Item = (N, Vec<f64>)>,
{
    analyze(&SampleSet::from_groups(groups))
}

fn run_chosen_test(
    set: &SampleSet,
    choice: TestChoice,
) -> (Option<f64>, Option<PostHocTable>, Option<Limitation>) {
    match choice {
        TestChoice::StudentT | TestChoice::WelchT | TestChoice::MannWhitneyU => {
            let a = set.samples()[0].values();
            let b = set.samples()[1].values();
            let outcome = match choice {
                TestChoice::StudentT => two_sample_t_test(a, b, true),
                TestChoice::WelchT => two_sample_t_test(a, b, false),
                TestChoice::MannWhitneyU => mann_whitney_u(a, b),
                _ => unreachable!("two-group arm"),
            };
            match outcome {
                Ok(summary) => (Some(summary.p_value), None, None),
                Err(e) => (None, None, Some(not_computable(choice, e))),
            }
        }
        TestChoice::AnovaTukey => match one_way_anova(&set.value_groups()) {
            Ok(anova) => {
                let p = anova.p_value;
                if p < SIGNIFICANCE_LEVEL {
                    match tukey_hsd(set, &anova) {
                        Ok(table) => (Some(p), Some(table), None),
                        Err(e) => (Some(p), None, Some(not_computable(choice, e))),
                    }
                } else {
                    (Some(p), None, None)
                }
            }
            Err(e) => (None, None, Some(not_computable(choice, e))),
        },
        TestChoice::KruskalDunn => match kruskal_wallis(&set.value_groups()) {
            Ok(summary) => {
                let p = summary.p_value;
                if p < SIGNIFICANCE_LEVEL {
                    match dunn_bonferroni(set) {
                        Ok(table) => (Some(p), Some(table), None),
                        Err(e) => (Some(p), None, Some(not_computable(choice, e))),
                    }
                } else {
                    (Some(p), None, None)
                }
            }
            Err(e) => (None, None, Some(not_computable(choice, e))),
        },
    }
}

fn not_computable(choice: TestChoice, error: StatError) -> Limitation {
    Limitation::TestNotComputable {
        detail: format!("{choice}: {error}"),
    }
}
