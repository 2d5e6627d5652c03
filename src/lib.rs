//! Biostat - automated statistical-test selection for comparing numeric
//! sample groups.
//!
//! Given two or more named samples, the engine diagnoses normality
//! (Shapiro-Wilk per group) and variance homogeneity (Levene across
//! groups), picks the appropriate comparison test from a fixed decision
//! table, runs it, and labels the p-value. For three or more groups with
//! a significant omnibus result it adds an all-pairs post-hoc table
//! (Tukey HSD after ANOVA, Bonferroni-adjusted Dunn after
//! Kruskal-Wallis).
//!
//! The pipeline is pure and synchronous: one call to
//! [`analysis::analyze`] owns its own result structures, shares nothing
//! across runs, and never panics on finite input.

pub mod analysis;
pub mod cli;
pub mod diagnostics;
pub mod hypothesis;
pub mod input;
pub mod posthoc;
pub mod report;
pub mod sample;
pub mod selector;
pub mod significance;

pub use analysis::{analyze, analyze_groups, AnalysisError, AnalysisResult, Limitation};
pub use diagnostics::{run_diagnostics, DiagnosticReport, NormalityCheck, SIGNIFICANCE_LEVEL};
pub use posthoc::{PairwiseComparison, PostHocMethod, PostHocTable};
pub use sample::{Sample, SampleSet, MIN_GROUP_COUNT, MIN_GROUP_SIZE};
pub use selector::{select, Selection, TestChoice};
pub use significance::SignificanceLabel;
