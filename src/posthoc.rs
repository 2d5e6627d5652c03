//! All-pairs post-hoc comparison after a significant omnibus test.
//!
//! Runs only when the parent omnibus result is significant; the engine
//! never computes a pairwise table after a non-significant global test.
//! Tukey's HSD (family-wise error via the studentized range) follows the
//! ANOVA branch; Dunn's rank test with Bonferroni adjustment follows the
//! Kruskal-Wallis branch.

use crate::diagnostics::SIGNIFICANCE_LEVEL;
use crate::hypothesis::{
    pool_ranks, standard_normal_cdf, studentized_range_cdf, AnovaSummary, StatError,
};
use crate::sample::SampleSet;
use serde::Serialize;
use std::fmt;
use tracing::debug;

/// Multiplicity-correction procedure used for a post-hoc table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PostHocMethod {
    TukeyHsd,
    DunnBonferroni,
}

impl fmt::Display for PostHocMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TukeyHsd => f.write_str("Tukey HSD"),
            Self::DunnBonferroni => f.write_str("Dunn (Bonferroni-adjusted)"),
        }
    }
}

/// One unordered pair with its multiplicity-adjusted p-value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PairwiseComparison {
    pub group_a: String,
    pub group_b: String,
    pub adjusted_p: f64,
    /// adjusted_p < 0.05.
    pub significant: bool,
}

/// Triangular table of every unordered group pair, in insertion order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PostHocTable {
    pub method: PostHocMethod,
    pub comparisons: Vec<PairwiseComparison>,
}

impl PostHocTable {
    pub fn len(&self) -> usize {
        self.comparisons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.comparisons.is_empty()
    }
}

/// Tukey's Honestly-Significant-Difference procedure over all pairs,
/// using the within-group mean square of the parent ANOVA
/// (Tukey-Kramer form for unequal group sizes).
pub fn tukey_hsd(set: &SampleSet, anova: &AnovaSummary) -> Result<PostHocTable, StatError> {
    let k = set.len();
    if anova.ms_within <= 0.0 {
        return Err(StatError::Degenerate(
            "no within-group variance for Tukey HSD".into(),
        ));
    }

    let mut comparisons = Vec::with_capacity(k * (k - 1) / 2);
    for i in 0..k {
        for j in (i + 1)..k {
            let ni = anova.group_sizes[i] as f64;
            let nj = anova.group_sizes[j] as f64;
            let se = (anova.ms_within / 2.0 * (1.0 / ni + 1.0 / nj)).sqrt();
            if se <= 0.0 {
                return Err(StatError::Degenerate(
                    "zero standard error in pairwise comparison".into(),
                ));
            }
            let q = (anova.group_means[i] - anova.group_means[j]).abs() / se;
            let adjusted_p =
                (1.0 - studentized_range_cdf(q, k, anova.df_within as f64)?).clamp(0.0, 1.0);
            comparisons.push(PairwiseComparison {
                group_a: set.samples()[i].name().to_string(),
                group_b: set.samples()[j].name().to_string(),
                adjusted_p,
                significant: adjusted_p < SIGNIFICANCE_LEVEL,
            });
        }
    }

    debug!(pairs = comparisons.len(), "Tukey HSD table computed");
    Ok(PostHocTable {
        method: PostHocMethod::TukeyHsd,
        comparisons,
    })
}

/// Dunn's test on the pooled ranks with Bonferroni adjustment.
///
/// The z statistic for a pair uses the tie-corrected null variance of
/// the mean-rank difference; each raw p-value is multiplied by the
/// number of pairs and capped at 1.
pub fn dunn_bonferroni(set: &SampleSet) -> Result<PostHocTable, StatError> {
    let k = set.len();
    let pool = pool_ranks(&set.value_groups());
    let n = pool.total_n as f64;

    let tie_adjustment = pool.tie_term / (12.0 * (n - 1.0));
    let base_variance = n * (n + 1.0) / 12.0 - tie_adjustment;
    if base_variance <= 0.0 {
        return Err(StatError::Degenerate(
            "all pooled observations tied".into(),
        ));
    }

    let pair_count = (k * (k - 1) / 2) as f64;
    let mut comparisons = Vec::with_capacity(k * (k - 1) / 2);
    for i in 0..k {
        for j in (i + 1)..k {
            let ni = pool.sizes[i] as f64;
            let nj = pool.sizes[j] as f64;
            let mean_rank_i = pool.rank_sums[i] / ni;
            let mean_rank_j = pool.rank_sums[j] / nj;
            let se = (base_variance * (1.0 / ni + 1.0 / nj)).sqrt();
            let z = (mean_rank_i - mean_rank_j).abs() / se;
            let raw_p = (2.0 * (1.0 - standard_normal_cdf(z))).clamp(0.0, 1.0);
            let adjusted_p = (raw_p * pair_count).min(1.0);
            comparisons.push(PairwiseComparison {
                group_a: set.samples()[i].name().to_string(),
                group_b: set.samples()[j].name().to_string(),
                adjusted_p,
                significant: adjusted_p < SIGNIFICANCE_LEVEL,
            });
        }
    }

    debug!(pairs = comparisons.len(), "Dunn table computed");
    Ok(PostHocTable {
        method: PostHocMethod::DunnBonferroni,
        comparisons,
    })
}
