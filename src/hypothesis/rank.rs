// Rank-based tests: Mann-Whitney U and Kruskal-Wallis H.
//
// Both pool the observations, assign average ranks to ties, and evaluate
// a tie-corrected statistic through its asymptotic null distribution
// (normal for U, chi-squared for H).

use super::{check_finite, standard_normal_cdf, StatError, TestSummary};
use statrs::distribution::{ChiSquared, ContinuousCDF};

/// Pooled ranking of several groups: per-group rank sums plus the tie
/// structure needed by the tie-corrected variances.
#[derive(Debug, Clone)]
pub(crate) struct RankedPool {
    pub rank_sums: Vec<f64>,
    pub sizes: Vec<usize>,
    pub total_n: usize,
    /// Sum over tie runs of t * (t^2 - 1).
    pub tie_term: f64,
}

/// Pool all groups, sort, and assign average ranks.
pub(crate) fn pool_ranks(groups: &[&[f64]]) -> RankedPool {
    let total_n: usize = groups.iter().map(|g| g.len()).sum();
    let mut pooled: Vec<(f64, usize)> = Vec::with_capacity(total_n);
    for (gi, g) in groups.iter().enumerate() {
        for &v in *g {
            pooled.push((v, gi));
        }
    }
    pooled.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(std::cmp::Ordering::Equal));

    let mut rank_sums = vec![0.0; groups.len()];
    let mut tie_term = 0.0;
    let mut i = 0;
    while i < pooled.len() {
        let mut j = i + 1;
        while j < pooled.len() && (pooled[j].0 - pooled[i].0).abs() < 1e-12 {
            j += 1;
        }
        let run = (j - i) as f64;
        if run > 1.0 {
            tie_term += run * (run * run - 1.0);
        }
        // Positions i..j share the average of ranks i+1 ..= j.
        let avg_rank = (i + 1 + j) as f64 / 2.0;
        for &(_, gi) in &pooled[i..j] {
            rank_sums[gi] += avg_rank;
        }
        i = j;
    }

    RankedPool {
        rank_sums,
        sizes: groups.iter().map(|g| g.len()).collect(),
        total_n,
        tie_term,
    }
}

/// Two-sided Mann-Whitney U test via the tie-corrected normal
/// approximation with continuity correction.
///
/// Fails with `Degenerate` when every pooled observation is tied, which
/// collapses the null variance to zero.
pub fn mann_whitney_u(a: &[f64], b: &[f64]) -> Result<TestSummary, StatError> {
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

    let pool = pool_ranks(&[a, b]);
    let n1f = n1 as f64;
    let n2f = n2 as f64;
    let nf = pool.total_n as f64;

    let u1 = pool.rank_sums[0] - n1f * (n1f + 1.0) / 2.0;

    let mean_u = n1f * n2f / 2.0;
    let sigma_sq = n1f * n2f / 12.0 * (nf + 1.0 - pool.tie_term / (nf * (nf - 1.0)));
    if sigma_sq <= 0.0 {
        return Err(StatError::Degenerate(
            "all pooled observations tied".into(),
        ));
    }

    // Continuity correction toward the mean.
    let diff = u1 - mean_u;
    let corrected = (diff.abs() - 0.5).max(0.0);
    let z = diff.signum() * corrected / sigma_sq.sqrt();
    let p_value = (2.0 * (1.0 - standard_normal_cdf(z.abs()))).clamp(0.0, 1.0);

    Ok(TestSummary {
        statistic: u1,
        df: None,
        p_value,
    })
}

/// Kruskal-Wallis H test across all groups, tie-corrected, with the
/// chi-squared(k - 1) null distribution.
pub fn kruskal_wallis(groups: &[&[f64]]) -> Result<TestSummary, StatError> {
    let k = groups.len();
    if k < 2 {
        return Err(StatError::TooFewGroups { min: 2, got: k });
    }
    for g in groups {
        if g.len() < 2 {
            return Err(StatError::TooFewValues { min: 2, got: g.len() });
        }
        check_finite(g)?;
    }

    let pool = pool_ranks(groups);
    let nf = pool.total_n as f64;
    let mean_rank = (nf + 1.0) / 2.0;

    let mut h = 0.0;
    for (gi, &size) in pool.sizes.iter().enumerate() {
        let ni = size as f64;
        let group_mean_rank = pool.rank_sums[gi] / ni;
        h += ni * (group_mean_rank - mean_rank).powi(2);
    }
    h *= 12.0 / (nf * (nf + 1.0));

    let correction = 1.0 - pool.tie_term / (nf * nf * nf - nf);
    if correction <= 1e-15 {
        return Err(StatError::Degenerate(
            "all pooled observations tied".into(),
        ));
    }
    h /= correction;

    let df = (k - 1) as f64;
    let dist = ChiSquared::new(df).map_err(|e| StatError::Distribution(e.to_string()))?;
    let p_value = (1.0 - dist.cdf(h)).clamp(0.0, 1.0);

    Ok(TestSummary {
        statistic: h,
        df: Some(df),
        p_value,
    })
}
