// One-way ANOVA F-test.
//
// F = MS_between / MS_within, p-value from the F distribution with
// (k - 1, N - k) degrees of freedom. The summary keeps the within-group
// mean square and per-group layout because Tukey's HSD reuses them.

use super::{check_finite, mean, StatError};
use statrs::distribution::{ContinuousCDF, FisherSnedecor};

/// Omnibus result of a one-way ANOVA.
#[derive(Debug, Clone, PartialEq)]
pub struct AnovaSummary {
    pub f_statistic: f64,
    pub df_between: usize,
    pub df_within: usize,
    pub p_value: f64,
    /// Within-group mean square, the pooled error variance.
    pub ms_within: f64,
    pub group_means: Vec<f64>,
    pub group_sizes: Vec<usize>,
}

/// Test the null hypothesis that all group means are equal.
pub fn one_way_anova(groups: &[&[f64]]) -> Result<AnovaSummary, StatError> {
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

    let total_n: usize = groups.iter().map(|g| g.len()).sum();
    let df_between = k - 1;
    let df_within = total_n - k;
    if df_within == 0 {
        return Err(StatError::Degenerate("no within-group degrees of freedom".into()));
    }

    let grand_mean = groups.iter().flat_map(|g| g.iter()).sum::<f64>() / total_n as f64;
    let group_means: Vec<f64> = groups.iter().map(|g| mean(g)).collect();
    let group_sizes: Vec<usize> = groups.iter().map(|g| g.len()).collect();

    let ss_between: f64 = groups
        .iter()
        .zip(&group_means)
        .map(|(g, &gm)| g.len() as f64 * (gm - grand_mean).powi(2))
        .sum();
    let ss_within: f64 = groups
        .iter()
        .zip(&group_means)
        .map(|(g, &gm)| g.iter().map(|&x| (x - gm).powi(2)).sum::<f64>())
        .sum();

    let ms_between = ss_between / df_between as f64;
    let ms_within = ss_within / df_within as f64;

    if ms_within < 1e-300 {
        if ss_between < 1e-300 {
            return Err(StatError::Degenerate(
                "zero variance within and between groups".into(),
            ));
        }
        // Perfect separation with no within-group spread.
        return Ok(AnovaSummary {
            f_statistic: f64::INFINITY,
            df_between,
            df_within,
            p_value: 0.0,
            ms_within,
            group_means,
            group_sizes,
        });
    }

    let f_statistic = ms_between / ms_within;
    let dist = FisherSnedecor::new(df_between as f64, df_within as f64)
        .map_err(|e| StatError::Distribution(e.to_string()))?;
    let p_value = (1.0 - dist.cdf(f_statistic)).clamp(0.0, 1.0);

    Ok(AnovaSummary {
        f_statistic,
        df_between,
        df_within,
        p_value,
        ms_within,
        group_means,
        group_sizes,
    })
}
