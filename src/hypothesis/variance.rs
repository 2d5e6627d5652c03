// Levene's test for variance homogeneity, median-centered
// (Brown-Forsythe variant), evaluated across all groups at once.
//
// The statistic is a one-way ANOVA applied to the absolute deviations
// from each group's median; the median center makes the test robust to
// non-normal groups.

use super::{median, one_way_anova, StatError, TestSummary};

/// Test the null hypothesis that all groups share one variance.
pub fn levene(groups: &[&[f64]]) -> Result<TestSummary, StatError> {
    if groups.len() < 2 {
        return Err(StatError::TooFewGroups {
            min: 2,
            got: groups.len(),
        });
    }

    let deviations: Vec<Vec<f64>> = groups
        .iter()
        .map(|g| {
            let center = median(g);
            g.iter().map(|&x| (x - center).abs()).collect()
        })
        .collect();
    let deviation_slices: Vec<&[f64]> = deviations.iter().map(Vec::as_slice).collect();

    let anova = one_way_anova(&deviation_slices)?;
    Ok(TestSummary {
        statistic: anova.f_statistic,
        df: Some(anova.df_between as f64),
        p_value: anova.p_value,
    })
}
