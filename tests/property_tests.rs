// Property-based checks: the pipeline is total over finite input, the
// selector is total over its whole domain, and significance labels are
// monotone in the p-value.

use biostat::{select, AnalysisError, SampleSet, Selection, SignificanceLabel, TestChoice};
use proptest::prelude::*;

fn finite_group() -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(-1e6..1e6f64, 3..10)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn prop_analyze_is_total_over_finite_groups(
        groups in prop::collection::vec(finite_group(), 2..4)
    ) {
        let mut set = SampleSet::default();
        for (i, values) in groups.into_iter().enumerate() {
            set.insert(format!("G{i}"), values);
        }
        match biostat::analyze(&set) {
            Ok(result) => {
                if let Some(p) = result.p_value {
                    prop_assert!((0.0..=1.0).contains(&p), "p = {p}");
                    prop_assert!(result.label.is_some());
                }
                if result.p_value.is_none() {
                    prop_assert!(result.limitation.is_some());
                }
                // Post-hoc tables exist only behind a significant omnibus
                // result on three or more groups.
                if let Some(table) = &result.post_hoc {
                    prop_assert!(result.p_value.unwrap() < 0.05);
                    prop_assert!(!table.comparisons.is_empty());
                    for cmp in &table.comparisons {
                        prop_assert!((0.0..=1.0).contains(&cmp.adjusted_p));
                    }
                }
            }
            Err(AnalysisError::InsufficientData(_)) => {}
        }
    }

    #[test]
    fn prop_selector_is_total(count in 2usize..10, normal in any::<bool>(), equal in any::<bool>()) {
        match select(count, normal, equal) {
            Selection::Chosen(choice) => {
                if count == 2 {
                    prop_assert_ne!(choice, TestChoice::AnovaTukey);
                    prop_assert_ne!(choice, TestChoice::KruskalDunn);
                } else {
                    prop_assert_ne!(choice, TestChoice::StudentT);
                    prop_assert_ne!(choice, TestChoice::WelchT);
                    prop_assert_ne!(choice, TestChoice::MannWhitneyU);
                }
            }
            Selection::Unsupported { .. } => {
                // The only cell without a test: 3+ normal groups with
                // heterogeneous variances.
                prop_assert!(count >= 3 && normal && !equal);
            }
        }
    }

    #[test]
    fn prop_labels_are_monotone_in_p(a in 0.0..=1.0f64, b in 0.0..=1.0f64) {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        let label_lo = SignificanceLabel::from_p_value(lo);
        let label_hi = SignificanceLabel::from_p_value(hi);
        prop_assert!(label_lo <= label_hi, "{lo} -> {label_lo}, {hi} -> {label_hi}");
    }

    #[test]
    fn prop_label_boundaries_are_strict(p in prop::sample::select(vec![0.001, 0.01, 0.05])) {
        let at = SignificanceLabel::from_p_value(p);
        let below = SignificanceLabel::from_p_value(p - 1e-9);
        prop_assert!(below < at, "boundary {p} must not label as the tighter tier");
    }
}
