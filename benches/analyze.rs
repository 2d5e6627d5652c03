// Benchmarks for the analysis pipeline. The studentized-range CDF
// dominates the multi-group path, so it gets its own measurement.

use biostat::analyze_groups;
use biostat::hypothesis::{shapiro_wilk, studentized_range_cdf};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn two_group_pipeline(c: &mut Criterion) {
    let a: Vec<f64> = (0..50).map(|i| 100.0 + f64::from(i % 7)).collect();
    let b: Vec<f64> = (0..50).map(|i| 80.0 + f64::from(i % 5)).collect();
    c.bench_function("analyze_two_groups", |bench| {
        bench.iter(|| {
            analyze_groups([
                ("Control", black_box(a.clone())),
                ("Target", black_box(b.clone())),
            ])
        });
    });
}

fn four_group_pipeline(c: &mut Criterion) {
    let groups: Vec<(String, Vec<f64>)> = (0..4)
        .map(|g| {
            let shift = f64::from(g) * 4.0;
            let values = (0..20)
                .map(|i| shift + f64::from(i % 9) * 0.5)
                .collect::<Vec<_>>();
            (format!("G{g}"), values)
        })
        .collect();
    c.bench_function("analyze_four_groups_with_posthoc", |bench| {
        bench.iter(|| analyze_groups(black_box(groups.clone())));
    });
}

fn shapiro_wilk_large_sample(c: &mut Criterion) {
    let values: Vec<f64> = (0..500).map(|i| (f64::from(i) * 0.37).sin() * 10.0).collect();
    c.bench_function("shapiro_wilk_n500", |bench| {
        bench.iter(|| shapiro_wilk(black_box(&values)));
    });
}

fn studentized_range(c: &mut Criterion) {
    c.bench_function("studentized_range_cdf", |bench| {
        bench.iter(|| studentized_range_cdf(black_box(3.5), black_box(4), black_box(36.0)));
    });
}

criterion_group!(
    benches,
    two_group_pipeline,
    four_group_pipeline,
    shapiro_wilk_large_sample,
    studentized_range
);
criterion_main!(benches);
