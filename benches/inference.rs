//! Benchmarks for deviance inference

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use fuzzy_deviance::DevianceModel;

fn model_construction(c: &mut Criterion) {
    c.bench_function("model_new", |b| b.iter(|| black_box(DevianceModel::new())));
}

fn evaluation(c: &mut Criterion) {
    let model = DevianceModel::new().expect("model builds");
    let mut group = c.benchmark_group("compute_deviance");

    for (name, scores) in [
        ("single_rule", (0., 0., 0.)),
        ("overlapping", (37.5, 30., 60.)),
        ("no_rule_fired", (100., 0., 0.)),
    ] {
        group.bench_with_input(BenchmarkId::from_parameter(name), &scores, |b, &(a, s, f)| {
            b.iter(|| black_box(model.compute_deviance(black_box(a), black_box(s), black_box(f))))
        });
    }

    group.finish();
}

criterion_group!(benches, model_construction, evaluation);
criterion_main!(benches);
