use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use crr_methods::{european_value, snell_envelope, BinomialModel, BinomialParams};

fn crr_params(steps: usize) -> BinomialParams {
    // σ = 20 %, r = 5 %, T = 1 year split into `steps` periods.
    let dt = 1.0 / steps as f64;
    let up = (0.20 * dt.sqrt()).exp();
    BinomialParams::new(up, 1.0 / up, (0.05 * dt).exp() - 1.0, 100.0, steps)
}

fn bench_model_construction(c: &mut Criterion) {
    let mut group = c.benchmark_group("model_construction");
    for steps in [50, 200, 500] {
        group.bench_with_input(BenchmarkId::from_parameter(steps), &steps, |b, &steps| {
            b.iter(|| BinomialModel::new(black_box(crr_params(steps))).unwrap())
        });
    }
    group.finish();
}

fn bench_backward_induction(c: &mut Criterion) {
    let put = |s: f64| (100.0 - s).max(0.0);
    let mut group = c.benchmark_group("backward_induction");
    for steps in [50, 200, 500] {
        let model = BinomialModel::new(crr_params(steps)).unwrap();
        group.bench_with_input(BenchmarkId::new("american", steps), &model, |b, model| {
            b.iter(|| snell_envelope(black_box(model), &put).unwrap().value())
        });
        group.bench_with_input(BenchmarkId::new("european", steps), &model, |b, model| {
            b.iter(|| european_value(black_box(model), &put).unwrap())
        });
    }
    group.finish();
}

criterion_group!(benches, bench_model_construction, bench_backward_induction);
criterion_main!(benches);
