//! # Classificação de Refletância
//!
//! Custo de classificar uma leitura e de derivar limiares de uma calibração.
//!
//! Run: `cargo bench --bench classify_bench`

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use tilenav_core::prelude::*;
use tilenav_photonic::Thresholds;

fn bench_classify(c: &mut Criterion) {
    let mut group = c.benchmark_group("classify");
    let thresholds = Thresholds::from_config(&NavConfig::default()).unwrap();

    for (name, value) in [("black", 6), ("white", 54), ("indeterminate", 25)] {
        let sample = ReflectanceSample::new(value);
        group.bench_function(name, |b| b.iter(|| black_box(thresholds.classify(black_box(sample)))));
    }

    group.bench_function("sweep_0_100", |b| {
        b.iter(|| {
            (0..=100)
                .map(|v| thresholds.classify(ReflectanceSample::new(v)))
                .filter(|class| class.is_known())
                .count()
        })
    });

    group.finish();
}

fn bench_calibration(c: &mut Criterion) {
    let black = ReflectanceSample::new(6);
    let white = ReflectanceSample::new(54);

    c.bench_function("thresholds_from_calibration", |b| {
        b.iter(|| Thresholds::from_calibration(black_box(black), black_box(white)))
    });
}

criterion_group!(benches, bench_classify, bench_calibration);
criterion_main!(benches);
