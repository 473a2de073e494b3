//! # Detector de Borda
//!
//! Mede a máquina de estados do contador de ladrilhos sobre sequências de
//! amostras sintéticas (faixas limpas e faixas com ruído indeterminado).
//!
//! Run: `cargo bench --bench boundary_bench`

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use tilenav_core::prelude::*;
use tilenav_navigation::BoundaryDetector;
use tilenav_photonic::ColorClass;

/// `tiles` ladrilhos de `width` amostras por cor, com uma amostra indeterminada
/// a cada `noise_every` (0 = sem ruído)
fn stripes(tiles: usize, width: usize, noise_every: usize) -> Vec<ColorClass> {
    (0..tiles * 2 * width)
        .map(|i| {
            if noise_every > 0 && i % noise_every == noise_every - 1 {
                ColorClass::Indeterminate
            } else if (i / width) % 2 == 0 {
                ColorClass::Black
            } else {
                ColorClass::White
            }
        })
        .collect()
}

fn count(detector: &mut BoundaryDetector, samples: &[ColorClass]) -> u32 {
    samples.iter().filter(|&&class| detector.observe(class)).count() as u32
}

fn bench_observe(c: &mut Criterion) {
    let mut group = c.benchmark_group("boundary_observe");

    for tiles in [1usize, 15, 100] {
        let clean = stripes(tiles, 20, 0);
        group.bench_with_input(BenchmarkId::new("clean", tiles), &clean, |b, samples| {
            b.iter(|| {
                let mut detector = BoundaryDetector::new(BoundaryEdge::BlackToWhite, 2);
                black_box(count(&mut detector, samples))
            })
        });

        let noisy = stripes(tiles, 20, 7);
        group.bench_with_input(BenchmarkId::new("noisy", tiles), &noisy, |b, samples| {
            b.iter(|| {
                let mut detector = BoundaryDetector::new(BoundaryEdge::BlackToWhite, 2);
                black_box(count(&mut detector, samples))
            })
        });
    }

    group.finish();
}

fn bench_edges(c: &mut Criterion) {
    let mut group = c.benchmark_group("boundary_edge");
    let samples = stripes(15, 20, 0);

    for edge in [BoundaryEdge::BlackToWhite, BoundaryEdge::WhiteToBlack] {
        group.bench_function(format!("{edge:?}"), |b| {
            b.iter(|| {
                let mut detector = BoundaryDetector::new(edge, 2);
                black_box(count(&mut detector, &samples))
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_observe, bench_edges);
criterion_main!(benches);
