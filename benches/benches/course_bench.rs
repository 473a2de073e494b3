//! # Curso Simulado
//!
//! Laços completos sobre o curso simulado: contagem de ladrilhos e varredura.
//! O relógio é virtual, então o custo medido é só o do laço de controle.
//!
//! Run: `cargo bench --bench course_bench`

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use tilenav_core::prelude::*;
use tilenav_navigation::{CourseLayout, ObjectLocator, ObjectPlacement, SimCourse, TileCounter};

fn bench_tiles(c: &mut Criterion) {
    let mut group = c.benchmark_group("move_for_tiles");
    let config = NavConfig::default();

    for (name, scale) in [("straight", 1.0), ("drifting", 0.98)] {
        let layout = CourseLayout {
            right_wheel_scale: scale,
            ..Default::default()
        };
        group.bench_function(name, |b| {
            b.iter(|| {
                let course = SimCourse::new(layout, &config).unwrap();
                let mut robot = course.robot(config.clone()).unwrap();
                let run = TileCounter::from_config(&config)
                    .move_for_tiles(&mut robot, 5, 180.0, HeadingState::default())
                    .unwrap();
                black_box(run)
            })
        });
    }

    group.finish();
}

fn bench_sweep(c: &mut Criterion) {
    let config = NavConfig::default();
    let layout = CourseLayout {
        object: Some(ObjectPlacement {
            bearing_deg: 40.0,
            range_mm: 600.0,
            ..Default::default()
        }),
        ..Default::default()
    };

    c.bench_function("locate_off_axis", |b| {
        b.iter(|| {
            let course = SimCourse::new(layout, &config).unwrap();
            let mut robot = course.robot(config.clone()).unwrap();
            let result = ObjectLocator::from_config(&config)
                .locate(&mut robot, 180.0, DistanceSample::new(800))
                .unwrap();
            black_box(result)
        })
    });
}

criterion_group!(benches, bench_tiles, bench_sweep);
criterion_main!(benches);
