//! Benchmarks for the 3D predicates against the reference crates.

use adaptive_predicates::predicates::exact;
use adaptive_predicates::{insphere, orient3d};
use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

const SAMPLE_COUNT: usize = 1_000;

type Point = [f64; 3];

fn coord(p: &Point) -> robust::Coord3D<f64> {
    robust::Coord3D {
        x: p[0],
        y: p[1],
        z: p[2],
    }
}

fn bench_orient3d(c: &mut Criterion) {
    let random = generate_random_samples(SAMPLE_COUNT);
    let coplanar = generate_coplanar_samples(SAMPLE_COUNT);

    let mut group = c.benchmark_group("orient3d");
    for (label, samples) in [("random", &random), ("coplanar", &coplanar)] {
        group.bench_function(format!("adaptive_{label}"), |b| {
            b.iter(|| {
                for p in black_box(samples) {
                    black_box(orient3d(&p[0], &p[1], &p[2], &p[3]));
                }
            })
        });
        group.bench_function(format!("robust_{label}"), |b| {
            b.iter(|| {
                for p in black_box(samples) {
                    black_box(robust::orient3d(
                        coord(&p[0]),
                        coord(&p[1]),
                        coord(&p[2]),
                        coord(&p[3]),
                    ));
                }
            })
        });
    }
    group.finish();
}

fn bench_insphere(c: &mut Criterion) {
    let random = generate_random_samples(SAMPLE_COUNT);
    let cospherical = generate_cospherical_samples(SAMPLE_COUNT);

    let mut group = c.benchmark_group("insphere");
    for (label, samples) in [("random", &random), ("cospherical", &cospherical)] {
        group.bench_function(format!("adaptive_{label}"), |b| {
            b.iter(|| {
                for p in black_box(samples) {
                    black_box(insphere(&p[0], &p[1], &p[2], &p[3], &p[4]));
                }
            })
        });
        group.bench_function(format!("geometry_predicates_{label}"), |b| {
            b.iter(|| {
                for p in black_box(samples) {
                    black_box(geometry_predicates::insphere(p[0], p[1], p[2], p[3], p[4]));
                }
            })
        });
        group.bench_function(format!("robust_{label}"), |b| {
            b.iter(|| {
                for p in black_box(samples) {
                    black_box(robust::insphere(
                        coord(&p[0]),
                        coord(&p[1]),
                        coord(&p[2]),
                        coord(&p[3]),
                        coord(&p[4]),
                    ));
                }
            })
        });
    }
    group.bench_function("exact_expansion", |b| {
        b.iter(|| {
            for p in black_box(&random[..64]) {
                black_box(exact::insphere(&p[0], &p[1], &p[2], &p[3], &p[4]));
            }
        })
    });
    group.finish();
}

criterion_group!(benches, bench_orient3d, bench_insphere);
criterion_main!(benches);

fn generate_random_samples(count: usize) -> Vec<[Point; 5]> {
    let mut state = 0x1234_5678_9abc_def0u64;
    (0..count)
        .map(|_| std::array::from_fn(|_| point(&mut state)))
        .collect()
}

/// The first four points share the plane z = x + y.
fn generate_coplanar_samples(count: usize) -> Vec<[Point; 5]> {
    let mut state = 0x0fed_cba9_8765_4321u64;
    (0..count)
        .map(|_| {
            std::array::from_fn(|_| {
                let [x, y, _] = point(&mut state);
                [x, y, x + y]
            })
        })
        .collect()
}

/// Lattice points of the sphere of radius 3 around a random integer center.
fn generate_cospherical_samples(count: usize) -> Vec<[Point; 5]> {
    const OFFSETS: [Point; 5] = [
        [3.0, 0.0, 0.0],
        [0.0, 3.0, 0.0],
        [0.0, 0.0, 3.0],
        [-3.0, 0.0, 0.0],
        [1.0, 2.0, 2.0],
    ];
    let mut state = 0x5555_aaaa_5555_aaaau64;
    (0..count)
        .map(|_| {
            let center = point(&mut state).map(f64::round);
            OFFSETS.map(|o| [center[0] + o[0], center[1] + o[1], center[2] + o[2]])
        })
        .collect()
}

fn point(state: &mut u64) -> Point {
    [lcg(state), lcg(state), lcg(state)]
}

fn lcg(state: &mut u64) -> f64 {
    *state = state.wrapping_mul(6364136223846793005).wrapping_add(1);
    let val = ((*state >> 32) as f64) / (u32::MAX as f64);
    (val * 2000.0) - 1000.0
}
