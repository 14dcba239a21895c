/*
 * Particle Simulation Benchmark
 *
 * Measures the spatial grid build, the neighbor query and a full simulation
 * step for growing particle counts on the reference domain.
 */

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use glam::DVec2;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::time::Duration;

use particle_life::{SimulationEngine, SimulationParams, SpatialGrid};

const WIDTH: f64 = 1800.0;
const HEIGHT: f64 = 1200.0;
const R_MAX: f64 = 172.0;

fn random_positions(n: usize) -> Vec<DVec2> {
    let mut rng = SmallRng::seed_from_u64(0xBE7C);
    (0..n)
        .map(|_| DVec2::new(rng.gen_range(0.0..WIDTH), rng.gen_range(0.0..HEIGHT)))
        .collect()
}

fn bench_spatial_grid(c: &mut Criterion) {
    let mut group = c.benchmark_group("spatial_grid");

    for num_particles in [600, 1800, 3600].iter() {
        let positions = random_positions(*num_particles);

        group.bench_with_input(BenchmarkId::new("build", num_particles), &positions, |b, positions| {
            b.iter(|| SpatialGrid::build(R_MAX, WIDTH, HEIGHT, positions.iter().copied()));
        });

        let grid = SpatialGrid::build(R_MAX, WIDTH, HEIGHT, positions.iter().copied()).unwrap();
        group.bench_with_input(BenchmarkId::new("neighbors", num_particles), &positions, |b, positions| {
            let mut out = Vec::new();
            b.iter(|| {
                for (i, &position) in positions.iter().enumerate() {
                    grid.collect_neighbors(i, position, &mut out);
                    black_box(out.len());
                }
            });
        });
    }

    group.finish();
}

fn bench_step(c: &mut Criterion) {
    let mut group = c.benchmark_group("step");

    for per_group in [100, 300, 600].iter() {
        group.bench_with_input(BenchmarkId::from_parameter(per_group * 6), per_group, |b, &n| {
            let mut engine = SimulationEngine::new(SimulationParams {
                particles_per_group: n,
                seed: Some(1),
                ..Default::default()
            })
            .unwrap();

            b.iter(|| {
                engine.step();
                black_box(engine.particles().len());
            });
        });
    }

    group.finish();
}

// Configure the benchmarks
criterion_group! {
    name = benches;
    config = Criterion::default()
        .sample_size(10)
        .measurement_time(Duration::from_secs(5))
        .warm_up_time(Duration::from_secs(1));
    targets = bench_spatial_grid, bench_step
}

criterion_main!(benches);
