//! Benchmark for plane generation performance.
//!
//! TARGET: a full plane (populate, repair, collectibles, spawn) well under
//! one 60 Hz frame
//!
//! Run with: cargo bench --package strider_procedural --bench generation_benchmark

#![allow(missing_docs)]

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use strider_core::{ObjectPool, ObjectPoolProvider};
use strider_procedural::{
    BoundaryMemory, CollectiblePlanner, GridPopulator, LevelConfig, LevelSeed, PlaneSequencer,
    SegmentGrid,
};
use strider_shared::Vec3;

fn benchmark_grid_passes(c: &mut Criterion) {
    let config = LevelConfig::default();
    let populator = GridPopulator::from_config(&config);
    let planner = CollectiblePlanner::new(config.collectibles.clone(), config.probabilities.collectible);
    let mut grid = SegmentGrid::new(3, 10);
    let mut boundary = BoundaryMemory::new(3);
    let mut rng = LevelSeed::new(42).rng();

    c.bench_function("grid_passes", |b| {
        b.iter(|| {
            populator.populate_platforms(&mut grid, &mut boundary, &mut rng);
            populator.populate_obstacles(&mut grid, &mut rng);
            black_box(planner.plan(&grid, &mut rng))
        });
    });
}

fn benchmark_full_plane(c: &mut Criterion) {
    let config = LevelConfig::default();
    let prefabs = config.prefabs.clone();

    let mut pool = ObjectPool::new(Vec3::new(0.0, -100.0, 0.0));
    pool.register(&prefabs.ground_plane, 4).unwrap();
    pool.register(&prefabs.platform, 64).unwrap();
    pool.register(&prefabs.platform_with_ramp, 32).unwrap();
    for name in &prefabs.obstacles {
        pool.register(name, 16).unwrap();
    }
    pool.register(&prefabs.collectible, 128).unwrap();

    let mut sequencer = PlaneSequencer::with_config_offsets(config, pool, LevelSeed::new(42)).unwrap();
    sequencer.generate_next().unwrap();

    let mut group = c.benchmark_group("plane_generation");
    group.throughput(Throughput::Elements(1));
    group.bench_function("generate_and_recycle", |b| {
        b.iter(|| {
            let previous = sequencer.last_plane();
            let report = black_box(sequencer.generate_next().unwrap());
            // Hand the plane behind back so the pool never runs dry
            if let (Some(previous), Some(_)) = (previous, report) {
                let pool = sequencer.pool_mut();
                pool.release_children(previous.instance);
                pool.release(&prefabs.ground_plane, previous.instance);
            }
        });
    });

    group.finish();
}

criterion_group!(benches, benchmark_grid_passes, benchmark_full_plane);
criterion_main!(benches);
