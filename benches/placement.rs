use criterion::{criterion_group, criterion_main, Criterion, black_box};
use rand::SeedableRng;
use rand::rngs::StdRng;

use knoll::entity::{Creature, WanderController, WanderParams, trunk_obstacles};
use knoll::generation::{PlacementConfig, PlacementSolver};
use knoll::terrain::{HillTerrain, TerrainMesh};

fn bench_placement_default(c: &mut Criterion) {
    let terrain = HillTerrain::default();
    let solver = PlacementSolver::new(PlacementConfig::default(), 240.0);

    c.bench_function("placement_10_trees", |b| {
        let mut rng = StdRng::seed_from_u64(42);
        b.iter(|| solver.solve(black_box(&terrain), &mut rng));
    });
}

fn bench_placement_crowded(c: &mut Criterion) {
    let terrain = HillTerrain::default();
    let config = PlacementConfig { count: 200, ..Default::default() };
    let solver = PlacementSolver::new(config, 240.0);

    c.bench_function("placement_200_requested", |b| {
        let mut rng = StdRng::seed_from_u64(42);
        b.iter(|| solver.solve(black_box(&terrain), &mut rng));
    });
}

fn bench_wander_tick(c: &mut Criterion) {
    let terrain = HillTerrain::default();
    let mut rng = StdRng::seed_from_u64(7);
    let trees = PlacementSolver::new(PlacementConfig::default(), 240.0).solve(&terrain, &mut rng);
    let obstacles = trunk_obstacles(&trees, 2.5);
    let wander = WanderController::new(WanderParams::default(), 240.0);
    let mut creature = Creature::spawn(&terrain, 0.0, 0.0, 1.0);

    c.bench_function("wander_tick", |b| {
        b.iter(|| wander.tick(&mut creature, &terrain, black_box(&obstacles), &mut rng, 1.0 / 60.0));
    });
}

fn bench_terrain_mesh(c: &mut Criterion) {
    let terrain = HillTerrain::default();

    c.bench_function("terrain_mesh_128x64", |b| {
        b.iter(|| TerrainMesh::build(black_box(&terrain), 240.0, 128, 64));
    });
}

criterion_group!(
    benches,
    bench_placement_default,
    bench_placement_crowded,
    bench_wander_tick,
    bench_terrain_mesh,
);
criterion_main!(benches);
