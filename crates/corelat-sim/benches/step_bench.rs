// ─────────────────────────────────────────────────────────────────────
// Corelat — Step Benchmarks
// License: MIT
// ─────────────────────────────────────────────────────────────────────
use corelat_sim::burnup::{BurnupModel, HeuristicBurnup};
use corelat_sim::engine::Simulator;
use corelat_sim::flux::diffusion_flux;
use corelat_sim::generate::random_layout;
use corelat_sim::grid::CoreGrid;
use corelat_types::config::CoreConfig;
use criterion::{criterion_group, criterion_main, Criterion};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::hint::black_box;
use std::sync::Arc;

fn build_grid(n: usize) -> (CoreGrid, CoreConfig) {
    let cfg = CoreConfig::default();
    let mut rng = StdRng::seed_from_u64(2026);
    let layout = random_layout(n, n, &mut rng);
    let burnup: Arc<dyn BurnupModel> = Arc::new(HeuristicBurnup);
    let grid = CoreGrid::from_layout(&layout, &cfg, &burnup).unwrap();
    (grid, cfg)
}

fn bench_step_20(c: &mut Criterion) {
    let (grid, cfg) = build_grid(20);
    c.bench_function("step_20x20", |b| {
        b.iter_batched(
            || Simulator::new(grid.clone(), cfg.clone()),
            |mut sim| black_box(sim.step().unwrap()),
            criterion::BatchSize::SmallInput,
        )
    });
}

fn bench_flux_30(c: &mut Criterion) {
    let (grid, cfg) = build_grid(30);
    c.bench_function("diffusion_flux_30x30", |b| {
        b.iter(|| black_box(diffusion_flux(&grid, &cfg)))
    });
}

criterion_group!(benches, bench_step_20, bench_flux_30);
criterion_main!(benches);
