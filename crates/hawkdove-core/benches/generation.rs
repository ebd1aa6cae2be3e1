use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use hawkdove_core::{initial_grid, Game, GridDims, Neighborhood, Simulation};

fn bench_step(c: &mut Criterion) {
    let mut group = c.benchmark_group("hawkdove-core/step");

    for &side in &[70u32, 256u32] {
        for kind in [Neighborhood::Moore, Neighborhood::VonNeumann] {
            let dims = GridDims::square(side).expect("non-empty lattice");
            let grid = initial_grid(dims, 2, 0).expect("two strategies");
            let mut sim = Simulation::new(grid, Game::HawkDove.payoff(1.6), kind, 0)
                .expect("payoff matches strategies");

            group.bench_with_input(
                BenchmarkId::new(format!("{kind:?}"), side),
                &side,
                |b, &_side| {
                    b.iter(|| {
                        let grid = sim.step().expect("step");
                        black_box(grid.cells()[0]);
                    })
                },
            );
        }
    }

    group.finish();
}

criterion_group!(benches, bench_step);
criterion_main!(benches);
