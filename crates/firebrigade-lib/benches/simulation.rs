use criterion::{criterion_group, criterion_main, Criterion};
use firebrigade_lib::{
    distances_from, generate_graph, path, LocationGraph, Simulation, SimulationConfig,
};
use once_cell::sync::Lazy;
use std::hint::black_box;

static GRAPH: Lazy<LocationGraph> =
    Lazy::new(|| generate_graph(400, 1_600, 10, 7).expect("valid sizing"));
static CONFIG: Lazy<SimulationConfig> = Lazy::new(|| {
    SimulationConfig::new(4)
        .with_stations([0, 100, 200, 300])
        .with_water([50, 150, 250, 350])
});

fn benchmark_simulation(c: &mut Criterion) {
    let graph = &*GRAPH;

    c.bench_function("path_0_399", |b| {
        b.iter(|| {
            let route = path(graph, 0, 399);
            black_box(route.map(|route| route.cost))
        });
    });

    c.bench_function("distances_from_0", |b| {
        b.iter(|| {
            let tree = distances_from(graph, 0);
            black_box(tree.distance(399))
        });
    });

    c.bench_function("run_from_199", |b| {
        let config = &*CONFIG;
        b.iter(|| {
            let mut sim = Simulation::with_graph(graph.clone(), config).expect("valid setup");
            let outcome = sim.run(199).expect("run completes");
            black_box(outcome.ticks)
        });
    });
}

criterion_group!(benches, benchmark_simulation);
criterion_main!(benches);
