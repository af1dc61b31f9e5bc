//! Search and aggregation benchmarks.
//!
//! Grid graphs give a predictable shape: every interior node has four
//! bidirectional neighbors, and the corner-to-corner route crosses the whole
//! grid.
//!
//! ```sh
//! cargo bench -p waypath-analytics --bench analytics
//! ```

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use waypath_analytics::metrics::{betweenness, closeness};
use waypath_analytics::search;
use waypath_core::WeightedGraph;
use waypath_core::graph::reference::travel_graph;

const SIDES: [usize; 3] = [4, 8, 16];

fn grid(side: usize) -> WeightedGraph {
    let label = |r: usize, c: usize| format!("r{r}c{c}");
    let mut builder = WeightedGraph::builder();
    for r in 0..side {
        for c in 0..side {
            // Deterministic, uneven weights so ties are rare.
            let weight = |dr: usize, dc: usize| ((r * 7 + c * 13 + dr * 3 + dc * 5) % 9 + 1) as f64;
            if c + 1 < side {
                builder.edge(label(r, c), label(r, c + 1), weight(0, 1));
                builder.edge(label(r, c + 1), label(r, c), weight(0, 2));
            }
            if r + 1 < side {
                builder.edge(label(r, c), label(r + 1, c), weight(1, 0));
                builder.edge(label(r + 1, c), label(r, c), weight(2, 0));
            }
        }
    }
    builder.build().expect("grid is valid")
}

fn bench_search(c: &mut Criterion) {
    let mut group = c.benchmark_group("search.corner_to_corner");
    for side in SIDES {
        let g = grid(side);
        let target = format!("r{0}c{0}", side - 1);
        group.throughput(Throughput::Elements(g.edge_count() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(side), &g, |b, g| {
            b.iter(|| black_box(search(g, "r0c0", &target).expect("search")));
        });
    }
    group.finish();
}

fn bench_betweenness(c: &mut Criterion) {
    let mut group = c.benchmark_group("betweenness");
    group.sample_size(20);

    let travel = travel_graph().expect("reference graph");
    group.bench_function("travel", |b| {
        b.iter(|| black_box(betweenness(&travel).expect("tally")));
    });

    for side in &SIDES[..2] {
        let g = grid(*side);
        group.bench_with_input(BenchmarkId::new("grid", side), &g, |b, g| {
            b.iter(|| black_box(betweenness(g).expect("tally")));
        });
    }
    group.finish();
}

fn bench_closeness(c: &mut Criterion) {
    let mut group = c.benchmark_group("closeness");
    for side in SIDES {
        let g = grid(side);
        group.bench_with_input(BenchmarkId::new("grid", side), &g, |b, g| {
            b.iter(|| black_box(closeness(g).expect("closeness")));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_search, bench_betweenness, bench_closeness);
criterion_main!(benches);
