//! Criterion benchmarks for the CSR engine
//!
//! Covers:
//! - CSR construction from an edge slice and from edge-list text
//! - Neighbor lookups
//! - Bounded BFS at increasing depth
//! - Max-degree scan

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use edgescope::{bounded_bfs, max_degree_node, AdjacencyStore, Graph, LoadOptions, NodeId};
use std::fmt::Write;
use std::hint::black_box;

/// Generate scale-free-ish graph (Barabási-Albert model approximation)
fn generate_scale_free_graph(num_nodes: usize, edges_per_node: usize) -> Vec<(NodeId, NodeId)> {
    let mut edges = Vec::new();
    let mut rng_state = 12345_u64; // Simple LCG for reproducibility

    for node in 0..num_nodes {
        for _ in 0..edges_per_node {
            rng_state = rng_state.wrapping_mul(1103515245).wrapping_add(12345);
            let target = (rng_state % num_nodes as u64) as u32;

            if target != node as u32 {
                edges.push((NodeId(node as u32), NodeId(target)));
            }
        }
    }

    edges
}

fn to_edge_list_text(edges: &[(NodeId, NodeId)]) -> String {
    let mut text = String::from("# generated\n");
    for (u, v) in edges {
        let _ = writeln!(text, "{u} {v}");
    }
    text
}

/// Benchmark: CSR construction
fn bench_csr_construction(c: &mut Criterion) {
    let mut group = c.benchmark_group("csr_construction");

    for size in [1_000, 10_000, 100_000].iter() {
        let edges = generate_scale_free_graph(*size, 5);
        let text = to_edge_list_text(&edges);

        group.bench_with_input(BenchmarkId::new("from_edges", size), &edges, |b, edges| {
            b.iter(|| black_box(AdjacencyStore::from_edges(black_box(edges))));
        });

        group.bench_with_input(BenchmarkId::new("two_pass_text", size), &text, |b, text| {
            b.iter(|| {
                let graph = Graph::from_seekable(
                    std::io::Cursor::new(black_box(text.as_bytes())),
                    "bench",
                    &LoadOptions::default(),
                )
                .unwrap();
                black_box(graph);
            });
        });
    }

    group.finish();
}

/// Benchmark: Bounded BFS by depth
fn bench_bounded_bfs(c: &mut Criterion) {
    let mut group = c.benchmark_group("bounded_bfs");

    let store = AdjacencyStore::from_edges(&generate_scale_free_graph(100_000, 5));

    for depth in [1_u32, 2, 3, 6].iter() {
        group.bench_with_input(BenchmarkId::new("depth", depth), depth, |b, &depth| {
            b.iter(|| black_box(bounded_bfs(black_box(&store), NodeId(0), depth).unwrap()));
        });
    }

    group.finish();
}

/// Benchmark: Neighbor and degree lookups
fn bench_neighbor_queries(c: &mut Criterion) {
    let mut group = c.benchmark_group("neighbor_queries");

    let store = AdjacencyStore::from_edges(&generate_scale_free_graph(10_000, 5));

    group.bench_function("neighbors_of", |b| {
        b.iter(|| {
            for node in 0..1_000 {
                black_box(store.neighbors_of(NodeId(node)).unwrap());
            }
        });
    });

    group.bench_function("max_degree_scan", |b| {
        b.iter(|| black_box(max_degree_node(black_box(&store)).unwrap()));
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_csr_construction,
    bench_bounded_bfs,
    bench_neighbor_queries
);
criterion_main!(benches);
