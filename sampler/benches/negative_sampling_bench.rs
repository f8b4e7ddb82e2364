use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use linkprep_core::config::SelfPairPolicy;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use sampler::{NegativeSampler, NoopObserver, SamplerOptions};
use storage::index::{AdjacencyGraph, GraphOptions};

const ORDER: usize = 1_000;
const SLOTS: usize = 10_000;

/// Random graph with roughly `density` of all pairs connected.
fn random_graph(density: f64, seed: u64) -> AdjacencyGraph {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut edges = Vec::new();
    for u in 0..ORDER as u64 {
        for v in (u + 1)..ORDER as u64 {
            if rng.gen_bool(density) {
                edges.push((u, v));
            }
        }
    }
    AdjacencyGraph::build(ORDER, edges, GraphOptions::default()).unwrap()
}

pub fn negative_sampling_benchmark(c: &mut Criterion) {
    let sampler = NegativeSampler::new(SamplerOptions {
        max_retries_per_slot: 1_000_000,
        self_pairs: SelfPairPolicy::Reject,
    });

    let mut group = c.benchmark_group("negative_sampling");
    group.throughput(Throughput::Elements(SLOTS as u64));
    for density in [0.001, 0.1, 0.5, 0.9] {
        let graph = random_graph(density, 17);
        group.bench_with_input(BenchmarkId::from_parameter(density), &graph, |b, graph| {
            b.iter(|| {
                let mut rng = StdRng::seed_from_u64(0);
                let set = sampler
                    .sample(graph, SLOTS, &mut rng, &mut NoopObserver)
                    .unwrap();
                black_box(set.pairs.len())
            })
        });
    }
    group.finish();
}

criterion_group!(benches, negative_sampling_benchmark);
criterion_main!(benches);
