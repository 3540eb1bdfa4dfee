use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::Arc;
use tricount::generate::random_graph;
use tricount::{count_triangles, from_edges, Backend, CountConfig, CsrStore, Executor, TriangleCounter};

fn random_store(n: usize, density: f64) -> Arc<CsrStore> {
    let mut rng = StdRng::seed_from_u64(42);
    Arc::new(from_edges(n, &random_graph(&mut rng, n, density)).unwrap())
}

/// Benchmark single-threaded counting as graphs grow
fn bench_sequential(c: &mut Criterion) {
    let mut group = c.benchmark_group("sequential");

    for size in [100, 1000, 4000].iter() {
        let store = random_store(*size, 8.0 / *size as f64);
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| criterion::black_box(count_triangles(&store)));
        });
    }
    group.finish();
}

/// Benchmark every backend at several worker counts on one graph
fn bench_backends(c: &mut Criterion) {
    let mut group = c.benchmark_group("backends");
    let store = random_store(2000, 0.01);

    for backend in [Backend::Rayon, Backend::Scoped, Backend::Async] {
        for workers in [1usize, 2, 4, 8] {
            // Build the pool once so only the counting is timed
            let executor = Executor::new(backend, workers).unwrap();
            let counter = TriangleCounter::new(CountConfig::new(workers, backend));
            group.bench_with_input(
                BenchmarkId::new(backend.as_str(), workers),
                &workers,
                |b, _| {
                    b.iter(|| criterion::black_box(counter.run_with(&executor, &store).unwrap().total));
                },
            );
        }
    }
    group.finish();
}

/// Benchmark ingestion of an edge list into CSR
fn bench_ingest(c: &mut Criterion) {
    let mut group = c.benchmark_group("ingest");

    for size in [1000, 10_000].iter() {
        let mut rng = StdRng::seed_from_u64(7);
        let edges = random_graph(&mut rng, *size, 8.0 / *size as f64);
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, &size| {
            b.iter(|| criterion::black_box(from_edges(size, &edges).unwrap().nonzero_count()));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_sequential, bench_backends, bench_ingest);
criterion_main!(benches);
