//! Benchmarks for HNSW graph construction throughput.

use ann_core::{HnswConfig, HnswIndex, Metric};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rand::Rng;

fn generate_random_vectors(n: usize, dim: usize) -> Vec<Vec<f32>> {
    let mut rng = rand::thread_rng();
    (0..n).map(|_| (0..dim).map(|_| rng.gen_range(-1.0..1.0)).collect()).collect()
}

fn bench_insert(c: &mut Criterion) {
    let mut group = c.benchmark_group("hnsw_insert");
    let dim = 128;

    for num_vectors in [1000, 5000, 20000].iter() {
        let vectors = generate_random_vectors(*num_vectors, dim);

        group.throughput(Throughput::Elements(*num_vectors as u64));
        group.bench_with_input(BenchmarkId::from_parameter(num_vectors), num_vectors, |bench, _| {
            bench.iter(|| {
                let mut index = HnswIndex::new(dim, Metric::Cosine, HnswConfig::default()).unwrap();
                index.add(black_box(&vectors)).unwrap();
            })
        });
    }

    group.finish();
}

fn bench_search_after_construction(c: &mut Criterion) {
    let mut group = c.benchmark_group("hnsw_search");
    let dim = 128;

    for num_vectors in [1000, 10000, 50000].iter() {
        let vectors = generate_random_vectors(*num_vectors, dim);
        let mut index = HnswIndex::new(dim, Metric::Cosine, HnswConfig::default()).unwrap();
        index.add(&vectors).unwrap();

        let query = generate_random_vectors(1, dim).pop().unwrap();

        group.throughput(Throughput::Elements(*num_vectors as u64));
        group.bench_with_input(BenchmarkId::from_parameter(num_vectors), num_vectors, |bench, _| {
            bench.iter(|| index.search(black_box(&query), 10))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_insert, bench_search_after_construction);
criterion_main!(benches);
