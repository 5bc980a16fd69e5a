//! Benchmarks for pairwise evaluation and the linear expansion fast path

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use seqsvm::{
    merge_count, LinearExpansion, MemorySequenceStore, SequenceKernel, SpectrumKernel,
    SpectrumMode, WeightedIndex,
};
use std::hint::black_box;
use std::sync::Arc;

fn sorted_sequence(len: usize, alphabet: u64, seed: u64) -> Vec<u64> {
    let mut state = seed;
    let mut seq: Vec<u64> = (0..len)
        .map(|_| {
            state = state
                .wrapping_mul(6364136223846793005)
                .wrapping_add(1442695040888963407);
            (state >> 33) % alphabet
        })
        .collect();
    seq.sort_unstable();
    seq
}

fn reference_store(count: usize, len: usize) -> Arc<MemorySequenceStore> {
    let mut store = MemorySequenceStore::new();
    for i in 0..count {
        store.push_sorted(sorted_sequence(len, len as u64 / 4 + 1, i as u64 + 1));
    }
    Arc::new(store)
}

fn bench_pairwise(c: &mut Criterion) {
    let mut group = c.benchmark_group("pairwise");
    for len in [1_000usize, 10_000] {
        let a = sorted_sequence(len, len as u64 / 4 + 1, 1);
        let b = sorted_sequence(len, len as u64 / 4 + 1, 2);
        group.throughput(Throughput::Elements(len as u64));
        group.bench_with_input(BenchmarkId::from_parameter(len), &len, |bench, _| {
            bench.iter(|| {
                merge_count(
                    black_box(&a),
                    black_box(&b),
                    black_box(SpectrumMode::Multiplicity),
                )
            })
        });
    }
    group.finish();
}

fn bench_expansion_build(c: &mut Criterion) {
    let store = reference_store(200, 500);
    let entries: Vec<WeightedIndex> = (0..200).map(|i| WeightedIndex::new(i, 1.0)).collect();

    c.bench_function("expansion_build_200x500", |bench| {
        bench.iter(|| {
            let mut expansion = LinearExpansion::new(SpectrumMode::Multiplicity);
            expansion.build(&*store, black_box(&entries)).unwrap();
            black_box(expansion.dictionary().len())
        })
    });
}

fn bench_scoring(c: &mut Criterion) {
    let store = reference_store(200, 500);
    let entries: Vec<WeightedIndex> = (0..200).map(|i| WeightedIndex::new(i, 0.01)).collect();
    let mut kernel = SpectrumKernel::new(Arc::clone(&store), SpectrumMode::Multiplicity);
    kernel.build_linear_expansion(&entries).unwrap();
    let query = 150;

    let mut group = c.benchmark_group("score_one_query");
    group.bench_function("expansion", |bench| {
        bench.iter(|| kernel.evaluate_against_expansion(black_box(query)).unwrap())
    });
    group.bench_function("direct_sum", |bench| {
        bench.iter(|| {
            entries
                .iter()
                .map(|e| e.weight * kernel.evaluate_pair(e.index, black_box(query)).unwrap())
                .sum::<f64>()
        })
    });
    group.finish();
}

criterion_group!(
    benches,
    bench_pairwise,
    bench_expansion_build,
    bench_scoring
);
criterion_main!(benches);
