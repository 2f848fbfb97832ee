//! Benchmarks for block splitting and thread distribution

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use blocksplit::{distribute_keep_together, split_ab, split_ab_blocks, SparseMatrixCSR};

/// Irregular block sizes typical of a symmetry-sectored Hamiltonian
fn block_sizes(n_blocks: usize) -> Vec<i32> {
    (0..n_blocks).map(|k| ((k * 37) % 23 + 1) as i32).collect()
}

/// Upper-triangular operator with a banded pattern inside every block
fn block_operator(block_sizes: &[i32]) -> SparseMatrixCSR<f64> {
    let mut triplets = Vec::new();
    let mut offset = 0;
    for &size in block_sizes {
        let size = size as usize;
        for i in offset..offset + size {
            for j in i..(i + 4).min(offset + size) {
                triplets.push((i, j, 1.0));
            }
        }
        offset += size;
    }
    SparseMatrixCSR::from_triplets(offset, offset, &triplets)
}

fn bench_split(c: &mut Criterion) {
    let sizes = block_sizes(2000);
    let h = block_operator(&sizes);
    let n = h.n_rows;

    c.bench_function("split_ab", |bench| {
        bench.iter(|| split_ab(black_box(&h), black_box(&sizes), n))
    });
    c.bench_function("split_ab_blocks", |bench| {
        bench.iter(|| split_ab_blocks(black_box(&h), black_box(&sizes), n))
    });
}

fn bench_distribute(c: &mut Criterion) {
    let sizes = block_sizes(2000);
    let h = block_operator(&sizes);
    let (list_a, _) = split_ab_blocks(&h, &sizes, h.n_rows);
    let refs: Vec<&SparseMatrixCSR<f64>> = list_a.iter().collect();

    let mut group = c.benchmark_group("distribute_keep_together");
    for n_threads in [2, 8, 32] {
        group.bench_with_input(BenchmarkId::from_parameter(n_threads), &n_threads, |bench, &t| {
            bench.iter(|| distribute_keep_together(black_box(refs.clone()), t))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_split, bench_distribute);
criterion_main!(benches);
