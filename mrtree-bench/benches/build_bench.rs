//! Bulk-load benchmarks

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use mrtree::{MerkleRTree, PointOrder};
use mrtree_bench::data_gen::generate_points;

fn bench_bulk_load_sizes(c: &mut Criterion) {
    let mut group = c.benchmark_group("Build/Dataset Size");

    for size in [1_000, 10_000, 100_000].iter() {
        let points = generate_points(*size);

        group.bench_with_input(BenchmarkId::new("z-order", size), &points, |b, points| {
            b.iter_with_setup(
                || points.clone(),
                |points| {
                    let tree = MerkleRTree::bulk_load(points, 64, PointOrder::ZOrder).unwrap();
                    black_box(tree.root_digest())
                },
            );
        });

        group.bench_with_input(
            BenchmarkId::new("lexicographic", size),
            &points,
            |b, points| {
                b.iter_with_setup(
                    || points.clone(),
                    |points| {
                        let tree =
                            MerkleRTree::bulk_load(points, 64, PointOrder::Lexicographic).unwrap();
                        black_box(tree.root_digest())
                    },
                );
            },
        );
    }

    group.finish();
}

fn bench_bulk_load_capacities(c: &mut Criterion) {
    let mut group = c.benchmark_group("Build/Capacity");
    let points = generate_points(50_000);

    for capacity in [16, 64, 256].iter() {
        group.bench_with_input(
            BenchmarkId::from_parameter(capacity),
            capacity,
            |b, &capacity| {
                b.iter_with_setup(
                    || points.clone(),
                    |points| {
                        let tree =
                            MerkleRTree::bulk_load(points, capacity, PointOrder::ZOrder).unwrap();
                        black_box(tree.root_digest())
                    },
                );
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_bulk_load_sizes, bench_bulk_load_capacities);
criterion_main!(benches);
