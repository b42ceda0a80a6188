//! Query and verification benchmarks

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use mrtree::{MerkleRTree, PointOrder, QueryStats};
use mrtree_bench::data_gen::{generate_points, DATA_BOUNDS};
use rand::thread_rng;

fn bench_query_and_verify(c: &mut Criterion) {
    let mut group = c.benchmark_group("Query/Selectivity");

    let points = generate_points(100_000);
    let tree = MerkleRTree::bulk_load(points, 64, PointOrder::ZOrder).unwrap();
    let mut rng = thread_rng();

    for selectivity in [0.0001, 0.001, 0.01].iter() {
        let queries =
            mrtree::generate_by_selectivity(&DATA_BOUNDS, 100, *selectivity, &mut rng).unwrap();

        group.bench_with_input(
            BenchmarkId::from_parameter(selectivity),
            &queries,
            |b, queries| {
                let mut next = 0usize;
                b.iter(|| {
                    let query = &queries[next % queries.len()];
                    next += 1;
                    let mut stats = QueryStats::new();
                    let verified = tree.query_and_verify(query, &mut stats).unwrap();
                    assert!(verified.authentic);
                    black_box(verified.outcome.count())
                });
            },
        );
    }

    group.finish();
}

fn bench_query_only(c: &mut Criterion) {
    let mut group = c.benchmark_group("Query/VO Production");

    let points = generate_points(100_000);
    let tree = MerkleRTree::bulk_load(points, 64, PointOrder::ZOrder).unwrap();
    let queries =
        mrtree::generate_by_selectivity(&DATA_BOUNDS, 100, 0.001, &mut thread_rng()).unwrap();

    group.bench_function("range_query", |b| {
        let mut next = 0usize;
        b.iter(|| {
            let query = &queries[next % queries.len()];
            next += 1;
            black_box(tree.range_query(query).unwrap())
        });
    });

    group.bench_function("verify", |b| {
        let query = &queries[0];
        let vo = tree.range_query(query).unwrap().unwrap();
        b.iter(|| black_box(mrtree::verify(&vo, query).count()));
    });

    group.finish();
}

criterion_group!(benches, bench_query_and_verify, bench_query_only);
criterion_main!(benches);
