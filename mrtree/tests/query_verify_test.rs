//! End-to-end query, verification and tamper-detection scenarios.

use mrtree::{
    verify, MerkleRTree, PointOrder, PointRecord, QueryStats, Rect, VerificationObject,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn sample_tree() -> MerkleRTree {
    let points = vec![
        PointRecord::new(0, 0, 0),
        PointRecord::new(1, 10, 10),
        PointRecord::new(2, 20, 20),
        PointRecord::new(3, 30, 30),
    ];
    MerkleRTree::bulk_load(points, 2, PointOrder::Lexicographic).unwrap()
}

fn count_pruned(vo: &VerificationObject) -> usize {
    match vo {
        VerificationObject::Leaf { .. } => 0,
        VerificationObject::Pruned { .. } => 1,
        VerificationObject::Container { children } => children.iter().map(count_pruned).sum(),
    }
}

#[test]
fn test_partial_overlap_returns_inner_points_in_order() {
    let tree = sample_tree();
    assert_eq!(tree.height(), 2);

    let mut stats = QueryStats::new();
    let verified = tree
        .query_and_verify(&Rect::new(5, 5, 25, 25), &mut stats)
        .unwrap();

    assert!(verified.authentic);
    assert_eq!(
        verified.outcome.points,
        vec![PointRecord::new(1, 10, 10), PointRecord::new(2, 20, 20)]
    );
    assert_eq!(stats.points_returned, 2);
    assert_eq!(stats.points_examined, 4);
}

#[test]
fn test_disjoint_query_yields_container_of_witnesses() {
    let tree = sample_tree();
    let vo = tree
        .range_query(&Rect::new(100, 100, 200, 200))
        .unwrap()
        .unwrap();

    match &vo {
        VerificationObject::Container { children } => {
            assert_eq!(children.len(), 2);
            assert!(children.iter().all(VerificationObject::is_pruned));
        }
        other => panic!("expected container, got {:?}", other),
    }

    // The witnesses alone still recombine to the root digest
    let outcome = verify(&vo, &Rect::new(100, 100, 200, 200));
    assert!(outcome.points.is_empty());
    assert!(outcome.matches_digest(&tree.root_digest()));
}

#[test]
fn test_covering_query_returns_everything_without_pruning() {
    let tree = sample_tree();
    let query = Rect::new(-1000, -1000, 1000, 1000);
    let vo = tree.range_query(&query).unwrap().unwrap();
    assert_eq!(count_pruned(&vo), 0);

    let outcome = verify(&vo, &query);
    assert!(outcome.matches_digest(&tree.root_digest()));
    assert_eq!(
        outcome.points,
        vec![
            PointRecord::new(0, 0, 0),
            PointRecord::new(1, 10, 10),
            PointRecord::new(2, 20, 20),
            PointRecord::new(3, 30, 30),
        ]
    );
}

#[test]
fn test_tampered_leaf_point_is_detected() {
    let tree = sample_tree();
    let query = Rect::new(5, 5, 25, 25);
    let mut vo = tree.range_query(&query).unwrap().unwrap();

    // Flip the low bit of the x coordinate of point id 2
    if let VerificationObject::Container { children } = &mut vo {
        for child in children.iter_mut() {
            if let VerificationObject::Leaf { points } = child {
                for p in points.iter_mut() {
                    if p.id == 2 {
                        p.loc.x ^= 1;
                    }
                }
            }
        }
    }

    let outcome = verify(&vo, &query);
    assert!(!outcome.matches_digest(&tree.root_digest()));
}

#[test]
fn test_tampered_leaf_id_is_detected() {
    let tree = sample_tree();
    let query = Rect::new(5, 5, 25, 25);
    let mut vo = tree.range_query(&query).unwrap().unwrap();

    if let VerificationObject::Container { children } = &mut vo {
        if let VerificationObject::Leaf { points } = &mut children[0] {
            points[0].id ^= 1;
        }
    }

    assert!(!verify(&vo, &query).matches_digest(&tree.root_digest()));
}

#[test]
fn test_tampered_pruned_witness_is_detected() {
    let tree = sample_tree();
    // Leaf (0,0)-(10,10) is explored, leaf (20,20)-(30,30) is pruned
    let query = Rect::new(0, 0, 1, 1);
    let vo = tree.range_query(&query).unwrap().unwrap();
    assert_eq!(count_pruned(&vo), 1);

    // Baseline: untampered witnesses recombine to the root digest
    assert!(verify(&vo, &query).matches_digest(&tree.root_digest()));

    // Tamper with the witness digest
    let mut forged = vo.clone();
    if let VerificationObject::Container { children } = &mut forged {
        if let VerificationObject::Pruned { digest, .. } = &mut children[1] {
            digest[0] ^= 1;
        }
    }
    assert!(!verify(&forged, &query).matches_digest(&tree.root_digest()));

    // Tamper with the witness MBR instead
    let mut forged = vo;
    if let VerificationObject::Container { children } = &mut forged {
        if let VerificationObject::Pruned { mbr, .. } = &mut children[1] {
            mbr.max_x += 1;
        }
    }
    assert!(!verify(&forged, &query).matches_digest(&tree.root_digest()));
}

#[test]
fn test_soundness_and_completeness_against_linear_scan() {
    let mut rng = StdRng::seed_from_u64(4242);
    let points: Vec<PointRecord> = (0..500)
        .map(|i| {
            PointRecord::new(
                i,
                rng.gen_range(-1_000..1_000),
                rng.gen_range(-1_000..1_000),
            )
        })
        .collect();

    for order in [PointOrder::Lexicographic, PointOrder::ZOrder] {
        let tree = MerkleRTree::bulk_load(points.clone(), 16, order).unwrap();
        let trusted_root = tree.root_digest();

        // Matching points must come back in tree order, which is the
        // sorted dataset filtered by the query
        let mut sorted = points.clone();
        order.sort_points(&mut sorted);

        for _ in 0..50 {
            let x1 = rng.gen_range(-1_200..1_200);
            let y1 = rng.gen_range(-1_200..1_200);
            let query = Rect::new(
                x1,
                y1,
                x1 + rng.gen_range(0..600),
                y1 + rng.gen_range(0..600),
            );

            let mut stats = QueryStats::new();
            let verified = tree.query_and_verify(&query, &mut stats).unwrap();
            assert!(verified.authentic);
            assert!(verified.outcome.matches_digest(&trusted_root));

            let expected: Vec<PointRecord> = sorted
                .iter()
                .filter(|p| p.is_inside(&query))
                .copied()
                .collect();
            assert_eq!(verified.outcome.points, expected);
            assert_eq!(stats.points_returned as usize, expected.len());
        }
    }
}

#[test]
fn test_vo_point_count_matches_examined_points() {
    let tree = sample_tree();
    let mut stats = QueryStats::new();
    let vo = tree
        .range_query_with_stats(&Rect::new(0, 0, 12, 12), &mut stats)
        .unwrap()
        .unwrap();
    assert_eq!(vo.point_count() as u64, stats.points_examined);
}

#[test]
fn test_vo_survives_serde_round_trip() {
    let tree = sample_tree();
    let query = Rect::new(5, 5, 25, 25);
    let vo = tree.range_query(&query).unwrap().unwrap();

    let json = serde_json::to_string(&vo).unwrap();
    let decoded: VerificationObject = serde_json::from_str(&json).unwrap();

    let outcome = verify(&decoded, &query);
    assert!(outcome.matches_digest(&tree.root_digest()));
    assert_eq!(outcome.count(), 2);
}

#[test]
fn test_query_on_point_sized_rectangle() {
    let tree = sample_tree();
    let query = Rect::new(20, 20, 20, 20);
    let verified = tree
        .query_and_verify(&query, &mut QueryStats::new())
        .unwrap();
    assert!(verified.authentic);
    assert_eq!(verified.outcome.points, vec![PointRecord::new(2, 20, 20)]);
}
