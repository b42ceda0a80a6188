//! Workload generator properties and query-file round-trips.

use mrtree::{
    area_selectivity, generate_by_selectivity, generate_uniform, load_queries, write_query_file,
    PointRecord, Rect,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::io::Write;

const BOUNDS: Rect = Rect {
    min_x: 0,
    min_y: 0,
    max_x: 10_000,
    max_y: 10_000,
};

#[test]
fn test_selectivity_target_mean_area() {
    let mut rng = StdRng::seed_from_u64(2024);
    let queries = generate_by_selectivity(&BOUNDS, 200, 0.01, &mut rng).unwrap();
    assert_eq!(queries.len(), 200);

    // With a ±20% side perturbation the empirical mean area selectivity
    // stays within [0.64, 1.44] of the 0.01 target
    let mean: f64 = queries
        .iter()
        .map(|q| area_selectivity(q, &BOUNDS))
        .sum::<f64>()
        / queries.len() as f64;
    assert!(mean >= 0.0064, "mean selectivity {} too small", mean);
    assert!(mean <= 0.0144, "mean selectivity {} too large", mean);
}

#[test]
fn test_selectivity_levels_scale_query_sizes() {
    let mut rng = StdRng::seed_from_u64(17);
    let small = generate_by_selectivity(&BOUNDS, 50, 0.0001, &mut rng).unwrap();
    let large = generate_by_selectivity(&BOUNDS, 50, 0.1, &mut rng).unwrap();

    let mean_area = |qs: &[Rect]| {
        qs.iter().map(|q| q.area() as f64).sum::<f64>() / qs.len() as f64
    };
    assert!(mean_area(&small) * 100.0 < mean_area(&large));
}

#[test]
fn test_uniform_sizes_respect_fraction_bounds() {
    let mut rng = StdRng::seed_from_u64(8);
    let queries = generate_uniform(&BOUNDS, 100, 0.01, 0.05, &mut rng).unwrap();

    for q in &queries {
        assert!(q.is_valid());
        // Sides are clamped at the dataset boundary, so only the upper
        // bound is guaranteed
        assert!(q.width() <= 500);
        assert!(q.height() <= 500);
    }
}

#[test]
fn test_query_file_round_trip() {
    let mut rng = StdRng::seed_from_u64(55);
    let points: Vec<PointRecord> = (0..200)
        .map(|i| {
            PointRecord::new(i, rng.gen_range(0..10_000), rng.gen_range(0..10_000))
        })
        .collect();
    let queries = generate_by_selectivity(&BOUNDS, 20, 0.01, &mut rng).unwrap();

    let mut file = tempfile::NamedTempFile::new().unwrap();
    let mut content = Vec::new();
    write_query_file(&mut content, &queries, &points, &BOUNDS).unwrap();
    file.write_all(&content).unwrap();
    file.flush().unwrap();

    let loaded = load_queries(file.path()).unwrap();
    assert_eq!(loaded, queries);
}

#[test]
fn test_annotations_count_matching_points() {
    let points = vec![
        PointRecord::new(0, 10, 10),
        PointRecord::new(1, 20, 20),
        PointRecord::new(2, 5_000, 5_000),
    ];
    let queries = vec![Rect::new(0, 0, 100, 100)];

    let mut out = Vec::new();
    write_query_file(&mut out, &queries, &points, &BOUNDS).unwrap();
    let text = String::from_utf8(out).unwrap();
    let row = text.lines().nth(1).unwrap();

    let fields: Vec<&str> = row.split(',').collect();
    assert_eq!(fields[4], "2");
    assert_eq!(fields[5], "0.666667");
}
