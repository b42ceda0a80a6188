//! Data generators for benchmarks

use mrtree::{PointRecord, Rect};
use rand::Rng;

/// Bounds of the generated datasets.
pub const DATA_BOUNDS: Rect = Rect {
    min_x: 0,
    min_y: 0,
    max_x: 1_000_000,
    max_y: 1_000_000,
};

/// Generates points distributed uniformly over [`DATA_BOUNDS`].
pub fn generate_points(count: usize) -> Vec<PointRecord> {
    let mut rng = rand::thread_rng();
    (0..count)
        .map(|i| {
            PointRecord::new(
                i as u32,
                rng.gen_range(DATA_BOUNDS.min_x..=DATA_BOUNDS.max_x),
                rng.gen_range(DATA_BOUNDS.min_y..=DATA_BOUNDS.max_y),
            )
        })
        .collect()
}

/// Generates points clustered around a small number of hot spots, which
/// stresses pruning differently than a uniform spread.
pub fn generate_clustered_points(count: usize, clusters: usize) -> Vec<PointRecord> {
    let mut rng = rand::thread_rng();
    let centers: Vec<(i32, i32)> = (0..clusters.max(1))
        .map(|_| {
            (
                rng.gen_range(DATA_BOUNDS.min_x..=DATA_BOUNDS.max_x),
                rng.gen_range(DATA_BOUNDS.min_y..=DATA_BOUNDS.max_y),
            )
        })
        .collect();

    (0..count)
        .map(|i| {
            let (cx, cy) = centers[i % centers.len()];
            PointRecord::new(
                i as u32,
                (cx as i64 + rng.gen_range(-10_000..=10_000)).clamp(
                    DATA_BOUNDS.min_x as i64,
                    DATA_BOUNDS.max_x as i64,
                ) as i32,
                (cy as i64 + rng.gen_range(-10_000..=10_000)).clamp(
                    DATA_BOUNDS.min_y as i64,
                    DATA_BOUNDS.max_y as i64,
                ) as i32,
            )
        })
        .collect()
}
