//! Random query-workload generation.
//!
//! Benchmark workloads are rectangles placed uniformly at random inside
//! the dataset bounds, sized either by a fractional side range or by a
//! target area selectivity. The writer records per-query match counts
//! and selectivities next to the coordinates so the generated files
//! document their own workload.

use crate::errors::{TreeError, TreeResult};
use crate::geometry::Rect;
use crate::point::{self, PointRecord};
use rand::Rng;
use std::io::Write;

/// Header written at the top of generated query files.
pub const QUERY_FILE_HEADER: &str = "min_x,min_y,max_x,max_y,matching,point_fraction,area_selectivity";

/// Returns the fraction of the dataset bounds' area a query covers.
pub fn area_selectivity(query: &Rect, data_mbr: &Rect) -> f64 {
    let data_area = data_mbr.area();
    if data_area == 0 {
        return 0.0;
    }
    query.area() as f64 / data_area as f64
}

/// Generates rectangles with side lengths drawn uniformly from a
/// fractional range of the dataset bounds.
///
/// Each rectangle's lower-left corner is placed uniformly inside
/// `data_mbr`; its sides span between `min_frac` and `max_frac` of the
/// corresponding dataset dimension, clamped to stay inside the bounds.
///
/// # Errors
///
/// [`TreeError::EmptyDataset`] if the bounds have no extent;
/// [`TreeError::InvalidOperation`] if the fraction range is not within
/// `0 < min_frac <= max_frac <= 1`.
pub fn generate_uniform<R: Rng>(
    data_mbr: &Rect,
    count: usize,
    min_frac: f64,
    max_frac: f64,
    rng: &mut R,
) -> TreeResult<Vec<Rect>> {
    if data_mbr.is_empty() || data_mbr.width() == 0 || data_mbr.height() == 0 {
        return Err(TreeError::EmptyDataset);
    }
    if !(min_frac > 0.0 && min_frac <= max_frac && max_frac <= 1.0) {
        return Err(TreeError::InvalidOperation(format!(
            "size fractions must satisfy 0 < min <= max <= 1, got {} and {}",
            min_frac, max_frac
        )));
    }

    let width = data_mbr.width();
    let height = data_mbr.height();
    let mut queries = Vec::with_capacity(count);

    for _ in 0..count {
        let min_x = rng.gen_range(data_mbr.min_x..data_mbr.max_x);
        let min_y = rng.gen_range(data_mbr.min_y..data_mbr.max_y);

        let frac = rng.gen_range(min_frac..=max_frac);
        let q_width = ((width as f64 * frac) as i64).max(1);
        let q_height = ((height as f64 * frac) as i64).max(1);

        let max_x = (min_x as i64 + q_width).min(data_mbr.max_x as i64) as i32;
        let max_y = (min_y as i64 + q_height).min(data_mbr.max_y as i64) as i32;

        queries.push(Rect::new(min_x, min_y, max_x, max_y));
    }

    Ok(queries)
}

/// Generates rectangles targeting an area selectivity.
///
/// Each side spans `sqrt(selectivity)` of the corresponding dataset
/// dimension with a ±20% uniform perturbation, and the rectangle is
/// placed uniformly at random so it fits inside the bounds. Sides are at
/// least 1.
///
/// # Errors
///
/// [`TreeError::EmptyDataset`] if the bounds have no extent;
/// [`TreeError::InvalidOperation`] if `selectivity` is outside `(0, 1)`.
pub fn generate_by_selectivity<R: Rng>(
    data_mbr: &Rect,
    count: usize,
    selectivity: f64,
    rng: &mut R,
) -> TreeResult<Vec<Rect>> {
    if data_mbr.is_empty() || data_mbr.width() == 0 || data_mbr.height() == 0 {
        return Err(TreeError::EmptyDataset);
    }
    if !(selectivity > 0.0 && selectivity < 1.0) {
        return Err(TreeError::InvalidOperation(format!(
            "selectivity must be in (0, 1), got {}",
            selectivity
        )));
    }

    let side_ratio = selectivity.sqrt();
    let target_width = (data_mbr.width() as f64 * side_ratio) as i64;
    let target_height = (data_mbr.height() as f64 * side_ratio) as i64;

    let mut queries = Vec::with_capacity(count);
    for _ in 0..count {
        let variation = rng.gen_range(0.8..1.2);
        let q_width = ((target_width as f64 * variation) as i64).max(1);
        let q_height = ((target_height as f64 * variation) as i64).max(1);

        let max_min_x = (data_mbr.max_x as i64 - q_width).max(data_mbr.min_x as i64) as i32;
        let max_min_y = (data_mbr.max_y as i64 - q_height).max(data_mbr.min_y as i64) as i32;

        let min_x = rng.gen_range(data_mbr.min_x..=max_min_x);
        let min_y = rng.gen_range(data_mbr.min_y..=max_min_y);
        let max_x = (min_x as i64 + q_width).min(data_mbr.max_x as i64) as i32;
        let max_y = (min_y as i64 + q_height).min(data_mbr.max_y as i64) as i32;

        queries.push(Rect::new(min_x, min_y, max_x, max_y));
    }

    Ok(queries)
}

/// Writes a query workload as CSV, annotating each rectangle with its
/// actual match count, point fraction and area selectivity against the
/// given dataset.
pub fn write_query_file<W: Write>(
    writer: &mut W,
    queries: &[Rect],
    points: &[PointRecord],
    data_mbr: &Rect,
) -> TreeResult<()> {
    if points.is_empty() {
        return Err(TreeError::EmptyDataset);
    }

    writeln!(writer, "{}", QUERY_FILE_HEADER)?;
    for query in queries {
        let matching = point::count_in_range(points, query);
        let point_fraction = matching as f64 / points.len() as f64;
        writeln!(
            writer,
            "{},{},{},{},{},{:.6},{:.6}",
            query.min_x,
            query.min_y,
            query.max_x,
            query.max_y,
            matching,
            point_fraction,
            area_selectivity(query, data_mbr)
        )?;
    }

    Ok(())
}
