//! Delimited-text loaders for point datasets and query workloads.
//!
//! Two CSV dialects are accepted for points:
//!
//! - *wide*: `id,year,month,day,time,x,y`; only columns 0, 5 and 6 are
//!   used, and the textual identifier is hashed down to a `u32`.
//! - *narrow*: `x,y`; identifiers are assigned sequentially from zero.
//!
//! Query files carry `min_x,min_y,max_x,max_y` in their first four
//! columns; anything after that (match counts, selectivities) is
//! informational output of the workload generator and ignored here.
//!
//! A header line is detected by a non-numeric first field and skipped.
//! Malformed lines are skipped with a warning rather than aborting the
//! load; an unreadable file is an error.

use crate::errors::TreeResult;
use crate::geometry::Rect;
use crate::point::PointRecord;
use std::fs::File;
use std::hash::Hasher;
use std::io::{BufRead, BufReader};
use std::path::Path;
use twox_hash::XxHash64;

/// Hashes a textual identifier into the `u32` space.
///
/// The 64-bit hash is reduced modulo `2^32 - 1`, so collisions are
/// possible and the value `u32::MAX` is never produced. The seed is
/// fixed to keep identifiers stable across runs.
fn hash_wide_id(id: &str) -> u32 {
    let mut hasher = XxHash64::with_seed(0);
    hasher.write(id.as_bytes());
    (hasher.finish() % u32::MAX as u64) as u32
}

/// Loads points from a wide-format CSV file
/// (`id,year,month,day,time,x,y`).
pub fn load_points_wide(path: impl AsRef<Path>) -> TreeResult<Vec<PointRecord>> {
    let path = path.as_ref();
    let reader = BufReader::new(File::open(path)?);
    let mut points = Vec::new();

    for (lineno, line) in reader.lines().enumerate() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let fields: Vec<&str> = line.split(',').collect();
        if lineno == 0 && is_header(&fields) {
            continue;
        }
        if fields.len() < 7 {
            log::warn!("{}:{}: expected 7 columns, skipping", path.display(), lineno + 1);
            continue;
        }

        let x = fields[5].trim().parse::<i32>();
        let y = fields[6].trim().parse::<i32>();
        match (x, y) {
            (Ok(x), Ok(y)) => {
                let id = hash_wide_id(fields[0].trim());
                points.push(PointRecord::new(id, x, y));
            }
            _ => {
                log::warn!("{}:{}: unparsable coordinates, skipping", path.display(), lineno + 1);
            }
        }
    }

    log::debug!("loaded {} points from {}", points.len(), path.display());
    Ok(points)
}

/// Loads points from a narrow-format CSV file (`x,y`), assigning
/// identifiers sequentially from zero.
pub fn load_points_narrow(path: impl AsRef<Path>) -> TreeResult<Vec<PointRecord>> {
    let path = path.as_ref();
    let reader = BufReader::new(File::open(path)?);
    let mut points = Vec::new();
    let mut next_id: u32 = 0;

    for (lineno, line) in reader.lines().enumerate() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let fields: Vec<&str> = line.split(',').collect();
        if lineno == 0 && is_header(&fields) {
            continue;
        }

        let parsed = if fields.len() >= 2 {
            match (fields[0].trim().parse::<i32>(), fields[1].trim().parse::<i32>()) {
                (Ok(x), Ok(y)) => Some((x, y)),
                _ => None,
            }
        } else {
            None
        };

        match parsed {
            Some((x, y)) => {
                points.push(PointRecord::new(next_id, x, y));
                next_id += 1;
            }
            None => {
                log::warn!("{}:{}: unparsable point, skipping", path.display(), lineno + 1);
            }
        }
    }

    log::debug!("loaded {} points from {}", points.len(), path.display());
    Ok(points)
}

/// Loads query rectangles from a CSV file, reading the first four
/// columns of each line.
pub fn load_queries(path: impl AsRef<Path>) -> TreeResult<Vec<Rect>> {
    let path = path.as_ref();
    let reader = BufReader::new(File::open(path)?);
    let mut queries = Vec::new();

    for (lineno, line) in reader.lines().enumerate() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let fields: Vec<&str> = line.split(',').collect();
        if lineno == 0 && is_header(&fields) {
            continue;
        }

        let coords: Vec<i32> = fields
            .iter()
            .take(4)
            .filter_map(|f| f.trim().parse::<i32>().ok())
            .collect();
        if coords.len() == 4 {
            queries.push(Rect::new(coords[0], coords[1], coords[2], coords[3]));
        } else {
            log::warn!("{}:{}: unparsable query, skipping", path.display(), lineno + 1);
        }
    }

    log::debug!("loaded {} queries from {}", queries.len(), path.display());
    Ok(queries)
}

fn is_header(fields: &[&str]) -> bool {
    fields
        .first()
        .map_or(false, |f| f.trim().parse::<i64>().is_err())
}
