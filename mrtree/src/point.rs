//! Indexed point records.

use crate::geometry::{Point, Rect};
use serde::{Deserialize, Serialize};

/// A record in the index: a 32-bit identifier attached to a plane location.
///
/// Identifier uniqueness across a dataset is desirable but not enforced;
/// two records with the same identifier at different locations are
/// distinct records.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct PointRecord {
    /// Identifier of the record
    pub id: u32,
    /// Location in the plane
    pub loc: Point,
}

impl PointRecord {
    /// Creates a new record with the given identifier and coordinates.
    pub fn new(id: u32, x: i32, y: i32) -> PointRecord {
        PointRecord {
            id,
            loc: Point::new(x, y),
        }
    }

    /// Returns the x coordinate.
    pub fn x(&self) -> i32 {
        self.loc.x
    }

    /// Returns the y coordinate.
    pub fn y(&self) -> i32 {
        self.loc.y
    }

    /// Checks if this record lies inside the query rectangle.
    pub fn is_inside(&self, query: &Rect) -> bool {
        query.contains_point(self.loc)
    }
}

impl std::fmt::Display for PointRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{} {}", self.id, self.loc)
    }
}

/// Computes the minimum bounding rectangle of a set of records.
///
/// Returns [`Rect::EMPTY`] for an empty slice.
pub fn compute_mbr(points: &[PointRecord]) -> Rect {
    points
        .iter()
        .fold(Rect::EMPTY, |mbr, p| mbr.union_point(p.loc))
}

/// Counts the records that fall within a query rectangle by linear scan.
pub fn count_in_range(points: &[PointRecord], query: &Rect) -> usize {
    points.iter().filter(|p| p.is_inside(query)).count()
}
