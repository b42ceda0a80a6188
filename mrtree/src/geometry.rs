//! Geometry primitives for the 2D plane.
//!
//! Coordinates are 32-bit signed integers. Rectangles are closed on all
//! four sides, so a point lying exactly on an edge is contained and two
//! rectangles that merely touch do intersect.

use serde::{Deserialize, Serialize};

/// A point in the integer plane.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default, Serialize, Deserialize)]
pub struct Point {
    /// X coordinate
    pub x: i32,
    /// Y coordinate
    pub y: i32,
}

impl Point {
    /// Creates a new point at the given coordinates.
    pub fn new(x: i32, y: i32) -> Point {
        Point { x, y }
    }
}

impl std::fmt::Display for Point {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// A closed axis-aligned rectangle represented by its minimum and maximum
/// corners.
///
/// `Rect` is used both as the minimum bounding rectangle of tree nodes and
/// as the query region of range queries. The distinguished [`Rect::EMPTY`]
/// value is the identity of [`Rect::union`]: enlarging the empty rectangle
/// by any point or rectangle yields that operand's bounds.
///
/// # Examples
///
/// ```
/// use mrtree::geometry::{Point, Rect};
///
/// let mbr = Rect::EMPTY
///     .union_point(Point::new(0, 0))
///     .union_point(Point::new(10, 5));
/// assert_eq!(mbr, Rect::new(0, 0, 10, 5));
/// assert!(mbr.contains_point(Point::new(10, 0)));
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct Rect {
    /// Minimum X coordinate
    pub min_x: i32,
    /// Minimum Y coordinate
    pub min_y: i32,
    /// Maximum X coordinate
    pub max_x: i32,
    /// Maximum Y coordinate
    pub max_y: i32,
}

impl Rect {
    /// The empty rectangle, with inverted bounds.
    ///
    /// Acts as the identity of [`Rect::union`] and [`Rect::union_point`].
    pub const EMPTY: Rect = Rect {
        min_x: i32::MAX,
        min_y: i32::MAX,
        max_x: i32::MIN,
        max_y: i32::MIN,
    };

    /// Creates a new rectangle with the specified corners.
    pub fn new(min_x: i32, min_y: i32, max_x: i32, max_y: i32) -> Rect {
        Rect {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    /// Returns the width of the rectangle.
    pub fn width(&self) -> i64 {
        self.max_x as i64 - self.min_x as i64
    }

    /// Returns the height of the rectangle.
    pub fn height(&self) -> i64 {
        self.max_y as i64 - self.min_y as i64
    }

    /// Returns the area of the rectangle, or 0 if it is empty or inverted.
    ///
    /// Saturates at `i64::MAX` for spans close to the full coordinate
    /// range.
    pub fn area(&self) -> i64 {
        if !self.is_valid() {
            return 0;
        }
        self.width().saturating_mul(self.height())
    }

    /// Returns the center of the rectangle.
    pub fn center(&self) -> Point {
        Point::new(
            ((self.min_x as i64 + self.max_x as i64) / 2) as i32,
            ((self.min_y as i64 + self.max_y as i64) / 2) as i32,
        )
    }

    /// Checks if this rectangle contains a point (closed on all sides).
    pub fn contains_point(&self, p: Point) -> bool {
        self.min_x <= p.x && p.x <= self.max_x && self.min_y <= p.y && p.y <= self.max_y
    }

    /// Checks if this rectangle intersects another rectangle.
    ///
    /// Intervals are closed, so touching edges count as intersection.
    pub fn intersects(&self, other: &Rect) -> bool {
        self.min_x <= other.max_x
            && self.max_x >= other.min_x
            && self.min_y <= other.max_y
            && self.max_y >= other.min_y
    }

    /// Returns the smallest rectangle enclosing this rectangle and another.
    ///
    /// Commutative and associative, with [`Rect::EMPTY`] as identity.
    pub fn union(&self, other: &Rect) -> Rect {
        Rect {
            min_x: self.min_x.min(other.min_x),
            min_y: self.min_y.min(other.min_y),
            max_x: self.max_x.max(other.max_x),
            max_y: self.max_y.max(other.max_y),
        }
    }

    /// Returns the smallest rectangle enclosing this rectangle and a point.
    pub fn union_point(&self, p: Point) -> Rect {
        Rect {
            min_x: self.min_x.min(p.x),
            min_y: self.min_y.min(p.y),
            max_x: self.max_x.max(p.x),
            max_y: self.max_y.max(p.y),
        }
    }

    /// Checks if this rectangle is valid (min <= max on both axes).
    pub fn is_valid(&self) -> bool {
        self.min_x <= self.max_x && self.min_y <= self.max_y
    }

    /// Checks if this rectangle is the empty sentinel (inverted bounds).
    pub fn is_empty(&self) -> bool {
        self.min_x > self.max_x || self.min_y > self.max_y
    }
}

impl Default for Rect {
    fn default() -> Self {
        Rect::EMPTY
    }
}

impl std::fmt::Display for Rect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "({}, {}) to ({}, {})",
            self.min_x, self.min_y, self.max_x, self.max_y
        )
    }
}
