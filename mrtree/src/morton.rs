//! Z-order (Morton) encoding and the point ordering switch.
//!
//! The Morton code of a 2D point is obtained by interleaving the bits of
//! its coordinates, producing a space-filling curve that keeps spatially
//! close points close along the 1D index. Sorting by Morton code before
//! packing gives leaves with low perimeter and little overlap, which is
//! what makes range-query pruning effective.
//!
//! Signed coordinates are reinterpreted as two's-complement `u32` before
//! interleaving, so negative coordinates sort after non-negative ones
//! along the curve.

use crate::point::PointRecord;
use serde::{Deserialize, Serialize};

/// Spreads the bits of a 32-bit value over the even bit positions of a u64.
fn spread_bits(v: u32) -> u64 {
    let mut v = v as u64;
    v = (v | (v << 16)) & 0x0000_FFFF_0000_FFFF;
    v = (v | (v << 8)) & 0x00FF_00FF_00FF_00FF;
    v = (v | (v << 4)) & 0x0F0F_0F0F_0F0F_0F0F;
    v = (v | (v << 2)) & 0x3333_3333_3333_3333;
    v = (v | (v << 1)) & 0x5555_5555_5555_5555;
    v
}

/// Collapses the even bit positions of a u64 back into a 32-bit value.
fn compact_bits(v: u64) -> u32 {
    let mut v = v & 0x5555_5555_5555_5555;
    v = (v ^ (v >> 1)) & 0x3333_3333_3333_3333;
    v = (v ^ (v >> 2)) & 0x0F0F_0F0F_0F0F_0F0F;
    v = (v ^ (v >> 4)) & 0x00FF_00FF_00FF_00FF;
    v = (v ^ (v >> 8)) & 0x0000_FFFF_0000_FFFF;
    v = (v ^ (v >> 16)) & 0x0000_0000_FFFF_FFFF;
    v as u32
}

/// Encodes 2D coordinates into a 64-bit Morton (Z-order) index.
///
/// The coordinates are reinterpreted as unsigned before interleaving;
/// `x` occupies the even bits and `y` the odd bits of the result.
///
/// # Example
/// ```
/// use mrtree::morton::morton_encode;
///
/// assert_eq!(morton_encode(3, 5), 39);
/// ```
pub fn morton_encode(x: i32, y: i32) -> u64 {
    spread_bits(x as u32) | (spread_bits(y as u32) << 1)
}

/// Decodes a 64-bit Morton index back into 2D coordinates.
pub fn morton_decode(code: u64) -> (i32, i32) {
    (compact_bits(code) as i32, compact_bits(code >> 1) as i32)
}

/// The point ordering used by the bulk loader.
///
/// The ordering determines the sequence in which points are packed into
/// leaves and therefore the node digests: trees built with different
/// orderings commit to different root digests even over the same dataset.
/// Build and verify sides exchanging digests must agree on the ordering.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
pub enum PointOrder {
    /// Lexicographic `(x, y)` ordering.
    Lexicographic,
    /// Z-order: 64-bit Morton interleave of the coordinates.
    #[default]
    ZOrder,
}

impl PointOrder {
    /// Sorts a point slice in place by this ordering.
    ///
    /// The sort is unstable and uses no secondary criterion; records with
    /// equal keys may appear in any relative order.
    pub fn sort_points(&self, points: &mut [PointRecord]) {
        match self {
            PointOrder::Lexicographic => {
                points.sort_unstable_by_key(|p| (p.loc.x, p.loc.y));
            }
            PointOrder::ZOrder => {
                points.sort_unstable_by_key(|p| morton_encode(p.loc.x, p.loc.y));
            }
        }
    }
}

impl std::fmt::Display for PointOrder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PointOrder::Lexicographic => write!(f, "lexicographic"),
            PointOrder::ZOrder => write!(f, "z-order"),
        }
    }
}
