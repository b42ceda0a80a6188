//! Verification of range-query results.
//!
//! The verifier reconstructs the `(mbr, digest)` of the tree root from a
//! verification object alone, re-serializing leaves and child entries
//! through the exact byte schemas the builder used, while filtering the
//! carried points against the query rectangle. A caller that compares
//! the reconstructed digest against a trusted root digest obtains both
//! soundness (every returned point passed the filter) and completeness
//! (a dishonest or truncated VO cannot reproduce the root digest).

use crate::geometry::Rect;
use crate::hashing::{
    self, HashBuffer, NodeDigest, CHILD_ENTRY_LEN, EMPTY_DIGEST, POINT_ENTRY_LEN,
};
use crate::point::PointRecord;
use crate::query::VerificationObject;
use crate::stats::QueryStats;

/// The verifier's reconstruction: the root `(mbr, digest)` recomputed
/// from a verification object, plus the points matching the query.
#[derive(Clone, Debug)]
pub struct VerifyOutcome {
    /// Reconstructed bounding rectangle
    pub mbr: Rect,
    /// Reconstructed digest
    pub digest: NodeDigest,
    /// Matching points, in tree order
    pub points: Vec<PointRecord>,
}

impl VerifyOutcome {
    /// The outcome for an absent tree: empty bounds, all-zero digest,
    /// no points.
    pub fn empty() -> VerifyOutcome {
        VerifyOutcome {
            mbr: Rect::EMPTY,
            digest: EMPTY_DIGEST,
            points: Vec::new(),
        }
    }

    /// Returns the number of matching points.
    pub fn count(&self) -> usize {
        self.points.len()
    }

    /// Compares the reconstructed digest against a trusted digest.
    pub fn matches_digest(&self, trusted: &NodeDigest) -> bool {
        self.digest == *trusted
    }
}

/// Verifies a verification object against the original query rectangle.
///
/// Equivalent to [`verify_with_stats`] without collecting statistics.
pub fn verify(vo: &VerificationObject, query: &Rect) -> VerifyOutcome {
    let mut stats = QueryStats::new();
    verify_with_stats(vo, query, &mut stats)
}

/// Verifies a verification object, counting accepted points into `stats`.
pub fn verify_with_stats(
    vo: &VerificationObject,
    query: &Rect,
    stats: &mut QueryStats,
) -> VerifyOutcome {
    match vo {
        VerificationObject::Leaf { points } => verify_leaf(points, query, stats),
        VerificationObject::Pruned { mbr, digest } => VerifyOutcome {
            // Trusted here, validated when folded into the parent digest
            mbr: *mbr,
            digest: *digest,
            points: Vec::new(),
        },
        VerificationObject::Container { children } => verify_container(children, query, stats),
    }
}

fn verify_leaf(points: &[PointRecord], query: &Rect, stats: &mut QueryStats) -> VerifyOutcome {
    let mut mbr = Rect::EMPTY;
    let mut buf = HashBuffer::with_capacity(points.len() * POINT_ENTRY_LEN);
    let mut matching = Vec::new();

    for p in points {
        mbr = mbr.union_point(p.loc);
        hashing::put_point_record(&mut buf, p);

        if p.is_inside(query) {
            matching.push(*p);
            stats.points_returned += 1;
        }
    }

    VerifyOutcome {
        mbr,
        digest: buf.digest(),
        points: matching,
    }
}

fn verify_container(
    children: &[VerificationObject],
    query: &Rect,
    stats: &mut QueryStats,
) -> VerifyOutcome {
    let mut mbr = Rect::EMPTY;
    let mut buf = HashBuffer::with_capacity(children.len() * CHILD_ENTRY_LEN);
    let mut matching = Vec::new();

    for child in children {
        let outcome = verify_with_stats(child, query, stats);

        mbr = mbr.union(&outcome.mbr);
        hashing::put_child_entry(&mut buf, &outcome.mbr, &outcome.digest);
        matching.extend(outcome.points);
    }

    VerifyOutcome {
        mbr,
        digest: buf.digest(),
        points: matching,
    }
}
