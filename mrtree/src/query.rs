//! Verification objects: the authenticated answer to a range query.
//!
//! A verification object (VO) mirrors the part of the tree the query
//! touched. Reached leaves contribute their complete point sequence
//! (unfiltered, so the verifier can recompute the leaf digest); subtrees
//! whose bounds miss the query contribute only their `(mbr, digest)`
//! witness; explored internal nodes contribute one child VO per tree
//! child, in the original child order.

use crate::geometry::Rect;
use crate::hashing::NodeDigest;
use crate::point::PointRecord;
use serde::{Deserialize, Serialize};

/// The authenticated result of a range query, consumed by the verifier.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum VerificationObject {
    /// The full point sequence of a reached leaf.
    Leaf { points: Vec<PointRecord> },
    /// Witness for a subtree that was not explored.
    Pruned { mbr: Rect, digest: NodeDigest },
    /// One child VO per child of an explored internal node.
    Container { children: Vec<VerificationObject> },
}

impl VerificationObject {
    /// Checks if this is a leaf VO.
    pub fn is_leaf(&self) -> bool {
        matches!(self, VerificationObject::Leaf { .. })
    }

    /// Checks if this is a pruned witness.
    pub fn is_pruned(&self) -> bool {
        matches!(self, VerificationObject::Pruned { .. })
    }

    /// Checks if this is a container.
    pub fn is_container(&self) -> bool {
        matches!(self, VerificationObject::Container { .. })
    }

    /// Counts the points carried by this VO, without verifying anything.
    ///
    /// Pruned witnesses contribute no points.
    pub fn point_count(&self) -> usize {
        match self {
            VerificationObject::Leaf { points } => points.len(),
            VerificationObject::Pruned { .. } => 0,
            VerificationObject::Container { children } => {
                children.iter().map(VerificationObject::point_count).sum()
            }
        }
    }
}
