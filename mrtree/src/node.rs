//! The Merkle R-tree node model.
//!
//! Nodes are immutable after construction and carry their minimum
//! bounding rectangle and digest precomputed. A leaf commits to its
//! point sequence; an internal node commits to the `(mbr, digest)` pair
//! of every child, in child order. Changing any point, identifier,
//! child order, or child digest changes the node digest.

use crate::geometry::Rect;
use crate::hashing::{
    self, HashBuffer, NodeDigest, CHILD_ENTRY_LEN, EMPTY_DIGEST, POINT_ENTRY_LEN,
};
use crate::point::{self, PointRecord};
use serde::{Deserialize, Serialize};

/// A node of the Merkle R-tree.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum Node {
    /// Leaf node owning an ordered sequence of points.
    Leaf {
        mbr: Rect,
        digest: NodeDigest,
        points: Vec<PointRecord>,
    },
    /// Internal node owning an ordered sequence of children.
    Internal {
        mbr: Rect,
        digest: NodeDigest,
        children: Vec<Node>,
    },
}

impl Node {
    /// Builds a leaf from an owned point sequence, preserving its order.
    ///
    /// The MBR is the union of the point locations; the digest is SHA-256
    /// over the serialized point entries. An empty sequence yields a leaf
    /// with the empty MBR and the all-zero digest.
    pub fn leaf(points: Vec<PointRecord>) -> Node {
        if points.is_empty() {
            return Node::Leaf {
                mbr: Rect::EMPTY,
                digest: EMPTY_DIGEST,
                points,
            };
        }

        let mbr = point::compute_mbr(&points);

        let mut buf = HashBuffer::with_capacity(points.len() * POINT_ENTRY_LEN);
        for p in &points {
            hashing::put_point_record(&mut buf, p);
        }

        Node::Leaf {
            mbr,
            digest: buf.digest(),
            points,
        }
    }

    /// Builds an internal node from an owned child sequence, preserving
    /// its order.
    ///
    /// The MBR is the union of the child MBRs; the digest is SHA-256 over
    /// the serialized child entries.
    pub fn internal(children: Vec<Node>) -> Node {
        if children.is_empty() {
            return Node::Internal {
                mbr: Rect::EMPTY,
                digest: EMPTY_DIGEST,
                children,
            };
        }

        let mut mbr = Rect::EMPTY;
        let mut buf = HashBuffer::with_capacity(children.len() * CHILD_ENTRY_LEN);
        for child in &children {
            mbr = mbr.union(child.mbr());
            hashing::put_child_entry(&mut buf, child.mbr(), child.digest());
        }

        Node::Internal {
            mbr,
            digest: buf.digest(),
            children,
        }
    }

    /// Returns the minimum bounding rectangle of this node.
    pub fn mbr(&self) -> &Rect {
        match self {
            Node::Leaf { mbr, .. } | Node::Internal { mbr, .. } => mbr,
        }
    }

    /// Returns the digest of this node.
    pub fn digest(&self) -> &NodeDigest {
        match self {
            Node::Leaf { digest, .. } | Node::Internal { digest, .. } => digest,
        }
    }

    /// Checks if this node is a leaf.
    pub fn is_leaf(&self) -> bool {
        matches!(self, Node::Leaf { .. })
    }

    /// Returns the number of points (leaf) or children (internal).
    pub fn len(&self) -> usize {
        match self {
            Node::Leaf { points, .. } => points.len(),
            Node::Internal { children, .. } => children.len(),
        }
    }

    /// Checks if this node holds no entries.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the height of the subtree rooted here; a leaf has height 1.
    pub fn height(&self) -> usize {
        match self {
            Node::Leaf { .. } => 1,
            Node::Internal { children, .. } => {
                1 + children.iter().map(Node::height).max().unwrap_or(0)
            }
        }
    }

    /// Counts the leaves of the subtree rooted here.
    pub fn leaf_count(&self) -> usize {
        match self {
            Node::Leaf { .. } => 1,
            Node::Internal { children, .. } => children.iter().map(Node::leaf_count).sum(),
        }
    }

    /// Counts the points stored in the subtree rooted here.
    pub fn point_count(&self) -> usize {
        match self {
            Node::Leaf { points, .. } => points.len(),
            Node::Internal { children, .. } => children.iter().map(Node::point_count).sum(),
        }
    }
}
