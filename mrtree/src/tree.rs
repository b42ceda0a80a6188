//! The bulk-loaded Merkle R-tree and its query engine.

use crate::errors::{TreeError, TreeResult};
use crate::geometry::Rect;
use crate::hashing::{NodeDigest, EMPTY_DIGEST};
use crate::morton::PointOrder;
use crate::node::Node;
use crate::point::PointRecord;
use crate::query::VerificationObject;
use crate::stats::QueryStats;
use crate::verify::{self, VerifyOutcome};
use std::time::Instant;

/// A range query result whose digest has been checked against the tree's
/// own root commitment.
#[derive(Clone, Debug)]
pub struct VerifiedQuery {
    /// The verifier's reconstruction and matching points
    pub outcome: VerifyOutcome,
    /// Whether the reconstructed digest equals the root digest
    pub authentic: bool,
}

/// An authenticated 2D range-query index over immutable point data.
///
/// The tree is bulk-loaded once and read-only afterwards. It owns every
/// node; dropping the handle releases the whole tree. Queries are pure
/// reads, so independent queries against the same tree may run in
/// parallel without coordination.
///
/// # Examples
///
/// ```
/// use mrtree::{MerkleRTree, PointOrder, PointRecord, Rect};
///
/// let points = vec![
///     PointRecord::new(0, 0, 0),
///     PointRecord::new(1, 10, 10),
///     PointRecord::new(2, 20, 20),
/// ];
/// let tree = MerkleRTree::bulk_load(points, 2, PointOrder::ZOrder)?;
///
/// let mut stats = mrtree::QueryStats::new();
/// let verified = tree.query_and_verify(&Rect::new(5, 5, 25, 25), &mut stats)?;
/// assert!(verified.authentic);
/// assert_eq!(verified.outcome.count(), 2);
/// # Ok::<(), mrtree::TreeError>(())
/// ```
#[derive(Clone, Debug)]
pub struct MerkleRTree {
    root: Option<Node>,
    capacity: usize,
    order: PointOrder,
}

impl MerkleRTree {
    /// Bulk-loads a tree from a point sequence.
    ///
    /// Points are sorted by `order` and packed bottom-up into runs of
    /// exactly `capacity` entries, the last run of each level holding the
    /// remainder. The construction is deterministic: the same points,
    /// capacity and order always produce the same root digest.
    ///
    /// An empty sequence yields a rootless tree whose digest is the
    /// all-zero [`EMPTY_DIGEST`].
    ///
    /// # Errors
    ///
    /// [`TreeError::InvalidCapacity`] if `capacity` is zero.
    pub fn bulk_load(
        mut points: Vec<PointRecord>,
        capacity: usize,
        order: PointOrder,
    ) -> TreeResult<MerkleRTree> {
        if capacity == 0 {
            return Err(TreeError::InvalidCapacity(capacity));
        }
        if points.is_empty() {
            return Ok(MerkleRTree {
                root: None,
                capacity,
                order,
            });
        }

        order.sort_points(&mut points);

        let mut level: Vec<Node> = Vec::with_capacity(points.len().div_ceil(capacity));
        let mut rest = points;
        while !rest.is_empty() {
            let tail = rest.split_off(rest.len().min(capacity));
            level.push(Node::leaf(rest));
            rest = tail;
        }

        while level.len() > 1 {
            let mut next = Vec::with_capacity(level.len().div_ceil(capacity));
            let mut nodes = level;
            while !nodes.is_empty() {
                let tail = nodes.split_off(nodes.len().min(capacity));
                next.push(Node::internal(nodes));
                nodes = tail;
            }
            level = next;
        }

        Ok(MerkleRTree {
            root: level.pop(),
            capacity,
            order,
        })
    }

    /// Returns the root node, or `None` for an empty tree.
    pub fn root(&self) -> Option<&Node> {
        self.root.as_ref()
    }

    /// Checks if the tree holds no points.
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Returns the leaf/internal fanout the tree was built with.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns the point ordering the tree was built with.
    pub fn order(&self) -> PointOrder {
        self.order
    }

    /// Returns the tree height; an empty tree has height 0.
    pub fn height(&self) -> usize {
        self.root.as_ref().map_or(0, Node::height)
    }

    /// Returns the number of leaves.
    pub fn leaf_count(&self) -> usize {
        self.root.as_ref().map_or(0, Node::leaf_count)
    }

    /// Returns the number of points stored.
    pub fn point_count(&self) -> usize {
        self.root.as_ref().map_or(0, Node::point_count)
    }

    /// Returns the bounding rectangle of the dataset, [`Rect::EMPTY`] for
    /// an empty tree.
    pub fn root_mbr(&self) -> Rect {
        self.root.as_ref().map_or(Rect::EMPTY, |n| *n.mbr())
    }

    /// Returns the root digest the tree commits to, [`EMPTY_DIGEST`] for
    /// an empty tree.
    ///
    /// This is the value a client must hold to authenticate query results.
    pub fn root_digest(&self) -> NodeDigest {
        self.root.as_ref().map_or(EMPTY_DIGEST, |n| *n.digest())
    }

    /// Runs a range query, producing a verification object.
    ///
    /// Returns `Ok(None)` for an empty tree. See
    /// [`range_query_with_stats`](Self::range_query_with_stats) for the
    /// descent rules.
    ///
    /// # Errors
    ///
    /// [`TreeError::InvalidQuery`] if the rectangle is inverted.
    pub fn range_query(&self, query: &Rect) -> TreeResult<Option<VerificationObject>> {
        let mut stats = QueryStats::new();
        self.range_query_with_stats(query, &mut stats)
    }

    /// Runs a range query, collecting statistics.
    ///
    /// The descent starts at the root and, at every explored internal
    /// node, considers each child in order: a child whose bounds miss the
    /// query is replaced by its `(mbr, digest)` witness; every other
    /// child is descended into. Reached leaves surrender their complete
    /// point sequence unfiltered, so the verifier can recompute their
    /// digest. The root itself is always explored; even a query disjoint
    /// from the whole dataset yields a container of witnesses that
    /// recombines to the root digest.
    pub fn range_query_with_stats(
        &self,
        query: &Rect,
        stats: &mut QueryStats,
    ) -> TreeResult<Option<VerificationObject>> {
        if !query.is_valid() {
            return Err(TreeError::InvalidQuery(*query));
        }
        Ok(self
            .root
            .as_ref()
            .map(|root| descend(root, query, stats)))
    }

    /// Runs a range query followed by verification, timing both phases
    /// and checking the reconstructed digest against the root digest.
    ///
    /// For an empty tree the outcome is empty and authentic by
    /// convention.
    ///
    /// # Errors
    ///
    /// [`TreeError::InvalidQuery`] if the rectangle is inverted.
    pub fn query_and_verify(
        &self,
        query: &Rect,
        stats: &mut QueryStats,
    ) -> TreeResult<VerifiedQuery> {
        let query_start = Instant::now();
        let vo = self.range_query_with_stats(query, stats)?;
        stats.query_time += query_start.elapsed();

        let verify_start = Instant::now();
        let outcome = match &vo {
            Some(vo) => verify::verify_with_stats(vo, query, stats),
            None => VerifyOutcome::empty(),
        };
        stats.verify_time += verify_start.elapsed();

        let authentic = outcome.matches_digest(&self.root_digest());
        Ok(VerifiedQuery { outcome, authentic })
    }
}

impl std::fmt::Display for MerkleRTree {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "MerkleRTree[points={}, leaves={}, height={}, capacity={}, order={}, mbr={}]",
            self.point_count(),
            self.leaf_count(),
            self.height(),
            self.capacity,
            self.order,
            self.root_mbr()
        )
    }
}

fn descend(node: &Node, query: &Rect, stats: &mut QueryStats) -> VerificationObject {
    stats.nodes_visited += 1;

    match node {
        Node::Leaf { points, .. } => {
            stats.points_examined += points.len() as u64;
            VerificationObject::Leaf {
                points: points.clone(),
            }
        }
        Node::Internal { children, .. } => {
            let vos = children
                .iter()
                .map(|child| {
                    if child.mbr().intersects(query) {
                        descend(child, query, stats)
                    } else {
                        stats.nodes_pruned += 1;
                        VerificationObject::Pruned {
                            mbr: *child.mbr(),
                            digest: *child.digest(),
                        }
                    }
                })
                .collect();
            VerificationObject::Container { children: vos }
        }
    }
}
