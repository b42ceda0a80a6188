//! # mrtree - Authenticated 2D Range Queries
//!
//! This crate implements a Merkle R-tree (MR-tree): a bulk-loaded R-tree
//! over points in the integer plane whose nodes carry SHA-256 digests,
//! so that a range query can return a verification object proving the
//! answer is both sound (every returned point lies in the query
//! rectangle) and complete (no qualifying point was omitted) to a client
//! that knows only the trusted root digest.
//!
//! ## Features
//!
//! - **Bulk loading**: sort-then-pack construction along a configurable
//!   point ordering (lexicographic or Z-order)
//! - **Pruned queries**: subtrees outside the query are replaced by
//!   `(mbr, digest)` witnesses, keeping verification objects small
//! - **Stateless verification**: the verifier recomputes the root digest
//!   from the verification object alone
//! - **Deterministic commitments**: the same dataset, capacity and
//!   ordering always produce the same root digest
//! - **Workload tooling**: delimited-text loaders and random query
//!   generators for benchmarking
//!
//! ## Quick Start
//!
//! ```rust
//! use mrtree::{MerkleRTree, PointOrder, PointRecord, QueryStats, Rect};
//!
//! # fn main() -> mrtree::TreeResult<()> {
//! let points = vec![
//!     PointRecord::new(0, 0, 0),
//!     PointRecord::new(1, 10, 10),
//!     PointRecord::new(2, 20, 20),
//!     PointRecord::new(3, 30, 30),
//! ];
//!
//! // The server builds the tree; the client keeps only the root digest.
//! let tree = MerkleRTree::bulk_load(points, 2, PointOrder::ZOrder)?;
//! let trusted_root = tree.root_digest();
//!
//! // Query and verify: the result carries the recomputed digest.
//! let mut stats = QueryStats::new();
//! let verified = tree.query_and_verify(&Rect::new(5, 5, 25, 25), &mut stats)?;
//!
//! assert!(verified.authentic);
//! assert!(verified.outcome.matches_digest(&trusted_root));
//! assert_eq!(verified.outcome.count(), 2);
//! # Ok(())
//! # }
//! ```

pub mod errors;
pub mod geometry;
pub mod hashing;
pub mod loader;
pub mod morton;
pub mod node;
pub mod point;
pub mod query;
pub mod stats;
pub mod tree;
pub mod verify;
pub mod workload;

// Re-export core types
pub use errors::{TreeError, TreeResult};
pub use geometry::{Point, Rect};
pub use hashing::{digest_to_hex, HashBuffer, NodeDigest, DIGEST_LEN, EMPTY_DIGEST};
pub use morton::{morton_decode, morton_encode, PointOrder};
pub use node::Node;
pub use point::{compute_mbr, count_in_range, PointRecord};
pub use query::VerificationObject;
pub use stats::QueryStats;
pub use tree::{MerkleRTree, VerifiedQuery};
pub use verify::{verify, verify_with_stats, VerifyOutcome};

// Re-export I/O surface
pub use loader::{load_points_narrow, load_points_wide, load_queries};
pub use workload::{
    area_selectivity, generate_by_selectivity, generate_uniform, write_query_file,
};
