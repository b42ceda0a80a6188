//! Digest computation and the byte-exact serialization it commits to.
//!
//! Every node digest is SHA-256 over a positional, fixed-width byte
//! layout: integers little-endian at their declared width, digests
//! verbatim, no framing or separators. The builder and the verifier must
//! produce identical bytes for identical content, so the two entry
//! schemas live here and nowhere else:
//!
//! - point entry: `u32 id, i32 x, i32 y` (12 bytes)
//! - child entry: `i32 min_x, i32 min_y, i32 max_x, i32 max_y, digest`
//!   (48 bytes)

use crate::geometry::Rect;
use crate::point::PointRecord;
use sha2::{Digest as _, Sha256};

/// Length of a node digest in bytes (SHA-256).
pub const DIGEST_LEN: usize = 32;

/// A node digest.
pub type NodeDigest = [u8; DIGEST_LEN];

/// The conventional digest of an absent tree: all zeroes.
pub const EMPTY_DIGEST: NodeDigest = [0u8; DIGEST_LEN];

/// Serialized length of one point entry in a leaf.
pub const POINT_ENTRY_LEN: usize = 4 + 4 + 4;

/// Serialized length of one child entry in an internal node.
pub const CHILD_ENTRY_LEN: usize = 4 * 4 + DIGEST_LEN;

/// An append-only byte sink backing the digest computation.
///
/// Integers are appended in little-endian two's-complement form at
/// exactly their declared width. Callers pre-size the buffer to the
/// expected serialized length.
#[derive(Debug, Default)]
pub struct HashBuffer {
    buf: Vec<u8>,
}

impl HashBuffer {
    /// Creates a buffer pre-sized for `capacity` bytes.
    pub fn with_capacity(capacity: usize) -> HashBuffer {
        HashBuffer {
            buf: Vec::with_capacity(capacity),
        }
    }

    /// Appends a signed 32-bit integer, little-endian.
    pub fn put_i32(&mut self, value: i32) -> &mut Self {
        self.buf.extend_from_slice(&value.to_le_bytes());
        self
    }

    /// Appends an unsigned 32-bit integer, little-endian.
    pub fn put_u32(&mut self, value: u32) -> &mut Self {
        self.buf.extend_from_slice(&value.to_le_bytes());
        self
    }

    /// Appends a byte slice verbatim.
    pub fn put_bytes(&mut self, bytes: &[u8]) -> &mut Self {
        self.buf.extend_from_slice(bytes);
        self
    }

    /// Returns the number of bytes accumulated so far.
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// Checks whether the buffer is empty.
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Returns the accumulated bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    /// Computes the SHA-256 digest of the accumulated bytes.
    pub fn digest(&self) -> NodeDigest {
        let mut hasher = Sha256::new();
        hasher.update(&self.buf);
        hasher.finalize().into()
    }
}

/// Appends one leaf point entry to the buffer.
pub fn put_point_record(buf: &mut HashBuffer, p: &PointRecord) {
    buf.put_u32(p.id).put_i32(p.loc.x).put_i32(p.loc.y);
}

/// Appends one internal child entry to the buffer.
pub fn put_child_entry(buf: &mut HashBuffer, mbr: &Rect, digest: &NodeDigest) {
    buf.put_i32(mbr.min_x)
        .put_i32(mbr.min_y)
        .put_i32(mbr.max_x)
        .put_i32(mbr.max_y)
        .put_bytes(digest);
}

/// Formats a digest as a lowercase hexadecimal string.
pub fn digest_to_hex(digest: &NodeDigest) -> String {
    let mut out = String::with_capacity(DIGEST_LEN * 2);
    for b in digest {
        out.push_str(&format!("{:02x}", b));
    }
    out
}
