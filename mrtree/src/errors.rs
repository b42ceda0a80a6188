//! Error types for index operations.

use crate::geometry::Rect;
use std::io;
use thiserror::Error;

/// Errors that can occur while building or querying the index, or while
/// loading datasets and workloads from disk.
#[derive(Debug, Error)]
pub enum TreeError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("dataset contains no points")]
    EmptyDataset,

    #[error("capacity must be at least 1, got {0}")]
    InvalidCapacity(usize),

    #[error("invalid query rectangle: {0}")]
    InvalidQuery(Rect),

    #[error("invalid operation: {0}")]
    InvalidOperation(String),
}

/// Result type for index operations.
pub type TreeResult<T> = Result<T, TreeError>;
