//! Error types for the B-tree index.

use thiserror::Error;

/// Result type alias for tree operations
pub type Result<T> = std::result::Result<T, TreeError>;

/// Errors returned by the public tree operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TreeError {
    /// The key is already present; the tree was left unchanged
    #[error("Duplicate key")]
    DuplicateKey,

    /// The key is not present; the tree was left unchanged
    #[error("Key not found")]
    KeyNotFound,

    /// Minimum degree below the structural lower bound
    #[error("Invalid minimum degree: {degree} (min: {min})")]
    InvalidDegree { degree: usize, min: usize },
}

/// Structural corruption found by the diagnostic checks.
///
/// Never produced by correct operation. Tests use it to catch regressions in
/// the split/borrow/merge logic.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InvariantViolation {
    /// A leaf sits at a different depth than the first leaf reached
    #[error("Leaf at depth {found}, expected {expected}")]
    UnevenLeafDepth { expected: usize, found: usize },

    /// Keys inside one node are not strictly increasing
    #[error("Keys not strictly increasing in node at depth {depth}")]
    UnsortedKeys { depth: usize },

    /// Key count outside the allowed range for the node
    #[error("Node at depth {depth} holds {count} keys (allowed: {min}..={max})")]
    KeyCount {
        depth: usize,
        count: usize,
        min: usize,
        max: usize,
    },

    /// Child count outside the allowed range, or not equal to keys + 1
    #[error("Node at depth {depth} has {count} children (allowed: {min}..={max}, keys: {keys})")]
    ChildCount {
        depth: usize,
        count: usize,
        keys: usize,
        min: usize,
        max: usize,
    },

    /// In-order traversal is not strictly increasing
    #[error("Global key order broken at in-order position {position}")]
    GlobalOrder { position: usize },

    /// Cached height disagrees with the structure
    #[error("Cached height {cached}, actual {actual}")]
    Height { cached: usize, actual: usize },

    /// Cached key count disagrees with the structure
    #[error("Cached length {cached}, actual {actual}")]
    Len { cached: usize, actual: usize },
}

impl TreeError {
    /// Create an invalid degree error for the given degree
    pub fn invalid_degree(degree: usize) -> Self {
        Self::InvalidDegree {
            degree,
            min: crate::types::MIN_DEGREE,
        }
    }
}
