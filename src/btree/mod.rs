//! B-tree implementation.
//!
//! This module provides an in-memory B-tree that supports:
//! - Point lookups (search)
//! - Insertions with pre-emptive split/redistribution
//! - Deletions with borrow/merge repair
//! - Structural enumeration and invariant diagnostics

mod diagnostics;
mod node;
mod tree;
mod visit;

pub use tree::BTree;
pub use visit::{NodeView, Nodes, TreeNode};
