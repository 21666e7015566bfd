//! # BTree Index
//!
//! An in-memory B-tree of configurable minimum degree holding a
//! duplicate-free set of ordered keys.
//!
//! ## Architecture
//!
//! - **Types** (`types`): configuration and structural constants
//! - **B-Tree Layer** (`btree`): nodes, search/insert/delete, structural views
//!   and invariant diagnostics
//! - **Errors** (`error`): operation errors and invariant violations
//!
//! Every node exclusively owns its children, so the structure is a strict
//! tree. There is no internal locking; wrap the tree in a mutex to share it
//! between threads.
//!
//! ## Usage
//!
//! ```rust
//! use btree_index::{BTree, TreeError};
//!
//! let mut tree = BTree::new(3)?;
//! for key in [10, 20, 5, 6, 12, 30, 7, 17] {
//!     tree.insert(key)?;
//! }
//! assert_eq!(tree.height(), 2);
//!
//! tree.delete(&6)?;
//! assert_eq!(tree.search(&6), None);
//! assert_eq!(tree.insert(10), Err(TreeError::DuplicateKey));
//!
//! for node in tree.nodes() {
//!     println!("{} {:?}", node.depth, node.keys);
//! }
//! # Ok::<(), TreeError>(())
//! ```

pub mod btree;
pub mod error;
pub mod types;

pub use btree::{BTree, NodeView, Nodes, TreeNode};
pub use error::{InvariantViolation, Result, TreeError};
pub use types::{BTreeConfig, DEFAULT_MIN_DEGREE, MIN_DEGREE};
