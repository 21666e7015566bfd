//! B-tree core implementation.
//!
//! This module provides the main BTree struct with operations for:
//! - search: Point lookups
//! - insert: Insertions of new keys
//! - delete: Removals
//! - height: Number of node levels

use crate::error::{Result, TreeError};
use crate::types::BTreeConfig;
use log::debug;

use super::node::{Node, Removal};

/// An in-memory B-tree holding a duplicate-free set of keys
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BTree<K> {
    /// Root node (None means empty tree)
    pub(crate) root: Option<Node<K>>,
    /// Structural parameters
    pub(crate) config: BTreeConfig,
    /// Current height of the tree
    pub(crate) height: usize,
    /// Number of keys stored
    pub(crate) len: usize,
}

impl<K: Ord> BTree<K> {
    /// Create an empty B-tree with minimum degree `t`
    pub fn new(min_degree: usize) -> Result<Self> {
        Self::with_config(BTreeConfig::new(min_degree))
    }

    /// Create an empty B-tree with the given configuration
    pub fn with_config(config: BTreeConfig) -> Result<Self> {
        if !config.is_valid() {
            return Err(TreeError::invalid_degree(config.min_degree));
        }

        Ok(Self {
            root: None,
            config,
            height: 0,
            len: 0,
        })
    }

    /// Get the height of the tree (0 when empty)
    pub fn height(&self) -> usize {
        self.height
    }

    /// Number of keys in the tree
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Minimum degree `t`
    pub fn min_degree(&self) -> usize {
        self.config.min_degree
    }

    /// Fewest keys a non-root node may hold
    pub fn min_keys(&self) -> usize {
        self.config.min_keys()
    }

    /// Most keys any node may hold
    pub fn max_keys(&self) -> usize {
        self.config.max_keys()
    }

    /// Get the current configuration
    pub fn config(&self) -> &BTreeConfig {
        &self.config
    }

    /// Drop every key
    pub fn clear(&mut self) {
        self.root = None;
        self.height = 0;
        self.len = 0;
    }

    /// Look up a key and return the stored copy
    pub fn search(&self, key: &K) -> Option<&K> {
        let mut node = self.root.as_ref()?;

        loop {
            match node.find(key) {
                Ok(idx) => return Some(&node.keys()[idx]),
                Err(idx) => match node {
                    Node::Leaf { .. } => return None,
                    Node::Internal { children, .. } => node = &children[idx],
                },
            }
        }
    }

    /// Check if a key exists
    pub fn contains(&self, key: &K) -> bool {
        self.search(key).is_some()
    }

    /// Insert a new key.
    ///
    /// Fails with [`TreeError::DuplicateKey`] without touching the tree if the
    /// key is already present.
    pub fn insert(&mut self, key: K) -> Result<()> {
        if self.contains(&key) {
            return Err(TreeError::DuplicateKey);
        }

        let max_keys = self.max_keys();
        let mut root = match self.root.take() {
            Some(root) => root,
            None => {
                self.root = Some(Node::leaf(vec![key]));
                self.height = 1;
                self.len = 1;
                return Ok(());
            }
        };

        // Splitting a full root is the only way the tree grows taller
        if root.len() >= max_keys {
            let (separator, right) = root.split();
            root = Node::internal(vec![separator], vec![root, right]);
            self.height += 1;
            debug!("root split, height now {}", self.height);
        }

        root.insert_non_full(key, max_keys);
        self.root = Some(root);
        self.len += 1;

        Ok(())
    }

    /// Delete a key from the tree.
    ///
    /// Fails with [`TreeError::KeyNotFound`] without touching the tree if the
    /// key is absent.
    pub fn delete(&mut self, key: &K) -> Result<()> {
        if !self.contains(key) {
            return Err(TreeError::KeyNotFound);
        }

        let min_keys = self.min_keys();
        let root = self.root.as_mut().ok_or(TreeError::KeyNotFound)?;
        if root.remove(key, min_keys) == Removal::Missing {
            return Err(TreeError::KeyNotFound);
        }
        self.len -= 1;

        // An emptied root is the only way the tree gets shorter
        if root.len() == 0 {
            self.root = match self.root.take() {
                Some(Node::Internal { mut children, .. }) => children.pop(),
                _ => None,
            };
            self.height -= 1;
            debug!("root collapsed, height now {}", self.height);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn build(min_degree: usize, keys: &[i32]) -> Result<BTree<i32>> {
        let mut tree = BTree::new(min_degree)?;
        for &key in keys {
            tree.insert(key)?;
            tree.assert_invariants();
        }
        Ok(tree)
    }

    const SAMPLE: [i32; 8] = [10, 20, 5, 6, 12, 30, 7, 17];

    #[test]
    fn test_btree_empty() -> Result<()> {
        let tree: BTree<i32> = BTree::new(2)?;
        assert_eq!(tree.search(&1), None);
        assert_eq!(tree.height(), 0);
        assert!(tree.is_empty());
        Ok(())
    }

    #[test]
    fn test_btree_rejects_small_degree() {
        assert_eq!(
            BTree::<i32>::new(1).unwrap_err(),
            TreeError::InvalidDegree { degree: 1, min: 2 }
        );
        assert!(BTree::<i32>::new(0).is_err());
    }

    #[test]
    fn test_btree_single_insert() -> Result<()> {
        let tree = build(2, &[42])?;
        assert_eq!(tree.search(&42), Some(&42));
        assert_eq!(tree.search(&7), None);
        assert_eq!(tree.height(), 1);
        assert_eq!(tree.len(), 1);
        Ok(())
    }

    #[test]
    fn test_sample_keys_height_two() -> Result<()> {
        let tree = build(3, &SAMPLE)?;
        assert_eq!(tree.height(), 2);
        for key in SAMPLE {
            assert_eq!(tree.search(&key), Some(&key));
        }
        assert_eq!(tree.keys(), vec![&5, &6, &7, &10, &12, &17, &20, &30]);
        Ok(())
    }

    #[test]
    fn test_root_split_raises_height_once() -> Result<()> {
        let mut tree = build(2, &[1, 2, 3])?;
        assert_eq!(tree.height(), 1);

        tree.insert(4)?;
        tree.assert_invariants();
        assert_eq!(tree.height(), 2);
        assert_eq!(tree.root.as_ref().map(|root| root.keys().to_vec()), Some(vec![2]));
        Ok(())
    }

    #[test]
    fn test_delete_back_to_empty() -> Result<()> {
        let mut tree = build(2, &[1, 2, 3, 4])?;

        for key in [4, 3, 2, 1] {
            tree.delete(&key)?;
            tree.assert_invariants();
            assert_eq!(tree.search(&key), None);
        }

        assert_eq!(tree.height(), 0);
        assert!(tree.root.is_none());
        assert_eq!(tree.len(), 0);
        Ok(())
    }

    #[test]
    fn test_delete_from_sample() -> Result<()> {
        let mut tree = build(3, &SAMPLE)?;
        tree.delete(&6)?;
        tree.assert_invariants();
        assert_eq!(tree.search(&6), None);
        assert_eq!(tree.len(), 7);
        Ok(())
    }

    #[test]
    fn test_duplicate_insert_leaves_tree_unchanged() -> Result<()> {
        let mut tree = build(2, &SAMPLE)?;
        let before = tree.clone();

        assert_eq!(tree.insert(12), Err(TreeError::DuplicateKey));
        assert_eq!(tree, before);
        Ok(())
    }

    #[test]
    fn test_missing_delete_leaves_tree_unchanged() -> Result<()> {
        let mut tree = build(2, &SAMPLE)?;
        let before = tree.clone();

        assert_eq!(tree.delete(&99), Err(TreeError::KeyNotFound));
        assert_eq!(tree, before);

        let mut empty: BTree<i32> = BTree::new(3)?;
        assert_eq!(empty.delete(&1), Err(TreeError::KeyNotFound));
        Ok(())
    }

    #[test]
    fn test_delete_internal_key_uses_predecessor() -> Result<()> {
        let mut tree = build(2, &[1, 2, 3, 4, 5, 6, 7, 8, 9, 10])?;
        let separator = tree.root.as_ref().map(|root| root.keys()[0]);

        if let Some(separator) = separator {
            tree.delete(&separator)?;
            tree.assert_invariants();
            assert!(!tree.contains(&separator));
        }
        assert_eq!(tree.len(), 9);
        Ok(())
    }

    #[test]
    fn test_btree_many_inserts_and_deletes() -> Result<()> {
        let mut tree = BTree::new(2)?;

        for i in 0..200 {
            let before = tree.height();
            tree.insert((i * 37) % 200)?;
            tree.assert_invariants();
            assert!(tree.height() == before || tree.height() == before + 1);
        }
        assert_eq!(tree.len(), 200);

        for i in (0..200).step_by(3) {
            let before = tree.height();
            tree.delete(&i)?;
            tree.assert_invariants();
            assert!(tree.height() == before || tree.height() + 1 == before);
        }

        for i in 0..200 {
            assert_eq!(tree.contains(&i), i % 3 != 0, "wrong membership for {}", i);
        }
        Ok(())
    }

    #[test]
    fn test_clear() -> Result<()> {
        let mut tree = build(3, &SAMPLE)?;
        tree.clear();
        assert!(tree.is_empty());
        assert_eq!(tree.height(), 0);
        tree.insert(1)?;
        assert_eq!(tree.len(), 1);
        Ok(())
    }
}
