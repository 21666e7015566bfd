//! Read-only structural checks.
//!
//! None of these run on the insert/delete path. Tests call them after every
//! mutation to confirm the tree is still a valid B-tree.

use crate::error::InvariantViolation;

use super::node::Node;
use super::tree::BTree;

impl<K: Ord> BTree<K> {
    /// Every leaf sits at the same depth
    pub fn leaves_same_depth(&self) -> bool {
        self.check_leaf_depth().is_ok()
    }

    /// Keys inside every node are strictly increasing
    pub fn keys_sorted(&self) -> bool {
        self.check_sorted().is_ok()
    }

    /// Every node holds a number of keys within its bounds
    pub fn key_counts_in_bounds(&self) -> bool {
        self.check_key_counts().is_ok()
    }

    /// Every internal node has `keys + 1` children within its bounds
    pub fn child_counts_in_bounds(&self) -> bool {
        self.check_child_counts().is_ok()
    }

    /// Run every check, returning the first violation found
    pub fn validate(&self) -> Result<(), InvariantViolation> {
        self.check_leaf_depth()?;
        self.check_sorted()?;
        self.check_key_counts()?;
        self.check_child_counts()?;
        self.check_global_order()?;
        self.check_counters()
    }

    /// Panic if the tree is structurally broken
    pub fn assert_invariants(&self) {
        if let Err(violation) = self.validate() {
            panic!("B-tree invariant violated: {}", violation);
        }
    }

    fn check_leaf_depth(&self) -> Result<(), InvariantViolation> {
        let mut expected = None;
        for view in self.nodes().filter(|view| view.is_leaf) {
            match expected {
                None => expected = Some(view.depth),
                Some(depth) if depth != view.depth => {
                    return Err(InvariantViolation::UnevenLeafDepth {
                        expected: depth,
                        found: view.depth,
                    });
                }
                Some(_) => {}
            }
        }
        Ok(())
    }

    fn check_sorted(&self) -> Result<(), InvariantViolation> {
        for view in self.nodes() {
            if view.keys.windows(2).any(|pair| pair[0] >= pair[1]) {
                return Err(InvariantViolation::UnsortedKeys { depth: view.depth });
            }
        }
        Ok(())
    }

    fn check_key_counts(&self) -> Result<(), InvariantViolation> {
        let max = self.max_keys();
        for view in self.nodes() {
            let min = if view.depth == 0 { 1 } else { self.min_keys() };
            let count = view.keys.len();
            if count < min || count > max {
                return Err(InvariantViolation::KeyCount {
                    depth: view.depth,
                    count,
                    min,
                    max,
                });
            }
        }
        Ok(())
    }

    fn check_child_counts(&self) -> Result<(), InvariantViolation> {
        let max = 2 * self.min_degree();
        for view in self.nodes().filter(|view| !view.is_leaf) {
            let min = if view.depth == 0 { 2 } else { self.min_degree() };
            let count = view.children;
            let keys = view.keys.len();
            if count < min || count > max || count != keys + 1 {
                return Err(InvariantViolation::ChildCount {
                    depth: view.depth,
                    count,
                    keys,
                    min,
                    max,
                });
            }
        }
        Ok(())
    }

    fn check_global_order(&self) -> Result<(), InvariantViolation> {
        let keys = self.keys();
        match keys.windows(2).position(|pair| pair[0] >= pair[1]) {
            Some(position) => Err(InvariantViolation::GlobalOrder { position }),
            None => Ok(()),
        }
    }

    fn check_counters(&self) -> Result<(), InvariantViolation> {
        let actual = measure_height(self.root.as_ref());
        if actual != self.height {
            return Err(InvariantViolation::Height {
                cached: self.height,
                actual,
            });
        }

        let actual: usize = self.nodes().map(|view| view.keys.len()).sum();
        if actual != self.len {
            return Err(InvariantViolation::Len {
                cached: self.len,
                actual,
            });
        }
        Ok(())
    }
}

/// Height measured along the leftmost path
fn measure_height<K>(root: Option<&Node<K>>) -> usize {
    let mut height = 0;
    let mut node = root;
    while let Some(current) = node {
        height += 1;
        node = current.children().first();
    }
    height
}
