//! B-tree node layout and the single-step restructuring primitives.
//!
//! A node is either a leaf holding only keys, or an internal node holding keys
//! and exactly one more owned child than it has keys. Siblings always sit at
//! the same depth, so the shape of the two nodes passed to any primitive below
//! always matches.

use log::trace;

/// A B-tree node
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Node<K> {
    /// Bottom level: keys only
    Leaf { keys: Vec<K> },
    /// Keys plus `keys.len() + 1` children
    Internal { keys: Vec<K>, children: Vec<Node<K>> },
}

/// Outcome of a recursive removal, reported to the parent
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Removal {
    /// The key was not in this subtree
    Missing,
    /// Removed; this node still holds at least `min_keys` keys
    Settled,
    /// Removed; this node now holds fewer than `min_keys` keys
    Underflow,
}

impl<K> Node<K> {
    /// Create a leaf from already sorted keys
    pub fn leaf(keys: Vec<K>) -> Self {
        Node::Leaf { keys }
    }

    /// Create an internal node
    pub fn internal(keys: Vec<K>, children: Vec<Node<K>>) -> Self {
        debug_assert_eq!(children.len(), keys.len() + 1);
        Node::Internal { keys, children }
    }

    pub fn keys(&self) -> &[K] {
        match self {
            Node::Leaf { keys } | Node::Internal { keys, .. } => keys,
        }
    }

    /// Children of this node; empty for a leaf
    pub fn children(&self) -> &[Node<K>] {
        match self {
            Node::Leaf { .. } => &[],
            Node::Internal { children, .. } => children,
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, Node::Leaf { .. })
    }

    /// Number of keys held by this node
    pub fn len(&self) -> usize {
        self.keys().len()
    }

    /// Split a full node around its middle key.
    ///
    /// Keys (and children) after the middle move to the returned sibling; the
    /// middle key is returned for promotion into the parent.
    pub fn split(&mut self) -> (K, Node<K>) {
        let mid = self.len() / 2;
        trace!("splitting node of {} keys at index {}", self.len(), mid);
        match self {
            Node::Leaf { keys } => {
                let mut right = keys.split_off(mid);
                let median = right.remove(0);
                (median, Node::Leaf { keys: right })
            }
            Node::Internal { keys, children } => {
                let mut right = keys.split_off(mid);
                let median = right.remove(0);
                let right_children = children.split_off(mid + 1);
                (median, Node::internal(right, right_children))
            }
        }
    }

    /// Detach the first key together with the first child, if any
    fn pop_front(&mut self) -> (K, Option<Node<K>>) {
        match self {
            Node::Leaf { keys } => (keys.remove(0), None),
            Node::Internal { keys, children } => (keys.remove(0), Some(children.remove(0))),
        }
    }

    /// Detach the last key together with the last child, if any
    fn pop_back(&mut self) -> (K, Option<Node<K>>) {
        match self {
            Node::Leaf { keys } => {
                let last = keys.len() - 1;
                (keys.remove(last), None)
            }
            Node::Internal { keys, children } => {
                let last = keys.len() - 1;
                let key = keys.remove(last);
                let child = children.remove(last + 1);
                (key, Some(child))
            }
        }
    }

    fn push_front(&mut self, key: K, child: Option<Node<K>>) {
        match (self, child) {
            (Node::Leaf { keys }, None) => keys.insert(0, key),
            (Node::Internal { keys, children }, Some(child)) => {
                keys.insert(0, key);
                children.insert(0, child);
            }
            _ => unreachable!("sibling nodes at different depths"),
        }
    }

    fn push_back(&mut self, key: K, child: Option<Node<K>>) {
        match (self, child) {
            (Node::Leaf { keys }, None) => keys.push(key),
            (Node::Internal { keys, children }, Some(child)) => {
                keys.push(key);
                children.push(child);
            }
            _ => unreachable!("sibling nodes at different depths"),
        }
    }

    /// Append `separator` and everything in `right` onto this node
    fn absorb(&mut self, separator: K, right: Node<K>) {
        match (self, right) {
            (Node::Leaf { keys }, Node::Leaf { keys: right_keys }) => {
                keys.push(separator);
                keys.extend(right_keys);
            }
            (
                Node::Internal { keys, children },
                Node::Internal {
                    keys: right_keys,
                    children: right_children,
                },
            ) => {
                keys.push(separator);
                keys.extend(right_keys);
                children.extend(right_children);
            }
            _ => unreachable!("sibling nodes at different depths"),
        }
    }
}

/// Move one key from `children[idx + 1]` through `keys[idx]` into `children[idx]`.
///
/// The right sibling's first key replaces the separator, the old separator
/// lands at the end of the left node, and the right sibling's first child (if
/// internal) follows it.
pub(crate) fn rotate_left<K>(keys: &mut [K], children: &mut [Node<K>], idx: usize) {
    let (left, right) = children.split_at_mut(idx + 1);
    let (left, right) = (&mut left[idx], &mut right[0]);
    let (mut key, child) = right.pop_front();
    std::mem::swap(&mut keys[idx], &mut key);
    left.push_back(key, child);
    trace!("rotated one key left across separator {}", idx);
}

/// Mirror of [`rotate_left`]: move one key from `children[idx]` through
/// `keys[idx]` into `children[idx + 1]`.
pub(crate) fn rotate_right<K>(keys: &mut [K], children: &mut [Node<K>], idx: usize) {
    let (left, right) = children.split_at_mut(idx + 1);
    let (left, right) = (&mut left[idx], &mut right[0]);
    let (mut key, child) = left.pop_back();
    std::mem::swap(&mut keys[idx], &mut key);
    right.push_front(key, child);
    trace!("rotated one key right across separator {}", idx);
}

/// Merge `children[idx]`, `keys[idx]` and `children[idx + 1]` into `children[idx]`.
///
/// The parent loses one key and one child.
pub(crate) fn merge_children<K>(keys: &mut Vec<K>, children: &mut Vec<Node<K>>, idx: usize) {
    let separator = keys.remove(idx);
    let right = children.remove(idx + 1);
    children[idx].absorb(separator, right);
    trace!(
        "merged children {} and {} into node of {} keys",
        idx,
        idx + 1,
        children[idx].len()
    );
}

impl<K: Ord> Node<K> {
    /// Binary scan: `Ok(i)` on an exact match, `Err(i)` with the child index
    /// to descend into otherwise.
    pub fn find(&self, key: &K) -> Result<usize, usize> {
        self.keys().binary_search(key)
    }

    /// Insert into the subtree rooted at this non-full node.
    ///
    /// The key must be absent. Full children are fixed before descending so
    /// the leaf reached always has room.
    pub fn insert_non_full(&mut self, key: K, max_keys: usize) {
        match self {
            Node::Leaf { keys } => {
                let pos = keys.partition_point(|k| k < &key);
                debug_assert!(keys.get(pos) != Some(&key), "duplicate key reached a leaf");
                keys.insert(pos, key);
            }
            Node::Internal { keys, children } => {
                let mut idx = keys.partition_point(|k| k < &key);
                if children[idx].len() >= max_keys {
                    make_room(keys, children, idx, max_keys);
                    idx = keys.partition_point(|k| k < &key);
                }
                children[idx].insert_non_full(key, max_keys);
            }
        }
    }

    /// Remove `key` from the subtree rooted at this node.
    ///
    /// Every child is topped up to more than `min_keys` keys before the
    /// descent enters it, so only this node itself can report underflow.
    pub fn remove(&mut self, key: &K, min_keys: usize) -> Removal {
        let outcome = match self {
            Node::Leaf { keys } => match keys.binary_search(key) {
                Ok(idx) => {
                    keys.remove(idx);
                    Removal::Settled
                }
                Err(_) => Removal::Missing,
            },
            Node::Internal { keys, children } => match keys.binary_search(key) {
                Ok(idx) => {
                    remove_separator(keys, children, idx, key, min_keys);
                    Removal::Settled
                }
                Err(idx) => {
                    let idx = ensure_spare(keys, children, idx, min_keys);
                    children[idx].remove(key, min_keys)
                }
            },
        };

        match outcome {
            Removal::Missing => Removal::Missing,
            _ if self.len() < min_keys => Removal::Underflow,
            _ => Removal::Settled,
        }
    }

    /// Remove and return the largest key in this subtree
    fn pop_max(&mut self, min_keys: usize) -> K {
        match self {
            Node::Leaf { keys } => {
                let last = keys.len() - 1;
                keys.remove(last)
            }
            Node::Internal { keys, children } => {
                let last = children.len() - 1;
                let idx = ensure_spare(keys, children, last, min_keys);
                children[idx].pop_max(min_keys)
            }
        }
    }

    /// Remove and return the smallest key in this subtree
    fn pop_min(&mut self, min_keys: usize) -> K {
        match self {
            Node::Leaf { keys } => keys.remove(0),
            Node::Internal { keys, children } => {
                let idx = ensure_spare(keys, children, 0, min_keys);
                children[idx].pop_min(min_keys)
            }
        }
    }
}

/// Remove `keys[idx]`, which equals `key`, from an internal node.
fn remove_separator<K: Ord>(
    keys: &mut Vec<K>,
    children: &mut Vec<Node<K>>,
    idx: usize,
    key: &K,
    min_keys: usize,
) {
    if children[idx].len() > min_keys {
        let predecessor = children[idx].pop_max(min_keys);
        keys[idx] = predecessor;
    } else if children[idx + 1].len() > min_keys {
        let successor = children[idx + 1].pop_min(min_keys);
        keys[idx] = successor;
    } else {
        merge_children(keys, children, idx);
        let outcome = children[idx].remove(key, min_keys);
        debug_assert_ne!(outcome, Removal::Missing);
    }
}

/// Give a full child room before the insert descends into it.
///
/// Prefers shifting one key into the left sibling, then into the right
/// sibling, and only splits when neither sibling has two free slots.
fn make_room<K>(keys: &mut Vec<K>, children: &mut Vec<Node<K>>, idx: usize, max_keys: usize) {
    if idx > 0 && children[idx - 1].len() + 2 <= max_keys {
        rotate_left(keys, children, idx - 1);
    } else if idx + 1 < children.len() && children[idx + 1].len() + 2 <= max_keys {
        rotate_right(keys, children, idx);
    } else {
        let (median, right) = children[idx].split();
        keys.insert(idx, median);
        children.insert(idx + 1, right);
    }
}

/// Top up `children[idx]` to more than `min_keys` keys before a removal
/// descends into it. Returns the index of the child to descend into, which
/// moves left by one when the child was merged into its left sibling.
fn ensure_spare<K>(
    keys: &mut Vec<K>,
    children: &mut Vec<Node<K>>,
    idx: usize,
    min_keys: usize,
) -> usize {
    if children[idx].len() > min_keys {
        return idx;
    }

    if idx > 0 && children[idx - 1].len() > min_keys {
        rotate_right(keys, children, idx - 1);
        idx
    } else if idx + 1 < children.len() && children[idx + 1].len() > min_keys {
        rotate_left(keys, children, idx);
        idx
    } else if idx + 1 < children.len() {
        merge_children(keys, children, idx);
        idx
    } else {
        merge_children(keys, children, idx - 1);
        idx - 1
    }
}
