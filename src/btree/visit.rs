//! Read-only views over the tree structure for printing and debugging.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::node::Node;
use super::tree::BTree;

/// One node as seen by the structural enumerator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeView<'a, K> {
    /// Distance from the root (root is 0)
    pub depth: usize,
    /// Keys in ascending order
    pub keys: &'a [K],
    /// Whether this is a leaf node
    pub is_leaf: bool,
    /// Number of children (0 for leaves)
    pub children: usize,
}

/// Pre-order iterator over every node in the tree
pub struct Nodes<'a, K> {
    stack: Vec<(usize, &'a Node<K>)>,
}

impl<'a, K> Iterator for Nodes<'a, K> {
    type Item = NodeView<'a, K>;

    fn next(&mut self) -> Option<Self::Item> {
        let (depth, node) = self.stack.pop()?;
        // Reversed so the leftmost child is visited first
        for child in node.children().iter().rev() {
            self.stack.push((depth + 1, child));
        }
        Some(NodeView {
            depth,
            keys: node.keys(),
            is_leaf: node.is_leaf(),
            children: node.children().len(),
        })
    }
}

/// Owned snapshot of a node for visualization
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TreeNode<K> {
    /// Whether this is a leaf node
    pub is_leaf: bool,
    /// Keys in this node
    pub keys: Vec<K>,
    /// Child nodes (only for internal nodes)
    pub children: Vec<TreeNode<K>>,
}

impl<K> BTree<K> {
    /// Enumerate every node with its depth, root first, children left to right
    pub fn nodes(&self) -> Nodes<'_, K> {
        Nodes {
            stack: self.root.iter().map(|root| (0, root)).collect(),
        }
    }

    /// All keys in ascending order
    pub fn keys(&self) -> Vec<&K> {
        let mut out = Vec::new();
        if let Some(root) = &self.root {
            collect_in_order(root, &mut out);
        }
        out
    }

    /// Export the tree structure for visualization
    pub fn export(&self) -> Option<TreeNode<K>>
    where
        K: Clone,
    {
        self.root.as_ref().map(export_node)
    }
}

fn collect_in_order<'a, K>(node: &'a Node<K>, out: &mut Vec<&'a K>) {
    match node {
        Node::Leaf { keys } => out.extend(keys),
        Node::Internal { keys, children } => {
            for (key, child) in keys.iter().zip(children) {
                collect_in_order(child, out);
                out.push(key);
            }
            if let Some(last) = children.last() {
                collect_in_order(last, out);
            }
        }
    }
}

fn export_node<K: Clone>(node: &Node<K>) -> TreeNode<K> {
    TreeNode {
        is_leaf: node.is_leaf(),
        keys: node.keys().to_vec(),
        children: node.children().iter().map(export_node).collect(),
    }
}

impl<K: Ord + fmt::Debug> BTree<K> {
    /// Debug search - traces the path through the tree
    pub fn trace_search(&self, key: &K) -> Vec<String> {
        let mut trace = Vec::new();
        let mut node = match &self.root {
            Some(root) => root,
            None => {
                trace.push("Tree is empty".to_string());
                return trace;
            }
        };

        trace.push(format!("Searching for key: {:?}", key));
        trace.push(format!("Height: {}, min degree: {}", self.height, self.min_degree()));

        let mut depth = 0;
        loop {
            trace.push(format!(
                "  Level {}: is_leaf={}, keys={:?}",
                depth,
                node.is_leaf(),
                node.keys()
            ));
            match node.find(key) {
                Ok(idx) => {
                    trace.push(format!("  FOUND at index {}", idx));
                    return trace;
                }
                Err(idx) => match node {
                    Node::Leaf { .. } => {
                        trace.push("  NOT FOUND in leaf".to_string());
                        return trace;
                    }
                    Node::Internal { children, .. } => {
                        trace.push(format!("  -> Descending to child {}", idx));
                        node = &children[idx];
                        depth += 1;
                    }
                },
            }
        }
    }
}

/// Indented rendering, one line per node
impl<K: fmt::Debug> fmt::Display for BTree<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.root.is_none() {
            return writeln!(f, "(empty)");
        }
        for view in self.nodes() {
            writeln!(
                f,
                "{}Level {} | Keys: {:?}",
                "    ".repeat(view.depth),
                view.depth,
                view.keys
            )?;
        }
        Ok(())
    }
}
