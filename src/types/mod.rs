//! Common types and configuration for the B-tree index.

use serde::{Deserialize, Serialize};

/// Smallest minimum degree that keeps the B-tree bounds meaningful
pub const MIN_DEGREE: usize = 2;

/// Default minimum degree (nodes hold 2..=5 keys)
pub const DEFAULT_MIN_DEGREE: usize = 3;

/// BTree configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BTreeConfig {
    /// Minimum degree `t`: non-root nodes hold `t - 1 ..= 2t - 1` keys
    pub min_degree: usize,
}

impl Default for BTreeConfig {
    fn default() -> Self {
        Self {
            min_degree: DEFAULT_MIN_DEGREE,
        }
    }
}

impl BTreeConfig {
    /// Create a new config with the given minimum degree
    pub fn new(min_degree: usize) -> Self {
        Self { min_degree }
    }

    /// Minimum number of keys in a non-root node
    pub fn min_keys(&self) -> usize {
        self.min_degree - 1
    }

    /// Maximum number of keys in any node
    pub fn max_keys(&self) -> usize {
        2 * self.min_degree - 1
    }

    /// Check the configuration is usable
    pub fn is_valid(&self) -> bool {
        self.min_degree >= MIN_DEGREE
    }
}
