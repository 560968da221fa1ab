//! Descent from the root to the node that holds, or should hold, a key.
//!
//! Keys live at every level, so a descent stops at the first node with an
//! exact match even if that node is internal.

use crate::common::{Key, NodeId};

use super::node::Rounding;
use super::BTree;

/// Where a descent for a key ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Descent {
    /// `key` is stored in `node` at `index`.
    Match { node: NodeId, index: usize },
    /// `key` is absent; it belongs in leaf `node` at `index`.
    Leaf { node: NodeId, index: usize },
}

impl BTree {
    /// Walk from the root towards `key`, stopping at an exact match or a leaf.
    pub(crate) fn leaf_or_match_descend(&self, key: &Key) -> Descent {
        let mut node_id = self.root;
        loop {
            let node = self.arena.get(node_id);
            match node.search(key) {
                Ok(index) => {
                    return Descent::Match {
                        node: node_id,
                        index,
                    }
                }
                Err(index) if node.leaf => {
                    return Descent::Leaf {
                        node: node_id,
                        index,
                    }
                }
                // Child `index` brackets the keys between entries index-1 and index
                Err(index) => node_id = node.children[index],
            }
        }
    }

    /// Find the node and index holding `key`, at any depth.
    ///
    /// Returns the slot even if it is a tombstone; callers check liveness.
    pub(crate) fn exact_descend(&self, key: &Key) -> Option<(NodeId, usize)> {
        let mut node_id = self.root;
        loop {
            let node = self.arena.get(node_id);
            if let Some(index) = node.boundary_search(key, Rounding::Exact) {
                return Some((node_id, index));
            }
            if node.leaf {
                return None;
            }
            let child = node.entries.partition_point(|entry| entry.key < *key);
            node_id = node.children[child];
        }
    }
}
