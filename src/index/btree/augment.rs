//! Subtree live-count maintenance.
//!
//! Every node's `subtree_live` equals the live entries in its own entries
//! plus the counts of its children. Tombstones and revivals adjust the path
//! to the root by one; splits rebuild the counts of the nodes they create.

use crate::common::NodeId;

use super::BTree;

impl BTree {
    /// Add `delta` to the count of `start` and every ancestor above it.
    pub(crate) fn propagate_live_delta(&mut self, start: Option<NodeId>, delta: isize) {
        let mut current = start;
        while let Some(node_id) = current {
            let node = self.arena.get_mut(node_id);
            let updated = node.subtree_live as isize + delta;
            assert!(updated >= 0, "live count underflow");
            node.subtree_live = updated as usize;
            current = node.parent;
        }
    }

    /// Rebuild one node's count from its entries and its children's counts.
    ///
    /// Children must already hold correct counts.
    pub(crate) fn recompute_count(&mut self, node_id: NodeId) {
        let node = self.arena.get(node_id);
        let children: usize = node
            .children
            .iter()
            .map(|&child| self.arena.get(child).subtree_live)
            .sum();
        let total = node.local_live() + children;
        self.arena.get_mut(node_id).subtree_live = total;
    }
}
