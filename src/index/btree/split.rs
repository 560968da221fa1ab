//! Insert, overflow split and root growth.
//!
//! # Split
//! A full node that receives one more entry is replaced by two new siblings
//! and one promoted entry. With `mid = order / 2` and `idx` the incoming
//! entry's position among the node's existing keys:
//!
//! ```text
//! idx <  mid:  promote existing[mid-1]; left = existing[..mid-1] + incoming
//!                                       right = existing[mid..]
//! idx == mid:  promote incoming;        left = existing[..mid]
//!                                       right = existing[mid..]
//! idx >  mid:  promote existing[mid];   left = existing[..mid]
//!                                       right = existing[mid+1..] + incoming
//! ```
//!
//! The promoted entry, with the two siblings as its children, is then
//! inserted into the parent the same way. A split at the root creates a new
//! root holding only the promoted entry.

use std::cmp::Ordering;

use tracing::{debug, trace};

use crate::common::{Key, NodeId};

use super::locator::Descent;
use super::node::{Entry, Node};
use super::stats::TreeStats;
use super::BTree;

/// Result of splitting one node.
struct Split {
    promoted: Entry,
    left: NodeId,
    right: NodeId,
    /// Parent of the node that was split.
    parent: Option<NodeId>,
}

impl BTree {
    /// Insert `value` under `key`, overwriting any existing value.
    ///
    /// If the key is tombstoned it is revived in place; a key never occupies
    /// more than one slot.
    pub fn insert(&mut self, key: Key, value: impl Into<String>) {
        let value = value.into();

        match self.leaf_or_match_descend(&key) {
            Descent::Match { node, index } => {
                let entry = &mut self.arena.get_mut(node).entries[index];
                let revived = entry.value.replace(value).is_none();
                if revived {
                    trace!(%key, node = %node, "revived tombstone");
                    self.propagate_live_delta(Some(node), 1);
                    TreeStats::bump(&self.stats.revivals);
                } else {
                    trace!(%key, node = %node, "overwrote value");
                    TreeStats::bump(&self.stats.overwrites);
                }
            }
            Descent::Leaf { node, index } => {
                trace!(%key, node = %node, index, "inserting new key");
                self.add_and_rebalance(node, Entry::live(key, value));
                self.slots += 1;
                TreeStats::bump(&self.stats.inserts);
            }
        }
    }

    /// Add a fresh live entry to `leaf`, splitting upward as needed.
    fn add_and_rebalance(&mut self, leaf: NodeId, entry: Entry) {
        let mut target = leaf;
        let mut entry = entry;
        let mut attach = None;

        loop {
            if self.arena.get(target).len() < self.config.max_entries() {
                self.add_entry(target, entry, attach);

                // The new live entry now sits somewhere below `target`;
                // ancestors gain exactly one.
                self.recompute_count(target);
                let parent = self.arena.get(target).parent;
                self.propagate_live_delta(parent, 1);
                return;
            }

            let split = self.split_node(target, entry, attach);
            match split.parent {
                Some(parent) => {
                    target = parent;
                    entry = split.promoted;
                    attach = Some((split.left, split.right));
                }
                None => {
                    self.grow_root(split);
                    return;
                }
            }
        }
    }

    /// Insert `entry` at its sorted position in a node with room for it.
    ///
    /// When `attach` is set the entry was promoted from a split child: the
    /// child slot that held the old node takes `left` and `right` is placed
    /// immediately after it.
    fn add_entry(&mut self, node_id: NodeId, entry: Entry, attach: Option<(NodeId, NodeId)>) {
        let node = self.arena.get_mut(node_id);
        let index = match node.search(&entry.key) {
            Ok(index) | Err(index) => index,
        };
        node.entries.insert(index, entry);

        if let Some((left, right)) = attach {
            debug_assert!(!node.leaf, "split children attached to a leaf");
            node.children[index] = left;
            node.children.insert(index + 1, right);
            self.arena.get_mut(left).parent = Some(node_id);
            self.arena.get_mut(right).parent = Some(node_id);
        }

        debug_assert!(self.arena.get(node_id).len() <= self.config.max_entries());
    }

    /// Split a full node around `entry`, discarding the old node.
    fn split_node(
        &mut self,
        node_id: NodeId,
        entry: Entry,
        attach: Option<(NodeId, NodeId)>,
    ) -> Split {
        let Node {
            mut entries,
            mut children,
            parent,
            leaf,
            ..
        } = self.arena.release(node_id);

        let mid = self.config.order / 2;
        let idx = entries.partition_point(|existing| existing.key < entry.key);

        let mut left = if leaf { Node::leaf() } else { Node::internal() };
        let mut right = if leaf { Node::leaf() } else { Node::internal() };
        left.parent = parent;
        right.parent = parent;

        // Where the incoming entry goes once the halves exist
        enum Side {
            Left,
            Right,
            Promoted,
        }

        let (promoted, side) = match idx.cmp(&mid) {
            Ordering::Less => {
                right.entries = entries.split_off(mid);
                let promoted = entries.pop();
                left.entries = entries;
                if !leaf {
                    right.children = children.split_off(mid);
                    left.children = children;
                }
                (promoted, Side::Left)
            }
            Ordering::Equal => {
                right.entries = entries.split_off(mid);
                left.entries = entries;
                if !leaf {
                    // Child `mid` is the node whose split produced `entry`;
                    // it is replaced by the attached pair.
                    right.children = children.split_off(mid + 1);
                    children.truncate(mid);
                    left.children = children;
                }
                (None, Side::Promoted)
            }
            Ordering::Greater => {
                right.entries = entries.split_off(mid + 1);
                let promoted = entries.pop();
                left.entries = entries;
                if !leaf {
                    right.children = children.split_off(mid + 1);
                    left.children = children;
                }
                (promoted, Side::Right)
            }
        };

        let left_id = self.arena.alloc(left);
        let right_id = self.arena.alloc(right);

        let promoted = match side {
            Side::Left => {
                self.add_entry(left_id, entry, attach);
                promoted
            }
            Side::Right => {
                self.add_entry(right_id, entry, attach);
                promoted
            }
            Side::Promoted => {
                if let Some((attach_left, attach_right)) = attach {
                    self.arena.get_mut(left_id).children.push(attach_left);
                    self.arena.get_mut(right_id).children.insert(0, attach_right);
                }
                Some(entry)
            }
        };

        // A node at max_entries always has an entry at mid-1 and mid
        let Some(promoted) = promoted else {
            unreachable!("split of a non-full node");
        };

        self.adopt_children(left_id);
        self.adopt_children(right_id);
        self.recompute_count(left_id);
        self.recompute_count(right_id);

        debug!(
            node = %node_id,
            promoted = %promoted.key,
            left = %left_id,
            left_len = self.arena.get(left_id).len(),
            right = %right_id,
            right_len = self.arena.get(right_id).len(),
            leaf,
            "split node"
        );
        TreeStats::bump(&self.stats.splits);

        Split {
            promoted,
            left: left_id,
            right: right_id,
            parent,
        }
    }

    /// Point every child of `node_id` back at it.
    fn adopt_children(&mut self, node_id: NodeId) {
        let children = std::mem::take(&mut self.arena.get_mut(node_id).children);
        for &child in &children {
            self.arena.get_mut(child).parent = Some(node_id);
        }
        self.arena.get_mut(node_id).children = children;
    }

    /// Replace the root after it split: one entry, two children.
    fn grow_root(&mut self, split: Split) {
        let mut root = Node::internal();
        root.entries.push(split.promoted);
        root.children.push(split.left);
        root.children.push(split.right);

        let root_id = self.arena.alloc(root);
        self.adopt_children(root_id);
        self.recompute_count(root_id);
        self.root = root_id;

        TreeStats::bump(&self.stats.root_splits);
        debug!(root = %root_id, height = self.height(), "grew new root");
    }
}
