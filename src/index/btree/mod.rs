//! B-tree index with tombstone deletes and augmented range counts.
//!
//! Entries live at every level of the tree. Each node carries the number of
//! live entries in its subtree, which lets [`BTree::range_count`] skip whole
//! subtrees instead of visiting every key in the range.
//!
//! # Components
//! - [`BTree`] - owns the root and is the entry point for all operations
//! - `node` - entry and node layout, node-local binary search
//! - `arena` - slab storage addressed by [`NodeId`](crate::NodeId)
//! - `locator` - descent from the root to a key's node
//! - `split` - insert, overflow split and root growth
//! - `augment` - subtree live-count maintenance
//! - `range` - inclusive range counting
//! - [`Iter`] - in-order iteration over live entries
//! - [`TreeStats`] - operation counters

mod arena;
mod augment;
mod iter;
mod locator;
mod node;
mod range;
mod split;
mod stats;
mod validate;

use tracing::trace;

use crate::common::{Key, NodeId, Result, TreeConfig};

use arena::NodeArena;
use node::Node;

pub use iter::Iter;
pub use stats::{StatsSnapshot, TreeStats};

/// An in-memory B-tree over fixed-width keys.
///
/// # Example
/// ```
/// use tallytree::{BTree, Key};
///
/// let mut tree = BTree::new();
/// let jan: Key = "2020-01-01 00:00:00".parse().unwrap();
/// let mar: Key = "2020-03-01 00:00:00".parse().unwrap();
///
/// tree.insert(jan, "A");
/// tree.insert(mar, "B");
/// assert_eq!(tree.lookup(&jan), Some("A"));
/// assert_eq!(tree.range_count(&jan, &mar), 2);
///
/// assert!(tree.delete(&jan));
/// assert_eq!(tree.lookup(&jan), None);
/// assert_eq!(tree.live_count(), 1);
/// ```
#[derive(Debug)]
pub struct BTree {
    /// Storage for every node.
    arena: NodeArena,

    /// Root node; an empty tree is a single empty leaf.
    root: NodeId,

    config: TreeConfig,

    /// Entries physically present, tombstones included.
    slots: usize,

    stats: TreeStats,
}

impl BTree {
    /// Create an empty tree with the default order.
    pub fn new() -> Self {
        Self::build(TreeConfig::default())
    }

    /// Create an empty tree with a custom config.
    ///
    /// # Errors
    /// Returns `Error::InvalidOrder` if the order is too small to split.
    pub fn with_config(config: TreeConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::build(config))
    }

    fn build(config: TreeConfig) -> Self {
        let mut arena = NodeArena::new();
        let root = arena.alloc(Node::leaf());
        Self {
            arena,
            root,
            config,
            slots: 0,
            stats: TreeStats::new(),
        }
    }

    /// Look up the live value stored under `key`.
    ///
    /// Returns None if the key was never inserted or has been deleted.
    pub fn lookup(&self, key: &Key) -> Option<&str> {
        let value = self.exact_descend(key).and_then(|(node_id, index)| {
            self.arena.get(node_id).entries[index].value.as_deref()
        });

        match value {
            Some(_) => TreeStats::bump(&self.stats.lookup_hits),
            None => TreeStats::bump(&self.stats.lookup_misses),
        }
        value
    }

    /// Tombstone the entry stored under `key`.
    ///
    /// The key keeps its slot; a later insert revives it in place. Returns
    /// true iff a live entry was removed. Deleting an absent or already
    /// deleted key is a normal `false`, not an error.
    pub fn delete(&mut self, key: &Key) -> bool {
        let Some((node_id, index)) = self.exact_descend(key) else {
            return false;
        };

        let entry = &mut self.arena.get_mut(node_id).entries[index];
        if entry.value.take().is_none() {
            return false;
        }

        trace!(%key, node = %node_id, "tombstoned entry");
        self.propagate_live_delta(Some(node_id), -1);
        TreeStats::bump(&self.stats.tombstones);
        true
    }

    /// Number of live entries. O(1).
    #[inline]
    pub fn live_count(&self) -> usize {
        self.arena.get(self.root).subtree_live
    }

    /// True if the tree holds no live entries.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.live_count() == 0
    }

    /// Number of deleted keys still occupying a slot.
    ///
    /// Tombstones are never compacted, so this only grows under
    /// delete-heavy workloads until the keys are reinserted.
    pub fn tombstone_count(&self) -> usize {
        self.slots - self.live_count()
    }

    /// Number of levels; a lone root leaf has height 1.
    pub fn height(&self) -> usize {
        let mut height = 1;
        let mut node = self.arena.get(self.root);
        while !node.leaf {
            height += 1;
            node = self.arena.get(node.children[0]);
        }
        height
    }

    /// Number of nodes currently allocated.
    pub fn node_count(&self) -> usize {
        self.arena.live_nodes()
    }

    /// The config this tree was built with.
    pub fn config(&self) -> &TreeConfig {
        &self.config
    }

    /// Operation counters.
    pub fn stats(&self) -> &TreeStats {
        &self.stats
    }

    /// In-order iterator over live entries.
    pub fn iter(&self) -> Iter<'_> {
        Iter::new(self)
    }
}

impl Default for BTree {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> IntoIterator for &'a BTree {
    type Item = (&'a Key, &'a str);
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Iter<'a> {
        self.iter()
    }
}
