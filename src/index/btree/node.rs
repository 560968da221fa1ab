//! Node - a single B-tree node.
//!
//! A [`Node`] holds entries at every level of the tree, not only at the
//! leaves. Internal nodes additionally own `entries + 1` children and keep
//! an augmented count of the live entries in their whole subtree.

use crate::common::{Key, NodeId};

/// A key and its value, or a tombstone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Entry {
    pub(crate) key: Key,
    /// `None` marks a tombstone: the key slot stays, the record is gone.
    pub(crate) value: Option<String>,
}

impl Entry {
    pub(crate) fn live(key: Key, value: String) -> Self {
        Self {
            key,
            value: Some(value),
        }
    }

    #[inline]
    pub(crate) fn is_live(&self) -> bool {
        self.value.is_some()
    }
}

/// How [`Node::boundary_search`] treats a key that is not present.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Rounding {
    /// Only an exact match is reported.
    Exact,
    /// Report the last key strictly below the search key.
    Down,
    /// Report the first key strictly above the search key.
    Up,
}

/// A node in the tree.
///
/// # Layout
/// ```text
///            entries:   [ k0 ][ k1 ][ k2 ]
///   children:       [c0]  [c1]  [c2]  [c3]
/// ```
/// Every key in `c[i]` lies strictly between `k[i-1]` and `k[i]`.
#[derive(Debug, Default)]
pub(crate) struct Node {
    /// Entries in strictly ascending key order.
    pub(crate) entries: Vec<Entry>,

    /// Owned children; empty for leaves, `entries.len() + 1` otherwise.
    pub(crate) children: Vec<NodeId>,

    /// Owning node, or None for the root.
    pub(crate) parent: Option<NodeId>,

    pub(crate) leaf: bool,

    /// Live entries in this node plus the counts of all children.
    pub(crate) subtree_live: usize,
}

impl Node {
    /// Create an empty leaf.
    pub(crate) fn leaf() -> Self {
        Self {
            leaf: true,
            ..Self::default()
        }
    }

    /// Create an empty internal node.
    pub(crate) fn internal() -> Self {
        Self {
            leaf: false,
            ..Self::default()
        }
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    /// Binary search this node's keys.
    ///
    /// `Ok(i)` is an exact match at `i`; `Err(i)` is the insertion index,
    /// which for internal nodes is also the index of the child to descend.
    #[inline]
    pub(crate) fn search(&self, key: &Key) -> Result<usize, usize> {
        self.entries.binary_search_by(|entry| entry.key.cmp(key))
    }

    /// Binary search restricted to this node.
    ///
    /// An exact match returns its index under every rounding. Otherwise:
    /// - `Exact` returns None.
    /// - `Down` returns the last key below `key`, or None if there is none.
    /// - `Up` returns the first key above `key`, or `len()` if there is none
    ///   (the slot just past the last entry).
    pub(crate) fn boundary_search(&self, key: &Key, rounding: Rounding) -> Option<usize> {
        match (self.search(key), rounding) {
            (Ok(index), _) => Some(index),
            (Err(_), Rounding::Exact) => None,
            (Err(index), Rounding::Down) => index.checked_sub(1),
            (Err(index), Rounding::Up) => Some(index),
        }
    }

    /// Live entries held directly in this node.
    pub(crate) fn local_live(&self) -> usize {
        self.entries.iter().filter(|entry| entry.is_live()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(s: &str) -> Key {
        format!("{:0>19}", s).parse().unwrap()
    }

    fn node_with(keys: &[&str]) -> Node {
        let mut node = Node::leaf();
        for k in keys {
            node.entries.push(Entry::live(key(k), k.to_string()));
        }
        node
    }

    #[test]
    fn test_search_exact_and_insertion_point() {
        let node = node_with(&["b", "d", "f"]);
        assert_eq!(node.search(&key("d")), Ok(1));
        assert_eq!(node.search(&key("a")), Err(0));
        assert_eq!(node.search(&key("e")), Err(2));
        assert_eq!(node.search(&key("g")), Err(3));
    }

    #[test]
    fn test_boundary_search_exact_match_ignores_rounding() {
        let node = node_with(&["b", "d", "f"]);
        for rounding in [Rounding::Exact, Rounding::Down, Rounding::Up] {
            assert_eq!(node.boundary_search(&key("f"), rounding), Some(2));
        }
    }

    #[test]
    fn test_boundary_search_exact_only_misses() {
        let node = node_with(&["b", "d", "f"]);
        assert_eq!(node.boundary_search(&key("c"), Rounding::Exact), None);
    }

    #[test]
    fn test_boundary_search_rounding() {
        let node = node_with(&["b", "d", "f"]);

        assert_eq!(node.boundary_search(&key("c"), Rounding::Down), Some(0));
        assert_eq!(node.boundary_search(&key("c"), Rounding::Up), Some(1));

        // Below every key
        assert_eq!(node.boundary_search(&key("a"), Rounding::Down), None);
        assert_eq!(node.boundary_search(&key("a"), Rounding::Up), Some(0));

        // Above every key
        assert_eq!(node.boundary_search(&key("g"), Rounding::Down), Some(2));
        assert_eq!(node.boundary_search(&key("g"), Rounding::Up), Some(3));
    }

    #[test]
    fn test_boundary_search_empty_node() {
        let node = Node::leaf();
        assert_eq!(node.boundary_search(&key("a"), Rounding::Down), None);
        assert_eq!(node.boundary_search(&key("a"), Rounding::Up), Some(0));
    }

    #[test]
    fn test_local_live_skips_tombstones() {
        let mut node = node_with(&["a", "b", "c"]);
        node.entries[1].value = None;
        assert_eq!(node.local_live(), 2);
    }
}
