//! Inclusive range counting over subtree live counts.
//!
//! Within one node, the entries in `[begin, end]` occupy a contiguous run
//! `lo..hi`. Children strictly inside that run are wholly in range and
//! contribute their stored count; only the two children at the edges of the
//! run can be partially in range, so the search follows at most two paths
//! down the tree:
//!
//! ```text
//!              [ k0 | k1 | k2 | k3 | k4 ]        lo = 1, hi = 4
//!            c0   c1   c2   c3   c4   c5
//!                 ^    ^^^^^^^^^   ^
//!        recurse left  counted    recurse right
//! ```

use crate::common::{Key, NodeId};

use super::node::Rounding;
use super::BTree;

/// Which sides of a subtree are already known to be inside the range.
#[derive(Debug, Clone, Copy, Default)]
struct Bounds {
    /// Every key in the subtree is `>= begin`.
    from_start: bool,
    /// Every key in the subtree is `<= end`.
    until_end: bool,
}

impl BTree {
    /// Count live keys `k` with `begin <= k <= end`.
    ///
    /// Runs in time proportional to the tree height times the node search
    /// cost, independent of how many keys fall in the range. An inverted
    /// range (`begin > end`) is empty.
    pub fn range_count(&self, begin: &Key, end: &Key) -> usize {
        if begin > end {
            return 0;
        }
        self.count_between(self.root, begin, end, Bounds::default())
    }

    fn count_between(&self, node_id: NodeId, begin: &Key, end: &Key, bounds: Bounds) -> usize {
        let node = self.arena.get(node_id);

        if bounds.from_start && bounds.until_end {
            return node.subtree_live;
        }

        // First local index with key >= begin
        let lo = if bounds.from_start {
            0
        } else {
            node.boundary_search(begin, Rounding::Up)
                .unwrap_or(node.len())
        };
        // One past the last local index with key <= end
        let hi = if bounds.until_end {
            node.len()
        } else {
            node.boundary_search(end, Rounding::Down)
                .map_or(0, |index| index + 1)
        };

        let mut count = node.entries[lo..hi]
            .iter()
            .filter(|entry| entry.is_live())
            .count();

        if node.leaf {
            return count;
        }

        // No local key in range: everything lies in the one child between
        // the bracketing keys, with this node's bounds still applying.
        if lo == hi {
            return count + self.count_between(node.children[lo], begin, end, bounds);
        }

        for &child in &node.children[lo + 1..hi] {
            count += self.arena.get(child).subtree_live;
        }

        // Left edge child: bounded above by entry `lo`, which is in range.
        // If entry `lo` is `begin` itself the child lies wholly below it.
        if node.entries[lo].key != *begin {
            count += self.count_between(
                node.children[lo],
                begin,
                end,
                Bounds {
                    from_start: bounds.from_start,
                    until_end: true,
                },
            );
        }

        // Right edge child: bounded below by entry `hi - 1`.
        if node.entries[hi - 1].key != *end {
            count += self.count_between(
                node.children[hi],
                begin,
                end,
                Bounds {
                    from_start: true,
                    until_end: bounds.until_end,
                },
            );
        }

        count
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::TreeConfig;

    fn key(n: u32) -> Key {
        format!("{:019}", n).parse().unwrap()
    }

    /// Keys 0, 10, 20, ... 990 in an order-4 tree.
    fn tens() -> BTree {
        let mut tree = BTree::with_config(TreeConfig::with_order(4)).unwrap();
        for n in 0..100 {
            tree.insert(key(n * 10), "v");
        }
        tree
    }

    fn brute_force(tree: &BTree, begin: u32, end: u32) -> usize {
        tree.iter()
            .filter(|(k, _)| **k >= key(begin) && **k <= key(end))
            .count()
    }

    #[test]
    fn test_range_count_empty_tree() {
        let tree = BTree::new();
        assert_eq!(tree.range_count(&key(0), &key(100)), 0);
    }

    #[test]
    fn test_range_count_whole_tree() {
        let tree = tens();
        assert_eq!(tree.range_count(&key(0), &key(990)), 100);
        assert_eq!(tree.range_count(&key(0), &key(u32::MAX)), 100);
    }

    #[test]
    fn test_range_count_single_key() {
        let tree = tens();
        assert_eq!(tree.range_count(&key(500), &key(500)), 1);
        assert_eq!(tree.range_count(&key(505), &key(505)), 0);
    }

    #[test]
    fn test_range_count_inverted_is_empty() {
        let tree = tens();
        assert_eq!(tree.range_count(&key(500), &key(100)), 0);
    }

    #[test]
    fn test_range_count_outside_keys() {
        let tree = tens();
        assert_eq!(tree.range_count(&key(991), &key(5000)), 0);
        assert_eq!(tree.range_count(&key(1), &key(9)), 0);
    }

    #[test]
    fn test_range_count_exact_and_between_bounds() {
        let tree = tens();
        for (begin, end) in [(100, 200), (95, 205), (100, 205), (95, 200), (0, 0), (990, 990)] {
            assert_eq!(
                tree.range_count(&key(begin), &key(end)),
                brute_force(&tree, begin, end),
                "range [{begin}, {end}]"
            );
        }
    }

    #[test]
    fn test_range_count_every_pair() {
        let mut tree = tens();
        for n in (0..100).step_by(7) {
            tree.delete(&key(n * 10));
        }

        for begin in (0..1000).step_by(15) {
            for end in (begin..1000).step_by(15) {
                assert_eq!(
                    tree.range_count(&key(begin), &key(end)),
                    brute_force(&tree, begin, end),
                    "range [{begin}, {end}]"
                );
            }
        }
    }

    #[test]
    fn test_range_count_skips_tombstones() {
        let mut tree = tens();
        assert!(tree.delete(&key(500)));
        assert_eq!(tree.range_count(&key(500), &key(500)), 0);
        assert_eq!(tree.range_count(&key(400), &key(600)), 20);

        tree.insert(key(500), "back");
        assert_eq!(tree.range_count(&key(400), &key(600)), 21);
    }
}
