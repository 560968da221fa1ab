//! In-order iteration over live entries.

use crate::common::{Key, NodeId};

use super::BTree;

/// Iterator over `(key, value)` pairs in ascending key order.
///
/// Tombstoned entries are skipped. Created by [`BTree::iter`].
pub struct Iter<'a> {
    tree: &'a BTree,
    /// Path from the root: each node and the next entry index to visit.
    stack: Vec<(NodeId, usize)>,
}

impl<'a> Iter<'a> {
    pub(crate) fn new(tree: &'a BTree) -> Self {
        let mut iter = Self {
            tree,
            stack: Vec::new(),
        };
        iter.push_leftmost(tree.root);
        iter
    }

    /// Push `node_id` and its leftmost descendants.
    fn push_leftmost(&mut self, node_id: NodeId) {
        let mut current = node_id;
        loop {
            self.stack.push((current, 0));
            let node = self.tree.arena.get(current);
            if node.leaf {
                return;
            }
            current = node.children[0];
        }
    }
}

impl<'a> Iterator for Iter<'a> {
    type Item = (&'a Key, &'a str);

    fn next(&mut self) -> Option<Self::Item> {
        let tree = self.tree;
        loop {
            let (node_id, index) = *self.stack.last()?;
            let node = tree.arena.get(node_id);

            if index >= node.len() {
                self.stack.pop();
                continue;
            }

            if let Some(top) = self.stack.last_mut() {
                top.1 += 1;
            }
            // The subtree right of this entry comes next
            if !node.leaf {
                self.push_leftmost(node.children[index + 1]);
            }

            let entry = &node.entries[index];
            if let Some(value) = entry.value.as_deref() {
                return Some((&entry.key, value));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::common::{Key, TreeConfig};
    use crate::BTree;

    fn key(n: u32) -> Key {
        format!("{:019}", n).parse().unwrap()
    }

    #[test]
    fn test_iter_empty() {
        let tree = BTree::new();
        assert_eq!(tree.iter().count(), 0);
    }

    #[test]
    fn test_iter_sorted_across_levels() {
        let mut tree = BTree::with_config(TreeConfig::with_order(3)).unwrap();
        let keys: Vec<u32> = (0..200).map(|n| (n * 7919) % 1000).collect();
        for &n in &keys {
            tree.insert(key(n), n.to_string());
        }

        let mut expected = keys.clone();
        expected.sort_unstable();
        expected.dedup();

        let seen: Vec<Key> = tree.iter().map(|(k, _)| *k).collect();
        let expected: Vec<Key> = expected.into_iter().map(key).collect();
        assert_eq!(seen, expected);
    }

    #[test]
    fn test_iter_skips_tombstones() {
        let mut tree = BTree::with_config(TreeConfig::with_order(4)).unwrap();
        for n in 0..30 {
            tree.insert(key(n), n.to_string());
        }
        for n in (0..30).filter(|n| n % 3 == 0) {
            tree.delete(&key(n));
        }

        let values: Vec<&str> = tree.iter().map(|(_, v)| v).collect();
        assert_eq!(values.len(), 20);
        assert!(!values.contains(&"0"));
        assert!(values.contains(&"1"));
    }

    #[test]
    fn test_into_iterator_for_ref() {
        let mut tree = BTree::new();
        tree.insert(key(2), "b");
        tree.insert(key(1), "a");

        let mut pairs = Vec::new();
        for (k, v) in &tree {
            pairs.push((*k, v));
        }
        assert_eq!(pairs, vec![(key(1), "a"), (key(2), "b")]);
    }
}
