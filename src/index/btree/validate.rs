//! Structural invariant checking.

use crate::common::{Error, Key, NodeId, Result};

use super::BTree;

impl BTree {
    /// Walk the whole tree and check every structural invariant.
    ///
    /// Checks key order (within nodes and against ancestor bounds), child
    /// counts, parent links, uniform leaf depth, node capacity and every
    /// subtree live count. Intended for tests and debugging; it visits
    /// every node.
    ///
    /// # Errors
    /// Returns `Error::Corrupt` describing the first violation found.
    pub fn validate(&self) -> Result<()> {
        if self.arena.get(self.root).parent.is_some() {
            return Err(Error::Corrupt("root has a parent".into()));
        }

        let mut leaf_depth = None;
        let mut slots = 0;
        let live = self.validate_node(self.root, None, None, 1, &mut leaf_depth, &mut slots)?;

        if live != self.live_count() {
            return Err(Error::Corrupt(format!(
                "root count {} but {} live entries",
                self.live_count(),
                live
            )));
        }
        if slots != self.slots {
            return Err(Error::Corrupt(format!(
                "tracking {} slots but found {}",
                self.slots, slots
            )));
        }
        Ok(())
    }

    /// Validate one subtree and return its live count.
    fn validate_node(
        &self,
        node_id: NodeId,
        lower: Option<&Key>,
        upper: Option<&Key>,
        depth: usize,
        leaf_depth: &mut Option<usize>,
        slots: &mut usize,
    ) -> Result<usize> {
        let node = self.arena.get(node_id);
        let corrupt = |msg: String| Err(Error::Corrupt(format!("{node_id}: {msg}")));

        if node.len() > self.config.max_entries() {
            return corrupt(format!("{} entries exceeds capacity", node.len()));
        }
        if node.len() == 0 && node_id != self.root {
            return corrupt("empty non-root node".into());
        }

        for pair in node.entries.windows(2) {
            if pair[0].key >= pair[1].key {
                return corrupt(format!("keys out of order: {} >= {}", pair[0].key, pair[1].key));
            }
        }
        if let (Some(lower), Some(first)) = (lower, node.entries.first()) {
            if first.key <= *lower {
                return corrupt(format!("key {} not above bound {}", first.key, lower));
            }
        }
        if let (Some(upper), Some(last)) = (upper, node.entries.last()) {
            if last.key >= *upper {
                return corrupt(format!("key {} not below bound {}", last.key, upper));
            }
        }

        *slots += node.len();
        let mut live = node.local_live();

        if node.leaf {
            if !node.children.is_empty() {
                return corrupt("leaf has children".into());
            }
            match *leaf_depth {
                None => *leaf_depth = Some(depth),
                Some(expected) if expected != depth => {
                    return corrupt(format!("leaf at depth {depth}, expected {expected}"));
                }
                Some(_) => {}
            }
        } else {
            if node.children.len() != node.len() + 1 {
                return corrupt(format!(
                    "{} entries but {} children",
                    node.len(),
                    node.children.len()
                ));
            }
            for (i, &child) in node.children.iter().enumerate() {
                if self.arena.get(child).parent != Some(node_id) {
                    return corrupt(format!("child {child} does not point back"));
                }
                let lower = if i == 0 { lower } else { Some(&node.entries[i - 1].key) };
                let upper = node.entries.get(i).map(|entry| &entry.key).or(upper);
                live += self.validate_node(child, lower, upper, depth + 1, leaf_depth, slots)?;
            }
        }

        if node.subtree_live != live {
            return corrupt(format!(
                "stored count {} but subtree has {} live",
                node.subtree_live, live
            ));
        }
        Ok(live)
    }
}
