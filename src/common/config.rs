//! Configuration constants for tallytree.

use crate::common::{Error, Result};

/// Default B-tree order (maximum number of children per node).
///
/// A node holds at most `ORDER - 1` entries. Inserting into a full node
/// splits it before the operation returns, so no node ever persists with
/// `ORDER` entries.
///
/// # Sizing
/// With 600 children per node:
/// - Height 1 (root leaf): up to 599 entries
/// - Height 2: up to 359,999 entries
/// - Height 3: up to ~216 million entries
pub const ORDER: usize = 600;

/// Smallest order for which the three split cases stay well-formed.
///
/// Order 3 gives a 2-3 tree: two entries per node, each split half gets one.
pub const MIN_ORDER: usize = 3;

/// Width of every key in bytes.
///
/// Matches a `YYYY-MM-DD hh:mm:ss` timestamp.
pub const KEY_LEN: usize = 19;

/// Tunables for a [`BTree`](crate::BTree).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TreeConfig {
    /// Maximum children per node.
    pub order: usize,
}

impl TreeConfig {
    /// Create a config with the given order.
    pub fn with_order(order: usize) -> Self {
        Self { order }
    }

    /// Maximum number of entries a node may hold.
    #[inline]
    pub fn max_entries(&self) -> usize {
        self.order - 1
    }

    /// Check that the config describes a usable tree.
    ///
    /// # Errors
    /// Returns `Error::InvalidOrder` if `order < MIN_ORDER`.
    pub fn validate(&self) -> Result<()> {
        if self.order < MIN_ORDER {
            return Err(Error::InvalidOrder {
                order: self.order,
                min: MIN_ORDER,
            });
        }
        Ok(())
    }
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self { order: ORDER }
    }
}
