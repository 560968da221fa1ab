//! Node identifier type.

use std::fmt;

/// Identifies a node slot in the tree's node arena.
///
/// Using `usize` because nodes are stored in a `Vec<Node>` and the id is
/// used directly as an index: `nodes[node_id.0]`.
///
/// # Example
/// ```
/// use tallytree::NodeId;
///
/// let node_id = NodeId::new(5);
/// assert_eq!(node_id.0, 5);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub usize);

impl NodeId {
    /// Create a new NodeId.
    #[inline]
    pub fn new(id: usize) -> Self {
        NodeId(id)
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Node({})", self.0)
    }
}
