//! NodeArena - slab storage for tree nodes.
//!
//! Every node lives in one `Vec<Node>` and is addressed by [`NodeId`].
//! Ownership is expressed by ids: a node owns the ids in its `children`,
//! and its `parent` id is a plain back-reference. Dropping the arena drops
//! every node, so there is no recursive teardown.

use std::mem;

use crate::common::NodeId;

use super::node::Node;

/// Slab of nodes plus a free list of released slots.
///
/// ```text
/// ┌───────────────────────────────────────────────┐
/// │ nodes:     [Node0] [Node1] [empty] [Node3] ... │
/// │ free_list: [NodeId(2)]                         │
/// └───────────────────────────────────────────────┘
/// ```
#[derive(Debug, Default)]
pub(crate) struct NodeArena {
    nodes: Vec<Node>,

    /// Released slots, reused LIFO.
    free_list: Vec<NodeId>,
}

impl NodeArena {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Store a node, reusing a released slot if one exists.
    pub(crate) fn alloc(&mut self, node: Node) -> NodeId {
        if let Some(node_id) = self.free_list.pop() {
            self.nodes[node_id.0] = node;
            return node_id;
        }
        self.nodes.push(node);
        NodeId::new(self.nodes.len() - 1)
    }

    /// Remove a node and hand back its content. The slot becomes free.
    pub(crate) fn release(&mut self, node_id: NodeId) -> Node {
        let node = mem::take(&mut self.nodes[node_id.0]);
        self.free_list.push(node_id);
        node
    }

    #[inline]
    pub(crate) fn get(&self, node_id: NodeId) -> &Node {
        &self.nodes[node_id.0]
    }

    #[inline]
    pub(crate) fn get_mut(&mut self, node_id: NodeId) -> &mut Node {
        &mut self.nodes[node_id.0]
    }

    /// Number of nodes currently in use.
    pub(crate) fn live_nodes(&self) -> usize {
        self.nodes.len() - self.free_list.len()
    }
}
