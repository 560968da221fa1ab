//! tallytree - an in-memory B-tree index with augmented range counts.
//!
//! # Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                           tallytree                             │
//! ├─────────────────────────────────────────────────────────────────┤
//! │  ┌─────────────────────────────────────────────────────────┐   │
//! │  │              Command Shell (shell/)                      │   │
//! │  │        line reader → Command → execute → Response        │   │
//! │  └─────────────────────────────────────────────────────────┘   │
//! │                              ↓                                  │
//! │  ┌─────────────────────────────────────────────────────────┐   │
//! │  │              Index Layer (index/btree/)                  │   │
//! │  │   insert │ lookup │ delete (tombstone) │ range_count     │   │
//! │  │   ┌─────────────────────────────────────────────────┐   │   │
//! │  │   │  locator → split engine → subtree live counts   │   │   │
//! │  │   └─────────────────────────────────────────────────┘   │   │
//! │  │         NodeArena (Vec<Node> + free list)                │   │
//! │  └─────────────────────────────────────────────────────────┘   │
//! │                              ↓                                  │
//! │  ┌─────────────────────────────────────────────────────────┐   │
//! │  │           Common (common/)                               │   │
//! │  │     Key + NodeId + TreeConfig + Error                    │   │
//! │  └─────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//! - [`common`] - Shared primitives (Key, NodeId, Error, config)
//! - [`index`] - The B-tree index
//! - [`shell`] - Line-oriented command protocol over the index
//!
//! # Quick Start
//! ```
//! use tallytree::{BTree, Key};
//!
//! let mut tree = BTree::new();
//! let begin: Key = "2020-01-01 00:00:00".parse().unwrap();
//! let end: Key = "2020-12-31 23:59:59".parse().unwrap();
//!
//! tree.insert("2020-06-15 12:00:00".parse().unwrap(), "midsummer");
//! assert_eq!(tree.range_count(&begin, &end), 1);
//! ```

pub mod common;
pub mod index;
pub mod shell;

// Re-export commonly used items at crate root for convenience
pub use common::config::{KEY_LEN, ORDER};
pub use common::{Error, Key, NodeId, Result, TreeConfig};

pub use index::btree::{BTree, Iter, StatsSnapshot, TreeStats};
