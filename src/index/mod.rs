//! Index structures.
//!
//! - [`btree`] - In-memory B-tree with augmented subtree counts

pub mod btree;
