//! Common types and utilities shared across tallytree.
//!
//! This module contains fundamental primitives used throughout the codebase:
//! - Configuration constants and [`TreeConfig`]
//! - Error types
//! - Identifiers and keys (NodeId, Key)

pub mod config;
pub mod error;
mod key;
mod node_id;

pub use config::TreeConfig;
pub use error::{Error, Result};
pub use key::Key;
pub use node_id::NodeId;
