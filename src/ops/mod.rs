//! High-level operations.
//!
//! This module contains the implementation of Rigging commands.

pub mod export;
pub mod load;
pub mod tree;

pub use export::{to_dot, to_json, GraphDescription, NodeDescription};
pub use load::{load_graph, locate, LoadOptions};
pub use tree::{render_tree, render_tree_from, TreeOptions};
