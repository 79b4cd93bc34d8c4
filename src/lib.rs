//! Rigging - module dependency graphs for multi-project workspaces
//!
//! This crate resolves the targets declared by a project (or every project of
//! a workspace) into a single acyclic graph in which each target, artifact and
//! package product is one node, however many paths reach it.

pub mod core;
pub mod graph;
pub mod manifest;
pub mod ops;
pub mod util;

/// Test utilities and mocks for Rigging unit tests.
///
/// This module is only available when compiling with `--cfg test` or
/// running tests. It provides an in-memory model loader and on-disk
/// manifest fixtures.
#[cfg(test)]
pub mod test_support;

pub use crate::core::{Dependency, ModelLoader, Project, Target, Workspace};
pub use graph::{Graph, GraphError, GraphLoader, GraphLoaderCache};
pub use manifest::ManifestModelLoader;
pub use util::context::GlobalContext;
