//! Model loading collaborator.

use std::path::Path;

use anyhow::Result;

use crate::core::{Config, Project, Workspace};

/// Turns manifests on disk (or anywhere else) into model objects.
///
/// The graph loader calls this at most once per project path per load and
/// never while holding a cache lock. Errors are passed through the graph
/// loader untouched.
pub trait ModelLoader: Sync {
    /// Load the project whose manifest lives in `path`.
    fn load_project(&self, path: &Path) -> Result<Project>;

    /// Load the workspace whose manifest lives in `path`.
    fn load_workspace(&self, path: &Path) -> Result<Workspace>;

    /// Load the generation configuration that applies to `path`.
    fn load_config(&self, _path: &Path) -> Result<Config> {
        Ok(Config::default())
    }
}
