//! Workspace - a group of projects resolved together.

use std::path::{Path, PathBuf};

use serde::Serialize;

/// A workspace listing the projects it groups.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Workspace {
    /// Directory containing the workspace manifest
    path: PathBuf,

    /// Workspace name
    name: String,

    /// Absolute project paths, in declaration order
    projects: Vec<PathBuf>,
}

impl Workspace {
    /// Create a new workspace.
    pub fn new(path: impl Into<PathBuf>, name: impl Into<String>, projects: Vec<PathBuf>) -> Self {
        Workspace {
            path: path.into(),
            name: name.into(),
            projects,
        }
    }

    /// Get the workspace directory.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Get the workspace name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the member project paths.
    pub fn projects(&self) -> &[PathBuf] {
        &self.projects
    }
}
