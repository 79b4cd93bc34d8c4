//! Test utilities and mocks for Rigging unit tests.
//!
//! `MockModelLoader` serves projects and workspaces from memory and counts
//! how often each path was loaded, so graph tests can assert memoization
//! without touching disk. `fixtures` writes real manifests for the TOML
//! loader tests.
//!
//! # Example
//!
//! ```rust,ignore
//! use rigging::test_support::MockModelLoader;
//!
//! let loader = MockModelLoader::new()
//!     .with_project(Project::new("/p/App", "App", vec![Target::app("App")]));
//!
//! let graph = GraphLoader::new().load_project(Path::new("/p/App"), &loader)?;
//! assert_eq!(loader.project_loads("/p/App"), 1);
//! ```

pub mod fixtures;

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::thread;
use std::time::Duration;

use anyhow::{anyhow, Result};
use thiserror::Error;

use crate::core::{Config, ModelLoader, Project, Workspace};
use crate::util::Atomic;

pub use fixtures::*;

/// Error returned by `MockModelLoader` for paths it does not know or was told
/// to fail.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MockLoadError {
    #[error("no manifest at {0}")]
    Missing(PathBuf),

    #[error("malformed manifest at {path}: {message}")]
    Malformed { path: PathBuf, message: String },
}

/// In-memory model loader.
#[derive(Debug, Default)]
pub struct MockModelLoader {
    projects: HashMap<PathBuf, Project>,
    workspaces: HashMap<PathBuf, Workspace>,
    configs: HashMap<PathBuf, Config>,
    failures: HashMap<PathBuf, String>,
    delays: HashMap<PathBuf, Duration>,
    project_loads: Atomic<HashMap<PathBuf, usize>>,
    config_loads: Atomic<HashMap<PathBuf, usize>>,
}

impl MockModelLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `project` for its own path.
    pub fn with_project(self, project: Project) -> Self {
        let path = project.path().to_path_buf();
        self.with_project_at(path, project)
    }

    /// Serve `project` when `path` is requested, whatever its own path is.
    pub fn with_project_at(mut self, path: impl Into<PathBuf>, project: Project) -> Self {
        self.projects.insert(path.into(), project);
        self
    }

    /// Serve `workspace` for its own path.
    pub fn with_workspace(mut self, workspace: Workspace) -> Self {
        self.workspaces
            .insert(workspace.path().to_path_buf(), workspace);
        self
    }

    /// Serve `config` for `path`.
    pub fn with_config(mut self, path: impl Into<PathBuf>, config: Config) -> Self {
        self.configs.insert(path.into(), config);
        self
    }

    /// Fail every load of `path` with a `MockLoadError::Malformed`.
    pub fn with_failure(mut self, path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        self.failures.insert(path.into(), message.into());
        self
    }

    /// Sleep for `delay` before returning the project at `path`.
    pub fn with_delay(mut self, path: impl Into<PathBuf>, delay: Duration) -> Self {
        self.delays.insert(path.into(), delay);
        self
    }

    /// How many times `load_project` was called for `path`.
    pub fn project_loads(&self, path: impl AsRef<Path>) -> usize {
        self.project_loads
            .with(|loads| loads.get(path.as_ref()).copied().unwrap_or(0))
    }

    /// How many times `load_config` was called for `path`.
    pub fn config_loads(&self, path: impl AsRef<Path>) -> usize {
        self.config_loads
            .with(|loads| loads.get(path.as_ref()).copied().unwrap_or(0))
    }

    fn check_failure(&self, path: &Path) -> Result<()> {
        match self.failures.get(path) {
            Some(message) => Err(anyhow!(MockLoadError::Malformed {
                path: path.to_path_buf(),
                message: message.clone(),
            })),
            None => Ok(()),
        }
    }
}

impl ModelLoader for MockModelLoader {
    fn load_project(&self, path: &Path) -> Result<Project> {
        self.project_loads
            .modify(|loads| *loads.entry(path.to_path_buf()).or_insert(0) += 1);

        if let Some(delay) = self.delays.get(path) {
            thread::sleep(*delay);
        }
        self.check_failure(path)?;

        self.projects
            .get(path)
            .cloned()
            .ok_or_else(|| anyhow!(MockLoadError::Missing(path.to_path_buf())))
    }

    fn load_workspace(&self, path: &Path) -> Result<Workspace> {
        self.check_failure(path)?;
        self.workspaces
            .get(path)
            .cloned()
            .ok_or_else(|| anyhow!(MockLoadError::Missing(path.to_path_buf())))
    }

    fn load_config(&self, path: &Path) -> Result<Config> {
        self.config_loads
            .modify(|loads| *loads.entry(path.to_path_buf()).or_insert(0) += 1);
        Ok(self.configs.get(path).cloned().unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Target;

    #[test]
    fn test_mock_counts_loads() {
        let loader =
            MockModelLoader::new().with_project(Project::new("/p/App", "App", vec![Target::app("App")]));

        loader.load_project(Path::new("/p/App")).unwrap();
        loader.load_project(Path::new("/p/App")).unwrap();

        assert_eq!(loader.project_loads("/p/App"), 2);
        assert_eq!(loader.project_loads("/p/Other"), 0);
    }

    #[test]
    fn test_mock_missing_and_failing_paths() {
        let loader = MockModelLoader::new().with_failure("/p/Bad", "unexpected token");

        let missing = loader.load_project(Path::new("/p/None")).unwrap_err();
        assert_eq!(
            missing.downcast_ref::<MockLoadError>(),
            Some(&MockLoadError::Missing(PathBuf::from("/p/None")))
        );

        let bad = loader.load_project(Path::new("/p/Bad")).unwrap_err();
        assert!(bad.to_string().contains("unexpected token"));
    }
}
