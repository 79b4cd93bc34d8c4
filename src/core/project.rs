//! Project - a named collection of targets rooted at a directory.

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::core::package::Package;
use crate::core::settings::Settings;
use crate::core::target::Target;

/// A project and the targets it declares.
///
/// Identified by its directory. The graph cache holds at most one instance
/// per path for the lifetime of a load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Project {
    /// Absolute path of the directory containing the project manifest
    path: PathBuf,

    /// Project name
    name: String,

    /// Project-level settings
    settings: Option<Settings>,

    /// Declared targets, in declaration order
    targets: Vec<Target>,

    /// External packages available to the targets
    packages: Vec<Package>,
}

impl Project {
    /// Create a new project.
    pub fn new(path: impl Into<PathBuf>, name: impl Into<String>, targets: Vec<Target>) -> Self {
        Project {
            path: path.into(),
            name: name.into(),
            settings: None,
            targets,
            packages: Vec::new(),
        }
    }

    /// Set the project settings.
    pub fn with_settings(mut self, settings: Settings) -> Self {
        self.settings = Some(settings);
        self
    }

    /// Set the declared packages.
    pub fn with_packages(mut self, packages: Vec<Package>) -> Self {
        self.packages = packages;
        self
    }

    /// Get the project directory.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Get the project name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the project settings.
    pub fn settings(&self) -> Option<&Settings> {
        self.settings.as_ref()
    }

    /// Get all targets.
    pub fn targets(&self) -> &[Target] {
        &self.targets
    }

    /// Get a target by name.
    pub fn target(&self, name: &str) -> Option<&Target> {
        self.targets.iter().find(|t| t.name == name)
    }

    /// Get the declared packages.
    pub fn packages(&self) -> &[Package] {
        &self.packages
    }
}
