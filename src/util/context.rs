//! Global context for Rigging operations.
//!
//! Provides centralized access to configuration, paths, and environment.

use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use anyhow::{Context, Result};
use directories::ProjectDirs;

use crate::manifest::{find_manifest, ManifestError, ManifestKind};
use crate::util::config::{global_config_dir, load_config, project_config_path, UserConfig};

/// Project directories for Rigging
static PROJECT_DIRS: LazyLock<Option<ProjectDirs>> =
    LazyLock::new(|| ProjectDirs::from("io", "rigging", "rigging"));

/// Global context containing configuration and paths.
#[derive(Debug, Clone)]
pub struct GlobalContext {
    /// Current working directory
    cwd: PathBuf,

    /// Directory holding the global config.toml
    home: PathBuf,

    /// Whether to use verbose output
    verbose: bool,

    /// Whether to use colors in output
    color: bool,
}

impl GlobalContext {
    /// Create a new GlobalContext with defaults.
    pub fn new() -> Result<Self> {
        let cwd = std::env::current_dir().context("failed to get current directory")?;

        let home = PROJECT_DIRS
            .as_ref()
            .map(|dirs| dirs.config_dir().to_path_buf())
            .or_else(global_config_dir)
            .unwrap_or_else(|| PathBuf::from(".rigging"));

        Ok(GlobalContext {
            cwd,
            home,
            verbose: false,
            color: true,
        })
    }

    /// Create a GlobalContext with a specific working directory.
    pub fn with_cwd(cwd: PathBuf) -> Result<Self> {
        let mut ctx = Self::new()?;
        ctx.cwd = cwd;
        Ok(ctx)
    }

    /// Set verbose mode.
    pub fn set_verbose(&mut self, verbose: bool) {
        self.verbose = verbose;
    }

    /// Set color output.
    pub fn set_color(&mut self, color: bool) {
        self.color = color;
    }

    /// Get the current working directory.
    pub fn cwd(&self) -> &Path {
        &self.cwd
    }

    /// Get the global configuration file path.
    pub fn config_path(&self) -> PathBuf {
        self.home.join("config.toml")
    }

    /// Check if verbose mode is enabled.
    pub fn is_verbose(&self) -> bool {
        self.verbose
    }

    /// Check if color output is enabled.
    pub fn color(&self) -> bool {
        self.color
    }

    /// Find the nearest Project.toml or Workspace.toml from cwd upward.
    pub fn find_manifest(&self) -> Result<(PathBuf, ManifestKind), ManifestError> {
        find_manifest(&self.cwd)
    }

    /// Load user configuration for a project rooted at `root`.
    pub fn user_config(&self, root: &Path) -> UserConfig {
        load_config(Some(&self.config_path()), &project_config_path(root))
    }
}
