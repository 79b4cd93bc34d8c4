//! TOML manifests on disk.
//!
//! A project directory holds a `Project.toml`; a workspace directory holds a
//! `Workspace.toml`. Generation configuration lives in a `Rigging.toml` in
//! the project directory or any of its parents.

pub mod errors;
mod schema;

use std::path::{Path, PathBuf};

use anyhow::Result;
use tracing::debug;

use crate::core::{Config, ModelLoader, Project, Workspace};
use crate::util::fs::read_to_string;

pub use errors::ManifestError;
use schema::{absolute_config, RawProjectManifest, RawWorkspaceManifest};

/// File name of a project manifest.
pub const PROJECT_MANIFEST: &str = "Project.toml";

/// File name of a workspace manifest.
pub const WORKSPACE_MANIFEST: &str = "Workspace.toml";

/// File name of the generation configuration.
pub const CONFIG_MANIFEST: &str = "Rigging.toml";

/// Which kind of manifest a directory holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ManifestKind {
    Project,
    Workspace,
}

/// Find the manifest in `dir`. A workspace manifest wins over a project one.
pub fn manifest_in(dir: &Path) -> Option<(PathBuf, ManifestKind)> {
    let workspace = dir.join(WORKSPACE_MANIFEST);
    if workspace.is_file() {
        return Some((workspace, ManifestKind::Workspace));
    }

    let project = dir.join(PROJECT_MANIFEST);
    if project.is_file() {
        return Some((project, ManifestKind::Project));
    }

    None
}

/// Find the nearest manifest in `start` or any parent directory.
pub fn find_manifest(start: &Path) -> Result<(PathBuf, ManifestKind), ManifestError> {
    start
        .ancestors()
        .find_map(manifest_in)
        .ok_or_else(|| ManifestError::NoManifest {
            dir: start.to_path_buf(),
        })
}

/// Find the `Rigging.toml` that applies to `start`.
pub fn find_config(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .map(|dir| dir.join(CONFIG_MANIFEST))
        .find(|path| path.is_file())
}

/// Model loader that reads TOML manifests from disk.
#[derive(Debug, Clone, Copy, Default)]
pub struct ManifestModelLoader;

impl ManifestModelLoader {
    pub fn new() -> Self {
        ManifestModelLoader
    }

    /// Parse project manifest content as if it were read from `dir`.
    pub fn parse_project(content: &str, dir: &Path) -> Result<Project> {
        let manifest = dir.join(PROJECT_MANIFEST);
        let raw: RawProjectManifest = toml::from_str(content)
            .map_err(|e| ManifestError::parse(&manifest, content, e))?;
        Ok(raw.into_project(dir, &manifest)?)
    }

    /// Parse workspace manifest content as if it were read from `dir`.
    pub fn parse_workspace(content: &str, dir: &Path) -> Result<Workspace> {
        let manifest = dir.join(WORKSPACE_MANIFEST);
        let raw: RawWorkspaceManifest = toml::from_str(content)
            .map_err(|e| ManifestError::parse(&manifest, content, e))?;
        Ok(raw.into_workspace(dir))
    }

    /// Parse generation configuration content as if it were read from `dir`.
    pub fn parse_config(content: &str, dir: &Path) -> Result<Config> {
        let manifest = dir.join(CONFIG_MANIFEST);
        let config: Config = toml::from_str(content)
            .map_err(|e| ManifestError::parse(&manifest, content, e))?;
        Ok(absolute_config(config, dir))
    }
}

fn read_manifest(dir: &Path, file: &'static str) -> Result<String> {
    let path = dir.join(file);
    if !path.is_file() {
        return Err(ManifestError::NotFound {
            file,
            dir: dir.to_path_buf(),
        }
        .into());
    }
    debug!("reading {}", path.display());
    read_to_string(&path)
}

impl ModelLoader for ManifestModelLoader {
    fn load_project(&self, path: &Path) -> Result<Project> {
        let content = read_manifest(path, PROJECT_MANIFEST)?;
        Self::parse_project(&content, path)
    }

    fn load_workspace(&self, path: &Path) -> Result<Workspace> {
        let content = read_manifest(path, WORKSPACE_MANIFEST)?;
        Self::parse_workspace(&content, path)
    }

    fn load_config(&self, path: &Path) -> Result<Config> {
        let Some(manifest) = find_config(path) else {
            return Ok(Config::default());
        };
        let dir = manifest.parent().unwrap_or(path);
        let content = read_to_string(&manifest)?;
        Self::parse_config(&content, dir)
    }
}
