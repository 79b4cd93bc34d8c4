//! On-disk manifest schema.
//!
//! ```toml
//! # Project.toml
//! [project]
//! name = "App"
//!
//! [[packages]]
//! url = "https://github.com/example/networking"
//! requirement = "1.2.0"
//!
//! [[targets]]
//! name = "App"
//! platform = "ios"
//! product = "app"
//! sources = ["Sources/**/*.swift"]
//! dependencies = [{ target = "Core" }, { target = "Lib", path = "../Lib" }]
//! ```
//!
//! ```toml
//! # Workspace.toml
//! [workspace]
//! name = "Suite"
//! projects = ["App", "Lib"]
//! ```

use std::collections::{BTreeMap, HashSet};
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::core::{
    Config, Configuration, DependencySpec, Package, Platform, Product, Project, Settings, Target,
    Workspace,
};
use crate::manifest::errors::ManifestError;
use crate::util::fs::resolve_path;

#[derive(Debug, Deserialize)]
pub(crate) struct RawProjectManifest {
    project: RawProjectMetadata,

    #[serde(default)]
    packages: Vec<Package>,

    #[serde(default)]
    targets: Vec<RawTarget>,
}

#[derive(Debug, Deserialize)]
struct RawProjectMetadata {
    name: String,

    #[serde(default)]
    settings: Option<Settings>,
}

#[derive(Debug, Deserialize)]
struct RawTarget {
    name: String,

    #[serde(default = "default_platform")]
    platform: Platform,

    #[serde(default)]
    product: Option<Product>,

    #[serde(default)]
    bundle_id: Option<String>,

    #[serde(default)]
    sources: Vec<String>,

    #[serde(default)]
    settings: Option<Settings>,

    #[serde(default)]
    environment: BTreeMap<String, String>,

    #[serde(default)]
    dependencies: Vec<DependencySpec>,
}

fn default_platform() -> Platform {
    Platform::Ios
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawWorkspaceManifest {
    workspace: RawWorkspaceMetadata,
}

#[derive(Debug, Deserialize)]
struct RawWorkspaceMetadata {
    name: String,

    #[serde(default)]
    projects: Vec<PathBuf>,
}

impl RawProjectManifest {
    /// Convert into a project rooted at `dir`.
    ///
    /// Dependency paths stay as written; xcconfig and local package paths are
    /// made absolute.
    pub(crate) fn into_project(self, dir: &Path, manifest: &Path) -> Result<Project, ManifestError> {
        let mut seen = HashSet::new();
        let mut targets = Vec::with_capacity(self.targets.len());

        for raw in self.targets {
            if !seen.insert(raw.name.clone()) {
                return Err(ManifestError::DuplicateTarget {
                    name: raw.name,
                    path: manifest.to_path_buf(),
                });
            }
            targets.push(raw.into_target(dir));
        }

        let packages = self
            .packages
            .into_iter()
            .map(|package| match package {
                Package::Local { path } => Package::local(resolve_path(dir, &path)),
                remote => remote,
            })
            .collect();

        let mut project = Project::new(dir, self.project.name, targets).with_packages(packages);
        if let Some(settings) = self.project.settings {
            project = project.with_settings(absolute_settings(settings, dir));
        }

        Ok(project)
    }
}

impl RawTarget {
    fn into_target(self, dir: &Path) -> Target {
        let product = self.product.unwrap_or_default();
        let mut target = Target::new(self.name, self.platform, product)
            .with_sources(self.sources)
            .with_dependencies(self.dependencies.iter().map(DependencySpec::to_dependency));

        if let Some(bundle_id) = self.bundle_id {
            target = target.with_bundle_id(bundle_id);
        }
        if let Some(settings) = self.settings {
            target = target.with_settings(absolute_settings(settings, dir));
        }
        target.environment = self.environment;

        target
    }
}

impl RawWorkspaceManifest {
    /// Convert into a workspace rooted at `dir` with absolute project paths.
    pub(crate) fn into_workspace(self, dir: &Path) -> Workspace {
        let projects = self
            .workspace
            .projects
            .iter()
            .map(|p| resolve_path(dir, p))
            .collect();

        Workspace::new(dir, self.workspace.name, projects)
    }
}

/// Make the xcconfig paths of a generation config absolute against `dir`.
pub(crate) fn absolute_config(mut config: Config, dir: &Path) -> Config {
    for shared in &mut config.shared_configurations {
        shared.xcconfig = shared.xcconfig.take().map(|p| resolve_path(dir, &p));
    }
    config
}

fn absolute_settings(mut settings: Settings, dir: &Path) -> Settings {
    let fix = |configuration: Option<Configuration>| {
        configuration.map(|mut c| {
            c.xcconfig = c.xcconfig.map(|p| resolve_path(dir, &p));
            c
        })
    };
    settings.debug = fix(settings.debug.take());
    settings.release = fix(settings.release.take());
    settings
}
