//! Configuration file support for Rigging.
//!
//! Rigging supports two configuration file locations:
//! - Global: `config.toml` in the user config directory (fallback `~/.rigging`)
//! - Project: `.rigging/config.toml` - Project-specific overrides
//!
//! Project config takes precedence over global config.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Rigging user configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserConfig {
    /// Graph loading settings
    pub graph: GraphConfig,

    /// Output settings
    pub output: OutputConfig,
}

/// Graph loading configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphConfig {
    /// Worker threads for parallel resolution (None = rayon default)
    pub jobs: Option<usize>,

    /// Resolve sibling targets in parallel
    pub parallel: bool,
}

impl Default for GraphConfig {
    fn default() -> Self {
        GraphConfig {
            jobs: None,
            parallel: true,
        }
    }
}

/// Output configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Default format for `rigging graph`
    pub format: OutputFormat,
}

/// How a graph is printed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Tree,
    Json,
    Dot,
}

/// Raw file contents; every key optional so a project file only overrides
/// what it sets.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct PartialConfig {
    graph: PartialGraphConfig,
    output: PartialOutputConfig,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct PartialGraphConfig {
    jobs: Option<usize>,
    parallel: Option<bool>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct PartialOutputConfig {
    format: Option<OutputFormat>,
}

impl UserConfig {
    /// Load configuration from a file on top of the defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let mut config = UserConfig::default();
        config.merge_file(path)?;
        Ok(config)
    }

    /// Load configuration with fallback to defaults if the file is missing or invalid.
    pub fn load_or_default(path: &Path) -> Self {
        if path.exists() {
            Self::load(path).unwrap_or_else(|e| {
                tracing::warn!("Failed to load config from {}: {:#}", path.display(), e);
                Self::default()
            })
        } else {
            Self::default()
        }
    }

    /// Apply the keys set in `path` on top of this config.
    fn merge_file(&mut self, path: &Path) -> Result<()> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;

        let partial: PartialConfig = toml::from_str(&contents)
            .with_context(|| format!("failed to parse config file: {}", path.display()))?;

        if partial.graph.jobs.is_some() {
            self.graph.jobs = partial.graph.jobs;
        }
        if let Some(parallel) = partial.graph.parallel {
            self.graph.parallel = parallel;
        }
        if let Some(format) = partial.output.format {
            self.output.format = format;
        }

        Ok(())
    }
}

/// Load merged configuration from global and project locations.
///
/// Order of precedence (highest to lowest):
/// 1. Project config (.rigging/config.toml)
/// 2. Global config
/// 3. Defaults
///
/// A file that fails to parse is skipped with a warning.
pub fn load_config(global_path: Option<&Path>, project_path: &Path) -> UserConfig {
    let mut config = UserConfig::default();

    for path in global_path.into_iter().chain([project_path]) {
        if !path.exists() {
            continue;
        }
        let before = config.clone();
        if let Err(e) = config.merge_file(path) {
            tracing::warn!("Failed to load config from {}: {:#}", path.display(), e);
            config = before;
        }
    }

    config
}

/// Get the fallback global rigging directory (~/.rigging).
pub fn global_config_dir() -> Option<PathBuf> {
    directories::BaseDirs::new().map(|b| b.home_dir().join(".rigging"))
}

/// Get the project config path (.rigging/config.toml).
pub fn project_config_path(project_root: &Path) -> PathBuf {
    project_root.join(".rigging").join("config.toml")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_config_default() {
        let config = UserConfig::default();
        assert!(config.graph.jobs.is_none());
        assert!(config.graph.parallel);
        assert_eq!(config.output.format, OutputFormat::Tree);
    }

    #[test]
    fn test_config_load() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join("config.toml");

        std::fs::write(
            &config_path,
            r#"
[graph]
jobs = 8
parallel = false

[output]
format = "dot"
"#,
        )
        .unwrap();

        let config = UserConfig::load(&config_path).unwrap();
        assert_eq!(config.graph.jobs, Some(8));
        assert!(!config.graph.parallel);
        assert_eq!(config.output.format, OutputFormat::Dot);
    }

    #[test]
    fn test_project_overrides_global() {
        let tmp = TempDir::new().unwrap();
        let global = tmp.path().join("global.toml");
        let project = project_config_path(tmp.path());
        std::fs::create_dir_all(project.parent().unwrap()).unwrap();

        std::fs::write(&global, "[graph]\njobs = 4\nparallel = false\n").unwrap();
        std::fs::write(&project, "[graph]\nparallel = true\n").unwrap();

        let config = load_config(Some(&global), &project);
        assert_eq!(config.graph.jobs, Some(4));
        assert!(config.graph.parallel);
    }

    #[test]
    fn test_invalid_file_is_ignored() {
        let tmp = TempDir::new().unwrap();
        let global = tmp.path().join("global.toml");
        let project = tmp.path().join("project.toml");

        std::fs::write(&global, "[output]\nformat = \"json\"\n").unwrap();
        std::fs::write(&project, "[graph\njobs = ").unwrap();

        let config = load_config(Some(&global), &project);
        assert_eq!(config.output.format, OutputFormat::Json);
        assert_eq!(UserConfig::load_or_default(&project), UserConfig::default());
    }
}
