//! Build settings and generation configuration.

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Build settings for a project or target.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Settings applied to every configuration
    #[serde(default)]
    pub base: BTreeMap<String, String>,

    /// Debug configuration overrides
    #[serde(default)]
    pub debug: Option<Configuration>,

    /// Release configuration overrides
    #[serde(default)]
    pub release: Option<Configuration>,
}

/// Settings of one build configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Configuration {
    #[serde(default)]
    pub settings: BTreeMap<String, String>,

    /// Path to an xcconfig file (absolute once loaded)
    #[serde(default)]
    pub xcconfig: Option<PathBuf>,
}

/// Build configuration variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    Debug,
    Release,
}

/// A named configuration shared by every project that uses a [`Config`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SharedConfiguration {
    pub name: String,
    pub variant: Variant,
    #[serde(default)]
    pub settings: BTreeMap<String, String>,
    #[serde(default)]
    pub xcconfig: Option<PathBuf>,
}

/// Options that affect how projects are generated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GenerationOption {
    /// Generate a project to edit the manifests themselves
    GenerateManifest,
}

/// Workspace-level generation configuration (`Rigging.toml`).
///
/// Memoized per project path by the graph cache.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub generation_options: Vec<GenerationOption>,

    pub shared_configurations: Vec<SharedConfiguration>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            generation_options: vec![GenerationOption::GenerateManifest],
            shared_configurations: Vec::new(),
        }
    }
}

impl Config {
    /// Check if a generation option is enabled.
    pub fn has_option(&self, option: GenerationOption) -> bool {
        self.generation_options.contains(&option)
    }
}
