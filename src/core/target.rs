//! Target definitions - the modules a project declares.
//!
//! A Target is identified by its owning project's path plus its name; the
//! name alone is only unique inside one project.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::core::dependency::Dependency;
use crate::core::settings::Settings;

/// The platform a target is built for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    #[serde(alias = "iOS")]
    Ios,
    #[serde(alias = "macOS")]
    Macos,
    #[serde(alias = "watchOS")]
    Watchos,
    #[serde(alias = "tvOS")]
    Tvos,
}

impl Default for Platform {
    fn default() -> Self {
        Platform::Ios
    }
}

impl Platform {
    /// Human-readable platform name.
    pub fn display_name(&self) -> &'static str {
        match self {
            Platform::Ios => "iOS",
            Platform::Macos => "macOS",
            Platform::Watchos => "watchOS",
            Platform::Tvos => "tvOS",
        }
    }
}

/// The kind of product a target produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Product {
    App,
    #[serde(alias = "static")]
    StaticLibrary,
    #[serde(alias = "dylib", alias = "dynamic")]
    DynamicLibrary,
    Framework,
    UnitTests,
    UiTests,
}

impl Default for Product {
    fn default() -> Self {
        Product::App
    }
}

impl Product {
    /// File extension of the built product.
    pub fn extension(&self) -> &'static str {
        match self {
            Product::App => "app",
            Product::StaticLibrary => "a",
            Product::DynamicLibrary => "dylib",
            Product::Framework => "framework",
            Product::UnitTests | Product::UiTests => "xctest",
        }
    }

    /// Check if other targets can link against this product.
    pub fn is_linkable(&self) -> bool {
        matches!(
            self,
            Product::StaticLibrary | Product::DynamicLibrary | Product::Framework
        )
    }

    /// Check if this is a test bundle.
    pub fn is_tests(&self) -> bool {
        matches!(self, Product::UnitTests | Product::UiTests)
    }
}

/// A module declared by a project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Target {
    /// Target name, unique within the owning project
    pub name: String,

    /// Platform the target is built for
    pub platform: Platform,

    /// What kind of product to produce
    pub product: Product,

    /// Bundle identifier
    pub bundle_id: String,

    /// Source file patterns (globs relative to the project)
    pub sources: Vec<String>,

    /// Target-level build settings
    pub settings: Option<Settings>,

    /// Environment variables for run actions
    pub environment: BTreeMap<String, String>,

    /// Declared dependencies, in declaration order
    pub dependencies: Vec<Dependency>,
}

impl Target {
    /// Create a new target with the given name, platform and product.
    pub fn new(name: impl Into<String>, platform: Platform, product: Product) -> Self {
        let name = name.into();
        Target {
            bundle_id: format!("io.rigging.{}", name),
            name,
            platform,
            product,
            sources: Vec::new(),
            settings: None,
            environment: BTreeMap::new(),
            dependencies: Vec::new(),
        }
    }

    /// Create an iOS framework target.
    pub fn framework(name: impl Into<String>) -> Self {
        Self::new(name, Platform::Ios, Product::Framework)
    }

    /// Create an iOS app target.
    pub fn app(name: impl Into<String>) -> Self {
        Self::new(name, Platform::Ios, Product::App)
    }

    /// Set the dependencies.
    pub fn with_dependencies(mut self, dependencies: impl IntoIterator<Item = Dependency>) -> Self {
        self.dependencies = dependencies.into_iter().collect();
        self
    }

    /// Set the bundle identifier.
    pub fn with_bundle_id(mut self, bundle_id: impl Into<String>) -> Self {
        self.bundle_id = bundle_id.into();
        self
    }

    /// Set source patterns.
    pub fn with_sources(mut self, patterns: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.sources = patterns.into_iter().map(|p| p.into()).collect();
        self
    }

    /// Set target settings.
    pub fn with_settings(mut self, settings: Settings) -> Self {
        self.settings = Some(settings);
        self
    }

    /// Check if other targets can link against this one.
    pub fn is_linkable(&self) -> bool {
        self.product.is_linkable()
    }

    /// File name of the built product.
    pub fn product_name(&self) -> String {
        match self.product {
            Product::StaticLibrary | Product::DynamicLibrary => {
                format!("lib{}.{}", self.name, self.product.extension())
            }
            _ => format!("{}.{}", self.name, self.product.extension()),
        }
    }
}
