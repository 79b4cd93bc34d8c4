//! Dependency declarations.
//!
//! A Dependency is an unresolved reference from a target to something it
//! needs: another target, a precompiled binary, or an external package. The
//! graph loader turns each one into a node.

use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// An unresolved dependency of a target.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Dependency {
    /// Sibling target declared in the same project
    Target { name: String },

    /// Target owned by the project at `path` (relative to the declaring project)
    Project { target: String, path: PathBuf },

    /// Precompiled framework bundle
    Framework { path: PathBuf },

    /// Precompiled library with its public headers
    Library {
        path: PathBuf,
        public_headers: Option<PathBuf>,
        swift_module_map: Option<PathBuf>,
    },

    /// Product of an external package declared by the project
    PackageProduct { product: String },

    /// Target provided by a pre-generated project from another dependency manager
    LegacyManager { path: PathBuf },
}

impl Dependency {
    /// Create a dependency on a sibling target.
    pub fn target(name: impl Into<String>) -> Self {
        Dependency::Target { name: name.into() }
    }

    /// Create a dependency on a target of another project.
    pub fn project(target: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Dependency::Project {
            target: target.into(),
            path: path.into(),
        }
    }

    /// Create a dependency on a precompiled framework.
    pub fn framework(path: impl Into<PathBuf>) -> Self {
        Dependency::Framework { path: path.into() }
    }

    /// Create a dependency on a precompiled library.
    pub fn library(
        path: impl Into<PathBuf>,
        public_headers: Option<PathBuf>,
        swift_module_map: Option<PathBuf>,
    ) -> Self {
        Dependency::Library {
            path: path.into(),
            public_headers,
            swift_module_map,
        }
    }

    /// Create a dependency on an external package product.
    pub fn package_product(product: impl Into<String>) -> Self {
        Dependency::PackageProduct {
            product: product.into(),
        }
    }

    /// Create a dependency resolved by another dependency manager.
    pub fn legacy_manager(path: impl Into<PathBuf>) -> Self {
        Dependency::LegacyManager { path: path.into() }
    }
}

impl fmt::Display for Dependency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Dependency::Target { name } => write!(f, "target `{}`", name),
            Dependency::Project { target, path } => {
                write!(f, "target `{}` in {}", target, path.display())
            }
            Dependency::Framework { path } => write!(f, "framework {}", path.display()),
            Dependency::Library { path, .. } => write!(f, "library {}", path.display()),
            Dependency::PackageProduct { product } => write!(f, "package product `{}`", product),
            Dependency::LegacyManager { path } => write!(f, "pods at {}", path.display()),
        }
    }
}

/// Dependency as it appears in a `Project.toml` target.
///
/// ```toml
/// dependencies = [
///     { target = "Core" },
///     { target = "Lib", path = "../Lib" },
///     { framework = "Vendor/Foo.framework" },
///     { library = "Vendor/libBar.a", public_headers = "Vendor/include" },
///     { package = "Networking" },
///     { pods = "." },
/// ]
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum DependencySpec {
    /// `{ target = "...", path = "..." }`
    Project { target: String, path: PathBuf },

    /// `{ target = "..." }`
    Target { target: String },

    /// `{ framework = "..." }`
    Framework { framework: PathBuf },

    /// `{ library = "...", public_headers = "...", swift_module_map = "..." }`
    Library {
        library: PathBuf,
        #[serde(default)]
        public_headers: Option<PathBuf>,
        #[serde(default)]
        swift_module_map: Option<PathBuf>,
    },

    /// `{ package = "..." }`
    Package { package: String },

    /// `{ pods = "..." }`
    Pods { pods: PathBuf },
}

impl DependencySpec {
    /// Convert to a Dependency. Paths stay as written; the graph loader
    /// resolves them against the declaring project.
    pub fn to_dependency(&self) -> Dependency {
        match self {
            DependencySpec::Project { target, path } => Dependency::project(target, path),
            DependencySpec::Target { target } => Dependency::target(target),
            DependencySpec::Framework { framework } => Dependency::framework(framework),
            DependencySpec::Library {
                library,
                public_headers,
                swift_module_map,
            } => Dependency::library(library, public_headers.clone(), swift_module_map.clone()),
            DependencySpec::Package { package } => Dependency::package_product(package),
            DependencySpec::Pods { pods } => Dependency::legacy_manager(pods),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Deserialize)]
    struct Holder {
        dependencies: Vec<DependencySpec>,
    }

    fn parse(toml_str: &str) -> Vec<Dependency> {
        let holder: Holder = toml::from_str(toml_str).unwrap();
        holder.dependencies.iter().map(|d| d.to_dependency()).collect()
    }

    #[test]
    fn test_spec_variants() {
        let deps = parse(
            r#"
dependencies = [
    { target = "Core" },
    { target = "Lib", path = "../Lib" },
    { framework = "Vendor/Foo.framework" },
    { library = "Vendor/libBar.a", public_headers = "Vendor/include" },
    { package = "Networking" },
    { pods = "." },
]
"#,
        );

        assert_eq!(deps[0], Dependency::target("Core"));
        assert_eq!(deps[1], Dependency::project("Lib", "../Lib"));
        assert_eq!(deps[2], Dependency::framework("Vendor/Foo.framework"));
        assert_eq!(
            deps[3],
            Dependency::library("Vendor/libBar.a", Some(PathBuf::from("Vendor/include")), None)
        );
        assert_eq!(deps[4], Dependency::package_product("Networking"));
        assert_eq!(deps[5], Dependency::legacy_manager("."));
    }

    #[test]
    fn test_target_with_path_is_project_dependency() {
        let deps = parse(r#"dependencies = [{ target = "Lib", path = "/abs/Lib" }]"#);
        assert_eq!(deps[0], Dependency::project("Lib", "/abs/Lib"));
    }

    #[test]
    fn test_unknown_shape_is_rejected() {
        let result: Result<Holder, _> = toml::from_str(r#"dependencies = [{ sdk = "UIKit" }]"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(Dependency::target("Core").to_string(), "target `Core`");
        assert_eq!(
            Dependency::project("Lib", "../Lib").to_string(),
            "target `Lib` in ../Lib"
        );
    }
}
