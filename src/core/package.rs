//! External package declarations.
//!
//! Projects declare the external packages their targets may pull products
//! from. The packages themselves live in a separate registry and are never
//! loaded by the graph; only their products are referenced.

use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// An external package declared by a project.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Package {
    /// Package fetched from a remote URL
    Remote { url: String, requirement: String },

    /// Package checked out on disk
    Local { path: PathBuf },
}

impl Package {
    /// Create a remote package.
    pub fn remote(url: impl Into<String>, requirement: impl Into<String>) -> Self {
        Package::Remote {
            url: url.into(),
            requirement: requirement.into(),
        }
    }

    /// Create a local package.
    pub fn local(path: impl Into<PathBuf>) -> Self {
        Package::Local { path: path.into() }
    }

    /// Check if this is a local package.
    pub fn is_local(&self) -> bool {
        matches!(self, Package::Local { .. })
    }
}

impl fmt::Display for Package {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Package::Remote { url, requirement } => write!(f, "{} ({})", url, requirement),
            Package::Local { path } => write!(f, "{}", path.display()),
        }
    }
}
