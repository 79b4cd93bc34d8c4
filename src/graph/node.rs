//! Graph nodes - the resolved counterparts of dependencies.
//!
//! Every node lives exactly once in the cache's node table and is referred to
//! by a copyable [`NodeId`]. Two resolutions of the same identity yield the
//! same id, so shared dependencies form a DAG instead of duplicated subtrees.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::Serialize;

use crate::core::{Project, Target};

/// Handle to a node in the cache's node table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct NodeId(pub(crate) usize);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Identity of a target: owning project path plus target name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct TargetKey {
    pub path: PathBuf,
    pub name: String,
}

impl TargetKey {
    pub fn new(path: impl Into<PathBuf>, name: impl Into<String>) -> Self {
        TargetKey {
            path: path.into(),
            name: name.into(),
        }
    }
}

impl fmt::Display for TargetKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "`{}` at {}", self.name, self.path.display())
    }
}

/// A resolved target and the nodes it depends on.
#[derive(Debug, Clone)]
pub struct TargetNode {
    project: Arc<Project>,
    target: Target,
    dependencies: Vec<NodeId>,
}

impl TargetNode {
    /// Create a target node. `dependencies` must already be resolved.
    pub fn new(project: Arc<Project>, target: Target, dependencies: Vec<NodeId>) -> Self {
        TargetNode {
            project,
            target,
            dependencies,
        }
    }

    /// Get the owning project.
    pub fn project(&self) -> &Arc<Project> {
        &self.project
    }

    /// Get the target descriptor.
    pub fn target(&self) -> &Target {
        &self.target
    }

    /// Get the owning project's path.
    pub fn path(&self) -> &Path {
        self.project.path()
    }

    /// Get the target name.
    pub fn name(&self) -> &str {
        &self.target.name
    }

    /// Get the resolved dependencies, in declaration order.
    pub fn dependencies(&self) -> &[NodeId] {
        &self.dependencies
    }
}

/// What kind of precompiled artifact a node points at.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PrecompiledKind {
    Framework,
    Library {
        public_headers: Option<PathBuf>,
        swift_module_map: Option<PathBuf>,
    },
}

/// A precompiled binary on disk. Existence is not checked while loading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PrecompiledNode {
    pub path: PathBuf,
    pub kind: PrecompiledKind,
}

impl PrecompiledNode {
    pub fn framework(path: impl Into<PathBuf>) -> Self {
        PrecompiledNode {
            path: path.into(),
            kind: PrecompiledKind::Framework,
        }
    }

    pub fn library(
        path: impl Into<PathBuf>,
        public_headers: Option<PathBuf>,
        swift_module_map: Option<PathBuf>,
    ) -> Self {
        PrecompiledNode {
            path: path.into(),
            kind: PrecompiledKind::Library {
                public_headers,
                swift_module_map,
            },
        }
    }

    /// File name of the artifact.
    pub fn name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }
}

/// A product of an external package, keyed by the declaring project's path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PackageProductNode {
    pub path: PathBuf,
    pub product: String,
}

/// Targets provided by a pre-generated project (e.g. a Podfile directory).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LegacyManagerNode {
    pub path: PathBuf,
}

/// Any node of the graph.
#[derive(Debug, Clone)]
pub enum GraphNode {
    Target(Arc<TargetNode>),
    Precompiled(Arc<PrecompiledNode>),
    PackageProduct(Arc<PackageProductNode>),
    LegacyManager(Arc<LegacyManagerNode>),
}

impl GraphNode {
    /// Path component of the node's identity.
    pub fn path(&self) -> &Path {
        match self {
            GraphNode::Target(node) => node.path(),
            GraphNode::Precompiled(node) => &node.path,
            GraphNode::PackageProduct(node) => &node.path,
            GraphNode::LegacyManager(node) => &node.path,
        }
    }

    /// Display name of the node.
    pub fn name(&self) -> String {
        match self {
            GraphNode::Target(node) => node.name().to_string(),
            GraphNode::Precompiled(node) => node.name(),
            GraphNode::PackageProduct(node) => node.product.clone(),
            GraphNode::LegacyManager(_) => "Pods".to_string(),
        }
    }

    /// Get the target node, if this is one.
    pub fn as_target(&self) -> Option<&Arc<TargetNode>> {
        match self {
            GraphNode::Target(node) => Some(node),
            _ => None,
        }
    }

    /// Dependencies of this node. Only target nodes have any.
    pub fn dependencies(&self) -> &[NodeId] {
        match self {
            GraphNode::Target(node) => node.dependencies(),
            _ => &[],
        }
    }

    /// Check if a dependent target would link against this node.
    pub fn is_linkable(&self) -> bool {
        match self {
            GraphNode::Target(node) => node.target().is_linkable(),
            GraphNode::Precompiled(_) | GraphNode::PackageProduct(_) => true,
            GraphNode::LegacyManager(_) => false,
        }
    }

    /// Short label for the node kind.
    pub fn kind(&self) -> &'static str {
        match self {
            GraphNode::Target(_) => "target",
            GraphNode::Precompiled(node) => match node.kind {
                PrecompiledKind::Framework => "framework",
                PrecompiledKind::Library { .. } => "library",
            },
            GraphNode::PackageProduct(_) => "package",
            GraphNode::LegacyManager(_) => "pods",
        }
    }
}

impl fmt::Display for GraphNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name(), self.kind())
    }
}
