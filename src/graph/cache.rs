//! Graph loader cache.
//!
//! Memo tables keyed by path or (path, name). The cache never loads anything
//! itself; the graph loader stores results here and the cache is the single
//! source of truth for node identity.
//!
//! Every table is an [`Atomic`] store. When an insert must also append to the
//! node table, the key table's lock is taken first and the node table's lock
//! second; readers only ever hold one lock at a time.

use std::collections::HashMap;
use std::hash::Hash;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::core::{Config, Package, Project};
use crate::graph::node::{
    GraphNode, LegacyManagerNode, NodeId, PackageProductNode, PrecompiledNode, TargetNode,
};
use crate::util::Atomic;

/// Memoized projects, configurations and nodes for one graph load.
#[derive(Debug, Default)]
pub struct GraphLoaderCache {
    nodes: Atomic<Vec<GraphNode>>,
    projects: Atomic<HashMap<PathBuf, Arc<Project>>>,
    packages: Atomic<HashMap<PathBuf, Vec<Package>>>,
    configs: Atomic<HashMap<PathBuf, Arc<Config>>>,
    target_nodes: Atomic<HashMap<PathBuf, HashMap<String, NodeId>>>,
    precompiled_nodes: Atomic<HashMap<PathBuf, NodeId>>,
    package_nodes: Atomic<HashMap<(PathBuf, String), NodeId>>,
    legacy_nodes: Atomic<HashMap<PathBuf, NodeId>>,
}

impl GraphLoaderCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    // Projects

    /// Get the project loaded from `path`.
    pub fn project(&self, path: &Path) -> Option<Arc<Project>> {
        self.projects.with(|projects| projects.get(path).cloned())
    }

    /// Add a project, keyed by its own path.
    ///
    /// The first project added for a path wins; later adds return the
    /// instance already cached. The project's packages are recorded alongside.
    pub fn add_project(&self, project: Project) -> Arc<Project> {
        let project = self.projects.modify(|projects| {
            Arc::clone(
                projects
                    .entry(project.path().to_path_buf())
                    .or_insert_with(|| Arc::new(project)),
            )
        });

        self.packages.modify(|packages| {
            packages
                .entry(project.path().to_path_buf())
                .or_insert_with(|| project.packages().to_vec());
        });

        project
    }

    /// Get the packages declared by the project at `path`.
    pub fn packages(&self, path: &Path) -> Vec<Package> {
        self.packages
            .with(|packages| packages.get(path).cloned().unwrap_or_default())
    }

    /// Get all cached projects, sorted by path.
    pub fn projects(&self) -> Vec<Arc<Project>> {
        let mut projects: Vec<_> = self.projects.with(|p| p.values().cloned().collect());
        projects.sort_by(|a, b| a.path().cmp(b.path()));
        projects
    }

    // Generation configuration

    /// Get the configuration that applies to `path`.
    pub fn config(&self, path: &Path) -> Option<Arc<Config>> {
        self.configs.with(|configs| configs.get(path).cloned())
    }

    /// Add the configuration for `path`. First write wins.
    pub fn add_config(&self, path: &Path, config: Config) -> Arc<Config> {
        self.configs.modify(|configs| {
            Arc::clone(
                configs
                    .entry(path.to_path_buf())
                    .or_insert_with(|| Arc::new(config)),
            )
        })
    }

    // Nodes

    /// Get a node by id.
    pub fn node(&self, id: NodeId) -> Option<GraphNode> {
        self.nodes.with(|nodes| nodes.get(id.0).cloned())
    }

    /// Get a target node by id.
    pub fn target(&self, id: NodeId) -> Option<Arc<TargetNode>> {
        self.node(id).and_then(|node| node.as_target().cloned())
    }

    /// Get every node, indexed by id.
    pub fn nodes(&self) -> Vec<GraphNode> {
        self.nodes.get()
    }

    /// Number of nodes in the node table.
    pub fn node_count(&self) -> usize {
        self.nodes.with(|nodes| nodes.len())
    }

    /// Get the id of the target node for (`path`, `name`).
    pub fn target_node(&self, path: &Path, name: &str) -> Option<NodeId> {
        self.target_nodes
            .with(|targets| targets.get(path).and_then(|by_name| by_name.get(name).copied()))
    }

    /// Add a target node and return its id.
    ///
    /// If a node with the same (path, name) is already cached, `node` is
    /// dropped and the existing id is returned.
    pub fn add_target_node(&self, node: TargetNode) -> NodeId {
        self.target_nodes.modify(|targets| {
            let by_name = targets.entry(node.path().to_path_buf()).or_default();
            if let Some(id) = by_name.get(node.name()) {
                return *id;
            }
            let name = node.name().to_string();
            let id = self.push(GraphNode::Target(Arc::new(node)));
            by_name.insert(name, id);
            id
        })
    }

    /// Get the id of the precompiled node at `path`.
    pub fn precompiled_node(&self, path: &Path) -> Option<NodeId> {
        self.precompiled_nodes.with(|nodes| nodes.get(path).copied())
    }

    /// Add a precompiled node and return its id.
    pub fn add_precompiled_node(&self, node: PrecompiledNode) -> NodeId {
        let key = node.path.clone();
        self.intern(&self.precompiled_nodes, key, || {
            GraphNode::Precompiled(Arc::new(node))
        })
    }

    /// Get the id of the package product node for (`path`, `product`).
    pub fn package_node(&self, path: &Path, product: &str) -> Option<NodeId> {
        self.package_nodes.with(|nodes| {
            nodes
                .get(&(path.to_path_buf(), product.to_string()))
                .copied()
        })
    }

    /// Add a package product node and return its id.
    pub fn add_package_node(&self, node: PackageProductNode) -> NodeId {
        let key = (node.path.clone(), node.product.clone());
        self.intern(&self.package_nodes, key, || {
            GraphNode::PackageProduct(Arc::new(node))
        })
    }

    /// Get the id of the legacy dependency manager node at `path`.
    pub fn legacy_node(&self, path: &Path) -> Option<NodeId> {
        self.legacy_nodes.with(|nodes| nodes.get(path).copied())
    }

    /// Add a legacy dependency manager node and return its id.
    pub fn add_legacy_node(&self, node: LegacyManagerNode) -> NodeId {
        let key = node.path.clone();
        self.intern(&self.legacy_nodes, key, || {
            GraphNode::LegacyManager(Arc::new(node))
        })
    }

    fn intern<K: Eq + Hash>(
        &self,
        table: &Atomic<HashMap<K, NodeId>>,
        key: K,
        node: impl FnOnce() -> GraphNode,
    ) -> NodeId {
        table.modify(|table| *table.entry(key).or_insert_with(|| self.push(node())))
    }

    fn push(&self, node: GraphNode) -> NodeId {
        self.nodes.modify(|nodes| {
            nodes.push(node);
            NodeId(nodes.len() - 1)
        })
    }
}
