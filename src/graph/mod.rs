//! The dependency graph engine.
//!
//! `GraphLoader` resolves a project or workspace through a `ModelLoader`
//! into a [`Graph`]. Resolution memoizes everything in a `GraphLoaderCache`
//! and rejects cycles with a `CircularDetector` as edges are followed.

pub mod cache;
pub mod circular;
pub mod errors;
pub mod loader;
pub mod node;

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::Topo;

use crate::core::{Config, Package, Project};

pub use cache::GraphLoaderCache;
pub use circular::CircularDetector;
pub use errors::GraphError;
pub use loader::GraphLoader;
pub use node::{
    GraphNode, LegacyManagerNode, NodeId, PackageProductNode, PrecompiledKind, PrecompiledNode,
    TargetKey, TargetNode,
};

/// A fully resolved, acyclic dependency graph.
///
/// Read-only; every query is answered from the cache the graph was loaded
/// with.
#[derive(Debug, Clone)]
pub struct Graph {
    name: String,
    entry_path: PathBuf,
    cache: Arc<GraphLoaderCache>,
    entry_nodes: Vec<NodeId>,
}

impl Graph {
    pub fn new(
        name: impl Into<String>,
        entry_path: impl Into<PathBuf>,
        cache: Arc<GraphLoaderCache>,
        entry_nodes: Vec<NodeId>,
    ) -> Self {
        Graph {
            name: name.into(),
            entry_path: entry_path.into(),
            cache,
            entry_nodes,
        }
    }

    /// Get the name of the root project or workspace.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the path the graph was loaded from.
    pub fn entry_path(&self) -> &Path {
        &self.entry_path
    }

    /// Get the cache backing this graph.
    pub fn cache(&self) -> &Arc<GraphLoaderCache> {
        &self.cache
    }

    /// Get the entry nodes, in declaration order.
    pub fn entry_nodes(&self) -> &[NodeId] {
        &self.entry_nodes
    }

    /// Get the entry target nodes, in declaration order.
    pub fn entry_targets(&self) -> Vec<Arc<TargetNode>> {
        self.entry_nodes
            .iter()
            .filter_map(|id| self.cache.target(*id))
            .collect()
    }

    pub fn project(&self, path: &Path) -> Option<Arc<Project>> {
        self.cache.project(path)
    }

    /// Get the resolved target `name` of the project at `path`.
    pub fn target(&self, path: &Path, name: &str) -> Option<Arc<TargetNode>> {
        self.target_id(path, name).and_then(|id| self.cache.target(id))
    }

    pub fn target_id(&self, path: &Path, name: &str) -> Option<NodeId> {
        self.cache.target_node(path, name)
    }

    pub fn node(&self, id: NodeId) -> Option<GraphNode> {
        self.cache.node(id)
    }

    /// Get the generation configuration loaded for `path`.
    pub fn config(&self, path: &Path) -> Option<Arc<Config>> {
        self.cache.config(path)
    }

    /// Get the packages declared by the project at `path`.
    pub fn packages(&self, path: &Path) -> Vec<Package> {
        self.cache.packages(path)
    }

    /// Get every loaded project, sorted by path.
    pub fn projects(&self) -> Vec<Arc<Project>> {
        self.cache.projects()
    }

    /// Get every resolved target node.
    pub fn targets(&self) -> Vec<Arc<TargetNode>> {
        self.cache
            .nodes()
            .into_iter()
            .filter_map(|node| node.as_target().cloned())
            .collect()
    }

    /// Get every precompiled artifact node.
    pub fn precompiled(&self) -> Vec<Arc<PrecompiledNode>> {
        self.cache
            .nodes()
            .into_iter()
            .filter_map(|node| match node {
                GraphNode::Precompiled(node) => Some(node),
                _ => None,
            })
            .collect()
    }

    /// Get the direct dependencies of a target node.
    pub fn dependencies(&self, id: NodeId) -> Vec<GraphNode> {
        self.node(id)
            .map(|node| {
                node.dependencies()
                    .iter()
                    .filter_map(|dep| self.node(*dep))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Get the direct dependencies of a target that it links against.
    pub fn linkable_dependencies(&self, path: &Path, name: &str) -> Vec<GraphNode> {
        self.target_id(path, name)
            .map(|id| {
                self.dependencies(id)
                    .into_iter()
                    .filter(GraphNode::is_linkable)
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Build a petgraph view over every node. Edges point from a target to
    /// its dependencies; node weights are the ids.
    pub fn to_petgraph(&self) -> DiGraph<NodeId, ()> {
        let nodes = self.cache.nodes();
        let mut graph = DiGraph::with_capacity(nodes.len(), 0);
        let mut index: HashMap<NodeId, NodeIndex> = HashMap::new();

        for i in 0..nodes.len() {
            let id = NodeId(i);
            index.insert(id, graph.add_node(id));
        }
        for (i, node) in nodes.iter().enumerate() {
            for dep in node.dependencies() {
                if let (Some(&from), Some(&to)) = (index.get(&NodeId(i)), index.get(dep)) {
                    graph.add_edge(from, to, ());
                }
            }
        }

        graph
    }

    /// Get target nodes in topological order (dependencies before dependents).
    pub fn topological_order(&self) -> Vec<Arc<TargetNode>> {
        let graph = self.to_petgraph();
        let mut topo = Topo::new(&graph);
        let mut order = Vec::new();

        while let Some(index) = topo.next(&graph) {
            if let Some(target) = self.cache.target(graph[index]) {
                order.push(target);
            }
        }

        // Edges point at dependencies, so Topo yields dependents first.
        order.reverse();
        order
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Dependency, Target};
    use crate::test_support::MockModelLoader;

    fn load() -> Graph {
        let loader = MockModelLoader::new()
            .with_project(Project::new(
                "/p/App",
                "App",
                vec![
                    Target::app("App").with_dependencies([
                        Dependency::target("Core"),
                        Dependency::project("Lib", "../Lib"),
                        Dependency::legacy_manager("."),
                    ]),
                    Target::framework("Core").with_dependencies([Dependency::project("Lib", "../Lib")]),
                ],
            ))
            .with_project(Project::new(
                "/p/Lib",
                "Lib",
                vec![Target::framework("Lib").with_dependencies([Dependency::framework("Foo.framework")])],
            ));

        GraphLoader::new()
            .load_project(Path::new("/p/App"), &loader)
            .unwrap()
    }

    #[test]
    fn test_queries() {
        let graph = load();

        assert_eq!(graph.entry_path(), Path::new("/p/App"));
        assert_eq!(graph.entry_nodes().len(), 2);
        assert_eq!(graph.projects().len(), 2);
        assert_eq!(graph.targets().len(), 3);
        assert_eq!(graph.precompiled()[0].name(), "Foo.framework");
        assert!(graph.target(Path::new("/p/Lib"), "Missing").is_none());
    }

    #[test]
    fn test_linkable_dependencies_skip_pods() {
        let graph = load();

        let names: Vec<_> = graph
            .linkable_dependencies(Path::new("/p/App"), "App")
            .iter()
            .map(GraphNode::name)
            .collect();
        assert_eq!(names, ["Core", "Lib"]);
    }

    #[test]
    fn test_topological_order() {
        let graph = load();

        let order: Vec<_> = graph
            .topological_order()
            .iter()
            .map(|t| t.name().to_string())
            .collect();
        let position = |name: &str| order.iter().position(|n| n == name).unwrap();

        assert_eq!(order.len(), 3);
        assert!(position("Lib") < position("Core"));
        assert!(position("Core") < position("App"));
    }
}
