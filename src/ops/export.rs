//! Machine-readable graph export: JSON and Graphviz DOT.

use std::path::PathBuf;

use anyhow::{Context, Result};
use petgraph::dot::{Config as DotConfig, Dot};
use serde::Serialize;

use crate::graph::{Graph, GraphNode, NodeId};

/// Serializable snapshot of a graph.
#[derive(Debug, Clone, Serialize)]
pub struct GraphDescription {
    pub name: String,
    pub path: PathBuf,
    pub entry_nodes: Vec<NodeId>,
    pub nodes: Vec<NodeDescription>,
}

/// One node of a [`GraphDescription`]; `id` is its index in `nodes`.
#[derive(Debug, Clone, Serialize)]
pub struct NodeDescription {
    pub id: NodeId,
    pub kind: &'static str,
    pub name: String,
    pub path: PathBuf,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product: Option<String>,
    pub dependencies: Vec<NodeId>,
}

impl GraphDescription {
    pub fn new(graph: &Graph) -> Self {
        let nodes = graph
            .cache()
            .nodes()
            .iter()
            .enumerate()
            .map(|(i, node)| NodeDescription {
                id: NodeId(i),
                kind: node.kind(),
                name: node.name(),
                path: node.path().to_path_buf(),
                product: match node {
                    GraphNode::Target(target) => Some(target.target().product_name()),
                    _ => None,
                },
                dependencies: node.dependencies().to_vec(),
            })
            .collect();

        GraphDescription {
            name: graph.name().to_string(),
            path: graph.entry_path().to_path_buf(),
            entry_nodes: graph.entry_nodes().to_vec(),
            nodes,
        }
    }
}

/// Render the graph as pretty-printed JSON.
pub fn to_json(graph: &Graph) -> Result<String> {
    serde_json::to_string_pretty(&GraphDescription::new(graph))
        .context("failed to serialize graph")
}

/// Render the graph in Graphviz DOT format.
pub fn to_dot(graph: &Graph) -> String {
    let ids = graph.to_petgraph();
    let labeled = ids.map(
        |_, id| {
            graph
                .node(*id)
                .map(|node| node.to_string())
                .unwrap_or_default()
        },
        |_, _| "",
    );

    format!("{}", Dot::with_config(&labeled, &[DotConfig::EdgeNoLabel]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Dependency, Project, Target};
    use crate::graph::GraphLoader;
    use crate::test_support::MockModelLoader;
    use std::path::Path;

    fn graph() -> Graph {
        let loader = MockModelLoader::new().with_project(Project::new(
            "/p/App",
            "App",
            vec![
                Target::app("App").with_dependencies([
                    Dependency::target("Core"),
                    Dependency::package_product("Networking"),
                ]),
                Target::framework("Core"),
            ],
        ));

        GraphLoader::new()
            .with_parallel(false)
            .load_project(Path::new("/p/App"), &loader)
            .unwrap()
    }

    #[test]
    fn test_json_export() {
        let json = to_json(&graph()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["name"], "App");
        let nodes = value["nodes"].as_array().unwrap();
        assert_eq!(nodes.len(), 3);

        let app = nodes.iter().find(|n| n["name"] == "App").unwrap();
        assert_eq!(app["kind"], "target");
        assert_eq!(app["product"], "App.app");
        assert_eq!(app["dependencies"].as_array().unwrap().len(), 2);

        let package = nodes.iter().find(|n| n["kind"] == "package").unwrap();
        assert!(package.get("product").is_none());
    }

    #[test]
    fn test_dot_export() {
        let dot = to_dot(&graph());

        assert!(dot.starts_with("digraph {"));
        assert!(dot.contains("App (target)"));
        assert!(dot.contains("Networking (package)"));
        assert_eq!(dot.matches("->").count(), 2);
    }
}
