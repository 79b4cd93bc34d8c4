//! Dependency tree rendering.

use std::collections::HashSet;
use std::fmt::Write;

use crate::graph::{Graph, GraphNode, NodeId};
use crate::util::fs::relative_path;

/// Options for rendering a tree.
#[derive(Debug, Clone, Default)]
pub struct TreeOptions {
    /// Maximum depth to print (None = unlimited)
    pub depth: Option<usize>,

    /// Expand repeated subtrees instead of marking them with `(*)`
    pub duplicates: bool,
}

/// Render the dependency tree of every entry node.
pub fn render_tree(graph: &Graph, opts: &TreeOptions) -> String {
    render_tree_from(graph, graph.entry_nodes(), opts)
}

/// Render the dependency trees rooted at `roots`.
pub fn render_tree_from(graph: &Graph, roots: &[NodeId], opts: &TreeOptions) -> String {
    let mut out = String::new();
    let mut seen = HashSet::new();
    let max_depth = opts.depth.unwrap_or(usize::MAX);

    for id in roots {
        render_node(graph, *id, 0, max_depth, &mut seen, opts.duplicates, &mut out);
    }

    out
}

fn render_node(
    graph: &Graph,
    id: NodeId,
    depth: usize,
    max_depth: usize,
    seen: &mut HashSet<NodeId>,
    show_duplicates: bool,
    out: &mut String,
) {
    if depth > max_depth {
        return;
    }
    let Some(node) = graph.node(id) else {
        return;
    };

    let is_duplicate = !seen.insert(id) && !node.dependencies().is_empty();

    let prefix = if depth == 0 {
        String::new()
    } else {
        format!("{}├── ", "│   ".repeat(depth - 1))
    };

    let dup_marker = if is_duplicate && !show_duplicates {
        " (*)"
    } else {
        ""
    };

    let _ = writeln!(out, "{}{}{}", prefix, label(graph, &node), dup_marker);

    // Don't recurse into duplicates unless explicitly requested
    if is_duplicate && !show_duplicates {
        return;
    }

    for dep in node.dependencies() {
        render_node(graph, *dep, depth + 1, max_depth, seen, show_duplicates, out);
    }
}

/// Targets outside the entry project are suffixed with their project's path.
fn label(graph: &Graph, node: &GraphNode) -> String {
    match node {
        GraphNode::Target(target) if target.path() != graph.entry_path() => {
            format!(
                "{} [{}]",
                node,
                relative_path(graph.entry_path(), target.path()).display()
            )
        }
        _ => node.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Dependency, Project, Target};
    use crate::graph::GraphLoader;
    use crate::test_support::MockModelLoader;
    use std::path::Path;

    fn diamond() -> Graph {
        let loader = MockModelLoader::new()
            .with_project(Project::new(
                "/p/App",
                "App",
                vec![Target::app("App").with_dependencies([
                    Dependency::target("Feature"),
                    Dependency::project("Lib", "../Lib"),
                ]),
                Target::framework("Feature").with_dependencies([Dependency::project("Lib", "../Lib")])],
            ))
            .with_project(Project::new(
                "/p/Lib",
                "Lib",
                vec![Target::framework("Lib").with_dependencies([Dependency::framework("Foo.framework")])],
            ));

        GraphLoader::new()
            .with_parallel(false)
            .load_project(Path::new("/p/App"), &loader)
            .unwrap()
    }

    #[test]
    fn test_render_marks_repeated_subtrees() {
        let out = render_tree(&diamond(), &TreeOptions::default());

        let expected = "\
App (target)
├── Feature (target)
│   ├── Lib (target) [../Lib]
│   │   ├── Foo.framework (framework)
├── Lib (target) [../Lib] (*)
Feature (target) (*)
";
        assert_eq!(out, expected);
    }

    #[test]
    fn test_render_depth_and_duplicates() {
        let graph = diamond();

        let shallow = render_tree(
            &graph,
            &TreeOptions {
                depth: Some(0),
                duplicates: false,
            },
        );
        assert_eq!(shallow, "App (target)\nFeature (target)\n");

        let full = render_tree(
            &graph,
            &TreeOptions {
                depth: None,
                duplicates: true,
            },
        );
        assert_eq!(full.matches("Foo.framework").count(), 3);
        assert!(!full.contains("(*)"));
    }

    #[test]
    fn test_render_single_root() {
        let graph = diamond();
        let feature = graph.target_id(Path::new("/p/App"), "Feature").unwrap();

        let out = render_tree_from(&graph, &[feature], &TreeOptions::default());
        assert!(out.starts_with("Feature (target)\n"));
        assert!(!out.contains("App (target)"));
    }
}
