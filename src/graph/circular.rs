//! Circular dependency detection.
//!
//! The detector accumulates every edge followed during one graph load. An
//! edge `from -> to` is rejected when `from` is already reachable from `to`,
//! since recording it would close a loop. The reachability check and the
//! insert happen under one lock, so sibling subtrees resolved in parallel
//! can never both slip half of a cycle past each other.

use std::collections::{HashMap, HashSet};

use tracing::trace;

use crate::graph::errors::GraphError;
use crate::graph::node::TargetKey;
use crate::util::Atomic;

#[derive(Debug, Default)]
struct Edges {
    outgoing: HashMap<TargetKey, HashSet<TargetKey>>,
    completed: HashSet<TargetKey>,
}

impl Edges {
    /// Depth-first search over recorded edges.
    fn reaches(&self, start: &TargetKey, goal: &TargetKey) -> bool {
        let mut stack = vec![start];
        let mut visited = HashSet::new();

        while let Some(node) = stack.pop() {
            if node == goal {
                return true;
            }
            if !visited.insert(node) {
                continue;
            }
            if let Some(next) = self.outgoing.get(node) {
                stack.extend(next.iter());
            }
        }

        false
    }
}

/// Edge set for one graph load.
#[derive(Debug, Default)]
pub struct CircularDetector {
    edges: Atomic<Edges>,
}

impl CircularDetector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the edge `from -> to`, failing if it would close a cycle.
    ///
    /// A self edge (`from == to`) is always a cycle.
    pub fn start(&self, from: &TargetKey, to: &TargetKey) -> Result<(), GraphError> {
        self.edges.modify(|edges| {
            if edges.reaches(to, from) {
                return Err(GraphError::CircularDependency {
                    from: from.clone(),
                    to: to.clone(),
                });
            }

            trace!("edge {} -> {}", from, to);
            edges
                .outgoing
                .entry(from.clone())
                .or_default()
                .insert(to.clone());
            Ok(())
        })
    }

    /// Mark `node` as fully explored.
    ///
    /// Recorded edges are kept; a node reached again through another path
    /// must still see them.
    pub fn complete(&self, node: &TargetKey) {
        trace!("completed {}", node);
        self.edges.modify(|edges| {
            edges.completed.insert(node.clone());
        });
    }

    /// Check if `node` has been marked complete.
    pub fn is_complete(&self, node: &TargetKey) -> bool {
        self.edges.with(|edges| edges.completed.contains(node))
    }

    /// Number of recorded edges.
    pub fn edge_count(&self) -> usize {
        self.edges
            .with(|edges| edges.outgoing.values().map(HashSet::len).sum())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(name: &str) -> TargetKey {
        TargetKey::new("/p", name)
    }

    #[test]
    fn test_start_throws_when_circular_dependency() {
        let detector = CircularDetector::new();
        let (a, b, c) = (key("a"), key("b"), key("c"));

        detector.start(&a, &b).unwrap();
        detector.start(&b, &c).unwrap();
        let err = detector.start(&c, &a).unwrap_err();

        assert_eq!(err, GraphError::CircularDependency { from: c, to: a });
    }

    #[test]
    fn test_complete_keeps_edges() {
        let detector = CircularDetector::new();
        let (a, b) = (key("a"), key("b"));

        detector.start(&a, &b).unwrap();
        detector.complete(&b);
        detector.complete(&a);

        assert!(detector.is_complete(&a));
        assert_eq!(detector.edge_count(), 1);
        assert!(detector.start(&b, &a).is_err());
    }

    #[test]
    fn test_diamond_is_not_a_cycle() {
        let detector = CircularDetector::new();
        let (a, b, c, d) = (key("a"), key("b"), key("c"), key("d"));

        detector.start(&a, &b).unwrap();
        detector.start(&b, &d).unwrap();
        detector.complete(&d);
        detector.complete(&b);
        detector.start(&a, &c).unwrap();
        detector.start(&c, &d).unwrap();
        detector.complete(&c);
        detector.complete(&a);

        assert_eq!(detector.edge_count(), 4);
    }

    #[test]
    fn test_two_roots_sharing_a_leaf() {
        let detector = CircularDetector::new();
        let (a, b, shared) = (key("a"), key("b"), key("shared"));

        detector.start(&a, &shared).unwrap();
        detector.start(&b, &shared).unwrap();
        detector.start(&b, &a).unwrap();
    }

    #[test]
    fn test_chains_of_length_two_to_five() {
        for len in 2..=5 {
            let detector = CircularDetector::new();
            let keys: Vec<_> = (0..len).map(|i| key(&format!("t{}", i))).collect();

            for pair in keys.windows(2) {
                detector.start(&pair[0], &pair[1]).unwrap();
            }

            let last = &keys[len - 1];
            let err = detector.start(last, &keys[0]).unwrap_err();
            assert_eq!(err.cycle(), Some((last, &keys[0])), "chain of length {}", len);
        }
    }

    #[test]
    fn test_self_edge() {
        let detector = CircularDetector::new();
        let a = key("a");
        assert!(detector.start(&a, &a).is_err());
    }

    #[test]
    fn test_same_name_in_other_project_is_distinct() {
        let detector = CircularDetector::new();
        let app_core = TargetKey::new("/p/App", "Core");
        let lib_core = TargetKey::new("/p/Lib", "Core");

        detector.start(&app_core, &lib_core).unwrap();
        assert!(detector.start(&lib_core, &app_core).is_err());
        assert!(detector
            .start(&lib_core, &TargetKey::new("/p/Other", "Core"))
            .is_ok());
    }
}
