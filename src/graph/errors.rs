//! Graph loading error types and diagnostics.

use std::path::PathBuf;

use miette::Diagnostic as MietteDiagnostic;
use thiserror::Error;

use crate::graph::node::TargetKey;
use crate::util::diagnostic::{suggestions, Diagnostic};

/// Error raised by the graph loader itself.
///
/// Errors from the model loader are not wrapped in this type; they reach the
/// caller exactly as the model loader produced them.
#[derive(Debug, Clone, PartialEq, Eq, Error, MietteDiagnostic)]
pub enum GraphError {
    /// Following `from -> to` would close a loop through already-recorded edges.
    #[error("found circular dependency between the target {from} and the target {to}")]
    #[diagnostic(
        code(rigging::graph::circular_dependency),
        help("remove one of the dependencies that form the cycle")
    )]
    CircularDependency { from: TargetKey, to: TargetKey },

    #[error("project not found at path {}", path.display())]
    #[diagnostic(code(rigging::graph::project_not_found))]
    ProjectNotFound { path: PathBuf },

    #[error("target `{name}` not found in the project at path {}", path.display())]
    #[diagnostic(code(rigging::graph::target_not_found))]
    TargetNotFound { name: String, path: PathBuf },
}

impl GraphError {
    /// Convert to a user-friendly diagnostic.
    pub fn to_diagnostic(&self) -> Diagnostic {
        match self {
            GraphError::CircularDependency { from, to } => {
                Diagnostic::error("circular dependency detected")
                    .with_context(format!("{} depends on {}", from, to))
                    .with_context(format!("{} already depends on {}", to, from))
                    .with_suggestion(format!(
                        "Remove the dependency on `{}` from `{}`",
                        to.name, from.name
                    ))
                    .with_suggestion(suggestions::BREAK_CYCLE)
            }

            GraphError::ProjectNotFound { path } => {
                Diagnostic::error(format!("could not find a project at {}", path.display()))
                    .with_location(path)
                    .with_suggestion(suggestions::CHECK_PROJECT_PATH)
            }

            GraphError::TargetNotFound { name, path } => {
                Diagnostic::error(format!("could not find target `{}`", name))
                    .with_location(path)
                    .with_context(format!(
                        "the project at {} does not declare it",
                        path.display()
                    ))
                    .with_suggestion(suggestions::TARGET_NOT_FOUND)
            }
        }
    }

    /// Both nodes of a circular dependency, if this is one.
    pub fn cycle(&self) -> Option<(&TargetKey, &TargetKey)> {
        match self {
            GraphError::CircularDependency { from, to } => Some((from, to)),
            _ => None,
        }
    }
}
