//! Core model types for Rigging.
//!
//! This module contains the plain descriptors the graph is built from:
//! - Projects and the targets (modules) they declare
//! - Unresolved dependency declarations
//! - Workspaces grouping projects
//! - Settings and generation configuration
//! - The `ModelLoader` collaborator that produces all of the above

pub mod dependency;
pub mod model_loader;
pub mod package;
pub mod project;
pub mod settings;
pub mod target;
pub mod workspace;

pub use dependency::{Dependency, DependencySpec};
pub use model_loader::ModelLoader;
pub use package::Package;
pub use project::Project;
pub use settings::{Config, Configuration, GenerationOption, Settings, SharedConfiguration, Variant};
pub use target::{Platform, Product, Target};
pub use workspace::Workspace;
