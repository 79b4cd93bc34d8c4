//! Graph loader - turns a root path into a fully linked graph.
//!
//! Every call to `load_project`/`load_workspace` gets a fresh cache and
//! circular detector. Targets are resolved depth first; the dependencies of
//! one target, the targets of the root project and the projects of a
//! workspace are each resolved through the concurrent map.

use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;

use anyhow::Result;
use tracing::{debug, info, trace};

use crate::core::{Config, Dependency, ModelLoader, Project};
use crate::graph::cache::GraphLoaderCache;
use crate::graph::circular::CircularDetector;
use crate::graph::errors::GraphError;
use crate::graph::node::{
    LegacyManagerNode, NodeId, PackageProductNode, PrecompiledNode, TargetKey, TargetNode,
};
use crate::graph::Graph;
use crate::util::concurrent::{concurrent_map, sequential_map};
use crate::util::fs::{normalize_path, resolve_path};

/// Loads projects and workspaces into a [`Graph`].
#[derive(Debug, Clone)]
pub struct GraphLoader {
    parallel: bool,
    jobs: Option<usize>,
}

impl Default for GraphLoader {
    fn default() -> Self {
        GraphLoader {
            parallel: true,
            jobs: None,
        }
    }
}

impl GraphLoader {
    /// Create a loader that resolves in parallel on rayon's global pool.
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve on a dedicated pool of `jobs` threads. `None` uses the global pool.
    pub fn with_jobs(mut self, jobs: Option<usize>) -> Self {
        self.jobs = jobs;
        self
    }

    /// Resolve siblings one after another when `parallel` is false.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Load the project at `path` and every target reachable from it.
    pub fn load_project(&self, path: &Path, model_loader: &dyn ModelLoader) -> Result<Graph> {
        let path = normalize_path(path);
        self.run(|| {
            let cx = LoadContext::new(model_loader, self.parallel);

            let project = cx.project(&path)?;
            let entry_nodes = cx.entry_nodes(&project)?;

            Ok(cx.finish(project.name(), &path, entry_nodes))
        })
    }

    /// Load the workspace at `path` and every target reachable from its projects.
    ///
    /// Entry nodes are the targets of each member project, in member order.
    /// A target reachable from two members appears once.
    pub fn load_workspace(&self, path: &Path, model_loader: &dyn ModelLoader) -> Result<Graph> {
        let path = normalize_path(path);
        self.run(|| {
            let cx = LoadContext::new(model_loader, self.parallel);

            debug!("loading workspace at {}", path.display());
            let workspace = model_loader.load_workspace(&path)?;
            cx.config(&path)?;

            let members: Vec<_> = workspace
                .projects()
                .iter()
                .map(|p| resolve_path(workspace.path(), p))
                .collect();

            let per_project = cx.map(&members, |member| {
                let project = cx.project(member)?;
                cx.entry_nodes(&project)
            })?;

            let mut seen = HashSet::new();
            let entry_nodes = per_project
                .into_iter()
                .flatten()
                .filter(|id| seen.insert(*id))
                .collect();

            Ok(cx.finish(workspace.name(), &path, entry_nodes))
        })
    }

    fn run<R: Send>(&self, load: impl FnOnce() -> Result<R> + Send) -> Result<R> {
        match self.jobs {
            Some(jobs) if self.parallel => {
                let pool = rayon::ThreadPoolBuilder::new()
                    .num_threads(jobs)
                    .thread_name(|i| format!("rigging-graph-{}", i))
                    .build()?;
                pool.install(load)
            }
            _ => load(),
        }
    }
}

/// State shared by every worker during one load.
struct LoadContext<'a> {
    cache: Arc<GraphLoaderCache>,
    detector: CircularDetector,
    model_loader: &'a dyn ModelLoader,
    parallel: bool,
}

impl<'a> LoadContext<'a> {
    fn new(model_loader: &'a dyn ModelLoader, parallel: bool) -> Self {
        LoadContext {
            cache: Arc::new(GraphLoaderCache::new()),
            detector: CircularDetector::new(),
            model_loader,
            parallel,
        }
    }

    fn map<T, U, F>(&self, items: &[T], f: F) -> Result<Vec<U>>
    where
        T: Sync,
        U: Send,
        F: Fn(&T) -> Result<U> + Sync + Send,
    {
        if self.parallel {
            concurrent_map(items, f)
        } else {
            sequential_map(items, f)
        }
    }

    fn finish(self, name: &str, path: &Path, entry_nodes: Vec<NodeId>) -> Graph {
        info!(
            "loaded graph `{}` with {} entry nodes and {} nodes",
            name,
            entry_nodes.len(),
            self.cache.node_count()
        );
        Graph::new(name, path, self.cache, entry_nodes)
    }

    /// Resolve every target a project declares, in declaration order.
    fn entry_nodes(&self, project: &Arc<Project>) -> Result<Vec<NodeId>> {
        self.map(project.targets(), |target| {
            self.resolve_target(project.path(), &target.name, None)
        })
    }

    /// Get the project at `path`, loading it on a miss.
    ///
    /// The model loader is called outside any cache lock. Two workers missing
    /// on the same path both load it; the cache keeps the first.
    fn project(&self, path: &Path) -> Result<Arc<Project>> {
        if let Some(project) = self.cache.project(path) {
            trace!("project cache hit for {}", path.display());
            return Ok(project);
        }

        debug!("loading project at {}", path.display());
        let project = self.model_loader.load_project(path)?;
        self.cache.add_project(project);

        let project = self
            .cache
            .project(path)
            .ok_or_else(|| GraphError::ProjectNotFound {
                path: path.to_path_buf(),
            })?;
        self.config(path)?;

        Ok(project)
    }

    /// Get the generation configuration for `path`, loading it on a miss.
    fn config(&self, path: &Path) -> Result<Arc<Config>> {
        if let Some(config) = self.cache.config(path) {
            return Ok(config);
        }
        let config = self.model_loader.load_config(path)?;
        Ok(self.cache.add_config(path, config))
    }

    /// Resolve the target `name` of the project at `path`.
    ///
    /// `parent` is the target that depends on it, or `None` for entry targets.
    fn resolve_target(&self, path: &Path, name: &str, parent: Option<&TargetKey>) -> Result<NodeId> {
        if let Some(id) = self.cache.target_node(path, name) {
            trace!("target cache hit for `{}` at {}", name, path.display());
            return Ok(id);
        }

        let key = TargetKey::new(path, name);
        if let Some(parent) = parent {
            self.detector.start(parent, &key)?;
        }

        let project = self.project(path)?;
        let target = project
            .target(name)
            .cloned()
            .ok_or_else(|| GraphError::TargetNotFound {
                name: name.to_string(),
                path: path.to_path_buf(),
            })?;

        let dependencies = self.map(&target.dependencies, |dependency| {
            self.resolve_dependency(&project, &key, dependency)
        })?;

        let id = self
            .cache
            .add_target_node(TargetNode::new(Arc::clone(&project), target, dependencies));
        self.detector.complete(&key);

        Ok(id)
    }

    fn resolve_dependency(
        &self,
        project: &Project,
        parent: &TargetKey,
        dependency: &Dependency,
    ) -> Result<NodeId> {
        let base = project.path();

        let id = match dependency {
            Dependency::Target { name } => self.resolve_target(base, name, Some(parent))?,

            Dependency::Project { target, path } => {
                self.resolve_target(&resolve_path(base, path), target, Some(parent))?
            }

            Dependency::Framework { path } => self
                .cache
                .add_precompiled_node(PrecompiledNode::framework(resolve_path(base, path))),

            Dependency::Library {
                path,
                public_headers,
                swift_module_map,
            } => self.cache.add_precompiled_node(PrecompiledNode::library(
                resolve_path(base, path),
                public_headers.as_deref().map(|p| resolve_path(base, p)),
                swift_module_map.as_deref().map(|p| resolve_path(base, p)),
            )),

            Dependency::PackageProduct { product } => {
                self.cache.add_package_node(PackageProductNode {
                    path: base.to_path_buf(),
                    product: product.clone(),
                })
            }

            Dependency::LegacyManager { path } => self.cache.add_legacy_node(LegacyManagerNode {
                path: resolve_path(base, path),
            }),
        };

        Ok(id)
    }
}
