//! Loading a graph from the manifests on disk.

use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::graph::{Graph, GraphLoader};
use crate::manifest::{find_manifest, ManifestKind, ManifestModelLoader};
use crate::util::fs::absolute;
use crate::util::GlobalContext;

/// Options for loading a graph.
#[derive(Debug, Clone)]
pub struct LoadOptions {
    /// Directory (or manifest file) to start from; defaults to cwd
    pub path: Option<PathBuf>,

    /// Worker threads; None uses the rayon default
    pub jobs: Option<usize>,

    /// Resolve siblings in parallel
    pub parallel: bool,
}

impl Default for LoadOptions {
    fn default() -> Self {
        LoadOptions {
            path: None,
            jobs: None,
            parallel: true,
        }
    }
}

/// Where a load starts: the directory holding the nearest manifest.
pub fn locate(ctx: &GlobalContext, path: Option<&Path>) -> Result<(PathBuf, ManifestKind)> {
    let start = match path {
        Some(path) => absolute(&ctx.cwd().join(path))?,
        None => ctx.cwd().to_path_buf(),
    };
    let start = if start.is_file() {
        start.parent().map(Path::to_path_buf).unwrap_or(start)
    } else {
        start
    };

    let (manifest, kind) = find_manifest(&start)?;
    let dir = manifest.parent().map(Path::to_path_buf).unwrap_or(start);
    Ok((dir, kind))
}

/// Load the graph of the nearest project or workspace.
pub fn load_graph(ctx: &GlobalContext, opts: &LoadOptions) -> Result<Graph> {
    let (dir, kind) = locate(ctx, opts.path.as_deref())?;

    let loader = GraphLoader::new()
        .with_parallel(opts.parallel)
        .with_jobs(opts.jobs);
    let model_loader = ManifestModelLoader::new();

    tracing::debug!("loading {:?} at {}", kind, dir.display());
    match kind {
        ManifestKind::Project => loader.load_project(&dir, &model_loader),
        ManifestKind::Workspace => loader.load_workspace(&dir, &model_loader),
    }
}
