//! Command implementations

pub mod completions;
pub mod graph;
pub mod tree;

use std::path::Path;

use anyhow::Result;

use rigging::graph::Graph;
use rigging::ops::{load_graph, locate, LoadOptions};
use rigging::util::{GlobalContext, UserConfig};

/// Load the graph at `path`, with user configuration applied under the
/// command-line `--jobs`.
pub fn load(
    ctx: &GlobalContext,
    path: Option<&Path>,
    jobs: Option<usize>,
) -> Result<(Graph, UserConfig)> {
    let (root, _) = locate(ctx, path)?;
    let config = ctx.user_config(&root);

    let opts = LoadOptions {
        path: Some(root),
        jobs: jobs.or(config.graph.jobs),
        parallel: config.graph.parallel,
    };

    Ok((load_graph(ctx, &opts)?, config))
}
