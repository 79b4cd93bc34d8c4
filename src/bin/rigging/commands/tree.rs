//! `rigging tree` command

use anyhow::{bail, Result};

use crate::cli::TreeArgs;
use rigging::graph::NodeId;
use rigging::ops::tree::{render_tree, render_tree_from, TreeOptions};
use rigging::util::GlobalContext;

pub fn execute(ctx: &GlobalContext, args: TreeArgs, jobs: Option<usize>) -> Result<()> {
    let (graph, _) = super::load(ctx, args.path.as_deref(), jobs)?;

    let opts = TreeOptions {
        depth: args.depth,
        duplicates: args.duplicates,
    };

    let out = match args.target {
        Some(name) => {
            let roots: Vec<NodeId> = graph
                .entry_nodes()
                .iter()
                .copied()
                .filter(|id| graph.node(*id).is_some_and(|node| node.name() == name))
                .collect();
            if roots.is_empty() {
                bail!("no entry target named `{}` in {}", name, graph.name());
            }
            render_tree_from(&graph, &roots, &opts)
        }
        None => render_tree(&graph, &opts),
    };

    print!("{}", out);
    Ok(())
}
