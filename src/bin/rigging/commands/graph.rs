//! `rigging graph` command

use anyhow::Result;

use crate::cli::GraphArgs;
use rigging::ops::{render_tree, to_dot, to_json, TreeOptions};
use rigging::util::config::OutputFormat;
use rigging::util::GlobalContext;

pub fn execute(ctx: &GlobalContext, args: GraphArgs, jobs: Option<usize>) -> Result<()> {
    let (graph, config) = super::load(ctx, args.path.as_deref(), jobs)?;

    let format = args
        .format
        .map(OutputFormat::from)
        .unwrap_or(config.output.format);

    match format {
        OutputFormat::Tree => print!("{}", render_tree(&graph, &TreeOptions::default())),
        OutputFormat::Json => println!("{}", to_json(&graph)?),
        OutputFormat::Dot => println!("{}", to_dot(&graph)),
    }

    Ok(())
}
