//! Rigging CLI - resolve the module dependency graph of a project

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;

use cli::{Cli, Commands};
use rigging::graph::GraphError;
use rigging::manifest::ManifestError;
use rigging::util::diagnostic::emit;
use rigging::util::GlobalContext;

fn main() {
    let cli = Cli::parse();

    let mut ctx = match GlobalContext::new() {
        Ok(ctx) => ctx,
        Err(e) => {
            eprintln!("error: {:#}", e);
            std::process::exit(1);
        }
    };
    ctx.set_verbose(cli.verbose);
    ctx.set_color(!cli.no_color);

    if let Err(e) = run(&ctx, cli) {
        if let Some(err) = e.downcast_ref::<GraphError>() {
            emit(&err.to_diagnostic(), ctx.color());
        } else if let Some(err) = e.downcast_ref::<ManifestError>() {
            emit(&err.to_diagnostic(), ctx.color());
        } else {
            eprintln!("error: {:#}", e);
        }
        std::process::exit(1);
    }
}

fn run(ctx: &GlobalContext, cli: Cli) -> Result<()> {
    // Set up logging
    let filter = if ctx.is_verbose() {
        EnvFilter::new("rigging=debug")
    } else {
        EnvFilter::new("rigging=info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_ansi(ctx.color())
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Tree(args) => commands::tree::execute(ctx, args, cli.jobs),
        Commands::Graph(args) => commands::graph::execute(ctx, args, cli.jobs),
        Commands::Completions(args) => commands::completions::execute(args),
    }
}
