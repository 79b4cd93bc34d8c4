//! CLI definitions using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;

use rigging::util::config::OutputFormat;

/// Rigging - resolve the module dependency graph of a project or workspace
#[derive(Parser)]
#[command(name = "rigging")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Number of worker threads used to resolve the graph
    #[arg(short, long, global = true, env = "RIGGING_JOBS")]
    pub jobs: Option<usize>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Display the dependency tree
    Tree(TreeArgs),

    /// Print the resolved graph as JSON or DOT
    Graph(GraphArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(Args)]
pub struct TreeArgs {
    /// Target to show the tree for (defaults to every entry target)
    pub target: Option<String>,

    /// Project or workspace directory (defaults to the nearest manifest)
    #[arg(short, long)]
    pub path: Option<PathBuf>,

    /// Maximum depth to display
    #[arg(short, long)]
    pub depth: Option<usize>,

    /// Expand repeated subtrees
    #[arg(long)]
    pub duplicates: bool,
}

#[derive(Args)]
pub struct GraphArgs {
    /// Project or workspace directory (defaults to the nearest manifest)
    #[arg(short, long)]
    pub path: Option<PathBuf>,

    /// Output format (defaults to `[output] format` in config.toml)
    #[arg(short, long, value_enum)]
    pub format: Option<FormatArg>,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum FormatArg {
    Tree,
    Json,
    Dot,
}

impl From<FormatArg> for OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Tree => OutputFormat::Tree,
            FormatArg::Json => OutputFormat::Json,
            FormatArg::Dot => OutputFormat::Dot,
        }
    }
}

#[derive(Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}
