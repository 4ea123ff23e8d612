//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueEnum, ValueHint};

/// Career taxonomy explorer: expand/collapse a career tree and lay it out for diagram rendering
#[derive(Parser, Debug)]
#[command(name = "careertree")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Verbosity: -d info, -dd debug, -ddd trace
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub debug: u8,

    /// Project directory holding .careertree.toml (default: cwd)
    #[arg(short = 'C', long, global = true, value_hint = ValueHint::DirPath)]
    pub project_dir: Option<PathBuf>,

    /// Taxonomy file (.toml or .json), overrides config
    #[arg(short, long, global = true, value_hint = ValueHint::FilePath)]
    pub taxonomy: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Output format for layout data.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Format {
    #[default]
    Table,
    Json,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show the whole taxonomy as a tree
    Tree {
        /// Show node ids next to labels
        #[arg(long)]
        ids: bool,
    },

    /// Show only the visible nodes
    View {
        /// Nodes to expand (their ancestors are expanded too)
        #[arg(short, long, value_delimiter = ',')]
        expand: Vec<String>,
    },

    /// Compute the diagram layout
    Layout {
        /// Nodes to expand (their ancestors are expanded too)
        #[arg(short, long, value_delimiter = ',')]
        expand: Vec<String>,
        /// Output format
        #[arg(short, long, value_enum, default_value_t = Format::Table)]
        format: Format,
    },

    /// Emit layout plus node styles as JSON
    Scene {
        /// Nodes to expand (their ancestors are expanded too)
        #[arg(short, long, value_delimiter = ',')]
        expand: Vec<String>,
    },

    /// Replay clicks on nodes and report each outcome
    Click {
        /// Node ids, clicked in order
        #[arg(num_args = 1.., required = true)]
        ids: Vec<String>,
    },

    /// Show details of a leaf career
    Details {
        /// Node id
        id: String,
    },

    /// List leaf careers
    Leaves,

    /// Find nodes by label or id
    Search {
        /// Case-insensitive text
        query: String,
    },

    /// Manage settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show merged config
    Show,

    /// Create config template
    Init {
        /// Create global config
        #[arg(short, long)]
        global: bool,
    },

    /// Show config paths
    Path,
}
