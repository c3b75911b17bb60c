//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueHint};

/// Expandable tree projector: print the visible rows of a forest file
#[derive(Parser, Debug)]
#[command(name = "treeflat")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Debug output, repeat for more (-d info, -dd debug, -ddd trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub debug: u8,

    /// Config file layered over the global config
    #[arg(short, long, global = true, value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the visible rows of a forest
    Rows {
        /// Forest file (default: `default_forest` from config)
        #[arg(value_hint = ValueHint::FilePath)]
        file: Option<PathBuf>,
        /// Toggle the row at this index; repeatable, applied in order
        #[arg(short, long)]
        toggle: Vec<usize>,
        /// Expand every node before applying toggles
        #[arg(long)]
        expand_all: bool,
        /// Expand the ancestors of this node id before applying toggles
        #[arg(long)]
        reveal: Option<String>,
    },

    /// Show the whole forest as a tree
    Tree {
        /// Forest file (default: `default_forest` from config)
        #[arg(value_hint = ValueHint::FilePath)]
        file: Option<PathBuf>,
    },

    /// List leaf node ids
    Leaves {
        /// Forest file (default: `default_forest` from config)
        #[arg(value_hint = ValueHint::FilePath)]
        file: Option<PathBuf>,
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

    /// Create global config template
    Init {
        /// Overwrite an existing file
        #[arg(short, long)]
        force: bool,
    },

    /// Show config paths
    Path,
}
