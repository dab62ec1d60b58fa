//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueHint};

use crate::domain::Uid;

/// Expandable hierarchy tables for nested JSON record sets
#[derive(Parser, Debug)]
#[command(name = "hiertable")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Fail on malformed child groups instead of skipping them
    #[arg(long, global = true)]
    pub strict: bool,

    /// Config file (default: $XDG_CONFIG_HOME/hiertable/hiertable.toml)
    #[arg(long, global = true, value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Render the hierarchy table once
    Show {
        /// JSON record file ('-' for stdin)
        #[arg(value_hint = ValueHint::FilePath)]
        file: PathBuf,
        /// Expand every node
        #[arg(short = 'a', long)]
        expand_all: bool,
        /// Toggle a node (repeatable; applied after --expand-all, so it collapses an expanded node)
        #[arg(short, long = "expand", value_name = "ID")]
        expand: Vec<Uid>,
        /// Remove a node and its subtree (repeatable, applied first)
        #[arg(short, long = "remove", value_name = "ID")]
        remove: Vec<Uid>,
    },

    /// Explore the table interactively (toggle, expand-all, collapse-all, remove)
    Browse {
        /// JSON record file
        #[arg(value_hint = ValueHint::FilePath)]
        file: PathBuf,
    },

    /// Show the full hierarchy as an outline
    Tree {
        /// JSON record file ('-' for stdin)
        #[arg(value_hint = ValueHint::FilePath)]
        file: PathBuf,
    },

    /// List node ids in pre-order (id, depth, title)
    Ids {
        /// JSON record file ('-' for stdin)
        #[arg(value_hint = ValueHint::FilePath)]
        file: PathBuf,
    },

    /// Select a node interactively (fzf) and print its details
    Pick {
        /// JSON record file
        #[arg(value_hint = ValueHint::FilePath)]
        file: PathBuf,
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
    /// Show effective config
    Show,

    /// Show config file path
    Path,

    /// Print a config template
    Init,
}
