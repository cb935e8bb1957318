//! CLI argument definitions using clap.
//!
//! ## Commands
//!
//! - `graph`: extract the module dependency graph and write the artifact
//! - `list`: show discovered units and descriptors without writing anything
//! - `init`: initialize the modgraph configuration file

use std::path::PathBuf;

use clap::{Args, CommandFactory, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Arguments {
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Arguments {
    /// Check if a command was provided, otherwise print help and return None.
    pub fn with_command_or_help(self) -> Option<Self> {
        if self.command.is_none() {
            Self::command().print_help().ok();
            None
        } else {
            Some(self)
        }
    }
}

/// Common arguments shared by all commands.
#[derive(Debug, Clone, Args)]
pub struct CommonArgs {
    /// Definitions directory (overrides config file)
    #[arg(long)]
    pub definitions_root: Option<PathBuf>,

    /// Target name for the build context (overrides config file)
    #[arg(long)]
    pub target: Option<String>,

    /// Target platform for the build context (overrides config file)
    #[arg(long)]
    pub platform: Option<String>,

    /// Build configuration for the build context (overrides config file)
    #[arg(long)]
    pub configuration: Option<String>,

    /// Additional unit-name prefix to skip during scanning
    /// Can be specified multiple times: --skip-unit System --skip-unit Microsoft
    #[arg(long)]
    pub skip_unit: Vec<String>,

    /// Module descriptor excluded from the scan (overrides config file)
    #[arg(long)]
    pub exclude_module: Option<String>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Args)]
pub struct GraphCommand {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Artifact output path (overrides config file)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub struct ListCommand {
    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Extract the module dependency graph and write the artifact
    Graph(GraphCommand),
    /// List discovered units and module descriptors without writing anything
    List(ListCommand),
    /// Initialize a new .modgraphrc.json configuration file
    Init,
}
