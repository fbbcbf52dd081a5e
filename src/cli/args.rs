//! CLI argument definitions using clap derive

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::cli::commands::{
    bom::BomCommands, completions::CompletionsArgs, init::InitArgs, mat::MatCommands,
};

#[derive(Parser)]
#[command(name = "bomtally")]
#[command(author, version, about = "Bill-of-materials cost editor")]
#[command(
    long_about = "Manage hierarchical bills of materials: compose materials into assemblies with quantities and cached line costs, and view bottom-up roll-up costs with manual overrides."
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub global: GlobalOpts,
}

#[derive(clap::Args, Clone, Debug)]
pub struct GlobalOpts {
    /// Data file (default: the per-user data directory)
    #[arg(long, global = true)]
    pub file: Option<PathBuf>,

    /// Output format
    #[arg(long, short = 'f', global = true, default_value = "auto")]
    pub format: OutputFormat,

    /// Suppress non-essential output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create the data file
    Init(InitArgs),

    /// Material management
    #[command(subcommand)]
    Mat(MatCommands),

    /// BOM line item management
    #[command(subcommand)]
    Bom(BomCommands),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Output format for list and show commands
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Pick per command (table for lists)
    Auto,
    /// Aligned text table
    Table,
    /// JSON array
    Json,
    /// Comma-separated values
    Csv,
    /// Ids only, one per line
    Id,
}
