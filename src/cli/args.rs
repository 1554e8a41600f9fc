//! CLI argument definitions.

use crate::cli::validators::{parse_delimiter, parse_non_empty};
use crate::config::OutputFormat;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Merge per-subject MRS spreadsheets into one wide table and render
/// per-metabolite comparison charts.
#[derive(Debug, Parser)]
#[command(name = "mrs-merge")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Root directory holding one directory per subject.
    #[arg(env = "MRS_MERGE_ROOT")]
    pub root: Option<PathBuf>,

    /// Options for the merge run.
    #[command(flatten)]
    pub run: RunArgs,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Manage configuration.
    Config {
        /// Configuration action to perform.
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config subcommand actions.
#[derive(Debug, Clone, Copy, Subcommand)]
pub enum ConfigAction {
    /// Create default configuration file.
    Init,
    /// Display current configuration.
    Show,
    /// Print configuration file path.
    Path,
}

/// Arguments for a merge run.
#[derive(Debug, Args)]
#[allow(clippy::struct_excessive_bools)]
pub struct RunArgs {
    /// Output directory for the merged table.
    #[arg(short, long, default_value = ".", env = "MRS_MERGE_OUTPUT_DIR")]
    pub output_dir: PathBuf,

    /// File stem of the merged table (overrides config).
    #[arg(short = 'n', long, value_parser = parse_non_empty)]
    pub table_name: Option<String>,

    /// Output formats (comma-separated: csv,json).
    #[arg(short, long, value_delimiter = ',')]
    pub format: Option<Vec<OutputFormat>>,

    /// Table delimiter: a single character or `tab`.
    #[arg(short, long, value_parser = parse_delimiter)]
    pub delimiter: Option<char>,

    /// Start CSV output with a UTF-8 BOM.
    #[arg(long)]
    pub csv_bom: bool,

    /// Chart directory (default: `charts` inside the output directory).
    #[arg(long, conflicts_with = "no_charts")]
    pub chart_dir: Option<PathBuf>,

    /// Skip chart rendering.
    #[arg(long)]
    pub no_charts: bool,

    /// Substring marking the high-isoflurane condition directory.
    #[arg(long, value_parser = parse_non_empty)]
    pub marker: Option<String>,

    /// Configuration file (default: platform config directory).
    #[arg(long, env = "MRS_MERGE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Suppress progress output and informational logs.
    #[arg(short, long)]
    pub quiet: bool,

    /// Increase verbosity (-v: debug, -vv: trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Disable progress bars.
    #[arg(long)]
    pub no_progress: bool,
}
