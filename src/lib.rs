//! mrs-merge - MRS metabolite spreadsheet merging CLI tool.
//!
//! This crate reads per-subject spectroscopy spreadsheets recorded under a
//! high and a low isoflurane condition, merges them into one wide table and
//! renders per-metabolite comparison charts.

#![warn(missing_docs)]
#![allow(clippy::print_stdout)]

pub mod chart;
pub mod cli;
pub mod config;
pub mod constants;
pub mod error;
pub mod merge;
pub mod output;
pub mod pipeline;
pub mod reader;
pub mod record;

use chart::ChartStyle;
use clap::{CommandFactory, Parser};
use cli::{Cli, Command, ConfigAction, RunArgs};
use config::{
    Config, load_config_file, load_default_config, resolve_config_path, save_config,
    validate_config, validate_layout,
};
use pipeline::{RunOptions, RunOutcome, chart_dir_for, run_pipeline};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

pub use error::{Error, Result};

/// Main entry point for the mrs-merge CLI.
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.run.verbose, cli.run.quiet);

    if let Some(command) = cli.command {
        return handle_command(command, cli.run.config.as_deref());
    }

    // Show help if no root provided
    let Some(root) = cli.root else {
        Cli::command().print_help()?;
        println!();
        return Ok(());
    };

    let config = load_config(cli.run.config.as_deref())?;
    let options = resolve_run_options(root, &cli.run, &config)?;

    match run_pipeline(&options)? {
        RunOutcome::Completed(summary) => {
            for table in &summary.tables {
                println!(
                    "Merged {} subject(s), {} metabolite(s) into {}",
                    summary.subjects,
                    summary.metabolites,
                    table.display()
                );
            }
            if let Some(chart_dir) = &options.chart_dir
                && !summary.charts.is_empty()
            {
                println!(
                    "Rendered {} chart(s) into {}",
                    summary.charts.len(),
                    chart_dir.display()
                );
            }
        }
        RunOutcome::NoData => println!("No subject data available"),
    }

    Ok(())
}

/// Load and validate configuration from an explicit path or the default
/// location.
fn load_config(explicit: Option<&Path>) -> Result<Config> {
    let config = match explicit {
        Some(path) => {
            if !path.exists() {
                return Err(Error::ConfigRead {
                    path: path.to_path_buf(),
                    source: std::io::Error::new(std::io::ErrorKind::NotFound, "file not found"),
                });
            }
            load_config_file(path)?
        }
        None => load_default_config()?,
    };

    validate_config(&config)?;
    Ok(config)
}

/// Combine CLI arguments with configuration. CLI values win.
fn resolve_run_options(root: PathBuf, args: &RunArgs, config: &Config) -> Result<RunOptions> {
    let mut layout = config.layout.clone();
    if let Some(marker) = &args.marker {
        layout.condition_marker.clone_from(marker);
    }
    validate_layout(&layout)?;

    let mut formats = Vec::new();
    for format in args.format.as_ref().unwrap_or(&config.output.formats) {
        if !formats.contains(format) {
            formats.push(*format);
        }
    }
    if formats.is_empty() {
        return Err(Error::ConfigValidation {
            message: "at least one output format is required".to_string(),
        });
    }

    let delimiter_char = args.delimiter.unwrap_or(config.output.delimiter);
    let delimiter = u8::try_from(delimiter_char).map_err(|_| Error::ConfigValidation {
        message: format!("table delimiter '{delimiter_char}' is not an ASCII character"),
    })?;

    let output_dir = args.output_dir.clone();
    let chart_dir = if args.no_charts {
        None
    } else if let Some(dir) = &args.chart_dir {
        Some(dir.clone())
    } else if config.output.charts {
        Some(chart_dir_for(&output_dir, config.output.chart_dir.as_deref()))
    } else {
        None
    };

    let options = RunOptions {
        root,
        output_dir,
        table_name: args
            .table_name
            .clone()
            .unwrap_or_else(|| config.output.table_name.clone()),
        formats,
        delimiter,
        csv_bom: args.csv_bom || config.output.csv_bom,
        chart_dir,
        layout,
        chart_style: ChartStyle::from(&config.chart),
        progress: !args.no_progress && !args.quiet,
    };

    debug!("Resolved run options: {options:?}");
    Ok(options)
}

fn init_logging(verbose: u8, quiet: bool) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter_str = if quiet {
        "warn"
    } else {
        match verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter_str));

    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn handle_command(command: Command, explicit_config: Option<&Path>) -> Result<()> {
    match command {
        Command::Config { action } => handle_config_command(action, explicit_config),
    }
}

fn handle_config_command(action: ConfigAction, explicit_config: Option<&Path>) -> Result<()> {
    match action {
        ConfigAction::Init => {
            let path = resolve_config_path(explicit_config)?;
            if path.exists() {
                println!("Configuration file already exists: {}", path.display());
            } else {
                save_config(&Config::default(), &path)?;
                info!("Wrote default configuration to {}", path.display());
                println!("Created configuration file: {}", path.display());
            }
            Ok(())
        }
        ConfigAction::Show => {
            let config = load_config(explicit_config)?;
            let contents =
                toml::to_string_pretty(&config).map_err(|e| Error::ConfigSerialize { source: e })?;
            print!("{contents}");
            Ok(())
        }
        ConfigAction::Path => {
            println!("{}", resolve_config_path(explicit_config)?.display());
            Ok(())
        }
    }
}
