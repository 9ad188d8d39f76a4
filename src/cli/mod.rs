//! Command-line interface for dirmerge
//!
//! Parses arguments, resolves them against any config file into a
//! `MergeRequest`, and runs the merge.

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::config::{load_config, merge_cli_with_config, CliOverrides};
use crate::domain::SortKey;
use crate::merger::Merger;

mod utils;

use utils::parse_csv;

const EXAMPLES: &str = "\
Examples:
  dirmerge input_dir output.txt
  dirmerge input_dir output.txt --sort creation_time --reverse
  dirmerge input_dir output.txt --exclude .git __pycache__ .pyc
  dirmerge input_dir output.txt --glob --exclude '*.pyc' target";

/// Merge text files from a directory into a single file
#[derive(Parser)]
#[command(name = "dirmerge")]
#[command(author, version, about, long_about = None)]
#[command(after_help = EXAMPLES)]
pub struct Cli {
    /// Directory containing files to merge
    #[arg(value_name = "INPUT_DIRECTORY")]
    pub input_directory: PathBuf,

    /// Path for the merged output file
    #[arg(value_name = "OUTPUT_FILE")]
    pub output_file: PathBuf,

    /// How to sort the files [default: name]
    #[arg(long, value_enum, value_name = "KEY")]
    pub sort: Option<SortKey>,

    /// Reverse the sort order
    #[arg(long)]
    pub reverse: bool,

    /// Patterns to exclude, matched as substrings of file and directory names
    #[arg(long, value_name = "PATTERN", num_args = 1..)]
    pub exclude: Option<Vec<String>>,

    /// Comma-separated exclude patterns, used when --exclude is not given
    #[arg(long, value_name = "PATTERNS", env = "DIRMERGE_EXCLUDE", hide = true)]
    pub exclude_list: Option<String>,

    /// Treat exclude patterns as glob patterns matched against whole names
    #[arg(long)]
    pub glob: bool,

    /// Path to config file (dirmerge.toml or .dirmerge.yml)
    #[arg(short = 'c', long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Print the files that would be merged, in order, without writing anything
    #[arg(long)]
    pub dry_run: bool,

    /// Enable verbose logging (sets log level to DEBUG)
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    fn overrides(&self) -> CliOverrides {
        CliOverrides {
            source_directory: self.input_directory.clone(),
            output_path: self.output_file.clone(),
            sort: self.sort,
            reverse: self.reverse,
            exclude: self.exclude.clone().or_else(|| parse_csv(&self.exclude_list)),
            glob: self.glob,
        }
    }
}

fn init_tracing(verbose: bool) {
    // RUST_LOG in the environment always takes precedence; --verbose falls back to DEBUG.
    let filter = if verbose {
        EnvFilter::from_default_env().add_directive(Level::DEBUG.into())
    } else {
        EnvFilter::from_default_env().add_directive(Level::WARN.into())
    };
    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .try_init();
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = load_config(&cli.input_directory, cli.config.as_deref())?;
    let request = merge_cli_with_config(cli.overrides(), config);
    tracing::debug!(
        "Merging {} into {} (sort: {}, reverse: {}, exclude: {:?})",
        request.source_directory.display(),
        request.output_path.display(),
        request.sort_key,
        request.reverse,
        request.exclude_patterns
    );

    let merger = Merger::new(&request);
    if cli.dry_run {
        for file in merger.plan()? {
            println!("{}", file.display_path());
        }
        return Ok(());
    }

    merger.run()?;
    println!("Successfully merged files into {}", request.output_path.display());
    Ok(())
}
