//! Combine command-line settings with the config file (CLI > file > defaults)

use crate::domain::{Config, ExcludeMode, MergeRequest, SortKey};
use std::path::PathBuf;

/// Settings given on the command line. `None`/`false` means "not given".
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub source_directory: PathBuf,
    pub output_path: PathBuf,
    pub sort: Option<SortKey>,
    pub reverse: bool,
    pub exclude: Option<Vec<String>>,
    pub glob: bool,
}

pub fn merge_cli_with_config(cli: CliOverrides, config: Config) -> MergeRequest {
    let sort_key = cli.sort.unwrap_or_else(|| config.sort_key());
    let exclude = cli.exclude.unwrap_or(config.exclude);
    let mode = if cli.glob || config.glob { ExcludeMode::Glob } else { ExcludeMode::Substring };

    MergeRequest::new(cli.source_directory, cli.output_path)
        .sort_key(sort_key)
        .reverse(cli.reverse || config.reverse)
        .exclude_patterns(exclude)
        .exclude_mode(mode)
}
