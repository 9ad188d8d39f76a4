//! The merge pipeline: discover, order, write.

use crate::domain::{CandidateFile, MergeRequest, MergeStats};
use crate::error::{MergeError, MergeResult};
use crate::rank::order_files;
use crate::render::write_merged_file;
use crate::scan::{ExcludeFilter, FileScanner};
use crate::utils::absolute_path;
use std::path::PathBuf;

/// Runs one merge described by a [`MergeRequest`].
///
/// The merger never looks at process arguments or the environment; everything
/// it needs is in the request.
pub struct Merger<'a> {
    request: &'a MergeRequest,
}

impl<'a> Merger<'a> {
    pub fn new(request: &'a MergeRequest) -> Self {
        Self { request }
    }

    fn output_target(&self) -> MergeResult<PathBuf> {
        let output = &self.request.output_path;
        if output.as_os_str().is_empty() || output.file_name().is_none() || output.is_dir() {
            return Err(MergeError::InvalidOutputPath(output.clone()));
        }
        absolute_path(output)
            .map_err(|source| MergeError::OutputCreate { path: output.clone(), source })
    }

    /// Discovery and ordering only. Nothing is written.
    pub fn plan(&self) -> MergeResult<Vec<CandidateFile>> {
        let request = self.request;
        let output = self.output_target()?;
        let exclude = ExcludeFilter::new(&request.exclude_patterns, request.exclude_mode)?;

        let mut scanner =
            FileScanner::new(request.source_directory.clone()).exclude(exclude).skip_path(output);
        let files = scanner.scan()?;
        let stats = scanner.stats();
        tracing::debug!(
            "Scan of {}: {} seen, {} excluded, {} directories pruned, {} unreadable",
            scanner.root().display(),
            stats.files_seen,
            stats.files_excluded,
            stats.dirs_pruned,
            stats.entries_unreadable
        );

        order_files(files, request.sort_key, request.reverse)
    }

    /// Full merge. The output file is only created once there is something to write.
    pub fn run(&self) -> MergeResult<MergeStats> {
        let files = self.plan()?;
        let stats = write_merged_file(&self.request.output_path, &files)?;
        tracing::info!(
            "Merged {} files into {} ({} unreadable, {} bytes)",
            stats.files_written,
            self.request.output_path.display(),
            stats.files_failed,
            stats.bytes_written
        );
        Ok(stats)
    }
}

/// Convenience wrapper for a one-off merge.
pub fn merge(request: &MergeRequest) -> MergeResult<MergeStats> {
    Merger::new(request).run()
}
