//! Merged output rendering.
//!
//! Every candidate becomes one framed block:
//!
//! ```text
//! ================================================================================
//! // File: <relative path>
//! ================================================================================
//!
//! <content, newline-terminated>
//!
//! ================================================================================
//!
//! ```
//!
//! When a file cannot be read, a single marker line followed by a blank line
//! takes the place of the content section.

use crate::domain::{CandidateFile, MergeStats};
use crate::error::{MergeError, MergeResult};
use crate::utils::{read_file_content, ReadOutcome};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

pub const BANNER_WIDTH: usize = 80;

pub fn banner() -> String {
    "=".repeat(BANNER_WIDTH)
}

/// Render the block for one file from an already-resolved read outcome.
pub fn render_block(relative_path: &str, outcome: &ReadOutcome) -> String {
    let banner = banner();
    let mut block = format!("{banner}\n// File: {relative_path}\n{banner}\n\n");

    match outcome {
        ReadOutcome::Content(content) => {
            block.push_str(content);
            if !content.is_empty() && !content.ends_with('\n') {
                block.push('\n');
            }
            block.push('\n');
        }
        ReadOutcome::DecodeError => {
            block.push_str(&format!(
                "[Error: Could not read {relative_path} - file may be binary or encoded incorrectly]\n\n"
            ));
        }
        ReadOutcome::IoError(message) => {
            block.push_str(&format!("[Error reading {relative_path}: {message}]\n\n"));
        }
    }

    block.push_str(&banner);
    block.push_str("\n\n");
    block
}

/// Stream every file's block to `writer`, in order.
///
/// Read failures are recorded inline and never stop the pass; only a failure
/// of `writer` itself is returned.
pub fn write_merged<W: Write>(writer: &mut W, files: &[CandidateFile]) -> std::io::Result<MergeStats> {
    let mut stats = MergeStats { files_discovered: files.len(), ..MergeStats::default() };

    for file in files {
        let relative = file.display_path();
        let outcome = read_file_content(&file.absolute_path);
        match &outcome {
            ReadOutcome::Content(_) => stats.files_written += 1,
            ReadOutcome::DecodeError => {
                tracing::warn!("{} is not valid UTF-8; writing error marker", relative);
                stats.files_failed += 1;
            }
            ReadOutcome::IoError(message) => {
                tracing::warn!("Failed to read {}: {}", relative, message);
                stats.files_failed += 1;
            }
        }

        let block = render_block(&relative, &outcome);
        writer.write_all(block.as_bytes())?;
        stats.bytes_written += block.len() as u64;
    }

    writer.flush()?;
    Ok(stats)
}

/// Create `output_path` (and missing parent directories) and write the merge into it.
pub fn write_merged_file(output_path: &Path, files: &[CandidateFile]) -> MergeResult<MergeStats> {
    let create_error =
        |source: std::io::Error| MergeError::OutputCreate { path: output_path.to_path_buf(), source };

    if let Some(parent) = output_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(create_error)?;
        }
    }
    let file = File::create(output_path).map_err(create_error)?;

    let mut writer = BufWriter::new(file);
    write_merged(&mut writer, files)
        .map_err(|source| MergeError::Write { path: output_path.to_path_buf(), source })
}
