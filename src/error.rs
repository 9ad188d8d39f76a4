//! Fatal merge errors.
//!
//! Anything here aborts the run. Per-file read problems are not errors; they
//! surface as [`crate::utils::ReadOutcome`] and become inline markers.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum MergeError {
    #[error("Source directory does not exist: {}", .0.display())]
    SourceNotFound(PathBuf),

    #[error("Path is not a directory: {}", .0.display())]
    NotADirectory(PathBuf),

    #[error("Cannot read source directory {}", path.display())]
    SourceUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid output path: {}", .0.display())]
    InvalidOutputPath(PathBuf),

    #[error("Cannot create output file {}", path.display())]
    OutputCreate {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid exclude pattern '{pattern}'")]
    InvalidExcludeGlob {
        pattern: String,
        #[source]
        source: globset::Error,
    },

    #[error("No files found in {}", directory.display())]
    NoFilesFound { directory: PathBuf },

    #[error("Cannot read metadata for {}", path.display())]
    Metadata {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed writing {}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl MergeError {
    /// True for problems with the request itself, detected before any output is written.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            MergeError::SourceNotFound(_)
                | MergeError::NotADirectory(_)
                | MergeError::SourceUnreadable { .. }
                | MergeError::InvalidOutputPath(_)
                | MergeError::OutputCreate { .. }
                | MergeError::InvalidExcludeGlob { .. }
        )
    }
}

pub type MergeResult<T> = std::result::Result<T, MergeError>;
