//! Shared helpers for reading files and handling paths

pub mod encoding;
pub mod paths;

pub use encoding::{normalize_newlines, read_file_content, ReadOutcome};
pub use paths::absolute_path;
