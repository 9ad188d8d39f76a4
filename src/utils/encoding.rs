//! Strict UTF-8 file reading for the merge pass.
//!
//! Reading never fails the run. Each file resolves to a [`ReadOutcome`] that the
//! renderer turns into either content or an inline error marker.

use std::path::Path;

/// Result of reading one candidate file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadOutcome {
    /// Decoded text with line endings normalized to `\n`
    Content(String),
    /// The bytes are not valid UTF-8 (binary or another encoding)
    DecodeError,
    /// Opening or reading the file failed; carries the OS error message
    IoError(String),
}

/// Read a file completely and decode it as strict UTF-8.
///
/// The handle is opened, drained and closed inside this call.
pub fn read_file_content(path: &Path) -> ReadOutcome {
    let bytes = match std::fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) => return ReadOutcome::IoError(e.to_string()),
    };

    match String::from_utf8(bytes) {
        Ok(text) => ReadOutcome::Content(normalize_newlines(text)),
        Err(_) => ReadOutcome::DecodeError,
    }
}

/// Translate `\r\n` and lone `\r` into `\n`, as text-mode reads do.
pub fn normalize_newlines(text: String) -> String {
    if !text.contains('\r') {
        return text;
    }
    text.replace("\r\n", "\n").replace('\r', "\n")
}
