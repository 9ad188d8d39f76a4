//! Path resolution

use std::path::{Path, PathBuf};

/// Absolute form of `path` suitable for identity comparison.
///
/// Existing paths are canonicalized. For a path that does not exist yet, the
/// parent is canonicalized and the file name re-attached; if that fails too the
/// path is made absolute lexically against the current directory.
pub fn absolute_path(path: &Path) -> std::io::Result<PathBuf> {
    if let Ok(canonical) = path.canonicalize() {
        return Ok(canonical);
    }

    if let (Some(parent), Some(name)) = (path.parent(), path.file_name()) {
        let parent = if parent.as_os_str().is_empty() { Path::new(".") } else { parent };
        if let Ok(canonical_parent) = parent.canonicalize() {
            return Ok(canonical_parent.join(name));
        }
    }

    std::path::absolute(path)
}
