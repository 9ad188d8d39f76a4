//! Candidate discovery over a directory tree

use crate::domain::CandidateFile;
use crate::error::{MergeError, MergeResult};
use crate::scan::ExcludeFilter;
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

/// Counters describing what discovery skipped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanStats {
    pub files_seen: usize,
    pub files_excluded: usize,
    pub dirs_pruned: usize,
    pub entries_unreadable: usize,
    pub output_skipped: bool,
}

/// Walks a source tree and collects the files eligible for merging.
///
/// Directories whose names are excluded are pruned before descent, so nothing
/// beneath them is ever listed. Files come back in discovery order: depth-first,
/// and within each directory its own files (by name) before its subdirectories
/// (by name).
pub struct FileScanner {
    root_path: PathBuf,
    exclude: ExcludeFilter,
    skip_path: Option<PathBuf>,
    stats: ScanStats,
}

impl FileScanner {
    pub fn new(root_path: PathBuf) -> Self {
        Self {
            root_path,
            exclude: ExcludeFilter::default(),
            skip_path: None,
            stats: ScanStats::default(),
        }
    }

    /// Set the name filter applied to files and directories
    pub fn exclude(mut self, filter: ExcludeFilter) -> Self {
        self.exclude = filter;
        self
    }

    /// Never report this absolute path as a candidate (the merge output).
    pub fn skip_path(mut self, path: PathBuf) -> Self {
        self.skip_path = Some(path);
        self
    }

    /// Check the root and return its canonical form.
    fn resolve_root(&self) -> MergeResult<PathBuf> {
        let root = &self.root_path;
        if !root.exists() {
            return Err(MergeError::SourceNotFound(root.clone()));
        }
        if !root.is_dir() {
            return Err(MergeError::NotADirectory(root.clone()));
        }
        let canonical = root
            .canonicalize()
            .map_err(|source| MergeError::SourceUnreadable { path: root.clone(), source })?;
        std::fs::read_dir(&canonical)
            .map_err(|source| MergeError::SourceUnreadable { path: root.clone(), source })?;
        Ok(canonical)
    }

    fn entry_name(entry: &DirEntry) -> String {
        entry.file_name().to_string_lossy().into_owned()
    }

    /// Regular files and symlinks that resolve to regular files.
    fn is_file_like(entry: &DirEntry) -> bool {
        let file_type = entry.file_type();
        file_type.is_file() || (file_type.is_symlink() && entry.path().is_file())
    }

    /// Scan the tree. Fails with [`MergeError::NoFilesFound`] when nothing survives filtering.
    pub fn scan(&mut self) -> MergeResult<Vec<CandidateFile>> {
        self.stats = ScanStats::default();
        let root = self.resolve_root()?;

        let exclude = &self.exclude;
        let mut dirs_pruned = 0usize;
        let walker = WalkDir::new(&root)
            .follow_links(false)
            .sort_by(|a, b| {
                a.file_type()
                    .is_dir()
                    .cmp(&b.file_type().is_dir())
                    .then_with(|| a.file_name().cmp(b.file_name()))
            })
            .into_iter();

        // Pruning happens here, before walkdir reads the directory.
        let walker = walker.filter_entry(|entry| {
            if entry.depth() == 0 || !entry.file_type().is_dir() {
                return true;
            }
            let name = Self::entry_name(entry);
            if exclude.is_excluded(&name) {
                tracing::debug!("Pruning excluded directory {}", entry.path().display());
                dirs_pruned += 1;
                return false;
            }
            true
        });

        let mut files = Vec::new();
        let mut stats = ScanStats::default();

        for entry_result in walker {
            let entry = match entry_result {
                Ok(e) => e,
                Err(e) => {
                    tracing::warn!("Skipping unreadable entry: {}", e);
                    stats.entries_unreadable += 1;
                    continue;
                }
            };

            if !Self::is_file_like(&entry) {
                continue;
            }
            stats.files_seen += 1;

            let name = Self::entry_name(&entry);
            if exclude.is_excluded(&name) {
                tracing::debug!("Excluding file {}", entry.path().display());
                stats.files_excluded += 1;
                continue;
            }

            let path = entry.path();
            if self.skip_path.as_deref() == Some(path) {
                tracing::debug!("Skipping merge output {}", path.display());
                stats.output_skipped = true;
                continue;
            }

            let relative = match path.strip_prefix(&root) {
                Ok(p) => p.to_path_buf(),
                Err(_) => continue,
            };
            files.push(CandidateFile::new(path.to_path_buf(), relative));
        }

        stats.dirs_pruned = dirs_pruned;
        self.stats = stats;

        if files.is_empty() {
            return Err(MergeError::NoFilesFound { directory: self.root_path.clone() });
        }

        tracing::debug!(
            "Discovered {} files ({} excluded, {} directories pruned)",
            files.len(),
            self.stats.files_excluded,
            self.stats.dirs_pruned
        );
        Ok(files)
    }

    /// Get scanning statistics
    pub fn stats(&self) -> &ScanStats {
        &self.stats
    }

    pub fn root(&self) -> &Path {
        &self.root_path
    }
}
