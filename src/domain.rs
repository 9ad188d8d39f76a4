//! Core data types shared by discovery, ordering and rendering.

use serde::{Deserialize, Deserializer};
use std::path::{Path, PathBuf};

/// Ordering strategy for the merged output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
#[value(rename_all = "snake_case")]
pub enum SortKey {
    /// Case-insensitive relative path
    #[default]
    Name,
    /// Inode change time on Unix, birth time elsewhere
    CreationTime,
    /// Last modification time
    ModificationTime,
    /// File size in bytes
    Size,
}

impl SortKey {
    /// Resolve a key by name. Unrecognized names fall back to [`SortKey::Name`].
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "creation_time" => SortKey::CreationTime,
            "modification_time" => SortKey::ModificationTime,
            "size" => SortKey::Size,
            "name" => SortKey::Name,
            other => {
                tracing::debug!("Unknown sort key '{}', falling back to name", other);
                SortKey::Name
            }
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::Name => "name",
            SortKey::CreationTime => "creation_time",
            SortKey::ModificationTime => "modification_time",
            SortKey::Size => "size",
        }
    }
}

impl std::fmt::Display for SortKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How exclusion patterns are matched against entry names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExcludeMode {
    /// Pattern must occur somewhere in the name
    #[default]
    Substring,
    /// Pattern is a shell glob matched against the whole name
    Glob,
}

/// A fully-resolved merge invocation. Immutable for the duration of one run.
#[derive(Debug, Clone)]
pub struct MergeRequest {
    pub source_directory: PathBuf,
    pub output_path: PathBuf,
    pub sort_key: SortKey,
    pub reverse: bool,
    pub exclude_patterns: Vec<String>,
    pub exclude_mode: ExcludeMode,
}

impl MergeRequest {
    pub fn new(source_directory: impl Into<PathBuf>, output_path: impl Into<PathBuf>) -> Self {
        Self {
            source_directory: source_directory.into(),
            output_path: output_path.into(),
            sort_key: SortKey::default(),
            reverse: false,
            exclude_patterns: Vec::new(),
            exclude_mode: ExcludeMode::default(),
        }
    }

    pub fn sort_key(mut self, key: SortKey) -> Self {
        self.sort_key = key;
        self
    }

    pub fn reverse(mut self, reverse: bool) -> Self {
        self.reverse = reverse;
        self
    }

    pub fn exclude_patterns(mut self, patterns: Vec<String>) -> Self {
        self.exclude_patterns = patterns;
        self
    }

    pub fn exclude_mode(mut self, mode: ExcludeMode) -> Self {
        self.exclude_mode = mode;
        self
    }
}

/// A file that survived exclusion filtering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateFile {
    pub absolute_path: PathBuf,
    pub relative_path: PathBuf,
}

impl CandidateFile {
    pub fn new(absolute_path: PathBuf, relative_path: PathBuf) -> Self {
        Self { absolute_path, relative_path }
    }

    /// Relative path as written in banners and error markers.
    pub fn display_path(&self) -> String {
        self.relative_path.to_string_lossy().into_owned()
    }

    pub fn path(&self) -> &Path {
        &self.absolute_path
    }
}

/// Counters collected over one merge run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergeStats {
    pub files_discovered: usize,
    pub files_written: usize,
    pub files_failed: usize,
    pub bytes_written: u64,
}

/// Settings read from a `dirmerge.toml` / `.dirmerge.yml` file.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Free-form key name; resolved leniently through [`SortKey::from_name`]
    pub sort: Option<String>,
    pub reverse: bool,
    #[serde(deserialize_with = "string_or_list")]
    pub exclude: Vec<String>,
    pub glob: bool,
}

impl Config {
    pub fn sort_key(&self) -> SortKey {
        self.sort.as_deref().map(SortKey::from_name).unwrap_or_default()
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum StringOrList {
    One(String),
    Many(Vec<String>),
}

/// Accept either `"a, b"` or `["a", "b"]`, trimming entries and dropping empties.
fn string_or_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = match StringOrList::deserialize(deserializer)? {
        StringOrList::One(s) => s.split(',').map(str::to_string).collect::<Vec<_>>(),
        StringOrList::Many(v) => v,
    };
    Ok(raw.iter().map(|s| s.trim()).filter(|s| !s.is_empty()).map(str::to_string).collect())
}
