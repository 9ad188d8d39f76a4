//! Name-based exclusion matching

use crate::domain::ExcludeMode;
use crate::error::{MergeError, MergeResult};
use globset::{Glob, GlobSet, GlobSetBuilder};

/// Decides whether a file or directory name is excluded.
#[derive(Debug, Clone)]
pub enum ExcludeFilter {
    /// Excluded when any pattern is a substring of the name
    Substring(Vec<String>),
    /// Excluded when any glob matches the whole name
    Glob(GlobSet),
}

impl ExcludeFilter {
    pub fn new(patterns: &[String], mode: ExcludeMode) -> MergeResult<Self> {
        match mode {
            ExcludeMode::Substring => Ok(ExcludeFilter::Substring(patterns.to_vec())),
            ExcludeMode::Glob => {
                let mut builder = GlobSetBuilder::new();
                for pattern in patterns {
                    let glob = Glob::new(pattern).map_err(|source| {
                        MergeError::InvalidExcludeGlob { pattern: pattern.clone(), source }
                    })?;
                    builder.add(glob);
                }
                let set = builder.build().map_err(|source| MergeError::InvalidExcludeGlob {
                    pattern: patterns.join(", "),
                    source,
                })?;
                Ok(ExcludeFilter::Glob(set))
            }
        }
    }

    pub fn is_excluded(&self, name: &str) -> bool {
        match self {
            ExcludeFilter::Substring(patterns) => patterns.iter().any(|p| name.contains(p.as_str())),
            ExcludeFilter::Glob(set) => set.is_match(name),
        }
    }
}

impl Default for ExcludeFilter {
    fn default() -> Self {
        ExcludeFilter::Substring(Vec::new())
    }
}
