//! dirmerge: concatenate the files of a directory tree into one annotated file
//!
//! The pipeline is discovery ([`scan`]), ordering ([`rank`]) and serialization
//! ([`render`]), driven by [`merger::Merger`] from a [`MergeRequest`].

pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod merger;
pub mod rank;
pub mod render;
pub mod scan;
pub mod utils;

pub use domain::{CandidateFile, ExcludeMode, MergeRequest, MergeStats, SortKey};
pub use error::MergeError;
pub use merger::{merge, Merger};
