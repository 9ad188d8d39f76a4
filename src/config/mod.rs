//! Configuration loading and merging
//!
//! Handles loading from config files and combining them with CLI arguments
//! with proper precedence (CLI > File > Defaults).

pub mod loader;
pub mod merge;

pub use loader::load_config;
pub use merge::{merge_cli_with_config, CliOverrides};
