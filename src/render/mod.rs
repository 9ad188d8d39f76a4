//! Output rendering

pub mod merged;

pub use merged::{banner, render_block, write_merged, write_merged_file, BANNER_WIDTH};
