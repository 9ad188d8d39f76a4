//! File discovery with name-based exclusion

pub mod filter;
pub mod scanner;

pub use filter::ExcludeFilter;
pub use scanner::{FileScanner, ScanStats};
