//! dirmerge: merge the text files of a directory tree into a single file.

use anyhow::Result;

fn main() -> Result<()> {
    dirmerge::cli::run()
}
