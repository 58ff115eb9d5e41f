//! Validate subcommand handler

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use castsvg::validate_svg;

/// Check an SVG file against the bundled SVG 1.1 grammar.
#[cfg(not(tarpaulin_include))]
pub fn handle(file: &Path) -> Result<()> {
    let content =
        fs::read_to_string(file).with_context(|| format!("Failed to read file: {:?}", file))?;
    validate_svg(&content).with_context(|| format!("{} is not a valid SVG 1.1 document", file.display()))?;
    println!("{} is valid", file.display());
    Ok(())
}
