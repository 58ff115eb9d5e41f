//! Render subcommand handler

use std::fs::{self, File};
use std::io::{self, BufRead, BufReader, Write};
use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

use castsvg::{render_to_string, validate_svg, Config, SnapshotReader};

fn open_input(input: &Path) -> Result<Box<dyn BufRead>> {
    if input == Path::new("-") {
        return Ok(Box::new(io::stdin().lock()));
    }

    let file = File::open(input).with_context(|| format!("Failed to open file: {:?}", input))?;
    Ok(Box::new(BufReader::new(file)))
}

/// Render a snapshot stream to SVG.
///
/// Reads `input` (or stdin for `-`), renders it with the configured palette,
/// render settings and template, optionally validates the result, and writes
/// it to `output` (or stdout).
#[cfg(not(tarpaulin_include))]
pub fn handle(
    input: &Path,
    output: Option<&Path>,
    config_path: Option<&Path>,
    template: Option<&str>,
    validate: bool,
) -> Result<()> {
    let mut config = Config::load(config_path)?;
    if let Some(template) = template {
        config.template = template.to_string();
    }
    let template = config.template_source()?;

    let records = SnapshotReader::new(open_input(input)?, &config.palette);
    let svg = render_to_string(records, &config.render, &template)
        .with_context(|| format!("Failed to render {:?}", input))?;

    if validate {
        validate_svg(&svg).context("Rendered document failed validation")?;
        info!("rendered document is valid SVG 1.1");
    }

    match output {
        Some(path) if path != Path::new("-") => {
            fs::write(path, &svg)
                .with_context(|| format!("Failed to write file: {:?}", path))?;
            info!(bytes = svg.len(), "wrote {}", path.display());
        }
        _ => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(svg.as_bytes())?;
            stdout.flush()?;
        }
    }

    Ok(())
}
