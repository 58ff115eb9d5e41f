//! Configuration loaded from a TOML file.
//!
//! ```toml
//! template = "window"
//!
//! [render]
//! font = "DejaVu Sans Mono"
//! font_size = 14
//! cell_width = 8
//! cell_height = 17
//!
//! [palette]
//! foreground = "#e5e5e5"
//! background = "#000000"
//! colors = ["#000000", "#cd0000", ...]
//! ```
//!
//! Every section is optional; missing fields take their defaults.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::color::Palette;
use crate::svg::template::{builtin, DEFAULT_TEMPLATE};

/// Fixed per-invocation render settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Font family; `monospace` is appended as fallback
    pub font: String,
    /// Font size in pixels
    pub font_size: u32,
    /// Character cell width in pixels
    pub cell_width: u32,
    /// Character cell height in pixels
    pub cell_height: u32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            font: "DejaVu Sans Mono".to_string(),
            font_size: 14,
            cell_width: 8,
            cell_height: 17,
        }
    }
}

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Built-in template name or path to a template file
    pub template: String,
    pub render: RenderConfig,
    pub palette: Palette,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            template: DEFAULT_TEMPLATE.to_string(),
            render: RenderConfig::default(),
            palette: Palette::default(),
        }
    }
}

impl Config {
    /// Load from `path`, or return the defaults when no path is given.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;
        Self::from_toml(&content).with_context(|| format!("Invalid config file: {:?}", path))
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content).context("Failed to parse config")?;
        if config.render.cell_width == 0 || config.render.cell_height == 0 {
            anyhow::bail!("cell_width and cell_height must be positive");
        }
        Ok(config)
    }

    /// Template source: a built-in by name, otherwise read from disk.
    pub fn template_source(&self) -> Result<String> {
        if let Some(source) = builtin(&self.template) {
            return Ok(source.to_string());
        }

        fs::read_to_string(&self.template)
            .with_context(|| format!("Unknown template or unreadable file: {}", self.template))
    }
}
