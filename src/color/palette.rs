//! Terminal color palette.

use serde::{Deserialize, Serialize};

use crate::error::{RenderError, Result};

/// Minimum number of indexed colors a palette must provide.
pub const MIN_PALETTE_SIZE: usize = 8;

/// Concrete colors for the `foreground`/`background` keys and indices `0..N`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawPalette", into = "RawPalette")]
pub struct Palette {
    foreground: String,
    background: String,
    colors: Vec<String>,
}

#[derive(Serialize, Deserialize)]
struct RawPalette {
    foreground: String,
    background: String,
    colors: Vec<String>,
}

impl TryFrom<RawPalette> for Palette {
    type Error = RenderError;

    fn try_from(raw: RawPalette) -> Result<Self> {
        Palette::new(raw.foreground, raw.background, raw.colors)
    }
}

impl From<Palette> for RawPalette {
    fn from(palette: Palette) -> Self {
        RawPalette {
            foreground: palette.foreground,
            background: palette.background,
            colors: palette.colors,
        }
    }
}

impl Palette {
    /// Build a palette, rejecting those with fewer than the 8 base colors.
    pub fn new(
        foreground: impl Into<String>,
        background: impl Into<String>,
        colors: Vec<String>,
    ) -> Result<Self> {
        if colors.len() < MIN_PALETTE_SIZE {
            return Err(RenderError::invalid_color(format!(
                "palette must define at least {} colors, got {}",
                MIN_PALETTE_SIZE,
                colors.len()
            )));
        }

        Ok(Self {
            foreground: foreground.into(),
            background: background.into(),
            colors,
        })
    }

    pub fn foreground(&self) -> &str {
        &self.foreground
    }

    pub fn background(&self) -> &str {
        &self.background
    }

    /// Color registered under `index`, if the palette is large enough.
    pub fn get(&self, index: usize) -> Option<&str> {
        self.colors.get(index).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }
}

impl Default for Palette {
    /// xterm's stock 16-color palette on a dark background.
    fn default() -> Self {
        let colors = [
            "#000000", "#cd0000", "#00cd00", "#cdcd00", "#0000ee", "#cd00cd", "#00cdcd",
            "#e5e5e5", "#7f7f7f", "#ff0000", "#00ff00", "#ffff00", "#5c5cff", "#ff00ff",
            "#00ffff", "#ffffff",
        ];

        Self {
            foreground: "#e5e5e5".to_string(),
            background: "#000000".to_string(),
            colors: colors.iter().map(|c| c.to_string()).collect(),
        }
    }
}

/// Standard xterm value for indices `16..=255` (6x6x6 cube then grayscale ramp).
pub fn xterm_256(index: u8) -> Option<String> {
    const LEVELS: [u8; 6] = [0x00, 0x5f, 0x87, 0xaf, 0xd7, 0xff];

    match index {
        0..=15 => None,
        16..=231 => {
            let i = index - 16;
            let r = LEVELS[usize::from(i / 36)];
            let g = LEVELS[usize::from((i / 6) % 6)];
            let b = LEVELS[usize::from(i % 6)];
            Some(format!("#{:02x}{:02x}{:02x}", r, g, b))
        }
        232..=255 => {
            let level = 8 + (index - 232) * 10;
            Some(format!("#{:02x}{:02x}{:02x}", level, level, level))
        }
    }
}
