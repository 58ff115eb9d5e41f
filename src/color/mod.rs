//! Character-cell color model.
//!
//! Resolves the color descriptors reported by a terminal emulator (`default`,
//! one of the 16 symbolic names, a numeric index, or a `RRGGBB` hex string)
//! into concrete SVG colors using a [`Palette`].
//!
//! Resolution rules:
//! - `default` maps to the palette's foreground/background
//! - bold symbolic foregrounds are promoted to their bright counterpart
//! - indices the palette cannot serve fall back to `index % 8`
//! - reverse video swaps the resolved pair

mod palette;

use std::fmt;
use std::str::FromStr;

pub use palette::{xterm_256, Palette, MIN_PALETTE_SIZE};

use crate::error::{RenderError, Result};

/// The 16 reserved color names, in palette index order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NamedColor {
    Black,
    Red,
    Green,
    Brown,
    Blue,
    Magenta,
    Cyan,
    White,
    BrightBlack,
    BrightRed,
    BrightGreen,
    BrightBrown,
    BrightBlue,
    BrightMagenta,
    BrightCyan,
    BrightWhite,
}

const NAMED_COLORS: [(NamedColor, &str); 16] = [
    (NamedColor::Black, "black"),
    (NamedColor::Red, "red"),
    (NamedColor::Green, "green"),
    (NamedColor::Brown, "brown"),
    (NamedColor::Blue, "blue"),
    (NamedColor::Magenta, "magenta"),
    (NamedColor::Cyan, "cyan"),
    (NamedColor::White, "white"),
    (NamedColor::BrightBlack, "brightblack"),
    (NamedColor::BrightRed, "brightred"),
    (NamedColor::BrightGreen, "brightgreen"),
    (NamedColor::BrightBrown, "brightbrown"),
    (NamedColor::BrightBlue, "brightblue"),
    (NamedColor::BrightMagenta, "brightmagenta"),
    (NamedColor::BrightCyan, "brightcyan"),
    (NamedColor::BrightWhite, "brightwhite"),
];

impl NamedColor {
    /// Palette index (0..=15).
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<Self> {
        NAMED_COLORS.get(index).map(|(color, _)| *color)
    }

    pub fn name(self) -> &'static str {
        NAMED_COLORS[self.index()].1
    }

    pub fn is_bright(self) -> bool {
        self.index() >= 8
    }

    /// Bright counterpart; bright colors map to themselves.
    pub fn brighten(self) -> Self {
        if self.is_bright() {
            self
        } else {
            NAMED_COLORS[self.index() + 8].0
        }
    }
}

/// A color as reported by the terminal emulator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColorDescriptor {
    Default,
    Named(NamedColor),
    Indexed(u8),
    /// Six hex digits without the leading `#`.
    Hex(String),
}

impl FromStr for ColorDescriptor {
    type Err = RenderError;

    fn from_str(s: &str) -> Result<Self> {
        if s == "default" {
            return Ok(ColorDescriptor::Default);
        }

        if let Some((color, _)) = NAMED_COLORS.iter().find(|(_, name)| *name == s) {
            return Ok(ColorDescriptor::Named(*color));
        }

        if s.len() == 6 {
            return if s.chars().all(|c| c.is_ascii_hexdigit()) {
                Ok(ColorDescriptor::Hex(s.to_string()))
            } else {
                Err(RenderError::invalid_color(format!(
                    "'{}' is not a hexadecimal color",
                    s
                )))
            };
        }

        if !s.is_empty() && s.chars().all(|c| c.is_ascii_digit()) {
            return s.parse::<u8>().map(ColorDescriptor::Indexed).map_err(|_| {
                RenderError::invalid_color(format!("color index '{}' out of range", s))
            });
        }

        Err(RenderError::invalid_color(format!(
            "unrecognized color '{}'",
            s
        )))
    }
}

impl fmt::Display for ColorDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColorDescriptor::Default => write!(f, "default"),
            ColorDescriptor::Named(color) => write!(f, "{}", color.name()),
            ColorDescriptor::Indexed(n) => write!(f, "{}", n),
            ColorDescriptor::Hex(hex) => write!(f, "{}", hex),
        }
    }
}

/// Which side of the cell a color is resolved for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Layer {
    Foreground,
    Background,
}

fn resolve_one(
    descriptor: &ColorDescriptor,
    layer: Layer,
    bold: bool,
    palette: &Palette,
) -> String {
    match descriptor {
        ColorDescriptor::Default => match layer {
            Layer::Foreground => palette.foreground().to_string(),
            Layer::Background => palette.background().to_string(),
        },
        ColorDescriptor::Named(color) => {
            let color = if bold && layer == Layer::Foreground {
                color.brighten()
            } else {
                *color
            };
            lookup_base(color.index(), palette)
        }
        ColorDescriptor::Indexed(n) => match NamedColor::from_index(usize::from(*n)) {
            Some(named) => resolve_one(&ColorDescriptor::Named(named), layer, bold, palette),
            None => palette
                .get(usize::from(*n))
                .map(str::to_string)
                .or_else(|| xterm_256(*n))
                .unwrap_or_else(|| palette.foreground().to_string()),
        },
        ColorDescriptor::Hex(hex) => format!("#{}", hex),
    }
}

/// Index 0..=15 lookup with the `index % 8` fallback for small palettes.
///
/// The fallback is applied for every palette smaller than the index, including
/// 9 to 15 entry palettes where it may pick a different color than intended.
fn lookup_base(index: usize, palette: &Palette) -> String {
    palette
        .get(index)
        .or_else(|| palette.get(index % 8))
        .unwrap_or_else(|| palette.foreground())
        .to_string()
}

/// Resolve a cell's `(text_color, background_color)`.
pub fn resolve_colors(
    fg: &ColorDescriptor,
    bg: &ColorDescriptor,
    bold: bool,
    reverse: bool,
    palette: &Palette,
) -> (String, String) {
    let text_color = resolve_one(fg, Layer::Foreground, bold, palette);
    let background_color = resolve_one(bg, Layer::Background, bold, palette);

    if reverse {
        (background_color, text_color)
    } else {
        (text_color, background_color)
    }
}
