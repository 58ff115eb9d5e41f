//! Records consumed by the render pass.
//!
//! A stream starts with exactly one [`Header`] followed by [`LineEvent`]s whose
//! `(time, duration)` keys are contiguous when equal.

use std::collections::BTreeMap;

use crate::color::{resolve_colors, ColorDescriptor, Palette};
use crate::error::{RenderError, Result};
use crate::svg::is_xml_char;

/// A single character position with resolved colors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharacterCell {
    /// Text content of the cell
    pub text: String,
    /// Resolved text color
    pub color: String,
    /// Resolved background color
    pub background_color: String,
    /// Bold flag
    pub bold: bool,
}

impl CharacterCell {
    pub fn new(
        text: impl Into<String>,
        color: impl Into<String>,
        background_color: impl Into<String>,
        bold: bool,
    ) -> Self {
        Self {
            text: text.into(),
            color: color.into(),
            background_color: background_color.into(),
            bold,
        }
    }

    /// Build a cell from the raw attributes reported by a terminal emulator.
    pub fn from_descriptors(
        text: impl Into<String>,
        fg: &ColorDescriptor,
        bg: &ColorDescriptor,
        bold: bool,
        reverse: bool,
        palette: &Palette,
    ) -> Self {
        let (color, background_color) = resolve_colors(fg, bg, bold, reverse, palette);
        Self {
            text: text.into(),
            color,
            background_color,
            bold,
        }
    }

    /// Like [`CharacterCell::from_descriptors`], parsing the descriptors first.
    pub fn from_raw(
        text: impl Into<String>,
        fg: &str,
        bg: &str,
        bold: bool,
        reverse: bool,
        palette: &Palette,
    ) -> Result<Self> {
        let fg: ColorDescriptor = fg.parse()?;
        let bg: ColorDescriptor = bg.parse()?;
        Ok(Self::from_descriptors(text, &fg, &bg, bold, reverse, palette))
    }
}

/// Mapping between column numbers and cells of one screen line.
pub type ScreenLine = BTreeMap<usize, CharacterCell>;

/// Frame geometry and default colors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    /// Screen width in columns
    pub width: u32,
    /// Screen height in rows
    pub height: u32,
    pub text_color: String,
    pub background_color: String,
}

/// Content of one screen line, displayed during `[time, time + duration)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineEvent {
    pub row: usize,
    pub line: ScreenLine,
    /// Display start (milliseconds)
    pub time: u64,
    /// Display duration (milliseconds)
    pub duration: u64,
}

impl LineEvent {
    /// Timing key used to bucket consecutive events.
    pub fn timing(&self) -> (u64, u64) {
        (self.time, self.duration)
    }

    /// Reject cell text that cannot be written to an XML document.
    pub fn check_text(&self) -> Result<()> {
        for (column, cell) in &self.line {
            if let Some(c) = cell.text.chars().find(|c| !is_xml_char(*c)) {
                return Err(RenderError::invalid_record(format!(
                    "row {}, column {}: character U+{:04X} is not allowed in XML",
                    self.row, column, c as u32
                )));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Record {
    Header(Header),
    Line(LineEvent),
}

impl From<Header> for Record {
    fn from(header: Header) -> Self {
        Record::Header(header)
    }
}

impl From<LineEvent> for Record {
    fn from(event: LineEvent) -> Self {
        Record::Line(event)
    }
}
