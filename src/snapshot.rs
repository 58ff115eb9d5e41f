//! Reader for screen snapshot streams.
//!
//! A terminal emulator replaying a session emits one JSON object per line:
//!
//! ```text
//! {"width": 80, "height": 24}
//! {"row": 0, "time": 0, "duration": 250, "cells": {"0": {"data": "$", "fg": "green"}}}
//! ```
//!
//! The first line is the screen geometry, every following line is one screen
//! line valid for `[time, time + duration)` milliseconds. Cell colors are raw
//! descriptors; they are resolved against a [`Palette`] while reading.

use std::collections::BTreeMap;
use std::io::{BufRead, Lines};

use serde::Deserialize;

use crate::color::Palette;
use crate::error::{RenderError, Result};
use crate::record::{CharacterCell, Header, LineEvent, Record};

#[derive(Debug, Deserialize)]
struct RawHeader {
    width: u32,
    height: u32,
}

fn default_color() -> String {
    "default".to_string()
}

/// A cell as reported by the emulator.
#[derive(Debug, Clone, Deserialize)]
pub struct RawCell {
    #[serde(default)]
    pub data: String,
    #[serde(default = "default_color")]
    pub fg: String,
    #[serde(default = "default_color")]
    pub bg: String,
    #[serde(default)]
    pub bold: bool,
    #[serde(default)]
    pub reverse: bool,
}

impl RawCell {
    pub fn resolve(&self, palette: &Palette) -> Result<CharacterCell> {
        CharacterCell::from_raw(
            self.data.as_str(),
            &self.fg,
            &self.bg,
            self.bold,
            self.reverse,
            palette,
        )
    }
}

#[derive(Debug, Deserialize)]
struct RawLine {
    row: usize,
    time: u64,
    duration: u64,
    #[serde(default)]
    cells: BTreeMap<usize, RawCell>,
}

/// Iterator over the records of a snapshot stream.
///
/// Yields the header first, then one record per line event. Errors carry the
/// offending line number.
pub struct SnapshotReader<'p, R> {
    lines: Lines<R>,
    palette: &'p Palette,
    line_num: usize,
    header_read: bool,
}

impl<'p, R: BufRead> SnapshotReader<'p, R> {
    pub fn new(reader: R, palette: &'p Palette) -> Self {
        Self {
            lines: reader.lines(),
            palette,
            line_num: 0,
            header_read: false,
        }
    }

    fn parse_header(&self, line: &str) -> Result<Record> {
        let raw: RawHeader = serde_json::from_str(line).map_err(|e| {
            RenderError::invalid_record(format!("line {}: invalid header: {}", self.line_num, e))
        })?;

        Ok(Record::Header(Header {
            width: raw.width,
            height: raw.height,
            text_color: self.palette.foreground().to_string(),
            background_color: self.palette.background().to_string(),
        }))
    }

    fn parse_line(&self, line: &str) -> Result<Record> {
        let raw: RawLine = serde_json::from_str(line).map_err(|e| {
            RenderError::invalid_record(format!("line {}: invalid line event: {}", self.line_num, e))
        })?;

        let cells = raw
            .cells
            .iter()
            .map(|(column, cell)| Ok((*column, cell.resolve(self.palette)?)))
            .collect::<Result<BTreeMap<_, _>>>()
            .map_err(|e| match e {
                RenderError::InvalidColor(msg) => {
                    RenderError::InvalidColor(format!("line {}: {}", self.line_num, msg))
                }
                other => other,
            })?;

        let event = LineEvent {
            row: raw.row,
            line: cells,
            time: raw.time,
            duration: raw.duration,
        };
        event.check_text().map_err(|e| match e {
            RenderError::InvalidRecord(msg) => {
                RenderError::InvalidRecord(format!("line {}: {}", self.line_num, msg))
            }
            other => other,
        })?;

        Ok(Record::Line(event))
    }
}

impl<R: BufRead> Iterator for SnapshotReader<'_, R> {
    type Item = Result<Record>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let line = match self.lines.next()? {
                Ok(line) => line,
                Err(e) => return Some(Err(e.into())),
            };
            self.line_num += 1;

            if line.trim().is_empty() {
                continue;
            }

            if self.header_read {
                return Some(self.parse_line(&line));
            }
            self.header_read = true;
            return Some(self.parse_header(&line));
        }
    }
}
