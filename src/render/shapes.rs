//! Background rectangles and text runs for one screen line.

use super::runs::consecutive_runs;
use crate::record::ScreenLine;
use crate::svg::Element;

/// Non-breaking space, keeps whitespace intact when the output is re-indented.
const NBSP: char = '\u{00A0}';

/// Pixel size of a character cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellSize {
    pub width: u32,
    pub height: u32,
}

pub fn rect(column: usize, length: usize, y: u64, cell: CellSize, fill: &str) -> Element {
    Element::new("rect")
        .with_attr("x", (column as u64 * u64::from(cell.width)).to_string())
        .with_attr("y", y.to_string())
        .with_attr("width", (length as u64 * u64::from(cell.width)).to_string())
        .with_attr("height", cell.height.to_string())
        .with_attr("fill", fill)
}

/// Background rectangles for the cells of `line` that do not use `default_bg`.
///
/// Cells painted with the default background need no shape: the frame's
/// background rect already covers them.
pub fn line_backgrounds(line: &ScreenLine, y: u64, cell: CellSize, default_bg: &str) -> Vec<Element> {
    let cells = line
        .iter()
        .filter(|(_, c)| c.background_color != default_bg)
        .map(|(column, c)| (*column, c));

    consecutive_runs(cells, |c| c.background_color.clone())
        .into_iter()
        .map(|run| rect(run.start, run.len(), y, cell, &run.key))
        .collect()
}

/// Text element with forced monospaced layout.
pub fn text_run(column: usize, color: &str, bold: bool, text: &str, cell_width: u32) -> Element {
    let length = text.chars().count() as u64 * u64::from(cell_width);
    let mut el = Element::new("text")
        .with_attr("x", (column as u64 * u64::from(cell_width)).to_string())
        .with_attr("textLength", length.to_string())
        .with_attr("lengthAdjust", "spacingAndGlyphs")
        .with_attr("fill", color);
    if bold {
        el.set_attr("font-weight", "bold");
    }
    el.with_text(text.replace(' ', &NBSP.to_string()))
}

/// Text runs for `line`, one per maximal run of identical `(color, bold)`.
pub fn line_text(line: &ScreenLine, cell_width: u32) -> Vec<Element> {
    let cells = line.iter().map(|(column, c)| (*column, c));

    consecutive_runs(cells, |c| (c.color.clone(), c.bold))
        .into_iter()
        .map(|run| {
            let text: String = run.items.iter().map(|c| c.text.as_str()).collect();
            let (color, bold) = &run.key;
            text_run(run.start, color, *bold, &text, cell_width)
        })
        .collect()
}
