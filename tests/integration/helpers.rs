//! Shared fixtures and helpers for integration tests

use std::fs;
use std::path::{Path, PathBuf};

use castsvg::svg::template::{builtin, is_screen};
use castsvg::{render_animation, CharacterCell, Element, Header, LineEvent, Record, RenderConfig};
use tempfile::TempDir;

pub fn fixtures_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
}

pub fn fixture(name: &str) -> PathBuf {
    fixtures_dir().join(name)
}

/// Copy a fixture into a fresh temp directory; keep the `TempDir` alive while using the path.
pub fn temp_fixture(name: &str) -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let path = dir.path().join(name);
    fs::copy(fixture(name), &path).expect("Failed to copy fixture");
    (dir, path)
}

pub const FG: &str = "#e5e5e5";
pub const BG: &str = "#000000";

pub fn header(width: u32, height: u32) -> Record {
    Record::Header(Header {
        width,
        height,
        text_color: FG.to_string(),
        background_color: BG.to_string(),
    })
}

/// Line event with one cell per character, all sharing the given colors.
pub fn line(row: usize, text: &str, fg: &str, bg: &str, time: u64, duration: u64) -> Record {
    Record::Line(LineEvent {
        row,
        line: text
            .chars()
            .enumerate()
            .map(|(col, c)| (col, CharacterCell::new(c.to_string(), fg, bg, false)))
            .collect(),
        time,
        duration,
    })
}

pub fn render(records: Vec<Record>, template: &str) -> Element {
    render_animation(
        records.into_iter().map(Ok),
        &RenderConfig::default(),
        builtin(template).expect("unknown template"),
    )
    .expect("render failed")
}

pub fn screen(root: &Element) -> &Element {
    root.find(&is_screen).expect("screen frame missing")
}

/// Elements named `name` anywhere below `root`, in document order.
pub fn descendants<'a>(root: &'a Element, name: &str) -> Vec<&'a Element> {
    let mut found = Vec::new();
    collect(root, name, &mut found);
    found
}

fn collect<'a>(el: &'a Element, name: &str, found: &mut Vec<&'a Element>) {
    for child in el.elements() {
        if child.name == name {
            found.push(child);
        }
        collect(child, name, found);
    }
}

/// Animated groups of the screen frame.
pub fn groups(root: &Element) -> Vec<&Element> {
    screen(root)
        .elements()
        .filter(|el| el.name == "g")
        .collect()
}
