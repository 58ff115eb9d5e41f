//! Render pass: record stream in, animated SVG document out.
//!
//! The pass is single-threaded and forward-only:
//! 1. the header sizes the template and sets the default colors
//! 2. line events are bucketed by contiguous `(time, duration)` keys
//! 3. each bucket becomes one timed group, its text lines interned as definitions
//! 4. once the stream is exhausted the last group is tagged as the loop anchor
//!    and the template's generated style receives the global CSS variables
//!
//! Memory grows with the output document and the definitions table, never with
//! more than one bucket of pending records.

pub mod anim;
pub mod defs;
pub mod runs;
pub mod shapes;

use std::io::Write;

use tracing::{debug, info};

use crate::config::RenderConfig;
use crate::error::{RenderError, Result};
use crate::record::{Header, LineEvent, Record};
use crate::svg::template::{is_screen, resize_template, ScreenSize, SCREEN_ID};
use crate::svg::{Element, Node, XLINK_NS};

use anim::{animated_group, tag_loop_anchor};
use defs::DefinitionStore;
use shapes::CellSize;

/// Serialize a CSS rule set as `selector {prop: value; ...}` lines.
fn serialize_css(rules: &[(&str, Vec<(&str, String)>)]) -> String {
    rules
        .iter()
        .map(|(selector, declarations)| {
            let body = declarations
                .iter()
                .map(|(prop, value)| format!("{}: {}", prop, value))
                .collect::<Vec<_>>()
                .join("; ");
            format!("{} {{{}}}", selector, body)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Font and background style sheet for the screen frame.
pub fn style_tag(font: &str, font_size: u32, background_color: &str) -> Element {
    let css = serialize_css(&[
        (
            "*",
            vec![
                ("font-family", format!("\"{}\", monospace", font)),
                ("font-style", "normal".to_string()),
                ("font-size", format!("{}px", font_size)),
            ],
        ),
        (
            "text",
            vec![("dominant-baseline", "text-before-edge".to_string())],
        ),
        (
            ".background",
            vec![("fill", background_color.to_string())],
        ),
    ]);

    Element::new("style")
        .with_attr("type", "text/css")
        .with_child(Node::CData(css))
}

fn background_rect() -> Element {
    Element::new("rect")
        .with_attr("class", "background")
        .with_attr("height", "100%")
        .with_attr("width", "100%")
        .with_attr("x", "0")
        .with_attr("y", "0")
}

/// Fill the template's `<style class="generated">` with the global variables.
pub fn add_css_variables(
    root: &mut Element,
    foreground_color: &str,
    background_color: &str,
    animation_duration: u64,
) -> Result<()> {
    let style = root
        .find_mut(&|el| el.name == "style" && el.attr("class") == Some("generated"))
        .ok_or_else(|| RenderError::template("missing <style class=\"generated\"> element"))?;

    let css = serialize_css(&[(
        ":root",
        vec![
            ("--foreground-color", foreground_color.to_string()),
            ("--background-color", background_color.to_string()),
            ("--animation-duration", format!("{}ms", animation_duration)),
        ],
    )]);
    style.children = vec![Node::CData(css)];
    Ok(())
}

/// Accumulates timed groups and definitions for one render pass.
struct Composer {
    cell: CellSize,
    default_bg: String,
    definitions: DefinitionStore,
    defs_tag: Element,
    groups: Vec<Element>,
    duration: u64,
}

impl Composer {
    fn new(cell: CellSize, default_bg: &str, defs_tag: Element) -> Self {
        Self {
            cell,
            default_bg: default_bg.to_string(),
            definitions: DefinitionStore::new(),
            defs_tag,
            groups: Vec::new(),
            duration: 0,
        }
    }

    fn compose(&mut self, bucket: &[LineEvent]) {
        let Some((time, duration)) = bucket.first().map(LineEvent::timing) else {
            return;
        };

        let group = animated_group(
            bucket,
            time,
            duration,
            self.cell,
            &self.default_bg,
            &mut self.definitions,
        );

        // Merge before the next bucket so it can reuse these ids
        let created = self.definitions.commit();
        debug!(
            time,
            duration,
            lines = bucket.len(),
            new_definitions = created.len(),
            "composed bucket"
        );
        for definition in created {
            self.defs_tag.push(definition);
        }

        self.groups.push(group);
        self.duration = time.saturating_add(duration);
    }

    /// Tag the loop anchor and return the screen frame's children.
    fn finish(mut self) -> Result<(Vec<Node>, u64)> {
        if let Some(last) = self.groups.last_mut() {
            tag_loop_anchor(last)?;
        }

        info!(
            groups = self.groups.len(),
            definitions = self.definitions.len(),
            duration_ms = self.duration,
            "animation composed"
        );

        let mut children = Vec::with_capacity(self.groups.len() + 2);
        children.push(Node::Element(self.defs_tag));
        children.push(Node::Element(background_rect()));
        children.extend(self.groups.into_iter().map(Node::Element));
        Ok((children, self.duration))
    }
}

fn read_header<I>(records: &mut I) -> Result<Header>
where
    I: Iterator<Item = Result<Record>>,
{
    match records.next() {
        Some(Ok(Record::Header(header))) => Ok(header),
        Some(Ok(Record::Line(_))) => Err(RenderError::invalid_record(
            "the first record must be a header",
        )),
        Some(Err(e)) => Err(e),
        None => Err(RenderError::invalid_record("empty record stream")),
    }
}

/// Render a record stream into an SVG document tree.
///
/// The stream must start with a [`Header`]; line events with equal
/// `(time, duration)` must be contiguous. Any error aborts the render.
pub fn render_animation<I>(records: I, config: &RenderConfig, template: &str) -> Result<Element>
where
    I: IntoIterator<Item = Result<Record>>,
{
    let mut records = records.into_iter();
    let header = read_header(&mut records)?;
    debug!(
        width = header.width,
        height = header.height,
        "read header"
    );

    let mut root = resize_template(
        template,
        ScreenSize {
            columns: i64::from(header.width),
            rows: i64::from(header.height),
            cell_width: i64::from(config.cell_width),
            cell_height: i64::from(config.cell_height),
        },
    )?;
    if root.attr("xmlns:xlink").is_none() {
        root.set_attr("xmlns:xlink", XLINK_NS);
    }

    let cell = CellSize {
        width: config.cell_width,
        height: config.cell_height,
    };
    let defs_tag = Element::new("defs").with_child(style_tag(
        &config.font,
        config.font_size,
        &header.background_color,
    ));
    let mut composer = Composer::new(cell, &header.background_color, defs_tag);

    let mut bucket: Vec<LineEvent> = Vec::new();
    for record in records {
        let event = match record? {
            Record::Line(event) => {
                event.check_text()?;
                event
            }
            Record::Header(_) => {
                return Err(RenderError::invalid_record(
                    "header must appear exactly once, at the start of the stream",
                ))
            }
        };

        if bucket
            .first()
            .is_some_and(|first| first.timing() != event.timing())
        {
            composer.compose(&bucket);
            bucket.clear();
        }
        bucket.push(event);
    }
    composer.compose(&bucket);

    let (children, duration) = composer.finish()?;
    let screen = root.find_mut(&is_screen).ok_or_else(|| {
        RenderError::template(format!("svg element with id \"{}\" not found", SCREEN_ID))
    })?;
    screen.children = children;

    add_css_variables(
        &mut root,
        &header.text_color,
        &header.background_color,
        duration,
    )?;

    Ok(root)
}

/// Render a record stream and write the document to `writer`.
pub fn render_to_writer<I, W>(
    records: I,
    config: &RenderConfig,
    template: &str,
    writer: &mut W,
) -> Result<()>
where
    I: IntoIterator<Item = Result<Record>>,
    W: Write,
{
    let root = render_animation(records, config, template)?;
    root.write_document(writer)
}

/// Render a record stream into a serialized document.
pub fn render_to_string<I>(records: I, config: &RenderConfig, template: &str) -> Result<String>
where
    I: IntoIterator<Item = Result<Record>>,
{
    Ok(render_animation(records, config, template)?.to_document_string())
}
