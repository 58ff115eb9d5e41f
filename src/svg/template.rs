//! Base templates and geometry scaling.
//!
//! A template is an SVG document with an outer frame and an inner
//! `<svg id="screen">` frame. Its `<defs>` carries private sizing metadata:
//!
//! ```xml
//! <castsvg:template_settings>
//!   <castsvg:screen_geometry columns="80" rows="24"/>
//! </castsvg:template_settings>
//! ```
//!
//! Both frames are grown (or shrunk) by `cell_size * (actual - template)` and
//! the metadata is stripped so the result validates as plain SVG.

use tracing::debug;

use super::{parse_document, Element};
use crate::error::{RenderError, Result};

pub const SETTINGS_TAG: &str = "castsvg:template_settings";
pub const GEOMETRY_TAG: &str = "castsvg:screen_geometry";
const NAMESPACE_DECLARATION: &str = "xmlns:castsvg";
/// Id of the inner frame that receives the animation.
pub const SCREEN_ID: &str = "screen";

const WINDOW: &str = include_str!("../../data/templates/window.svg");
const PLAIN: &str = include_str!("../../data/templates/plain.svg");

/// Built-in templates as `(name, source)` pairs; the first one is the default.
pub const BUILTIN_TEMPLATES: &[(&str, &str)] = &[("window", WINDOW), ("plain", PLAIN)];

pub const DEFAULT_TEMPLATE: &str = "window";

/// Source of a built-in template.
pub fn builtin(name: &str) -> Option<&'static str> {
    BUILTIN_TEMPLATES
        .iter()
        .find(|(builtin, _)| *builtin == name)
        .map(|(_, source)| *source)
}

/// Screen size the template was authored for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TemplateGeometry {
    pub columns: i64,
    pub rows: i64,
}

/// Size of the screen and of its cells, used to scale a template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenSize {
    pub columns: i64,
    pub rows: i64,
    pub cell_width: i64,
    pub cell_height: i64,
}

fn is_settings(el: &Element) -> bool {
    el.name == SETTINGS_TAG
}

/// `<svg id="screen">`
pub fn is_screen(el: &Element) -> bool {
    el.name == "svg" && el.attr("id") == Some(SCREEN_ID)
}

/// Read the sizing metadata embedded in `<defs>`.
pub fn read_geometry(root: &Element) -> Result<TemplateGeometry> {
    let settings = root
        .elements()
        .filter(|el| el.name == "defs")
        .find_map(|defs| defs.find(&is_settings))
        .ok_or_else(|| {
            RenderError::template(format!("missing \"{}\" element in definitions", SETTINGS_TAG))
        })?;

    let geometry = settings
        .elements()
        .find(|el| el.name == GEOMETRY_TAG)
        .ok_or_else(|| {
            RenderError::template(format!(
                "missing \"{}\" element in \"{}\"",
                GEOMETRY_TAG, SETTINGS_TAG
            ))
        })?;

    let invalid = || {
        RenderError::template(format!(
            "missing or invalid \"columns\" or \"rows\" attribute for element \"{}\": expected positive integers",
            GEOMETRY_TAG
        ))
    };
    let columns: i64 = geometry
        .attr("columns")
        .and_then(|v| v.trim().parse().ok())
        .ok_or_else(invalid)?;
    let rows: i64 = geometry
        .attr("rows")
        .and_then(|v| v.trim().parse().ok())
        .ok_or_else(invalid)?;

    if columns <= 0 || rows <= 0 {
        return Err(invalid());
    }

    Ok(TemplateGeometry { columns, rows })
}

/// Grow `element`'s viewBox and size attributes by the given deltas.
fn scale(element: &mut Element, delta_width: i64, delta_height: i64) -> Result<()> {
    let viewbox = element.attr("viewBox").ok_or_else(|| {
        RenderError::template(format!("missing \"viewBox\" for element \"{}\"", element.name))
    })?;

    let values = viewbox
        .replace(',', " ")
        .split_whitespace()
        .map(str::parse::<i64>)
        .collect::<std::result::Result<Vec<_>, _>>()
        .ok()
        .filter(|values| values.len() == 4)
        .ok_or_else(|| {
            RenderError::template(format!(
                "\"viewBox\" of element \"{}\" must be four integers, got \"{}\"",
                element.name, viewbox
            ))
        })?;

    let (min_x, min_y) = (values[0], values[1]);
    let width = values[2] + delta_width;
    let height = values[3] + delta_height;
    element.set_attr("viewBox", format!("{} {} {} {}", min_x, min_y, width, height));

    for (attribute, delta) in [("width", delta_width), ("height", delta_height)] {
        if let Some(value) = element.attr(attribute) {
            let value: i64 = value.trim().parse().map_err(|_| {
                RenderError::template(format!(
                    "\"{}\" attribute of \"{}\" must be in user units",
                    attribute, element.name
                ))
            })?;
            element.set_attr(attribute, (value + delta).to_string());
        }
    }

    Ok(())
}

/// Load `source` and resize it for a screen of the given size.
pub fn resize_template(source: &str, screen: ScreenSize) -> Result<Element> {
    let mut root = parse_document(source)?;
    let geometry = read_geometry(&root)?;

    let delta_width = screen.cell_width * (screen.columns - geometry.columns);
    let delta_height = screen.cell_height * (screen.rows - geometry.rows);
    debug!(
        template_columns = geometry.columns,
        template_rows = geometry.rows,
        columns = screen.columns,
        rows = screen.rows,
        delta_width,
        delta_height,
        "scaling template"
    );

    scale(&mut root, delta_width, delta_height)?;

    let frame = root.find_mut(&is_screen).ok_or_else(|| {
        RenderError::template(format!("svg element with id \"{}\" not found", SCREEN_ID))
    })?;
    scale(frame, delta_width, delta_height)?;

    // Strip private metadata so the output validates as plain SVG
    root.remove_descendants(&is_settings);
    strip_namespace_declaration(&mut root);

    Ok(root)
}

/// Drop `xmlns:castsvg` from `element` and every element below it.
fn strip_namespace_declaration(element: &mut Element) {
    element.remove_attr(NAMESPACE_DECLARATION);
    for child in element.elements_mut() {
        strip_namespace_declaration(child);
    }
}
