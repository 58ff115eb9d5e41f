//! Timed visibility groups and loop wiring.
//!
//! Every bucket of line events sharing `(time, duration)` becomes one hidden
//! `<g>` holding its background rects and `<use>` references, plus a single
//! `<animate>` that displays it for `duration` ms. Each directive also begins
//! relative to the end of the last directive in the document, which makes the
//! whole animation loop; that last directive is tagged with
//! [`LOOP_ANCHOR_ID`] once the stream is exhausted.

use super::defs::DefinitionStore;
use super::shapes::{line_backgrounds, line_text, CellSize};
use crate::error::{RenderError, Result};
use crate::record::LineEvent;
use crate::svg::Element;

/// Id of the final animation directive.
pub const LOOP_ANCHOR_ID: &str = "anim_last";

/// `begin` attribute of a directive starting at `time` ms.
pub fn begin_times(time: u64) -> String {
    if time == 0 {
        format!("0ms; {}.end", LOOP_ANCHOR_ID)
    } else {
        format!("{t}ms; {id}.end+{t}ms", t = time, id = LOOP_ANCHOR_ID)
    }
}

/// Visibility toggle for a group shown during `[time, time + duration)`.
pub fn toggle(time: u64, duration: u64) -> Element {
    Element::new("animate")
        .with_attr("attributeName", "display")
        .with_attr("from", "inline")
        .with_attr("to", "inline")
        .with_attr("begin", begin_times(time))
        .with_attr("dur", format!("{}ms", duration))
        .with_attr("fill", "remove")
}

/// Build the animated group for one bucket, interning its text fragments.
pub fn animated_group(
    events: &[LineEvent],
    time: u64,
    duration: u64,
    cell: CellSize,
    default_bg: &str,
    defs: &mut DefinitionStore,
) -> Element {
    let mut group = Element::new("g").with_attr("display", "none");

    for event in events {
        let y = event.row as u64 * u64::from(cell.height);

        for rect in line_backgrounds(&event.line, y, cell, default_bg) {
            group.push(rect);
        }

        let mut text_group = Element::new("g");
        for text in line_text(&event.line, cell.width) {
            text_group.push(text);
        }
        let id = defs.intern(text_group);

        group.push(
            Element::new("use")
                .with_attr("xlink:href", format!("#{}", id))
                .with_attr("y", y.to_string()),
        );
    }

    group.push(toggle(time, duration));
    group
}

/// Tag the directive of the last group as the loop anchor.
pub fn tag_loop_anchor(group: &mut Element) -> Result<()> {
    let group_name = group.name.clone();
    let mut directives = group.elements_mut().filter(|el| el.name == "animate");
    match (directives.next(), directives.next()) {
        (Some(directive), None) => {
            directive.set_attr("id", LOOP_ANCHOR_ID);
            Ok(())
        }
        (None, _) => Err(RenderError::animation(format!(
            "<{}> has no animation directive to tag as loop anchor",
            group_name
        ))),
        (Some(_), Some(_)) => Err(RenderError::animation(format!(
            "<{}> holds more than one animation directive",
            group_name
        ))),
    }
}
