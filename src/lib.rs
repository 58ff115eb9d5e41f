//! castsvg - render recorded terminal sessions as animated SVG images
//!
//! The library turns a stream of timestamped screen-line snapshots into a
//! single self-contained SVG document that replays the session in any
//! standard viewer. Identical text lines are stored once and referenced,
//! and the animation loops forever.
//!
//! ```no_run
//! use castsvg::{render_to_string, Config, SnapshotReader};
//!
//! # fn main() -> anyhow::Result<()> {
//! let config = Config::default();
//! let input = std::io::BufReader::new(std::fs::File::open("session.jsonl")?);
//! let records = SnapshotReader::new(input, &config.palette);
//! let _svg = render_to_string(records, &config.render, &config.template_source()?)?;
//! # Ok(())
//! # }
//! ```

pub mod color;
pub mod config;
pub mod error;
pub mod record;
pub mod render;
pub mod snapshot;
pub mod svg;

pub use color::{ColorDescriptor, NamedColor, Palette};
pub use config::{Config, RenderConfig};
pub use error::{RenderError, Result};
pub use record::{CharacterCell, Header, LineEvent, Record, ScreenLine};
pub use render::{render_animation, render_to_string, render_to_writer};
pub use snapshot::SnapshotReader;
pub use svg::validate::validate_svg;
pub use svg::Element;
