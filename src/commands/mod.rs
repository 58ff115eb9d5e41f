//! Subcommand handlers

pub mod config;
pub mod render;
pub mod templates;
pub mod validate;
