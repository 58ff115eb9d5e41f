//! Render pipeline errors.

/// Errors that abort a render invocation.
///
/// None of these are recoverable mid-stream: definition ids and the loop
/// anchor depend on the whole record stream being processed in order.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("Invalid color: {0}")]
    InvalidColor(String),

    #[error("Template error: {0}")]
    Template(String),

    #[error("Invalid SVG document: {0}")]
    Validation(String),

    #[error("Invalid record: {0}")]
    InvalidRecord(String),

    #[error("Animation error: {0}")]
    Animation(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl RenderError {
    pub fn invalid_color(msg: impl Into<String>) -> Self {
        Self::InvalidColor(msg.into())
    }

    pub fn template(msg: impl Into<String>) -> Self {
        Self::Template(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn invalid_record(msg: impl Into<String>) -> Self {
        Self::InvalidRecord(msg.into())
    }

    pub fn animation(msg: impl Into<String>) -> Self {
        Self::Animation(msg.into())
    }
}

pub type Result<T> = std::result::Result<T, RenderError>;
