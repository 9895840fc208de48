use thiserror::Error;

/// Errors produced while laying spans over a text.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MarkupError {
    /// A span is out of bounds, overlaps another span, or its token offsets
    /// do not belong to the given text.
    #[error("invalid span: {0}")]
    InvalidSpan(String),
}
