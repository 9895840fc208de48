use canonical::CanonicalError;
use markup::MarkupError;
use matcher::MatchError;
use thiserror::Error;

/// Errors produced while aligning one pair of texts.
///
/// In a batch each slot carries its own `Result`, so one failing pair never
/// aborts its siblings. Cancellation and timeouts of a whole batch are not
/// errors; they are reported as [`crate::Termination`] values.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AlignError {
    /// An input is not valid UTF-8 or exceeds the configured size limit.
    #[error("invalid input: {0}")]
    InvalidInput(String),
    /// Internal consistency check failed. Indicates a defect, not bad input.
    #[error("invalid span: {0}")]
    InvalidSpan(String),
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    /// The pair was stopped by cancellation or a deadline before finishing.
    #[error("alignment interrupted")]
    Interrupted,
    /// The worker computing the pair died without producing a result.
    #[error("alignment worker failed: {0}")]
    Worker(String),
}

impl AlignError {
    pub fn is_defect(&self) -> bool {
        matches!(self, AlignError::InvalidSpan(_))
    }
}

impl From<CanonicalError> for AlignError {
    fn from(value: CanonicalError) -> Self {
        match value {
            CanonicalError::InvalidConfig(msg) => AlignError::InvalidConfig(msg),
        }
    }
}

impl From<MatchError> for AlignError {
    fn from(value: MatchError) -> Self {
        match value {
            MatchError::InvalidConfig(msg) => AlignError::InvalidConfig(msg),
            MatchError::InvalidSpan(msg) => AlignError::InvalidSpan(msg),
            MatchError::Interrupted => AlignError::Interrupted,
        }
    }
}

impl From<MarkupError> for AlignError {
    fn from(value: MarkupError) -> Self {
        match value {
            MarkupError::InvalidSpan(msg) => AlignError::InvalidSpan(msg),
        }
    }
}
