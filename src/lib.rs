//! Lexical overlap alignment between pairs of texts.
//!
//! Given a source text and a derived text (a document and its summary, a
//! hypothesis and a reference) this crate finds the runs of tokens the two
//! share verbatim and produces a colour-coded, cross-referenced markup for
//! both sides. The stages live in workspace crates and are re-exported
//! here:
//!
//! - [`canonical`]: tokenization with byte offsets and comparison keys.
//! - [`matcher`]: greedy longest-run matching and span labeling.
//! - [`markup`]: lossless plain/span segments and overlap statistics.
//!
//! This crate adds the [`Aligner`] entry point, parallel and streamed batches
//! with cancellation and timeouts, many-way comparison of a set of texts, a
//! cross-result [`HighlightIndex`], YAML configuration and a metrics hook.
//!
//! ```rust
//! use overlap::{align, Segment};
//!
//! let result = align("The cat sat on the mat.", "The cat sat on the rug.").unwrap();
//! assert_eq!(result.pairs.len(), 1);
//! assert_eq!(result.pairs[0].length, 5);
//! assert!(matches!(&result.markup_b[1], Segment::Plain { text } if text == " rug."));
//! ```

mod aligner;
mod among;
mod batch;
pub mod config;
mod error;
mod highlight;
mod metrics;
mod options;
mod result;

pub use canonical::{
    collapse_whitespace, color_seed, seed_hue, tokenize, tokenize_with,
    CanonicalError, Token, TokenizeConfig, TokenizedText,
};
pub use markup::{build, build_plain, concat, paragraphs, MarkupError, OverlapStats, Segment};
pub use matcher::{
    label, match_tokens, ColorSeedFn, Interrupt, LabelConfig, MatchError, RawMatch, Side, Span,
    SpanPair, StopwordPredicate,
};

pub use crate::aligner::Aligner;
pub use crate::among::{Comparison, ComparisonSet};
pub use crate::batch::{
    AlignmentStream, BatchControl, BatchEvent, BatchOutcome, BatchPair, Termination, TextInput,
};
pub use crate::config::{ConfigLoadError, OverlapConfig};
pub use crate::error::AlignError;
pub use crate::highlight::{HighlightIndex, SpanRef};
pub use crate::metrics::AlignMetrics;
pub use crate::options::AlignOptions;
pub use crate::result::AlignmentResult;
pub use tokio_util::sync::CancellationToken;

/// Align one pair with default options.
pub fn align(a: &str, b: &str) -> Result<AlignmentResult, AlignError> {
    Aligner::default().align(a, b)
}

/// Align one pair with explicit options.
pub fn align_with(
    a: &str,
    b: &str,
    options: &AlignOptions,
) -> Result<AlignmentResult, AlignError> {
    Aligner::new(options.clone())?.align(a, b)
}
