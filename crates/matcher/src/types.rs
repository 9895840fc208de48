use std::ops::Range;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Which of the two aligned texts a span belongs to.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    A,
    B,
}

/// A contiguous, half-open run of token indices on one side.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Span {
    /// Id of the owning [`SpanPair`].
    pub id: u32,
    pub side: Side,
    /// First token index (inclusive).
    pub start: usize,
    /// Last token index (exclusive).
    pub end: usize,
}

impl Span {
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }
}

/// A matched span in text A linked to its equal-length counterpart in text B.
///
/// `id` is local to one alignment; `color_seed` depends only on the matched
/// normalized text and is comparable across alignments.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct SpanPair {
    pub id: u32,
    pub span_a: Span,
    pub span_b: Span,
    /// Number of matched tokens (same on both sides).
    pub length: usize,
    pub color_seed: String,
}

impl SpanPair {
    /// The span belonging to `side`.
    pub fn span(&self, side: Side) -> &Span {
        match side {
            Side::A => &self.span_a,
            Side::B => &self.span_b,
        }
    }
}

/// A matcher result before labeling: positions and length, no id or seed.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct RawMatch {
    pub a_start: usize,
    pub b_start: usize,
    pub length: usize,
}

impl RawMatch {
    pub fn a_range(&self) -> Range<usize> {
        self.a_start..self.a_start + self.length
    }

    pub fn b_range(&self) -> Range<usize> {
        self.b_start..self.b_start + self.length
    }
}

/// Errors produced by the matching and labeling layer.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MatchError {
    /// Invalid labeling configuration.
    #[error("invalid match config: {0}")]
    InvalidConfig(String),
    /// Internal consistency failure: spans out of bounds, overlapping, or
    /// pairing unequal text. Always a defect, never caused by input.
    #[error("invalid span: {0}")]
    InvalidSpan(String),
    /// The caller asked the computation to stop.
    #[error("matching interrupted")]
    Interrupted,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn side_serializes_lowercase() {
        assert_eq!(serde_json::to_value(Side::A).unwrap(), "a");
        assert_eq!(serde_json::from_value::<Side>("b".into()).unwrap(), Side::B);
    }

    #[test]
    fn raw_match_ranges() {
        let m = RawMatch {
            a_start: 2,
            b_start: 5,
            length: 3,
        };
        assert_eq!(m.a_range(), 2..5);
        assert_eq!(m.b_range(), 5..8);
    }

    #[test]
    fn span_pair_serializes_with_lowercase_sides() {
        let pair = SpanPair {
            id: 0,
            span_a: Span {
                id: 0,
                side: Side::A,
                start: 0,
                end: 2,
            },
            span_b: Span {
                id: 0,
                side: Side::B,
                start: 1,
                end: 3,
            },
            length: 2,
            color_seed: "00ff".into(),
        };
        let json = serde_json::to_value(&pair).expect("serialize");
        assert_eq!(json["span_a"]["side"], "a");
        assert_eq!(json["span_b"]["side"], "b");
        let back: SpanPair = serde_json::from_value(json).expect("deserialize");
        assert_eq!(back, pair);
    }

    #[test]
    fn error_messages() {
        assert!(MatchError::InvalidSpan("overlap".into())
            .to_string()
            .contains("invalid span"));
        assert_eq!(MatchError::Interrupted.to_string(), "matching interrupted");
    }
}
