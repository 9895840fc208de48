//! Word-level overlap statistics over a markup.

use serde::{Deserialize, Serialize};
use unicode_segmentation::UnicodeSegmentation;

use crate::segment::Segment;

/// How much of a text is covered by matched spans, counted in words.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct OverlapStats {
    /// Words in the whole text.
    pub num_words: usize,
    /// Words inside span segments.
    pub matched_words: usize,
    /// `matched_words / num_words`, or 0.0 for a text without words.
    pub percent_overlap: f64,
}

impl OverlapStats {
    pub fn from_segments(segments: &[Segment]) -> Self {
        let mut num_words = 0usize;
        let mut matched_words = 0usize;
        for segment in segments {
            let words = segment.text().unicode_words().count();
            num_words += words;
            if segment.is_span() {
                matched_words += words;
            }
        }

        let percent_overlap = if num_words == 0 {
            0.0
        } else {
            matched_words as f64 / num_words as f64
        };

        Self {
            num_words,
            matched_words,
            percent_overlap,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_words_not_punctuation() {
        let segments = vec![
            Segment::Span {
                text: "The cat sat on the".into(),
                span_pair_id: 0,
                color_seed: "s".into(),
            },
            Segment::Plain {
                text: " mat.".into(),
            },
        ];
        let stats = OverlapStats::from_segments(&segments);
        assert_eq!(stats.num_words, 6);
        assert_eq!(stats.matched_words, 5);
        assert!((stats.percent_overlap - 5.0 / 6.0).abs() < 1e-9);
    }

    #[test]
    fn no_words_means_zero_overlap() {
        let stats = OverlapStats::from_segments(&[Segment::Plain { text: "...".into() }]);
        assert_eq!(stats.num_words, 0);
        assert_eq!(stats.percent_overlap, 0.0);
        assert_eq!(OverlapStats::from_segments(&[]).num_words, 0);
    }
}
