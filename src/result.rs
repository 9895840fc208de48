use markup::{paragraphs, OverlapStats, Segment};
use matcher::{Side, SpanPair};
use serde::{Deserialize, Serialize};

/// Outcome of aligning one pair of texts.
///
/// `markup_a` concatenates back to input A byte for byte, `markup_b` to
/// input B. Span segments reference entries of `pairs` by id.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AlignmentResult {
    pub pairs: Vec<SpanPair>,
    pub markup_a: Vec<Segment>,
    pub markup_b: Vec<Segment>,
}

impl AlignmentResult {
    pub fn markup(&self, side: Side) -> &[Segment] {
        match side {
            Side::A => &self.markup_a,
            Side::B => &self.markup_b,
        }
    }

    pub fn pair(&self, span_pair_id: u32) -> Option<&SpanPair> {
        self.pairs.iter().find(|p| p.id == span_pair_id)
    }

    /// Word counts and matched fraction for one side.
    pub fn stats(&self, side: Side) -> OverlapStats {
        OverlapStats::from_segments(self.markup(side))
    }

    /// One side's markup split at newlines, for paragraph rendering.
    pub fn paragraphs(&self, side: Side) -> Vec<Vec<Segment>> {
        paragraphs(self.markup(side))
    }

    /// Words of side B per word of side A, e.g. how long a summary is
    /// relative to its document. 0.0 when side A has no words.
    pub fn length_ratio(&self) -> f64 {
        let a = self.stats(Side::A).num_words;
        if a == 0 {
            return 0.0;
        }
        self.stats(Side::B).num_words as f64 / a as f64
    }

    /// Total matched tokens across all pairs.
    pub fn matched_tokens(&self) -> usize {
        self.pairs.iter().map(|p| p.length).sum()
    }
}

#[cfg(test)]
mod tests {
    use crate::align;

    #[test]
    fn length_ratio_compares_word_counts() {
        let result = align(
            "One two three four five six seven eight.",
            "Two three, four.",
        )
        .unwrap();
        assert_eq!(result.length_ratio(), 3.0 / 8.0);
        assert_eq!(align("", "words here").unwrap().length_ratio(), 0.0);
    }
}
