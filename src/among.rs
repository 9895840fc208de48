//! Many-way comparison: every text of a set aligned against every other.
//!
//! Pairwise results stay available per comparison. On top of them each text
//! gets one merged markup that carries its matches against all the others,
//! and a [`HighlightIndex`] over the comparisons correlates a phrase across
//! the whole set.

use std::collections::HashMap;
use std::sync::Arc;

use canonical::TokenizedText;
use markup::{build, Segment};
use matcher::{Side, Span, SpanPair};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::aligner::Aligner;
use crate::batch::{BatchPair, TextInput};
use crate::error::AlignError;
use crate::highlight::HighlightIndex;
use crate::result::AlignmentResult;

/// Text `left` (side A) aligned against text `right` (side B), `left < right`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Comparison {
    pub left: usize,
    pub right: usize,
    pub result: AlignmentResult,
}

impl Comparison {
    /// Which side of `result` belongs to `text_index`, if it takes part.
    pub fn side_of(&self, text_index: usize) -> Option<Side> {
        if text_index == self.left {
            Some(Side::A)
        } else if text_index == self.right {
            Some(Side::B)
        } else {
            None
        }
    }
}

/// Outcome of [`Aligner::align_among`].
///
/// In `markups`, a span segment's `span_pair_id` is a phrase group: equal
/// ids mean the same normalized phrase in every text of the set.
/// `highlights` is indexed by position in `comparisons`.
#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonSet {
    /// One entry per unordered pair of texts, in row-major order:
    /// `(0,1), (0,2), ..., (1,2), ...`.
    pub comparisons: Vec<Comparison>,
    /// One merged markup per input text, in input order.
    pub markups: Vec<Vec<Segment>>,
    pub highlights: HighlightIndex,
}

impl ComparisonSet {
    /// Number of texts in the set.
    pub fn len(&self) -> usize {
        self.markups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.markups.is_empty()
    }

    pub fn markup(&self, text_index: usize) -> Option<&[Segment]> {
        self.markups.get(text_index).map(Vec::as_slice)
    }

    /// The comparison between two texts, in either order.
    pub fn comparison(&self, x: usize, y: usize) -> Option<&Comparison> {
        let (left, right) = if x < y { (x, y) } else { (y, x) };
        self.comparisons
            .iter()
            .find(|c| c.left == left && c.right == right)
    }
}

impl Aligner {
    /// Align every text against every other one.
    ///
    /// Each text is tokenized once. Comparisons run in parallel like
    /// [`align_all`](Self::align_all), but any failure fails the whole call,
    /// since a merged markup needs every comparison its text takes part in.
    pub fn align_among<S>(&self, texts: &[S]) -> Result<ComparisonSet, AlignError>
    where
        S: AsRef<str>,
    {
        let docs = texts
            .iter()
            .map(|text| self.tokenize(text.as_ref()).map(Arc::new))
            .collect::<Result<Vec<_>, _>>()?;

        let mut positions = Vec::new();
        let mut pairs = Vec::new();
        for left in 0..docs.len() {
            for right in left + 1..docs.len() {
                positions.push((left, right));
                pairs.push(BatchPair {
                    a: TextInput::Tokenized(Arc::clone(&docs[left])),
                    b: TextInput::Tokenized(Arc::clone(&docs[right])),
                });
            }
        }

        let results = self
            .align_all(&pairs)
            .into_iter()
            .collect::<Result<Vec<_>, _>>()?;
        let highlights = HighlightIndex::from_results(&results);
        let comparisons: Vec<Comparison> = positions
            .into_iter()
            .zip(results)
            .map(|((left, right), result)| Comparison {
                left,
                right,
                result,
            })
            .collect();

        let groups = phrase_groups(&comparisons);
        let markups = docs
            .iter()
            .enumerate()
            .map(|(text_index, doc)| merged_markup(text_index, doc, &comparisons, &groups))
            .collect::<Result<Vec<_>, _>>()?;

        debug!(
            texts = docs.len(),
            comparisons = comparisons.len(),
            phrases = groups.len(),
            "align_among_finished"
        );
        Ok(ComparisonSet {
            comparisons,
            markups,
            highlights,
        })
    }
}

/// Group id per colour seed, numbered by first appearance.
fn phrase_groups(comparisons: &[Comparison]) -> HashMap<&str, u32> {
    let mut groups = HashMap::new();
    for pair in comparisons.iter().flat_map(|c| &c.result.pairs) {
        let next = groups.len() as u32;
        groups.entry(pair.color_seed.as_str()).or_insert(next);
    }
    groups
}

/// Lay the spans of one text from all its comparisons over that text.
///
/// Spans from different comparisons may overlap. Longer spans win, then
/// earlier comparisons, then earlier positions.
fn merged_markup(
    text_index: usize,
    doc: &TokenizedText,
    comparisons: &[Comparison],
    groups: &HashMap<&str, u32>,
) -> Result<Vec<Segment>, AlignError> {
    let mut candidates: Vec<(usize, &SpanPair, &Span)> = comparisons
        .iter()
        .enumerate()
        .filter_map(|(k, c)| c.side_of(text_index).map(|side| (k, c, side)))
        .flat_map(|(k, c, side)| c.result.pairs.iter().map(move |p| (k, p, p.span(side))))
        .collect();
    candidates.sort_by_key(|(k, pair, span)| (std::cmp::Reverse(pair.length), *k, span.start));

    let mut covered = vec![false; doc.tokens().len()];
    let mut chosen = Vec::new();
    for (_, pair, span) in candidates {
        let Some(slots) = covered.get_mut(span.range()) else {
            return Err(AlignError::InvalidSpan(format!(
                "span {} covers tokens {:?} of {}",
                span.id,
                span.range(),
                doc.tokens().len()
            )));
        };
        if slots.iter().any(|&taken| taken) {
            continue;
        }
        slots.fill(true);

        let id = groups
            .get(pair.color_seed.as_str())
            .copied()
            .unwrap_or_default();
        let merged = Span {
            id,
            side: Side::A,
            start: span.start,
            end: span.end,
        };
        chosen.push(SpanPair {
            id,
            span_a: merged,
            span_b: merged,
            length: pair.length,
            color_seed: pair.color_seed.clone(),
        });
    }

    Ok(build(doc.tokens(), doc.text(), &chosen, Side::A)?)
}
