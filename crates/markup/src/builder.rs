use canonical::Token;
use matcher::{Side, Span, SpanPair};

use crate::error::MarkupError;
use crate::segment::Segment;

/// Build the markup for one side of an alignment.
///
/// Spans of `side` are laid over the original text by token offsets; every
/// byte not covered by a span lands in a `Plain` segment, adjacent plain
/// text merged into one. Concatenating the segments reproduces
/// `original_text` exactly, whitespace included. With no pairs the result
/// is a single plain segment (or nothing, for empty text).
pub fn build(
    tokens: &[Token],
    original_text: &str,
    pairs: &[SpanPair],
    side: Side,
) -> Result<Vec<Segment>, MarkupError> {
    let mut spans: Vec<(&Span, &str)> = pairs
        .iter()
        .map(|p| (p.span(side), p.color_seed.as_str()))
        .collect();
    spans.sort_by_key(|(span, _)| span.start);

    let mut segments = Vec::with_capacity(spans.len() * 2 + 1);
    let mut cursor = 0usize;
    let mut covered_tokens = 0usize;

    for (span, seed) in spans {
        if span.is_empty() || span.end > tokens.len() {
            return Err(MarkupError::InvalidSpan(format!(
                "span {} covers tokens {:?} of {}",
                span.id,
                span.range(),
                tokens.len()
            )));
        }
        if span.start < covered_tokens {
            return Err(MarkupError::InvalidSpan(format!(
                "span {} overlaps the previous span",
                span.id
            )));
        }

        let start = tokens[span.start].start;
        let end = tokens[span.end - 1].end;
        if start < cursor || start > end {
            return Err(MarkupError::InvalidSpan(format!(
                "span {} has unordered token offsets {start}..{end}",
                span.id
            )));
        }

        push_plain(&mut segments, slice(original_text, cursor, start)?);
        segments.push(Segment::Span {
            text: slice(original_text, start, end)?.to_string(),
            span_pair_id: span.id,
            color_seed: seed.to_string(),
        });
        cursor = end;
        covered_tokens = span.end;
    }

    push_plain(&mut segments, slice(original_text, cursor, original_text.len())?);
    Ok(segments)
}

/// Markup of a text with no matches: one plain segment, or none for empty text.
pub fn build_plain(tokens: &[Token], original_text: &str) -> Result<Vec<Segment>, MarkupError> {
    build(tokens, original_text, &[], Side::A)
}

fn slice(text: &str, start: usize, end: usize) -> Result<&str, MarkupError> {
    text.get(start..end).ok_or_else(|| {
        MarkupError::InvalidSpan(format!(
            "offsets {start}..{end} do not fall on character boundaries of a {}-byte text",
            text.len()
        ))
    })
}

fn push_plain(segments: &mut Vec<Segment>, text: &str) {
    if text.is_empty() {
        return;
    }
    if let Some(Segment::Plain { text: last }) = segments.last_mut() {
        last.push_str(text);
        return;
    }
    segments.push(Segment::Plain {
        text: text.to_string(),
    });
}
