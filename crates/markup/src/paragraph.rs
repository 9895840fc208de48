//! Paragraph splitting for display.
//!
//! Renderers usually show one block per paragraph. Splitting happens on
//! newlines inside any segment, so a span that crosses a line break shows up
//! in both paragraphs with the same id and seed. The newlines themselves are
//! dropped, and so are paragraphs containing only whitespace.

use crate::segment::Segment;

/// Split a markup into paragraphs at newlines.
pub fn paragraphs(segments: &[Segment]) -> Vec<Vec<Segment>> {
    let mut out = Vec::new();
    let mut current: Vec<Segment> = Vec::new();

    for segment in segments {
        let pieces: Vec<&str> = segment.text().split('\n').collect();
        let last = pieces.len() - 1;
        for (i, piece) in pieces.into_iter().enumerate() {
            if i > 0 {
                flush(&mut out, &mut current);
            }
            let piece = if i < last {
                piece.strip_suffix('\r').unwrap_or(piece)
            } else {
                piece
            };
            if !piece.is_empty() {
                current.push(segment.with_text(piece));
            }
        }
    }
    flush(&mut out, &mut current);
    out
}

fn flush(out: &mut Vec<Vec<Segment>>, current: &mut Vec<Segment>) {
    let paragraph = std::mem::take(current);
    if paragraph.iter().any(|s| !s.text().trim().is_empty()) {
        out.push(paragraph);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn span(text: &str) -> Segment {
        Segment::Span {
            text: text.into(),
            span_pair_id: 7,
            color_seed: "seed".into(),
        }
    }

    #[test]
    fn splits_on_blank_lines_and_drops_them() {
        let segments = vec![Segment::Plain {
            text: "first line\r\n\r\nsecond line".into(),
        }];
        let paras = paragraphs(&segments);
        assert_eq!(paras.len(), 2);
        assert_eq!(paras[0][0].text(), "first line");
        assert_eq!(paras[1][0].text(), "second line");
    }

    #[test]
    fn span_crossing_a_newline_appears_in_both_paragraphs() {
        let segments = vec![
            Segment::Plain { text: "intro ".into() },
            span("end of one\nstart of two"),
            Segment::Plain { text: " tail".into() },
        ];
        let paras = paragraphs(&segments);
        assert_eq!(paras.len(), 2);
        assert_eq!(paras[0][1], span("end of one"));
        assert_eq!(paras[1][0], span("start of two"));
        assert_eq!(paras[1][1].text(), " tail");
    }

    #[test]
    fn empty_markup_has_no_paragraphs() {
        assert!(paragraphs(&[]).is_empty());
    }
}
