use serde::{Deserialize, Serialize};

/// One renderable piece of a markup: plain text or a matched span.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Segment {
    Plain {
        text: String,
    },
    Span {
        text: String,
        span_pair_id: u32,
        color_seed: String,
    },
}

impl Segment {
    pub fn text(&self) -> &str {
        match self {
            Segment::Plain { text } | Segment::Span { text, .. } => text,
        }
    }

    pub fn span_pair_id(&self) -> Option<u32> {
        match self {
            Segment::Span { span_pair_id, .. } => Some(*span_pair_id),
            Segment::Plain { .. } => None,
        }
    }

    pub fn color_seed(&self) -> Option<&str> {
        match self {
            Segment::Span { color_seed, .. } => Some(color_seed),
            Segment::Plain { .. } => None,
        }
    }

    pub fn is_span(&self) -> bool {
        matches!(self, Segment::Span { .. })
    }

    /// Same annotation, different text.
    pub(crate) fn with_text(&self, text: &str) -> Segment {
        match self {
            Segment::Plain { .. } => Segment::Plain { text: text.into() },
            Segment::Span {
                span_pair_id,
                color_seed,
                ..
            } => Segment::Span {
                text: text.into(),
                span_pair_id: *span_pair_id,
                color_seed: color_seed.clone(),
            },
        }
    }
}

/// Concatenate the text of every segment in order.
///
/// For a markup produced by [`build`](crate::build) this is the original text.
pub fn concat(segments: &[Segment]) -> String {
    let mut out = String::with_capacity(segments.iter().map(|s| s.text().len()).sum());
    for segment in segments {
        out.push_str(segment.text());
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_with_type_tag() {
        let seg = Segment::Span {
            text: "cat".into(),
            span_pair_id: 3,
            color_seed: "abcd".into(),
        };
        let json = serde_json::to_value(&seg).expect("serialize");
        assert_eq!(json["type"], "span");
        assert_eq!(json["span_pair_id"], 3);

        let plain = serde_json::to_value(Segment::Plain { text: " ".into() }).expect("serialize");
        assert_eq!(plain["type"], "plain");
    }

    #[test]
    fn accessors() {
        let seg = Segment::Plain { text: "x".into() };
        assert_eq!(seg.span_pair_id(), None);
        assert_eq!(seg.color_seed(), None);
        assert!(!seg.is_span());
    }
}
