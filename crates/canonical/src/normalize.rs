use std::borrow::Cow;

use unicode_categories::UnicodeCategories;
use unicode_normalization::UnicodeNormalization;

use crate::config::TokenizeConfig;
use crate::whitespace::collapse_whitespace;

/// Derives the comparison key for a single token's text.
///
/// Steps, in order: optional NFKC, optional lowercasing, trimming of leading
/// and trailing punctuation, whitespace collapsing. A token made only of
/// punctuation would end up with an empty key; it keeps its (normalized,
/// lowercased) text instead so that `.` and `,` never compare equal.
pub fn normalize_key(raw: &str, cfg: &TokenizeConfig) -> String {
    let normalized: Cow<str> = if cfg.normalize_unicode {
        Cow::Owned(raw.nfkc().collect::<String>())
    } else {
        Cow::Borrowed(raw)
    };

    let cased: Cow<str> = if cfg.lowercase {
        Cow::Owned(normalized.to_lowercase())
    } else {
        normalized
    };

    let trimmed = cased.trim_matches(|c: char| c.is_punctuation());
    let key = collapse_whitespace(trimmed);
    if key.is_empty() {
        return collapse_whitespace(&cased);
    }
    key
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lowercases_and_strips_edge_punctuation() {
        let cfg = TokenizeConfig::default();
        assert_eq!(normalize_key("\"Hello!\"", &cfg), "hello");
        assert_eq!(normalize_key("don't", &cfg), "don't");
    }

    #[test]
    fn punctuation_only_keeps_its_text() {
        let cfg = TokenizeConfig::default();
        assert_eq!(normalize_key(".", &cfg), ".");
        assert_eq!(normalize_key(",", &cfg), ",");
    }

    #[test]
    fn nfkc_merges_equivalent_spellings() {
        let cfg = TokenizeConfig::default();
        assert_eq!(
            normalize_key("Caf\u{00E9}", &cfg),
            normalize_key("Cafe\u{0301}", &cfg)
        );
    }

    #[test]
    fn case_preserved_when_disabled() {
        let cfg = TokenizeConfig {
            lowercase: false,
            ..Default::default()
        };
        assert_eq!(normalize_key("Hello", &cfg), "Hello");
    }
}
