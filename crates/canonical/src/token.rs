use serde::{Deserialize, Serialize};
use unicode_categories::UnicodeCategories;
use unicode_segmentation::UnicodeSegmentation;

use crate::config::TokenizeConfig;
use crate::normalize::normalize_key;

/// A token with its UTF-8 byte offsets in the owning text.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Token {
    /// The token text exactly as it appears in the source.
    pub text: String,
    /// Byte offset (inclusive) in the source text.
    pub start: usize,
    /// Byte offset (exclusive) in the source text.
    pub end: usize,
    /// Normalized comparison form of `text`.
    pub key: String,
}

impl Token {
    /// Whether the token carries any letter or digit.
    ///
    /// Tokens without word content (punctuation, symbols) never count as
    /// content when deciding whether a match is worth keeping.
    pub fn has_word_content(&self) -> bool {
        self.key.chars().any(char::is_alphanumeric)
    }

    /// Whether every character of the token is Unicode punctuation.
    pub fn is_punctuation_only(&self) -> bool {
        !self.text.is_empty() && self.text.chars().all(|c| c.is_punctuation())
    }

    /// Length of the token in bytes.
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

impl AsRef<str> for Token {
    fn as_ref(&self) -> &str {
        self.text.as_str()
    }
}

/// Tokenizes text with the default [`TokenizeConfig`].
///
/// See [`tokenize_with`].
pub fn tokenize(text: &str) -> Vec<Token> {
    tokenize_with(text, &TokenizeConfig::default())
}

/// Splits `text` on Unicode word boundaries and produces byte offsets.
///
/// Punctuation is kept as separate tokens; whitespace between tokens is not
/// a token but stays recoverable from the offsets. Empty input yields an
/// empty vector. The function is pure: identical input and config always
/// produce identical tokens.
pub fn tokenize_with(text: &str, cfg: &TokenizeConfig) -> Vec<Token> {
    let mut tokens = Vec::with_capacity((text.len() / 4).saturating_add(1));

    for (start, segment) in text.split_word_bound_indices() {
        if segment.chars().all(char::is_whitespace) {
            continue;
        }
        tokens.push(Token {
            text: segment.to_string(),
            start,
            end: start + segment.len(),
            key: normalize_key(segment, cfg),
        });
    }

    tokens
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triples(tokens: &[Token]) -> Vec<(&str, usize, usize)> {
        tokens
            .iter()
            .map(|t| (t.text.as_str(), t.start, t.end))
            .collect()
    }

    #[test]
    fn punctuation_is_a_separate_token() {
        let tokens = tokenize("The mat.");
        assert_eq!(triples(&tokens), vec![("The", 0, 3), ("mat", 4, 7), (".", 7, 8)]);
        assert_eq!(tokens[0].key, "the");
        assert_eq!(tokens[2].key, ".");
    }

    #[test]
    fn empty_and_whitespace_input_yield_no_tokens() {
        assert!(tokenize("").is_empty());
        assert!(tokenize(" \n\t ").is_empty());
    }

    #[test]
    fn offsets_slice_back_to_token_text() {
        let text = "  Don't   stop,\nbelieving!  ";
        for token in tokenize(text) {
            assert_eq!(&text[token.start..token.end], token.text);
        }
    }

    #[test]
    fn contractions_stay_whole() {
        let tokens = tokenize("don't");
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].key, "don't");
    }

    #[test]
    fn word_content_and_punctuation_flags() {
        let tokens = tokenize("Hi, 42!");
        let flags: Vec<(bool, bool)> = tokens
            .iter()
            .map(|t| (t.has_word_content(), t.is_punctuation_only()))
            .collect();
        assert_eq!(
            flags,
            vec![(true, false), (false, true), (true, false), (false, true)]
        );
    }

    #[test]
    fn non_bmp_offsets_are_bytes() {
        let text = "a \u{10348} b";
        let tokens = tokenize(text);
        assert_eq!(tokens[1].start, 2);
        assert_eq!(tokens[1].end, 2 + "\u{10348}".len());
    }
}
