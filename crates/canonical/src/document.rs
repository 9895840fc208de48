//! Owned text plus its token sequence.
//!
//! A [`TokenizedText`] is produced once per input and can be shared behind an
//! `Arc` when the same document is aligned against many candidates.
//!
//! ```rust
//! use canonical::{TokenizeConfig, TokenizedText};
//!
//! let doc = TokenizedText::new("The cat sat.", &TokenizeConfig::default());
//! assert_eq!(doc.tokens().len(), 4);
//! assert_eq!(doc.token_text(0..3), Some("The cat sat"));
//! assert_eq!(doc.joined_keys(1..3).as_deref(), Some("cat sat"));
//! ```

use std::ops::Range;

use serde::{Deserialize, Serialize};

use crate::config::TokenizeConfig;
use crate::token::{tokenize_with, Token};

/// A source text together with the tokens derived from it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TokenizedText {
    text: String,
    tokens: Vec<Token>,
    config_version: u32,
}

impl TokenizedText {
    /// Tokenize `text` under `cfg` and keep both.
    pub fn new(text: impl Into<String>, cfg: &TokenizeConfig) -> Self {
        let text = text.into();
        let tokens = tokenize_with(&text, cfg);
        Self {
            text,
            tokens,
            config_version: cfg.version,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// Version of the [`TokenizeConfig`] the keys were produced with.
    pub fn config_version(&self) -> u32 {
        self.config_version
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Byte range in the source covered by a half-open token range.
    ///
    /// Returns `None` for empty or out-of-bounds ranges.
    pub fn byte_range(&self, tokens: Range<usize>) -> Option<Range<usize>> {
        if tokens.start >= tokens.end || tokens.end > self.tokens.len() {
            return None;
        }
        Some(self.tokens[tokens.start].start..self.tokens[tokens.end - 1].end)
    }

    /// Original text covered by a half-open token range, including the
    /// whitespace between tokens.
    pub fn token_text(&self, tokens: Range<usize>) -> Option<&str> {
        self.byte_range(tokens).and_then(|r| self.text.get(r))
    }

    /// Keys of a token range joined by single spaces.
    pub fn joined_keys(&self, tokens: Range<usize>) -> Option<String> {
        if tokens.start >= tokens.end || tokens.end > self.tokens.len() {
            return None;
        }
        Some(join_keys(&self.tokens[tokens]))
    }
}

/// Join the keys of `tokens` with single spaces.
pub fn join_keys(tokens: &[Token]) -> String {
    let mut joined = String::new();
    for token in tokens {
        if !joined.is_empty() {
            joined.push(' ');
        }
        joined.push_str(&token.key);
    }
    joined
}
