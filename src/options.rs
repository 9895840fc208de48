//! Per-alignment options.

use canonical::{Token, TokenizeConfig};
use matcher::{ColorSeedFn, LabelConfig, StopwordPredicate};

use crate::error::AlignError;

/// Everything that shapes the result of aligning one pair.
///
/// Cheap to clone: predicate and seed function live behind `Arc`.
#[derive(Debug, Clone)]
pub struct AlignOptions {
    pub tokenizer: TokenizeConfig,
    /// Matches shorter than this many tokens are discarded.
    pub min_match_tokens: usize,
    pub stopword: StopwordPredicate,
    pub color_seed: ColorSeedFn,
    /// Upper bound on the byte length of each raw input. `None` is unbounded.
    pub max_input_bytes: Option<usize>,
}

impl Default for AlignOptions {
    fn default() -> Self {
        Self {
            tokenizer: TokenizeConfig::default(),
            min_match_tokens: 1,
            stopword: StopwordPredicate::none(),
            color_seed: ColorSeedFn::sha256(),
            max_input_bytes: None,
        }
    }
}

impl AlignOptions {
    /// Replace the tokenizer settings. A stop-word list set earlier is
    /// normalized again under the new settings.
    pub fn with_tokenizer(mut self, tokenizer: TokenizeConfig) -> Self {
        self.stopword = self.stopword.for_tokenizer(&tokenizer);
        self.tokenizer = tokenizer;
        self
    }

    pub fn with_min_match_tokens(mut self, min: usize) -> Self {
        self.min_match_tokens = min;
        self
    }

    /// Treat the given words as stop-words, compared by key under this
    /// aligner's tokenizer settings.
    pub fn with_stopwords<I, S>(mut self, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.stopword = StopwordPredicate::from_words(words, &self.tokenizer);
        self
    }

    pub fn with_stopword_predicate<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&Token) -> bool + Send + Sync + 'static,
    {
        self.stopword = StopwordPredicate::new(predicate);
        self
    }

    pub fn with_color_seed_fn<F>(mut self, seed: F) -> Self
    where
        F: Fn(&str) -> String + Send + Sync + 'static,
    {
        self.color_seed = ColorSeedFn::new(seed);
        self
    }

    pub fn with_max_input_bytes(mut self, limit: usize) -> Self {
        self.max_input_bytes = Some(limit);
        self
    }

    pub fn validate(&self) -> Result<(), AlignError> {
        self.tokenizer.validate()?;
        if self.min_match_tokens == 0 {
            return Err(AlignError::InvalidConfig(
                "min_match_tokens must be greater than zero".into(),
            ));
        }
        if self.max_input_bytes == Some(0) {
            return Err(AlignError::InvalidConfig(
                "max_input_bytes must be greater than zero when set".into(),
            ));
        }
        Ok(())
    }

    pub(crate) fn label_config(&self) -> LabelConfig {
        LabelConfig {
            min_match_tokens: self.min_match_tokens,
            stopword: self.stopword.clone(),
            color_seed: self.color_seed.clone(),
            seed_version: self.tokenizer.version,
        }
    }

    pub(crate) fn check_input_len(&self, label: &str, len: usize) -> Result<(), AlignError> {
        match self.max_input_bytes {
            Some(limit) if len > limit => Err(AlignError::InvalidInput(format!(
                "{label} is {len} bytes, limit is {limit}"
            ))),
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builders_set_fields() {
        let opts = AlignOptions::default()
            .with_min_match_tokens(3)
            .with_max_input_bytes(1024)
            .with_stopwords(["the", "a"]);
        assert_eq!(opts.min_match_tokens, 3);
        assert_eq!(opts.max_input_bytes, Some(1024));
        let the = canonical::tokenize("The").remove(0);
        assert!(opts.stopword.is_stopword(&the));
        assert!(opts.validate().is_ok());
    }

    #[test]
    fn stopwords_use_the_configured_casing_in_either_order() {
        let cased = TokenizeConfig {
            lowercase: false,
            ..TokenizeConfig::default()
        };
        let the = canonical::tokenize_with("The", &cased).remove(0);
        let lower = canonical::tokenize_with("the", &cased).remove(0);

        let before = AlignOptions::default()
            .with_tokenizer(cased.clone())
            .with_stopwords(["The"]);
        let after = AlignOptions::default()
            .with_stopwords(["The"])
            .with_tokenizer(cased);
        for opts in [before, after] {
            assert!(opts.stopword.is_stopword(&the));
            assert!(!opts.stopword.is_stopword(&lower));
        }
    }

    #[test]
    fn zero_min_length_is_invalid() {
        let err = AlignOptions::default()
            .with_min_match_tokens(0)
            .validate()
            .unwrap_err();
        assert!(matches!(err, AlignError::InvalidConfig(_)));
    }

    #[test]
    fn tokenizer_errors_map_to_invalid_config() {
        let tokenizer = TokenizeConfig {
            version: 0,
            ..TokenizeConfig::default()
        };
        let err = AlignOptions::default()
            .with_tokenizer(tokenizer)
            .validate()
            .unwrap_err();
        assert!(matches!(err, AlignError::InvalidConfig(_)));
    }

    #[test]
    fn input_limit_is_inclusive() {
        let opts = AlignOptions::default().with_max_input_bytes(4);
        assert!(opts.check_input_len("a", 4).is_ok());
        assert!(matches!(
            opts.check_input_len("a", 5),
            Err(AlignError::InvalidInput(msg)) if msg.contains("limit is 4")
        ));
    }
}
