//! Span labeling: pruning, id assignment and colour seeds.
//!
//! Raw matches from the engine are filtered by a minimum length and by a
//! content rule: a match survives only if at least one of its tokens has
//! word content and is not a stop-word. Which words count as stop-words is
//! injected through [`StopwordPredicate`], never hardcoded.

use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use canonical::{color_seed, join_keys, normalize_key, Token, TokenizeConfig};

use crate::types::{MatchError, RawMatch, Side, Span, SpanPair};

type StopwordFn = dyn Fn(&Token) -> bool + Send + Sync;
type SeedFn = dyn Fn(&str) -> String + Send + Sync;

#[derive(Clone, Default)]
enum Stopwords {
    #[default]
    None,
    /// The listed words plus their keys under the tokenizer they were
    /// normalized with.
    Words {
        words: Arc<[String]>,
        keys: Arc<HashSet<String>>,
    },
    Custom(Arc<StopwordFn>),
}

/// Decides whether a token is "uninteresting" for highlighting.
#[derive(Clone, Default)]
pub struct StopwordPredicate(Stopwords);

impl StopwordPredicate {
    /// No token is a stop-word.
    pub fn none() -> Self {
        Self(Stopwords::None)
    }

    pub fn new<F>(predicate: F) -> Self
    where
        F: Fn(&Token) -> bool + Send + Sync + 'static,
    {
        Self(Stopwords::Custom(Arc::new(predicate)))
    }

    /// Stop-words given as plain words, compared against token keys.
    ///
    /// The words are normalized with `cfg`, the same settings that produce
    /// the token keys. Under the default config `"The"` in the list matches
    /// a token whose key is `"the"`; with `lowercase: false` it matches only
    /// `"The"`.
    pub fn from_words<I, S>(words: I, cfg: &TokenizeConfig) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let words: Arc<[String]> = words.into_iter().map(|w| w.as_ref().to_string()).collect();
        Self::from_word_list(words, cfg)
    }

    fn from_word_list(words: Arc<[String]>, cfg: &TokenizeConfig) -> Self {
        let keys = words
            .iter()
            .map(|w| normalize_key(w, cfg))
            .filter(|w| !w.is_empty())
            .collect();
        Self(Stopwords::Words {
            words,
            keys: Arc::new(keys),
        })
    }

    /// The same predicate for tokens produced under `cfg`.
    ///
    /// A word list is normalized again; other predicates are unchanged.
    pub fn for_tokenizer(&self, cfg: &TokenizeConfig) -> Self {
        match &self.0 {
            Stopwords::Words { words, .. } => Self::from_word_list(Arc::clone(words), cfg),
            _ => self.clone(),
        }
    }

    pub fn is_stopword(&self, token: &Token) -> bool {
        match &self.0 {
            Stopwords::None => false,
            Stopwords::Words { keys, .. } => keys.contains(&token.key),
            Stopwords::Custom(f) => f(token),
        }
    }
}

impl fmt::Debug for StopwordPredicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            Stopwords::None => f.debug_tuple("StopwordPredicate").field(&"none").finish(),
            Stopwords::Words { words, .. } => {
                f.debug_tuple("StopwordPredicate").field(words).finish()
            }
            Stopwords::Custom(_) => f.debug_tuple("StopwordPredicate").field(&"custom").finish(),
        }
    }
}

/// Derives the colour seed of a matched phrase from its joined keys.
#[derive(Clone, Default)]
pub struct ColorSeedFn(Option<Arc<SeedFn>>);

impl ColorSeedFn {
    /// SHA-256 based seed from [`canonical::color_seed`].
    pub fn sha256() -> Self {
        Self(None)
    }

    pub fn new<F>(seed: F) -> Self
    where
        F: Fn(&str) -> String + Send + Sync + 'static,
    {
        Self(Some(Arc::new(seed)))
    }

    pub fn seed(&self, version: u32, matched_keys: &str) -> String {
        match &self.0 {
            Some(f) => f(matched_keys),
            None => color_seed(version, matched_keys),
        }
    }
}

impl fmt::Debug for ColorSeedFn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = if self.0.is_some() { "custom" } else { "sha256" };
        f.debug_tuple("ColorSeedFn").field(&kind).finish()
    }
}

/// Labeling policy.
#[derive(Debug, Clone)]
pub struct LabelConfig {
    /// Matches shorter than this many tokens are dropped. Must be >= 1.
    pub min_match_tokens: usize,
    pub stopword: StopwordPredicate,
    pub color_seed: ColorSeedFn,
    /// Tokenizer version mixed into the default colour seed.
    pub seed_version: u32,
}

impl LabelConfig {
    pub fn validate(&self) -> Result<(), MatchError> {
        if self.min_match_tokens == 0 {
            return Err(MatchError::InvalidConfig(
                "min_match_tokens must be greater than zero".into(),
            ));
        }
        Ok(())
    }
}

impl Default for LabelConfig {
    fn default() -> Self {
        Self {
            min_match_tokens: 1,
            stopword: StopwordPredicate::none(),
            color_seed: ColorSeedFn::sha256(),
            seed_version: TokenizeConfig::default().version,
        }
    }
}

/// Turn raw matches into labeled span pairs.
///
/// Ids are assigned from 0 in document order of side A. Fails with
/// [`MatchError::InvalidSpan`] if a match is out of bounds, pairs unequal
/// keys, or overlaps another retained match on either side.
pub fn label(
    raw: &[RawMatch],
    tokens_a: &[Token],
    tokens_b: &[Token],
    cfg: &LabelConfig,
) -> Result<Vec<SpanPair>, MatchError> {
    cfg.validate()?;

    let mut ordered: Vec<&RawMatch> = raw.iter().collect();
    ordered.sort_by_key(|m| (m.a_start, m.b_start));

    let mut pairs: Vec<SpanPair> = Vec::with_capacity(ordered.len());
    for m in ordered {
        check_bounds(m, tokens_a.len(), tokens_b.len())?;
        if m.length < cfg.min_match_tokens {
            continue;
        }

        let matched_a = &tokens_a[m.a_range()];
        let matched_b = &tokens_b[m.b_range()];
        if matched_a
            .iter()
            .zip(matched_b)
            .any(|(ta, tb)| ta.key != tb.key)
        {
            return Err(MatchError::InvalidSpan(format!(
                "match at a={} b={} pairs unequal keys",
                m.a_start, m.b_start
            )));
        }

        let has_content = matched_a
            .iter()
            .any(|t| t.has_word_content() && !cfg.stopword.is_stopword(t));
        if !has_content {
            continue;
        }

        let id = pairs.len() as u32;
        let keys = join_keys(matched_a);
        pairs.push(SpanPair {
            id,
            span_a: Span {
                id,
                side: Side::A,
                start: m.a_start,
                end: m.a_start + m.length,
            },
            span_b: Span {
                id,
                side: Side::B,
                start: m.b_start,
                end: m.b_start + m.length,
            },
            length: m.length,
            color_seed: cfg.color_seed.seed(cfg.seed_version, &keys),
        });
    }

    check_disjoint(&pairs, Side::A)?;
    check_disjoint(&pairs, Side::B)?;
    Ok(pairs)
}

fn check_bounds(m: &RawMatch, len_a: usize, len_b: usize) -> Result<(), MatchError> {
    if m.length == 0 {
        return Err(MatchError::InvalidSpan(format!(
            "empty match at a={} b={}",
            m.a_start, m.b_start
        )));
    }
    if m.a_start + m.length > len_a || m.b_start + m.length > len_b {
        return Err(MatchError::InvalidSpan(format!(
            "match a={:?} b={:?} exceeds token bounds ({len_a}, {len_b})",
            m.a_range(),
            m.b_range()
        )));
    }
    Ok(())
}

/// Spans on one side must never overlap.
pub fn check_disjoint(pairs: &[SpanPair], side: Side) -> Result<(), MatchError> {
    let mut spans: Vec<&Span> = pairs.iter().map(|p| p.span(side)).collect();
    spans.sort_by_key(|s| s.start);
    for window in spans.windows(2) {
        if window[0].end > window[1].start {
            return Err(MatchError::InvalidSpan(format!(
                "spans {} and {} overlap on side {:?}",
                window[0].id, window[1].id, side
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::match_tokens;
    use canonical::tokenize;

    fn labeled(a: &str, b: &str, cfg: &LabelConfig) -> Vec<SpanPair> {
        let ta = tokenize(a);
        let tb = tokenize(b);
        label(&match_tokens(&ta, &tb), &ta, &tb, cfg).expect("label")
    }

    #[test]
    fn punctuation_only_matches_are_dropped() {
        let pairs = labeled(
            "The cat sat on the mat.",
            "The cat sat on the rug.",
            &LabelConfig::default(),
        );
        assert_eq!(pairs.len(), 1);
        assert_eq!(pairs[0].length, 5);
        assert_eq!(pairs[0].span_a.range(), 0..5);
        assert_eq!(pairs[0].span_b.range(), 0..5);
    }

    #[test]
    fn ids_follow_side_a_order() {
        let pairs = labeled(
            "alpha beta gamma delta",
            "alpha x gamma y",
            &LabelConfig::default(),
        );
        let ids: Vec<u32> = pairs.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![0, 1]);
        assert!(pairs[0].span_a.start < pairs[1].span_a.start);
        assert_eq!(pairs[1].span_a.id, 1);
        assert_eq!(pairs[1].span_b.id, 1);
    }

    #[test]
    fn stopword_only_match_dropped_but_mixed_match_kept() {
        let cfg = LabelConfig {
            min_match_tokens: 2,
            stopword: StopwordPredicate::from_words(["the"], &TokenizeConfig::default()),
            ..LabelConfig::default()
        };
        let kept = labeled("a b the", "a b the", &cfg);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].length, 3);

        let dropped = labeled("the sun rises", "over the hill", &cfg);
        assert!(dropped.is_empty());

        let single = LabelConfig {
            min_match_tokens: 1,
            ..cfg
        };
        assert!(labeled("the sun rises", "over the hill", &single).is_empty());
    }

    #[test]
    fn stopword_keys_follow_the_tokenizer_casing() {
        let cased = TokenizeConfig {
            lowercase: false,
            ..TokenizeConfig::default()
        };
        let the_upper = canonical::tokenize_with("The", &cased).remove(0);
        let the_lower = canonical::tokenize_with("the", &cased).remove(0);

        let words = StopwordPredicate::from_words(["The"], &cased);
        assert!(words.is_stopword(&the_upper));
        assert!(!words.is_stopword(&the_lower));

        let folded = words.for_tokenizer(&TokenizeConfig::default());
        assert!(folded.is_stopword(&tokenize("THE").remove(0)));

        let custom = StopwordPredicate::new(|t| t.text == "x").for_tokenizer(&cased);
        assert!(custom.is_stopword(&tokenize("x").remove(0)));
    }

    #[test]
    fn min_length_filters_short_matches() {
        let cfg = LabelConfig {
            min_match_tokens: 3,
            ..LabelConfig::default()
        };
        let pairs = labeled("red green blue x yellow", "red green z yellow", &cfg);
        assert!(pairs.is_empty());
    }

    #[test]
    fn same_phrase_same_seed() {
        let cfg = LabelConfig::default();
        let first = labeled("He said the cat sat down.", "the cat sat", &cfg);
        let second = labeled("Yesterday THE CAT SAT there", "the cat sat", &cfg);
        assert_eq!(first[0].color_seed, second[0].color_seed);
    }

    #[test]
    fn custom_seed_function_is_used() {
        let cfg = LabelConfig {
            color_seed: ColorSeedFn::new(|text| format!("seed:{text}")),
            ..LabelConfig::default()
        };
        let pairs = labeled("Big Red Dog", "big red dog", &cfg);
        assert_eq!(pairs[0].color_seed, "seed:big red dog");
    }

    #[test]
    fn zero_min_length_rejected() {
        let cfg = LabelConfig {
            min_match_tokens: 0,
            ..LabelConfig::default()
        };
        let err = label(&[], &[], &[], &cfg).expect_err("invalid config");
        assert!(matches!(err, MatchError::InvalidConfig(_)));
    }

    #[test]
    fn overlapping_raw_matches_are_a_defect() {
        let ta = tokenize("one two three");
        let tb = tokenize("one two three one two three");
        let raw = [
            RawMatch {
                a_start: 0,
                b_start: 0,
                length: 2,
            },
            RawMatch {
                a_start: 1,
                b_start: 4,
                length: 2,
            },
        ];
        let err = label(&raw, &ta, &tb, &LabelConfig::default()).expect_err("overlap");
        assert!(matches!(err, MatchError::InvalidSpan(msg) if msg.contains("overlap")));
    }

    #[test]
    fn out_of_bounds_raw_match_is_a_defect() {
        let ta = tokenize("one two");
        let tb = tokenize("one two");
        let raw = [RawMatch {
            a_start: 1,
            b_start: 0,
            length: 2,
        }];
        let err = label(&raw, &ta, &tb, &LabelConfig::default()).expect_err("bounds");
        assert!(matches!(err, MatchError::InvalidSpan(_)));
    }

    #[test]
    fn unequal_keys_are_a_defect() {
        let ta = tokenize("one two");
        let tb = tokenize("one three");
        let raw = [RawMatch {
            a_start: 0,
            b_start: 0,
            length: 2,
        }];
        let err = label(&raw, &ta, &tb, &LabelConfig::default()).expect_err("keys");
        assert!(matches!(err, MatchError::InvalidSpan(msg) if msg.contains("unequal")));
    }
}
