//! Tokenizer and normalizer for the overlap engine.
//!
//! This crate splits raw text into word and punctuation tokens with stable
//! byte offsets, and derives a normalized comparison key for each token.
//! Downstream stages (matcher, markup) compare keys and slice the original
//! text with offsets, so the source is never rewritten.
//!
//! ## What we do
//!
//! - Unicode word-boundary segmentation (UAX #29)
//! - Byte offsets into the untouched source text
//! - Key normalization: NFKC, lowercasing, edge punctuation trimming,
//!   whitespace collapsing
//! - Versioned colour seeds for matched phrases
//!
//! ## Pure function guarantee
//!
//! No I/O, no clock calls, no OS/locale dependence. Same text and config,
//! same tokens, on any machine.
//!
//! ```rust
//! use canonical::tokenize;
//!
//! let tokens = tokenize("The cat sat.");
//! let keys: Vec<&str> = tokens.iter().map(|t| t.key.as_str()).collect();
//! assert_eq!(keys, vec!["the", "cat", "sat", "."]);
//! ```

mod config;
mod document;
mod error;
mod hash;
mod normalize;
mod token;
mod whitespace;

pub use crate::config::TokenizeConfig;
pub use crate::document::{join_keys, TokenizedText};
pub use crate::error::CanonicalError;
pub use crate::hash::{color_seed, seed_hue, COLOR_SEED_HEX_LEN};
pub use crate::normalize::normalize_key;
pub use crate::token::{tokenize, tokenize_with, Token};
pub use crate::whitespace::collapse_whitespace;
