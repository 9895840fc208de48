//! # Overlap Matcher (`matcher`)
//!
//! ## Purpose
//!
//! `matcher` finds which runs of tokens in one text are copied verbatim (by
//! normalized key) in another, and turns those runs into labeled span pairs.
//!
//! ## Algorithm
//!
//! Greedy divide and conquer over token keys: take the longest common
//! contiguous run of the two remaining ranges, record it, then handle the
//! left and right remainders independently. The ranges live on an explicit
//! worklist, so the depth of the search never grows the call stack. The
//! result is an order-preserving, non-overlapping tiling of matches; it is
//! not a global optimum, and it does not need to be.
//!
//! ## Core Types
//!
//! - [`RawMatch`]: positions and length of one run, before labeling.
//! - [`SpanPair`]: a labeled run with a local id and a colour seed.
//! - [`LabelConfig`]: minimum length, stop-word predicate, seed function.
//! - [`Interrupt`]: cooperative cancellation hook polled by the matcher.
//!
//! ## Example Usage
//!
//! ```
//! use canonical::tokenize;
//! use matcher::{label, match_tokens, LabelConfig};
//!
//! let a = tokenize("The cat sat on the mat.");
//! let b = tokenize("The cat sat on the rug.");
//!
//! let raw = match_tokens(&a, &b);
//! let pairs = label(&raw, &a, &b, &LabelConfig::default()).expect("consistent spans");
//!
//! assert_eq!(pairs.len(), 1);
//! assert_eq!(pairs[0].length, 5);
//! ```

pub mod engine;
pub mod label;
pub mod types;

pub use crate::engine::{match_tokens, match_tokens_interruptible, Interrupt};
pub use crate::label::{check_disjoint, label, ColorSeedFn, LabelConfig, StopwordPredicate};
pub use crate::types::{MatchError, RawMatch, Side, Span, SpanPair};
