//! Markup layer for the overlap engine.
//!
//! Turns a token sequence plus labeled span pairs into an ordered list of
//! [`Segment`]s for one side of an alignment. The builder reconstructs the
//! text between tokens from byte offsets, so joining the segments gives back
//! the original input byte for byte.
//!
//! ```rust
//! use canonical::tokenize;
//! use markup::{build, concat, OverlapStats};
//! use matcher::{label, match_tokens, LabelConfig, Side};
//!
//! let (a, b) = ("The cat sat on the mat.", "The cat sat on the rug.");
//! let (ta, tb) = (tokenize(a), tokenize(b));
//! let pairs = label(&match_tokens(&ta, &tb), &ta, &tb, &LabelConfig::default()).unwrap();
//!
//! let markup_b = build(&tb, b, &pairs, Side::B).unwrap();
//! assert_eq!(concat(&markup_b), b);
//! assert_eq!(markup_b[0].text(), "The cat sat on the");
//!
//! let stats = OverlapStats::from_segments(&markup_b);
//! assert_eq!((stats.matched_words, stats.num_words), (5, 6));
//! ```

mod builder;
mod error;
mod paragraph;
mod segment;
mod stats;

pub use crate::builder::{build, build_plain};
pub use crate::error::MarkupError;
pub use crate::paragraph::paragraphs;
pub use crate::segment::{concat, Segment};
pub use crate::stats::OverlapStats;
