//! Colour seed hashing.
//!
//! # Colour Seed
//!
//! ```text
//! hex(SHA-256(version.to_be_bytes() || 0x02 || matched_key_bytes))[..16]
//! ```
//!
//! The seed depends only on the normalized matched text and the tokenizer
//! version, never on span ids or positions. Two unrelated alignments that
//! copy the same phrase therefore produce the same seed, and the rendering
//! layer can paint them with the same colour family.
//!
//! # Examples
//!
//! ```rust
//! use canonical::color_seed;
//!
//! let seed = color_seed(1, "the cat sat");
//! assert_eq!(seed.len(), 16);
//! assert_eq!(seed, color_seed(1, "the cat sat"));
//! assert_ne!(seed, color_seed(2, "the cat sat"));
//! ```

use sha2::{Digest, Sha256};

/// Number of hex characters kept in a colour seed (64 bits).
pub const COLOR_SEED_HEX_LEN: usize = 16;

/// Compute the colour seed for a matched phrase.
///
/// `matched_keys` is the matched token keys joined by single spaces.
pub fn color_seed(version: u32, matched_keys: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(version.to_be_bytes());
    hasher.update([2]); // discriminator
    hasher.update(matched_keys.as_bytes());
    let mut digest = hex::encode(hasher.finalize());
    digest.truncate(COLOR_SEED_HEX_LEN);
    digest
}

/// Map a colour seed onto a hue in `0..360`.
///
/// Convenience for renderers that want a stable colour without their own
/// palette; malformed seeds map to hue 0.
pub fn seed_hue(seed: &str) -> u16 {
    let prefix = seed.get(..4).unwrap_or(seed);
    u16::from_str_radix(prefix, 16).map_or(0, |v| v % 360)
}
