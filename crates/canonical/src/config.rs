//! Configuration types for the tokenizer.
//!
//! This module defines [`TokenizeConfig`], which controls how comparison keys
//! are derived from token text. Token boundaries and offsets never depend on
//! the config; only the `key` of each token does.
//!
//! # Versioning
//!
//! The `version` field is mixed into every colour seed. Any change to key
//! normalization (even bug fixes) must be accompanied by a version bump so
//! that seeds produced by different normalization rules never collide.
//!
//! # Examples
//!
//! ```rust
//! use canonical::TokenizeConfig;
//!
//! let config = TokenizeConfig::default();
//! assert_eq!(config.version, 1);
//! assert!(config.normalize_unicode);
//! assert!(config.lowercase);
//! ```
//!
//! ## Case-sensitive keys
//!
//! ```rust
//! use canonical::TokenizeConfig;
//!
//! let config = TokenizeConfig {
//!     lowercase: false,
//!     ..Default::default()
//! };
//! assert!(config.validate().is_ok());
//! ```

use serde::{Deserialize, Serialize};

use crate::error::CanonicalError;

/// Configuration for comparison-key normalization.
///
/// `TokenizeConfig` is cheap to clone and serializable so it can be embedded
/// in higher-level configuration files.
///
/// ```json
/// {
///   "version": 1,
///   "normalize_unicode": true,
///   "lowercase": true
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TokenizeConfig {
    /// Version of the key normalization rules.
    ///
    /// Must be >= 1; version 0 is reserved and rejected by [`validate`](Self::validate).
    pub version: u32,

    /// If true, apply Unicode NFKC normalization to keys.
    ///
    /// With normalization enabled, `"Café"` written with U+00E9 and
    /// `"Cafe"` followed by U+0301 produce the same key, so the two
    /// spellings align with each other.
    pub normalize_unicode: bool,

    /// If true, apply locale-free Unicode lowercasing to keys.
    pub lowercase: bool,
}

impl TokenizeConfig {
    /// Validate configuration parameters.
    pub fn validate(&self) -> Result<(), CanonicalError> {
        if self.version == 0 {
            return Err(CanonicalError::InvalidConfig(
                "config version must be >= 1".into(),
            ));
        }
        Ok(())
    }
}

impl Default for TokenizeConfig {
    /// Defaults: version 1, NFKC on, lowercasing on.
    fn default() -> Self {
        Self {
            version: 1,
            normalize_unicode: true,
            lowercase: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(TokenizeConfig::default().validate().is_ok());
    }

    #[test]
    fn version_zero_rejected() {
        let cfg = TokenizeConfig {
            version: 0,
            ..Default::default()
        };
        let err = cfg.validate().expect_err("version 0 is reserved");
        assert!(matches!(err, CanonicalError::InvalidConfig(msg) if msg.contains("version")));
    }

    #[test]
    fn config_round_trips_through_json() {
        let cfg = TokenizeConfig {
            lowercase: false,
            ..Default::default()
        };
        let json = serde_json::to_string(&cfg).expect("serialize");
        let back: TokenizeConfig = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(cfg, back);
    }
}
