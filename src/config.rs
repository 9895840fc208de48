//! YAML configuration file support.
//!
//! One file describes the tokenizer, the labeling policy, and the defaults for
//! streamed batches. Every section and field is optional.
//!
//! ## Example YAML Configuration
//!
//! ```yaml
//! version: "1.0"
//! name: "summaries"
//!
//! tokenizer:
//!   version: 1
//!   normalize_unicode: true
//!   lowercase: true
//!
//! labeler:
//!   min_match_tokens: 2
//!   stopwords: ["the", "a", "of"]
//!
//! batch:
//!   concurrency: 4
//!   timeout_ms: 30000
//!   max_input_bytes: 1048576
//! ```

use std::fs;
use std::path::Path;
use std::time::Duration;

use canonical::TokenizeConfig;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::batch::BatchControl;
use crate::error::AlignError;
use crate::options::AlignOptions;

/// Errors that can occur when loading YAML configuration files
#[derive(Debug, Error)]
pub enum ConfigLoadError {
    #[error("failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    #[error("failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("validation error: {0}")]
    Validation(String),

    #[error("unsupported config version: {0}")]
    UnsupportedVersion(String),
}

impl From<AlignError> for ConfigLoadError {
    fn from(value: AlignError) -> Self {
        ConfigLoadError::Validation(value.to_string())
    }
}

/// Top-level YAML configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub struct OverlapConfig {
    /// Configuration format version
    pub version: String,

    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub tokenizer: TokenizerYamlConfig,

    #[serde(default)]
    pub labeler: LabelerYamlConfig,

    #[serde(default)]
    pub batch: BatchYamlConfig,
}

impl OverlapConfig {
    /// Load a YAML configuration file from the given path
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigLoadError> {
        let content = fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse YAML configuration from a string
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigLoadError> {
        let config: OverlapConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_yaml(&self) -> Result<String, ConfigLoadError> {
        Ok(serde_yaml::to_string(self)?)
    }

    fn validate(&self) -> Result<(), ConfigLoadError> {
        match self.version.as_str() {
            "1.0" | "1" => Ok(()),
            v => Err(ConfigLoadError::UnsupportedVersion(v.to_string())),
        }?;

        self.to_options().validate()?;
        self.batch.validate()?;
        Ok(())
    }

    /// Alignment options described by the `tokenizer` and `labeler` sections
    /// plus the batch input limit.
    pub fn to_options(&self) -> AlignOptions {
        let mut options = AlignOptions::default()
            .with_tokenizer(self.tokenizer.to_config())
            .with_min_match_tokens(self.labeler.min_match_tokens);
        if !self.labeler.stopwords.is_empty() {
            options = options.with_stopwords(&self.labeler.stopwords);
        }
        options.max_input_bytes = self.batch.max_input_bytes;
        options
    }

    /// Batch control with a fresh cancellation token.
    pub fn batch_control(&self) -> BatchControl {
        let mut control = BatchControl::default().with_concurrency(self.batch.concurrency);
        if let Some(ms) = self.batch.timeout_ms {
            control = control.with_timeout(Duration::from_millis(ms));
        }
        control
    }
}

impl Default for OverlapConfig {
    fn default() -> Self {
        Self {
            version: "1.0".to_string(),
            name: None,
            tokenizer: TokenizerYamlConfig::default(),
            labeler: LabelerYamlConfig::default(),
            batch: BatchYamlConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TokenizerYamlConfig {
    #[serde(default = "default_version")]
    pub version: u32,

    #[serde(default = "true_value")]
    pub normalize_unicode: bool,

    #[serde(default = "true_value")]
    pub lowercase: bool,
}

impl TokenizerYamlConfig {
    fn to_config(&self) -> TokenizeConfig {
        TokenizeConfig {
            version: self.version,
            normalize_unicode: self.normalize_unicode,
            lowercase: self.lowercase,
        }
    }
}

impl Default for TokenizerYamlConfig {
    fn default() -> Self {
        Self {
            version: default_version(),
            normalize_unicode: true,
            lowercase: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LabelerYamlConfig {
    #[serde(default = "default_min_match_tokens")]
    pub min_match_tokens: usize,

    /// Words whose tokens do not count as content on their own.
    #[serde(default)]
    pub stopwords: Vec<String>,
}

impl Default for LabelerYamlConfig {
    fn default() -> Self {
        Self {
            min_match_tokens: default_min_match_tokens(),
            stopwords: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BatchYamlConfig {
    #[serde(default = "default_concurrency")]
    pub concurrency: usize,

    /// Wall-clock budget per streamed batch in milliseconds.
    #[serde(default)]
    pub timeout_ms: Option<u64>,

    #[serde(default)]
    pub max_input_bytes: Option<usize>,
}

impl BatchYamlConfig {
    fn validate(&self) -> Result<(), ConfigLoadError> {
        if self.concurrency == 0 {
            return Err(ConfigLoadError::Validation(
                "batch.concurrency must be >= 1".into(),
            ));
        }
        if self.timeout_ms == Some(0) {
            return Err(ConfigLoadError::Validation(
                "batch.timeout_ms must be >= 1 when set".into(),
            ));
        }
        Ok(())
    }
}

impl Default for BatchYamlConfig {
    fn default() -> Self {
        Self {
            concurrency: default_concurrency(),
            timeout_ms: None,
            max_input_bytes: None,
        }
    }
}

fn default_version() -> u32 {
    1
}
fn true_value() -> bool {
    true
}
fn default_min_match_tokens() -> usize {
    1
}
fn default_concurrency() -> usize {
    1
}
