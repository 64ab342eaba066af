//! Pipeline configuration.
//!
//! Values come from built-in defaults, optionally overridden by a TOML file:
//!
//! ```toml
//! frequency_floor = 5
//! min_doc_freq = 2
//! max_doc_freq_fraction = 0.8
//! keep_n = 100000        # 0 disables the cap
//! enable_similarity = false
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Deserializer};

use crate::error::{PipelineError, Result};
use crate::vectorizer::vocabulary::VocabularyPolicy;

/// Default Pass-1 corpus-wide occurrence floor.
pub const DEFAULT_FREQUENCY_FLOOR: u64 = 5;
/// Default Pass-2 minimum document frequency.
pub const DEFAULT_MIN_DOC_FREQ: u64 = 2;
/// Default Pass-2 maximum document-frequency fraction.
pub const DEFAULT_MAX_DOC_FREQ_FRACTION: f64 = 0.8;
/// Default cap on vocabulary size after the document-frequency band.
pub const DEFAULT_KEEP_N: usize = 100_000;

/// Thresholds and stage switches for one pipeline run.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PipelineConfig {
    /// A stem survives Pass 1 only if its corpus-wide occurrence count is above this.
    pub frequency_floor: u64,
    /// A stem survives Pass 2 only if it occurs in at least this many documents.
    pub min_doc_freq: u64,
    /// A stem survives Pass 2 only if it occurs in at most `floor(fraction * N)` documents.
    pub max_doc_freq_fraction: f64,
    /// Keep at most this many stems (highest document frequency first). `None` keeps all.
    /// In a config file, `keep_n = 0` means `None`.
    #[serde(deserialize_with = "deserialize_keep_n")]
    pub keep_n: Option<usize>,
    /// Run the similarity stage.
    pub enable_similarity: bool,
}

fn deserialize_keep_n<'de, D>(deserializer: D) -> std::result::Result<Option<usize>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Some(usize::deserialize(deserializer)?).filter(|&keep_n| keep_n != 0))
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            frequency_floor: DEFAULT_FREQUENCY_FLOOR,
            min_doc_freq: DEFAULT_MIN_DOC_FREQ,
            max_doc_freq_fraction: DEFAULT_MAX_DOC_FREQ_FRACTION,
            keep_n: Some(DEFAULT_KEEP_N),
            enable_similarity: false,
        }
    }
}

impl PipelineConfig {
    /// Parses a configuration from TOML text. Missing keys take their defaults.
    pub fn from_toml_str(text: &str, path: &Path) -> Result<Self> {
        let config: Self = toml::from_str(text).map_err(|source| PipelineError::ParseConfig {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Loads and validates a TOML configuration file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|source| PipelineError::ReadFile {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text, path)
    }

    /// Rejects values no pruning policy can honor.
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.max_doc_freq_fraction) {
            return Err(PipelineError::InvalidConfig {
                field: "max_doc_freq_fraction",
                reason: format!("expected a value in [0, 1], got {}", self.max_doc_freq_fraction),
            });
        }
        if self.keep_n == Some(0) {
            return Err(PipelineError::InvalidConfig {
                field: "keep_n",
                reason: "must be positive; use `None` to keep every stem".to_string(),
            });
        }
        Ok(())
    }

    /// The vocabulary selection thresholds of this configuration.
    pub fn vocabulary_policy(&self) -> VocabularyPolicy {
        VocabularyPolicy {
            frequency_floor: self.frequency_floor,
            min_doc_freq: self.min_doc_freq,
            max_doc_freq_fraction: self.max_doc_freq_fraction,
            keep_n: self.keep_n,
        }
    }
}
