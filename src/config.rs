// Document configuration
//
// Tunables a host application may want to override. Stored as RON, the same
// text format used for other WavePaint settings files.

use crate::history::DEFAULT_MAX_HISTORY;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Sample count of a freshly created document
pub const DEFAULT_SAMPLE_COUNT: usize = 20;

/// Largest sample count a document file may declare
pub const DEFAULT_MAX_SAMPLE_COUNT: usize = 10_000_000;

/// Samples kept from a VCD dump before the rest is ignored
pub const DEFAULT_VCD_MAX_SAMPLES: usize = 200_000;

/// Configuration error types
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("RON error: {0}")]
    Ron(#[from] ron::error::SpannedError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] ron::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// VCD import settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VcdOptions {
    /// Hard cap on the number of imported samples
    pub max_samples: usize,
}

impl Default for VcdOptions {
    fn default() -> Self {
        Self {
            max_samples: DEFAULT_VCD_MAX_SAMPLES,
        }
    }
}

/// Settings applied when a document is created
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DocumentConfig {
    /// Sample count of a new, empty document
    pub default_sample_count: usize,
    /// Undo depth; older snapshots are evicted
    pub max_undo_steps: usize,
    /// Document files declaring more samples than this are rejected
    pub max_sample_count: usize,
    /// VCD importer settings
    pub vcd: VcdOptions,
}

impl Default for DocumentConfig {
    fn default() -> Self {
        Self {
            default_sample_count: DEFAULT_SAMPLE_COUNT,
            max_undo_steps: DEFAULT_MAX_HISTORY,
            max_sample_count: DEFAULT_MAX_SAMPLE_COUNT,
            vcd: VcdOptions::default(),
        }
    }
}

impl DocumentConfig {
    /// Parse a configuration from RON text; missing fields keep their defaults
    pub fn from_ron_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = ron::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration from a RON file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_ron_str(&text)
    }

    /// Serialize to pretty RON
    pub fn to_ron_string(&self) -> Result<String, ConfigError> {
        Ok(ron::ser::to_string_pretty(
            self,
            ron::ser::PrettyConfig::default(),
        )?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.default_sample_count == 0 {
            return Err(ConfigError::Invalid(
                "default_sample_count must be greater than 0".to_string(),
            ));
        }
        if self.max_sample_count == 0 {
            return Err(ConfigError::Invalid(
                "max_sample_count must be greater than 0".to_string(),
            ));
        }
        if self.vcd.max_samples == 0 {
            return Err(ConfigError::Invalid(
                "vcd.max_samples must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}
