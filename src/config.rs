//! Formatter configuration loaded from an optional YAML file.
//!
//! Every field has a default, so an empty file (or no file at all) yields the
//! standard settings:
//!
//! ```yaml
//! min_sentence_length: 100
//! max_sentence_length: 512
//! date_scan_segments: 2
//! ```

use crate::dates::DATE_SCAN_SEGMENTS;
use crate::segmenter::{MAX_SENTLENGTH, MIN_SENTLENGTH, SentenceSegmenter};
use serde::Deserialize;
use std::path::Path;
use thiserror::Error;
use tracing::{info, instrument};

/// Errors raised while loading the formatter configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("sentence length window is empty: min {min} must be below max {max}")]
    EmptyWindow { min: usize, max: usize },
}

/// Tunable knobs of the formatting pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct FormatterConfig {
    /// Sentences must be longer than this many characters.
    pub min_sentence_length: usize,
    /// Sentences must be shorter than this many characters.
    pub max_sentence_length: usize,
    /// Leading content segments searched for an in-text date.
    pub date_scan_segments: usize,
}

impl Default for FormatterConfig {
    fn default() -> Self {
        Self {
            min_sentence_length: MIN_SENTLENGTH,
            max_sentence_length: MAX_SENTLENGTH,
            date_scan_segments: DATE_SCAN_SEGMENTS,
        }
    }
}

impl FormatterConfig {
    /// Parse and validate a YAML document.
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        let config: FormatterConfig = if yaml.trim().is_empty() {
            FormatterConfig::default()
        } else {
            serde_yaml::from_str(yaml)?
        };
        config.validate()?;
        Ok(config)
    }

    /// Load from `path`, or fall back to defaults when no path is given.
    #[instrument(level = "info")]
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let Some(path) = path else {
            info!("No config file given; using defaults");
            return Ok(Self::default());
        };
        let yaml = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let config = Self::from_yaml(&yaml)?;
        info!(?config, "Loaded configuration");
        Ok(config)
    }

    pub fn segmenter(&self) -> SentenceSegmenter {
        SentenceSegmenter::new(self.min_sentence_length, self.max_sentence_length)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.min_sentence_length >= self.max_sentence_length {
            return Err(ConfigError::EmptyWindow {
                min: self.min_sentence_length,
                max: self.max_sentence_length,
            });
        }
        Ok(())
    }
}
