//! # Configuration File Parser
//!
//! Reads and parses `reviewkit.toml`, the optional user configuration file
//! that customizes ReviewKit's behavior without requiring CLI flags.
//! Supports:
//!
//! - `[sentiment]` — sentiment service URL and language tag
//! - `[summarize]` — primary-engine enablement
//! - `[summarize.primary]` / `[summarize.fallback]` — engine endpoints
//! - `[output]` — default report path
//!
//! Example `reviewkit.toml`:
//!
//! ```toml
//! [sentiment]
//! url = "https://nlu.example.com"
//! language = "en"
//!
//! [summarize]
//! primary_enabled = false
//!
//! [summarize.primary]
//! url = "http://localhost:8008"
//! model = "granite-7b"
//!
//! [summarize.fallback]
//! url = "http://localhost:11434"
//! model = "mistral"
//!
//! [output]
//! path = "output/summaries.csv"
//! ```
//!
//! The sentiment API key is never configured in the file; it comes from
//! the `SENTIMENT_API_KEY` environment variable (or a `.env` file).

use std::path::Path;

use serde::Deserialize;

use crate::error::{Result, ReviewKitError};

/// Default config file name.
pub const CONFIG_FILE_NAME: &str = "reviewkit.toml";

/// Default fallback engine endpoint and model.
pub const DEFAULT_FALLBACK_URL: &str = "http://localhost:11434";
pub const DEFAULT_FALLBACK_MODEL: &str = "mistral";

/// Default model name for the primary engine when only its URL is given.
pub const DEFAULT_PRIMARY_MODEL: &str = "granite-7b";

/// Default report path when neither config nor CLI provide one.
pub const DEFAULT_OUTPUT_PATH: &str = "output/summaries.csv";

/// Top-level reviewkit.toml structure.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ReviewKitConfig {
    /// Sentiment service settings.
    pub sentiment: SentimentConfig,
    /// Summarization engine settings.
    pub summarize: SummarizeConfig,
    /// Report output settings.
    pub output: OutputConfig,
}

/// Sentiment service configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SentimentConfig {
    /// Service base URL (e.g., "https://nlu.example.com").
    pub url: Option<String>,
    /// Language tag sent with every request. Defaults to "en".
    pub language: Option<String>,
}

/// Summarization configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SummarizeConfig {
    /// Whether the primary engine is used at all. `false` forces every
    /// request straight to the fallback engine.
    pub primary_enabled: Option<bool>,
    /// Primary engine endpoint.
    pub primary: EngineConfig,
    /// Fallback engine endpoint.
    pub fallback: EngineConfig,
}

/// One summarization engine endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub url: Option<String>,
    pub model: Option<String>,
}

/// Report output configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Where batch reports are written.
    pub path: Option<String>,
}

/// Read and parse a reviewkit.toml file from the given directory.
///
/// Returns `None` if the file doesn't exist (config is optional).
/// Returns an error if the file exists but can't be parsed.
pub fn read_config(dir: &Path) -> Result<Option<ReviewKitConfig>> {
    let path = dir.join(CONFIG_FILE_NAME);
    if !path.exists() {
        return Ok(None);
    }

    let content = std::fs::read_to_string(&path).map_err(|e| ReviewKitError::Config {
        message: format!("Failed to read {}: {}", path.display(), e),
    })?;

    let config: ReviewKitConfig = toml::from_str(&content).map_err(|e| ReviewKitError::Config {
        message: format!("Failed to parse {}: {}", path.display(), e),
    })?;

    // Validate semantic constraints that serde can't enforce.
    config.validate()?;

    Ok(Some(config))
}

impl ReviewKitConfig {
    /// Validate semantic constraints that serde cannot enforce.
    ///
    /// Call this immediately after parsing, so configuration mistakes
    /// surface before any service call is attempted.
    pub fn validate(&self) -> Result<()> {
        if self.summarize.primary_enabled == Some(true) && self.summarize.primary.url.is_none() {
            return Err(ReviewKitError::Config {
                message: "summarize.primary_enabled is true but [summarize.primary] has no url. \
                          Add one or set primary_enabled = false."
                    .to_string(),
            });
        }
        Ok(())
    }
}
