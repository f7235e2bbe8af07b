//! # Sentiment Service Client
//!
//! Client for the external sentiment classification service. The service
//! is an NLU-style HTTP API: it takes a text and a language tag and
//! returns a document-level label. A failed call is never fatal — the
//! orchestrator degrades the record's sentiment to [`Sentiment::Error`]
//! and keeps going.

use std::fmt;
use std::time::Duration;

use serde::Serialize;

use crate::error::{Result, ReviewKitError};

/// Maximum time to wait for a sentiment response.
const SENTIMENT_TIMEOUT: Duration = Duration::from_secs(30);

/// Document-level sentiment label.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    Neutral,
    Negative,
    /// Degraded marker set by the orchestrator when the service call failed.
    Error,
}

impl Sentiment {
    /// Parse a service label. Unknown labels are a contract violation.
    pub fn from_label(label: &str) -> Result<Self> {
        match label {
            "positive" => Ok(Sentiment::Positive),
            "neutral" => Ok(Sentiment::Neutral),
            "negative" => Ok(Sentiment::Negative),
            other => Err(ReviewKitError::Service {
                message: format!("Sentiment service returned unknown label '{}'", other),
            }),
        }
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Sentiment::Positive => "positive",
            Sentiment::Neutral => "neutral",
            Sentiment::Negative => "negative",
            Sentiment::Error => "error",
        };
        write!(f, "{}", s)
    }
}

/// HTTP client for the sentiment service.
#[derive(Debug, Clone)]
pub struct SentimentClient {
    pub url: String,
    api_key: String,
}

impl SentimentClient {
    pub fn new(url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            api_key: api_key.into(),
        }
    }

    /// Build a client from `SENTIMENT_URL` / `SENTIMENT_API_KEY`.
    pub fn from_env() -> Result<Self> {
        let url = std::env::var("SENTIMENT_URL").map_err(|_| ReviewKitError::Config {
            message: "No sentiment service URL found. Set SENTIMENT_URL or [sentiment].url in reviewkit.toml.".to_string(),
        })?;
        let api_key = std::env::var("SENTIMENT_API_KEY").map_err(|_| ReviewKitError::Config {
            message: "No sentiment API key found. Set the SENTIMENT_API_KEY environment variable.".to_string(),
        })?;
        Ok(Self::new(url, api_key))
    }

    /// Classify a text's sentiment.
    pub async fn analyze(&self, text: &str, language: &str) -> Result<Sentiment> {
        let client = reqwest::Client::builder()
            .timeout(SENTIMENT_TIMEOUT)
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        let body = serde_json::json!({
            "text": text,
            "language": language,
            "features": { "sentiment": {} }
        });

        let response = client
            .post(format!("{}/v1/analyze", self.url.trim_end_matches('/')))
            .bearer_auth(&self.api_key)
            .header("content-type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| ReviewKitError::Service {
                message: format!("Failed to call sentiment service: {}", e),
            })?;

        let status = response.status();
        let response_text = response.text().await.map_err(|e| ReviewKitError::Service {
            message: format!("Failed to read sentiment response: {}", e),
        })?;

        if !status.is_success() {
            return Err(ReviewKitError::Service {
                message: format!("Sentiment service returned {}: {}", status, response_text),
            });
        }

        let parsed: serde_json::Value =
            serde_json::from_str(&response_text).map_err(|e| ReviewKitError::Service {
                message: format!("Failed to parse sentiment response JSON: {}", e),
            })?;

        let label = parsed["sentiment"]["document"]["label"]
            .as_str()
            .ok_or_else(|| ReviewKitError::Service {
                message: "Sentiment response missing sentiment.document.label".to_string(),
            })?;

        Sentiment::from_label(label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_label_known() {
        assert_eq!(Sentiment::from_label("positive").unwrap(), Sentiment::Positive);
        assert_eq!(Sentiment::from_label("neutral").unwrap(), Sentiment::Neutral);
        assert_eq!(Sentiment::from_label("negative").unwrap(), Sentiment::Negative);
    }

    #[test]
    fn test_from_label_unknown() {
        assert!(Sentiment::from_label("ecstatic").is_err());
        assert!(Sentiment::from_label("").is_err());
    }

    #[test]
    fn test_display_lowercase() {
        assert_eq!(Sentiment::Positive.to_string(), "positive");
        assert_eq!(Sentiment::Error.to_string(), "error");
    }

    #[test]
    fn test_serialize_lowercase() {
        assert_eq!(serde_json::to_string(&Sentiment::Negative).unwrap(), "\"negative\"");
        assert_eq!(serde_json::to_string(&Sentiment::Error).unwrap(), "\"error\"");
    }
}
