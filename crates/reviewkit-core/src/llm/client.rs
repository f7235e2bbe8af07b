//! # Summarization Engine Clients
//!
//! HTTP clients for the two generative summarization services. Both speak
//! the same generate-style wire protocol (`POST {url}/api/generate` with
//! `{model, prompt, stream: false}`, raw text in the `response` field),
//! but they expose different contracts:
//!
//! - [`PrimaryEngine`] returns the raw model text and leaves parsing to
//!   the caller. Any failure is surfaced as a `Service` error so the
//!   orchestrator can fall back.
//! - [`FallbackEngine`] is the end of the line: it extracts its own
//!   fields and always returns a structured [`SummaryOutcome`], degrading
//!   to sentinel values on timeout or transport failure instead of
//!   erroring. A slow fallback must never kill a batch record.

use std::sync::LazyLock;
use std::time::Duration;

use regex::Regex;

use crate::error::{Result, ReviewKitError};
use crate::llm::{prompt, Engine, SummaryOutcome};
use crate::rating::{extract_rating, Rating};

/// Maximum time to wait for the primary engine before falling back.
const PRIMARY_TIMEOUT: Duration = Duration::from_secs(45);

/// Maximum time to wait for the fallback engine. Generous because a cold
/// model load on the far side can take a while.
const FALLBACK_TIMEOUT: Duration = Duration::from_secs(90);

/// Sentinel summary when the fallback engine times out.
pub const SUMMARY_TIMED_OUT: &str = "Timed out while generating a summary.";

/// Sentinel summary when the fallback engine fails outright.
pub const SUMMARY_ERROR: &str = "Error from summarization service.";

static SUMMARY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)summary:\s*([^\n]+)").unwrap());
static RATING_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)predicted rating:\s*([0-9.]+)").unwrap());

/// Transport-level failure of a generate call. Timeouts stay structurally
/// distinct so the fallback engine can pick its sentinel without
/// inspecting message text.
#[derive(Debug)]
enum GenerateError {
    TimedOut(Duration),
    Failed(String),
}

impl GenerateError {
    fn into_service_error(self) -> ReviewKitError {
        ReviewKitError::Service {
            message: match self {
                GenerateError::TimedOut(timeout) => format!(
                    "Summarization request timed out after {}s",
                    timeout.as_secs()
                ),
                GenerateError::Failed(message) => message,
            },
        }
    }
}

/// Build an HTTP client with a strict timeout so requests never hang
/// indefinitely on flaky networks or partial service outages.
fn build_http_client(timeout: Duration) -> reqwest::Client {
    reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .unwrap_or_else(|_| reqwest::Client::new())
}

/// Call a generate-style endpoint and return the raw response text.
async fn call_generate(
    url: &str,
    model: &str,
    prompt: &str,
    timeout: Duration,
) -> std::result::Result<String, GenerateError> {
    let client = build_http_client(timeout);

    let body = serde_json::json!({
        "model": model,
        "prompt": prompt,
        "stream": false
    });

    let response = client
        .post(format!("{}/api/generate", url.trim_end_matches('/')))
        .header("content-type", "application/json")
        .json(&body)
        .send()
        .await
        .map_err(|e| {
            if e.is_timeout() {
                GenerateError::TimedOut(timeout)
            } else {
                GenerateError::Failed(format!(
                    "Failed to call summarization service at {}: {}",
                    url, e
                ))
            }
        })?;

    let status = response.status();
    let response_text = response.text().await.map_err(|e| {
        if e.is_timeout() {
            GenerateError::TimedOut(timeout)
        } else {
            GenerateError::Failed(format!("Failed to read summarization response: {}", e))
        }
    })?;

    if !status.is_success() {
        return Err(GenerateError::Failed(format!(
            "Summarization service returned {}: {}",
            status,
            truncate(&response_text, 500),
        )));
    }

    let parsed: serde_json::Value = serde_json::from_str(&response_text).map_err(|e| {
        GenerateError::Failed(format!("Failed to parse summarization response JSON: {}", e))
    })?;

    let text = parsed["response"].as_str().ok_or_else(|| {
        GenerateError::Failed("Summarization response missing 'response' field".to_string())
    })?;

    Ok(text.to_string())
}

/// The primary summarization engine.
#[derive(Debug, Clone)]
pub struct PrimaryEngine {
    pub url: String,
    pub model: String,
}

impl PrimaryEngine {
    pub fn new(url: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            model: model.into(),
        }
    }

    /// Send a review and return the raw model text. The caller runs it
    /// through [`super::parse::parse_model_output`].
    pub async fn generate(&self, review: &str) -> Result<String> {
        let prompt = prompt::summary_prompt(review);
        call_generate(&self.url, &self.model, &prompt, PRIMARY_TIMEOUT)
            .await
            .map_err(GenerateError::into_service_error)
    }
}

/// The fallback summarization engine.
#[derive(Debug, Clone)]
pub struct FallbackEngine {
    pub url: String,
    pub model: String,
}

impl FallbackEngine {
    pub fn new(url: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            model: model.into(),
        }
    }

    /// Summarize a review, always returning a structured outcome.
    ///
    /// Timeouts and transport failures degrade to sentinel summaries with
    /// the rating sentinel; they never propagate as errors.
    pub async fn summarize(&self, review: &str) -> SummaryOutcome {
        let prompt = prompt::summary_prompt(review);
        match call_generate(&self.url, &self.model, &prompt, FALLBACK_TIMEOUT).await {
            Ok(raw) => extract_outcome(&raw),
            Err(e) => degraded_outcome(e),
        }
    }
}

/// Map a fallback transport failure onto its sentinel outcome. Timeouts
/// get their own summary so a report row shows what went wrong.
fn degraded_outcome(error: GenerateError) -> SummaryOutcome {
    let summary = match error {
        GenerateError::TimedOut(_) => SUMMARY_TIMED_OUT,
        GenerateError::Failed(_) => SUMMARY_ERROR,
    };
    tracing::warn!(
        "Fallback summarization failed: {}",
        error.into_service_error()
    );
    SummaryOutcome {
        summary: summary.to_string(),
        predicted_rating: Rating::NotAvailable,
        engine_used: Engine::Fallback,
    }
}

/// Extract structured fields from raw fallback output using flexible
/// regexes (first match), robust across line formats.
fn extract_outcome(raw: &str) -> SummaryOutcome {
    let summary = SUMMARY_RE
        .captures(raw)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().trim().to_string())
        .unwrap_or_else(|| crate::llm::parse::SUMMARY_NOT_FOUND.to_string());

    let predicted_rating = RATING_RE
        .captures(raw)
        .and_then(|c| c.get(1))
        .map(|m| extract_rating(m.as_str()))
        .unwrap_or(Rating::NotAvailable);

    SummaryOutcome {
        summary,
        predicted_rating,
        engine_used: Engine::Fallback,
    }
}

fn truncate(s: &str, max: usize) -> &str {
    if s.len() <= max {
        s
    } else {
        &s[..max]
    }
}
