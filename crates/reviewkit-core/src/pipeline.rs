//! # Analysis Orchestrator
//!
//! Sequences the per-record analysis: strict validation and cleaning,
//! the sentiment call, the primary-then-fallback summarization chain, and
//! assembly of the final [`AnalysisResult`]. Batches run as a strict
//! sequential loop — output order must match input order, and the
//! external services are the bottleneck anyway.
//!
//! Failure policy: a sentiment failure degrades that record's sentiment
//! to `error`; a primary summarization failure falls through to the
//! fallback engine; a fallback failure degrades summary and rating to
//! sentinels. None of these abort a batch. Only ingestion errors (which
//! happen before this module is reached) are fatal.

use serde::Serialize;

use crate::config::{
    ReviewKitConfig, DEFAULT_FALLBACK_MODEL, DEFAULT_FALLBACK_URL, DEFAULT_PRIMARY_MODEL,
};
use crate::error::{Result, ReviewKitError};
use crate::ingest::ReviewRecord;
use crate::llm::client::{FallbackEngine, PrimaryEngine};
use crate::llm::parse::parse_model_output;
use crate::llm::{Engine, SummaryOutcome};
use crate::rating::Rating;
use crate::sentiment::{Sentiment, SentimentClient};
use crate::text;

/// The terminal artifact of the pipeline: one fully analyzed review.
///
/// Field order mirrors the output report contract; `date` is absent for
/// single-review analysis.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisResult {
    pub original_review: String,
    pub summary: String,
    pub predicted_rating: Rating,
    pub rating_stars: String,
    pub sentiment: Sentiment,
    pub engine_used: Engine,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
}

/// Progress callback for batch runs: (current, total).
pub type ProgressFn<'a> = &'a (dyn Fn(usize, usize) + Sync);

/// Holds the service handles for the life of the process. The clients
/// are stateless, so one `Analyzer` serves any number of requests.
#[derive(Debug, Clone)]
pub struct Analyzer {
    sentiment: SentimentClient,
    primary: Option<PrimaryEngine>,
    fallback: FallbackEngine,
    language: String,
}

impl Analyzer {
    pub fn new(
        sentiment: SentimentClient,
        primary: Option<PrimaryEngine>,
        fallback: FallbackEngine,
        language: impl Into<String>,
    ) -> Self {
        Self {
            sentiment,
            primary,
            fallback,
            language: language.into(),
        }
    }

    /// Build an analyzer from optional config plus the environment.
    ///
    /// The sentiment URL comes from config or `SENTIMENT_URL`; the API key
    /// always comes from `SENTIMENT_API_KEY`. Engine endpoints fall back
    /// to local defaults. `primary_enabled = false` (or no primary URL)
    /// means every request goes straight to the fallback engine.
    pub fn from_config(config: Option<&ReviewKitConfig>) -> Result<Self> {
        let sentiment_url = config
            .and_then(|c| c.sentiment.url.clone())
            .or_else(|| std::env::var("SENTIMENT_URL").ok())
            .ok_or_else(|| ReviewKitError::Config {
                message: "No sentiment service URL found. Set SENTIMENT_URL or [sentiment].url in reviewkit.toml.".to_string(),
            })?;
        let api_key = std::env::var("SENTIMENT_API_KEY").map_err(|_| ReviewKitError::Config {
            message: "No sentiment API key found. Set the SENTIMENT_API_KEY environment variable."
                .to_string(),
        })?;

        let language = config
            .and_then(|c| c.sentiment.language.clone())
            .unwrap_or_else(|| "en".to_string());

        let primary_enabled = config
            .and_then(|c| c.summarize.primary_enabled)
            .unwrap_or(true);
        let primary = if primary_enabled {
            config
                .and_then(|c| c.summarize.primary.url.clone())
                .map(|url| {
                    let model = config
                        .and_then(|c| c.summarize.primary.model.clone())
                        .unwrap_or_else(|| DEFAULT_PRIMARY_MODEL.to_string());
                    PrimaryEngine::new(url, model)
                })
        } else {
            None
        };

        let fallback = FallbackEngine::new(
            config
                .and_then(|c| c.summarize.fallback.url.clone())
                .unwrap_or_else(|| DEFAULT_FALLBACK_URL.to_string()),
            config
                .and_then(|c| c.summarize.fallback.model.clone())
                .unwrap_or_else(|| DEFAULT_FALLBACK_MODEL.to_string()),
        );

        Ok(Self::new(
            SentimentClient::new(sentiment_url, api_key),
            primary,
            fallback,
            language,
        ))
    }

    /// Analyze a single review. Strictly validated: empty input is a
    /// hard rejection, unlike batch rows (which are dropped at ingestion).
    pub async fn analyze_one(&self, review: &str) -> Result<AnalysisResult> {
        let validated = text::validate_strict(review)?;
        let cleaned = text::clean(&validated);

        let sentiment = self.classify(&cleaned).await;
        let outcome = self.summarize(&cleaned).await;

        Ok(assemble(cleaned, outcome, sentiment, None))
    }

    /// Analyze a batch of ingested records in input order.
    ///
    /// Records with an empty date get today's date here. The ingestor
    /// already substitutes its fixed fallback, so this only fires for
    /// records constructed some other way.
    pub async fn analyze_batch(
        &self,
        records: &[ReviewRecord],
        progress: Option<ProgressFn<'_>>,
    ) -> Vec<AnalysisResult> {
        let total = records.len();
        let mut results = Vec::with_capacity(total);

        for (i, record) in records.iter().enumerate() {
            let cleaned = text::clean(&record.review);

            let sentiment = self.classify(&cleaned).await;
            let outcome = self.summarize(&cleaned).await;

            let date = resolve_batch_date(&record.date);

            results.push(assemble(cleaned, outcome, sentiment, Some(date)));

            if let Some(cb) = progress {
                cb(i + 1, total);
            }
        }

        results
    }

    /// Sentiment call with per-record degradation: failures become the
    /// `error` marker, never a batch abort.
    async fn classify(&self, text: &str) -> Sentiment {
        match self.sentiment.analyze(text, &self.language).await {
            Ok(s) => s,
            Err(e) => {
                tracing::warn!("Sentiment analysis failed, marking record: {}", e);
                Sentiment::Error
            }
        }
    }

    /// The primary-then-fallback summarization chain, as explicit
    /// branching on result values rather than error-driven control flow.
    async fn summarize(&self, review: &str) -> SummaryOutcome {
        if let Some(primary) = &self.primary {
            match primary.generate(review).await {
                Ok(raw) => return primary_outcome(&raw),
                Err(e) => {
                    tracing::warn!("Primary summarization failed, falling back: {}", e);
                }
            }
        }
        self.fallback.summarize(review).await
    }
}

/// Orchestration-time date fallback: an empty date becomes today's
/// calendar date. Distinct from the ingestor's fixed literal fallback,
/// which already guarantees a non-empty date for ingested records.
fn resolve_batch_date(date: &str) -> String {
    if date.trim().is_empty() {
        chrono::Local::now().date_naive().to_string()
    } else {
        date.to_string()
    }
}

/// Turn raw primary-engine text into a structured outcome.
fn primary_outcome(raw: &str) -> SummaryOutcome {
    let parsed = parse_model_output(raw);
    SummaryOutcome {
        summary: parsed.summary,
        predicted_rating: parsed.rating,
        engine_used: Engine::Primary,
    }
}

/// Compose the final result. The star rendering rounds to the nearest
/// whole star and is defined (empty) for the rating sentinel.
pub fn assemble(
    original_review: String,
    outcome: SummaryOutcome,
    sentiment: Sentiment,
    date: Option<String>,
) -> AnalysisResult {
    AnalysisResult {
        original_review,
        rating_stars: outcome.predicted_rating.stars(),
        summary: outcome.summary,
        predicted_rating: outcome.predicted_rating,
        sentiment,
        engine_used: outcome.engine_used,
        date,
    }
}
