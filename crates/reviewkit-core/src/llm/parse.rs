//! # Model Output Parser
//!
//! Extracts the `summary` and `rating` fields from raw generative-model
//! text using line-oriented heuristics. Models rarely follow the requested
//! format exactly — extra prose, reordered lines, missing fields all
//! happen — so the parser scans every line and the last match wins.

use crate::rating::{extract_rating, Rating};

/// Sentinel summary when no summary line could be found.
pub const SUMMARY_NOT_FOUND: &str = "Summary not found";

/// Structured fields extracted from raw model output.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelOutput {
    pub summary: String,
    pub rating: Rating,
}

/// Parse raw model text into a summary and a rating.
///
/// Per line, case-insensitively: a line containing `summary` yields the
/// text after its first `:`; otherwise a line containing `rating` runs
/// the text after its first `:` through [`extract_rating`]. A line with
/// both keywords counts as a summary line. Later matches overwrite
/// earlier ones. Lines without a `:` are ignored.
pub fn parse_model_output(raw: &str) -> ModelOutput {
    let mut summary: Option<String> = None;
    let mut rating = Rating::NotAvailable;

    for line in raw.lines() {
        let lower = line.to_lowercase();
        if lower.contains("summary") {
            if let Some((_, rest)) = line.split_once(':') {
                summary = Some(rest.trim().to_string());
            }
        } else if lower.contains("rating") {
            if let Some((_, rest)) = line.split_once(':') {
                rating = extract_rating(rest);
            }
        }
    }

    ModelOutput {
        summary: summary.unwrap_or_else(|| SUMMARY_NOT_FOUND.to_string()),
        rating,
    }
}
