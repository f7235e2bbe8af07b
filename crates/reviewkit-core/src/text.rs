//! # Text Normalization
//!
//! Cleans and validates free-form review text before it enters the
//! pipeline. Two validators exist with different thresholds: `is_valid`
//! is the lenient boolean signal (minimum length 10), `validate_strict`
//! is the hard gate used by the single-review path and rejects only
//! empty input. The asymmetry matches observed product behavior and is
//! kept rather than unified.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::{Result, ReviewKitError};

/// Minimum trimmed length for a review to count as meaningful.
pub const MIN_REVIEW_LEN: usize = 10;

static WHITESPACE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// Collapse every whitespace run (spaces, tabs, newlines) to a single
/// space and trim the ends. Total over all inputs; empty in, empty out.
pub fn clean(text: &str) -> String {
    WHITESPACE_RE.replace_all(text, " ").trim().to_string()
}

/// Lenient validity check: trimmed length must reach [`MIN_REVIEW_LEN`].
pub fn is_valid(text: &str) -> bool {
    text.trim().len() >= MIN_REVIEW_LEN
}

/// Strict validator for the single-review path. Returns the trimmed text
/// or fails if nothing remains after trimming.
pub fn validate_strict(text: &str) -> Result<String> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(ReviewKitError::Validation);
    }
    Ok(trimmed.to_string())
}
