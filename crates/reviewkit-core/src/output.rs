//! # Report Output
//!
//! Writes the batch analysis report as UTF-8 delimited text. The column
//! order and naming — `original_review, summary, predicted_rating,
//! rating_stars, sentiment, date` — is the compatibility surface for
//! downstream consumers and must never be reordered or renamed.

use std::io::Write;

use crate::error::{Result, ReviewKitError};
use crate::pipeline::AnalysisResult;

/// The report header, in contract order.
pub const REPORT_COLUMNS: [&str; 6] = [
    "original_review",
    "summary",
    "predicted_rating",
    "rating_stars",
    "sentiment",
    "date",
];

/// Write the full report for a batch: header row plus one row per result,
/// in input order. Results without a date render an empty date cell.
pub fn write_report<W: Write>(writer: &mut W, results: &[AnalysisResult]) -> Result<()> {
    writeln!(writer, "{}", REPORT_COLUMNS.join(",")).map_err(|e| ReviewKitError::Output {
        message: "writing report header".to_string(),
        source: e,
    })?;

    for (i, result) in results.iter().enumerate() {
        let fields = [
            csv_escape(&result.original_review),
            csv_escape(&result.summary),
            csv_escape(&result.predicted_rating.to_string()),
            csv_escape(&result.rating_stars),
            csv_escape(&result.sentiment.to_string()),
            csv_escape(result.date.as_deref().unwrap_or_default()),
        ];
        writeln!(writer, "{}", fields.join(",")).map_err(|e| ReviewKitError::Output {
            message: format!("writing report row {}", i + 1),
            source: e,
        })?;
    }

    Ok(())
}

/// Escape a string for CSV: quote if it contains comma, quote, or newline.
fn csv_escape(s: &str) -> String {
    if s.contains(',') || s.contains('"') || s.contains('\n') || s.contains('\r') {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}
