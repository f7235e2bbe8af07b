//! # Tabular Ingestion
//!
//! Turns raw uploaded bytes into canonical review records. Uploads are
//! messy: comma or tab delimited, arbitrary header casing, blank rows,
//! missing date columns. This module handles all of it deterministically:
//!
//! - Delimiter sniffing over the first [`SNIFF_WINDOW`] bytes (comma wins
//!   ties). This is a heuristic, not a full sniffer — a file with more
//!   literal commas in prose than actual delimiters will be misdetected.
//! - Case-insensitive, whitespace-trimmed header resolution. `review` is
//!   required; the date column is `date`, falling back to `timestamp`.
//! - Rows with an empty review cell are dropped silently, not errored.
//! - Missing date cells get the fixed literal [`FALLBACK_DATE`].

use indexmap::IndexMap;

use crate::error::{Result, ReviewKitError};

/// Fixed literal date substituted when a row has no usable date value.
pub const FALLBACK_DATE: &str = "2025-06-10";

/// How many bytes of the file to sample when sniffing the delimiter.
pub const SNIFF_WINDOW: usize = 2048;

/// One normalized review row, ready for analysis.
#[derive(Debug, Clone, PartialEq)]
pub struct ReviewRecord {
    pub review: String,
    pub date: String,
}

/// Reject filenames that aren't a delimited-text type.
///
/// Accepts `.csv` and `.tsv`, case-insensitive. The actual delimiter is
/// sniffed from content, so a comma-delimited `.tsv` still parses.
pub fn check_extension(filename: &str) -> Result<()> {
    let extension = filename
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_lowercase())
        .unwrap_or_default();

    match extension.as_str() {
        "csv" | "tsv" => Ok(()),
        _ => Err(ReviewKitError::UnsupportedFormat { extension }),
    }
}

/// Choose the delimiter by counting candidates in the sniff window.
/// Comma wins ties so plain single-column files parse as CSV.
fn sniff_delimiter(text: &str) -> u8 {
    let window = &text.as_bytes()[..text.len().min(SNIFF_WINDOW)];
    let commas = window.iter().filter(|b| **b == b',').count();
    let tabs = window.iter().filter(|b| **b == b'\t').count();
    if commas >= tabs {
        b','
    } else {
        b'\t'
    }
}

/// Build the case-insensitive header map: lowercased, trimmed header name
/// to column index. Duplicate headers resolve to the last occurrence.
fn resolve_headers(headers: &csv::StringRecord) -> Result<IndexMap<String, usize>> {
    if headers.is_empty() || headers.iter().all(|h| h.trim().is_empty()) {
        return Err(ReviewKitError::Format);
    }

    let mut map = IndexMap::new();
    for (idx, name) in headers.iter().enumerate() {
        map.insert(name.trim().to_lowercase(), idx);
    }
    Ok(map)
}

/// Ingest an uploaded delimited file into review records.
///
/// The full pipeline: extension gate, UTF-8 decode, delimiter sniff,
/// header resolution, per-row extraction with the trim-and-skip policy,
/// and the fixed fallback date. Fails if zero records survive.
pub fn ingest_records(bytes: &[u8], filename: &str) -> Result<Vec<ReviewRecord>> {
    check_extension(filename)?;

    let text = std::str::from_utf8(bytes).map_err(|_| ReviewKitError::Encoding)?;
    let delimiter = sniff_delimiter(text);

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .flexible(true)
        .from_reader(text.as_bytes());

    let headers = reader
        .headers()
        .map_err(|_| ReviewKitError::Format)?
        .clone();
    let field_map = resolve_headers(&headers)?;

    let review_idx = *field_map.get("review").ok_or(ReviewKitError::Schema)?;
    let date_idx = field_map
        .get("date")
        .or_else(|| field_map.get("timestamp"))
        .copied();

    let mut records = Vec::new();
    for (row_num, result) in reader.records().enumerate() {
        let row = result.map_err(|_| ReviewKitError::Format)?;

        let review = row.get(review_idx).unwrap_or("").trim();
        if review.is_empty() {
            tracing::debug!("Skipping row {}: empty review cell", row_num + 1);
            continue;
        }

        let date = date_idx
            .and_then(|idx| row.get(idx))
            .map(str::trim)
            .filter(|d| !d.is_empty())
            .unwrap_or(FALLBACK_DATE);

        records.push(ReviewRecord {
            review: review.to_string(),
            date: date.to_string(),
        });
    }

    if records.is_empty() {
        return Err(ReviewKitError::EmptyResult);
    }

    tracing::debug!("Ingested {} review records from {}", records.len(), filename);
    Ok(records)
}

/// Review-column-only ingestion for contexts that don't care about dates.
///
/// Same delimiter sniffing, header resolution, and trim-and-skip policy
/// as [`ingest_records`]; no date handling at all.
pub fn ingest_reviews(bytes: &[u8], filename: &str) -> Result<Vec<String>> {
    check_extension(filename)?;

    let text = std::str::from_utf8(bytes).map_err(|_| ReviewKitError::Encoding)?;
    let delimiter = sniff_delimiter(text);

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .flexible(true)
        .from_reader(text.as_bytes());

    let headers = reader
        .headers()
        .map_err(|_| ReviewKitError::Format)?
        .clone();
    let field_map = resolve_headers(&headers)?;
    let review_idx = *field_map.get("review").ok_or(ReviewKitError::Schema)?;

    let mut reviews = Vec::new();
    for result in reader.records() {
        let row = result.map_err(|_| ReviewKitError::Format)?;
        let review = row.get(review_idx).unwrap_or("").trim();
        if !review.is_empty() {
            reviews.push(review.to_string());
        }
    }

    if reviews.is_empty() {
        return Err(ReviewKitError::EmptyResult);
    }

    Ok(reviews)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sniff_comma() {
        assert_eq!(sniff_delimiter("review,date\na,b\n"), b',');
    }

    #[test]
    fn test_sniff_tab() {
        assert_eq!(sniff_delimiter("review\tdate\na\tb\n"), b'\t');
    }

    #[test]
    fn test_sniff_tie_prefers_comma() {
        assert_eq!(sniff_delimiter("a,b\tc"), b',');
        assert_eq!(sniff_delimiter("no delimiters at all"), b',');
    }

    #[test]
    fn test_sniff_only_samples_window() {
        // Tabs past the window must not flip the decision.
        let mut text = "a,b,c".to_string();
        text.push_str(&" ".repeat(SNIFF_WINDOW));
        text.push_str(&"\t".repeat(50));
        assert_eq!(sniff_delimiter(&text), b',');
    }

    #[test]
    fn test_check_extension() {
        assert!(check_extension("reviews.csv").is_ok());
        assert!(check_extension("reviews.TSV").is_ok());
        assert!(check_extension("reviews.xlsx").is_err());
        assert!(check_extension("reviews").is_err());
    }

    #[test]
    fn test_ingest_basic() {
        let data = b"review,date\nLoved it!,2024-01-01\nHated it.,2024-01-02\n";
        let records = ingest_records(data, "reviews.csv").unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].review, "Loved it!");
        assert_eq!(records[0].date, "2024-01-01");
    }

    #[test]
    fn test_ingest_case_insensitive_headers() {
        let data = b" Review ,TIMESTAMP\nGreat product,2024-03-01\n";
        let records = ingest_records(data, "reviews.csv").unwrap();
        assert_eq!(records[0].review, "Great product");
        assert_eq!(records[0].date, "2024-03-01");
    }

    #[test]
    fn test_ingest_timestamp_fallback_column() {
        let data = b"review,timestamp\nFine,2024-05-05\n";
        let records = ingest_records(data, "reviews.csv").unwrap();
        assert_eq!(records[0].date, "2024-05-05");
    }

    #[test]
    fn test_ingest_date_preferred_over_timestamp() {
        let data = b"review,timestamp,date\nFine,2023-01-01,2024-01-01\n";
        let records = ingest_records(data, "reviews.csv").unwrap();
        assert_eq!(records[0].date, "2024-01-01");
    }

    #[test]
    fn test_ingest_missing_date_gets_fallback() {
        let data = b"review,date\nNo date here,\n";
        let records = ingest_records(data, "reviews.csv").unwrap();
        assert_eq!(records[0].date, FALLBACK_DATE);
    }

    #[test]
    fn test_ingest_no_date_column_gets_fallback() {
        let data = b"review\nJust a review\n";
        let records = ingest_records(data, "reviews.csv").unwrap();
        assert_eq!(records[0].date, FALLBACK_DATE);
    }

    #[test]
    fn test_ingest_skips_blank_rows_silently() {
        let data = b"review,date\nFirst,2024-01-01\n   ,2024-01-02\nThird,2024-01-03\n";
        let records = ingest_records(data, "reviews.csv").unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].review, "First");
        assert_eq!(records[1].review, "Third");
    }

    #[test]
    fn test_ingest_zero_valid_rows() {
        let data = b"review,date\n,2024-01-01\n  ,2024-01-02\n";
        let err = ingest_records(data, "reviews.csv").unwrap_err();
        assert!(matches!(err, ReviewKitError::EmptyResult));
    }

    #[test]
    fn test_ingest_missing_review_column() {
        let data = b"comment,date\nNice,2024-01-01\n";
        let err = ingest_records(data, "reviews.csv").unwrap_err();
        assert!(matches!(err, ReviewKitError::Schema));
    }

    #[test]
    fn test_ingest_invalid_utf8() {
        let data = [0x72, 0x65, 0xff, 0xfe, 0x77];
        let err = ingest_records(&data, "reviews.csv").unwrap_err();
        assert!(matches!(err, ReviewKitError::Encoding));
    }

    #[test]
    fn test_ingest_empty_file() {
        let err = ingest_records(b"", "reviews.csv").unwrap_err();
        assert!(matches!(err, ReviewKitError::Format));
    }

    #[test]
    fn test_ingest_wrong_extension() {
        let err = ingest_records(b"review\nx\n", "reviews.pdf").unwrap_err();
        assert!(matches!(err, ReviewKitError::UnsupportedFormat { .. }));
    }

    #[test]
    fn test_ingest_tab_delimited() {
        let data = b"review\tdate\nTab separated\t2024-06-01\n";
        let records = ingest_records(data, "reviews.tsv").unwrap();
        assert_eq!(records[0].review, "Tab separated");
        assert_eq!(records[0].date, "2024-06-01");
    }

    #[test]
    fn test_ingest_quoted_fields_with_commas() {
        let data = b"review,date\n\"Good, but pricey\",2024-02-02\n";
        let records = ingest_records(data, "reviews.csv").unwrap();
        assert_eq!(records[0].review, "Good, but pricey");
    }

    #[test]
    fn test_ingest_end_to_end_spec_example() {
        // Mixed-case headers, one blank review row interleaved.
        let data = b"Review,Timestamp\nLoved it!,2024-01-01\n,2024-01-02\n";
        let records = ingest_records(data, "upload.csv").unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(
            records[0],
            ReviewRecord {
                review: "Loved it!".to_string(),
                date: "2024-01-01".to_string(),
            }
        );
    }

    #[test]
    fn test_ingest_reviews_single_column() {
        let data = b"REVIEW\nFirst\n\nSecond\n";
        let reviews = ingest_reviews(data, "reviews.csv").unwrap();
        assert_eq!(reviews, vec!["First", "Second"]);
    }

    #[test]
    fn test_ingest_reviews_requires_review_column() {
        let data = b"text\nsomething\n";
        let err = ingest_reviews(data, "reviews.csv").unwrap_err();
        assert!(matches!(err, ReviewKitError::Schema));
    }

    #[test]
    fn test_ingest_reviews_empty_result() {
        let data = b"review\n\n  \n";
        let err = ingest_reviews(data, "reviews.csv").unwrap_err();
        assert!(matches!(err, ReviewKitError::EmptyResult));
    }
}
