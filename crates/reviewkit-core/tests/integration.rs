//! End-to-end pipeline tests: ingestion through report output, using
//! canned service outcomes so nothing here touches the network.

use reviewkit_core::ingest::{ingest_records, FALLBACK_DATE};
use reviewkit_core::llm::parse::parse_model_output;
use reviewkit_core::llm::{Engine, SummaryOutcome};
use reviewkit_core::output::write_report;
use reviewkit_core::pipeline::assemble;
use reviewkit_core::rating::Rating;
use reviewkit_core::sentiment::Sentiment;
use reviewkit_core::ReviewKitError;

#[test]
fn ingest_csv_drops_blank_row_and_keeps_order() {
    let records = ingest_records(reviewkit_testutil::sample_csv(), "upload.csv").unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].review, "Loved it! Works exactly as described.");
    assert_eq!(records[0].date, "2024-01-01");
    assert_eq!(records[1].review, "Broke after a week. Very disappointed.");
    assert_eq!(records[1].date, "2024-01-03");
}

#[test]
fn ingest_tsv_resolves_timestamp_column() {
    let records = ingest_records(reviewkit_testutil::sample_tsv(), "upload.tsv").unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].date, "2024-01-01");
}

#[test]
fn ingest_all_blank_rows_is_empty_result() {
    let err = ingest_records(reviewkit_testutil::all_blank_csv(), "upload.csv").unwrap_err();
    assert!(matches!(err, ReviewKitError::EmptyResult));
}

#[test]
fn ingest_without_review_column_is_schema_error() {
    let err = ingest_records(reviewkit_testutil::no_review_column_csv(), "upload.csv").unwrap_err();
    assert!(matches!(err, ReviewKitError::Schema));
}

#[test]
fn ingested_records_without_date_get_fixed_fallback() {
    let data = b"review\nA dateless but perfectly valid review\n";
    let records = ingest_records(data, "upload.csv").unwrap();
    assert_eq!(records[0].date, FALLBACK_DATE);
}

#[test]
fn pipeline_round_trip_to_report() {
    let records = ingest_records(reviewkit_testutil::sample_csv(), "upload.csv").unwrap();

    // Stand in for the service calls with parsed canned model output.
    let outputs = [
        reviewkit_testutil::well_formed_model_output(),
        reviewkit_testutil::messy_model_output(),
    ];
    let sentiments = [Sentiment::Positive, Sentiment::Negative];

    let results: Vec<_> = records
        .iter()
        .zip(outputs.iter().zip(sentiments))
        .map(|(record, (raw, sentiment))| {
            let parsed = parse_model_output(raw);
            assemble(
                record.review.clone(),
                SummaryOutcome {
                    summary: parsed.summary,
                    predicted_rating: parsed.rating,
                    engine_used: Engine::Primary,
                },
                sentiment,
                Some(record.date.clone()),
            )
        })
        .collect();

    assert_eq!(results[0].predicted_rating, Rating::Value(4.5));
    assert_eq!(results[0].rating_stars, "⭐⭐⭐⭐⭐");
    assert_eq!(results[1].summary, "Mixed feelings overall.");
    assert_eq!(results[1].predicted_rating, Rating::Value(2.0));

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("summaries.csv");
    let mut file = std::fs::File::create(&path).unwrap();
    write_report(&mut file, &results).unwrap();

    let text = std::fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(
        lines[0],
        "original_review,summary,predicted_rating,rating_stars,sentiment,date"
    );
    assert_eq!(lines.len(), 3);
    assert!(lines[1].contains("Loved it!"));
    assert!(lines[1].ends_with("2024-01-01"));
    assert!(lines[2].contains("Broke after a week."));
    assert!(lines[2].contains("negative"));
}

#[test]
fn degraded_records_still_produce_report_rows() {
    let result = assemble(
        "The service was down for this one".to_string(),
        reviewkit_testutil::degraded_outcome(),
        Sentiment::Error,
        Some("2024-04-04".to_string()),
    );

    let mut buf = Vec::new();
    write_report(&mut buf, &[result]).unwrap();
    let text = String::from_utf8(buf).unwrap();
    let row = text.lines().nth(1).unwrap();
    assert!(row.contains("Error from summarization service."));
    assert!(row.contains(",N/A,"));
    assert!(row.contains(",error,"));
}
