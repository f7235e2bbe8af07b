use reviewkit_core::llm::{Engine, SummaryOutcome};
use reviewkit_core::rating::Rating;

/// A well-formed comma-delimited upload: three reviews, mixed-case
/// headers, one blank review row that ingestion must drop.
pub fn sample_csv() -> &'static [u8] {
    b"Review,Date\n\
      Loved it! Works exactly as described.,2024-01-01\n\
      ,2024-01-02\n\
      Broke after a week. Very disappointed.,2024-01-03\n"
}

/// The same reviews as [`sample_csv`] but tab-delimited, with a
/// `timestamp` column instead of `date`.
pub fn sample_tsv() -> &'static [u8] {
    b"review\ttimestamp\n\
      Loved it! Works exactly as described.\t2024-01-01\n\
      \t2024-01-02\n\
      Broke after a week. Very disappointed.\t2024-01-03\n"
}

/// An upload where no row survives the trim-and-skip policy.
pub fn all_blank_csv() -> &'static [u8] {
    b"review,date\n,2024-01-01\n   ,2024-01-02\n"
}

/// An upload missing the required review column.
pub fn no_review_column_csv() -> &'static [u8] {
    b"comment,date\nNice product,2024-01-01\n"
}

/// Raw model output in the requested line format.
pub fn well_formed_model_output() -> &'static str {
    "Summary: Customer is very satisfied with the product.\nPredicted Rating: 4.5"
}

/// Raw model output with prose around the structured lines and the
/// rating line first.
pub fn messy_model_output() -> &'static str {
    "Sure, here's my take.\n\nPredicted Rating: 2\nSummary: Mixed feelings overall.\nHope that helps!"
}

/// A structured outcome as the fallback engine would produce it.
pub fn canned_outcome(summary: &str, rating: f64) -> SummaryOutcome {
    SummaryOutcome {
        summary: summary.to_string(),
        predicted_rating: Rating::Value(rating),
        engine_used: Engine::Fallback,
    }
}

/// A fully degraded outcome: sentinel summary, sentinel rating.
pub fn degraded_outcome() -> SummaryOutcome {
    SummaryOutcome {
        summary: "Error from summarization service.".to_string(),
        predicted_rating: Rating::NotAvailable,
        engine_used: Engine::Fallback,
    }
}
