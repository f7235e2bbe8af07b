//! # Error Types
//!
//! Defines `ReviewKitError`, the unified error enum for every failure mode
//! in the ReviewKit pipeline. Ingestion-phase variants (`Encoding`, `Format`,
//! `Schema`, `EmptyResult`, `UnsupportedFormat`, `Validation`) abort the
//! whole request; `Service` failures are caught at the record boundary and
//! degraded into sentinel fields so a batch always completes.

use thiserror::Error;

/// All errors that can occur in ReviewKit operations.
#[derive(Error, Debug)]
pub enum ReviewKitError {
    #[error("Review text cannot be empty.")]
    Validation,

    #[error("File must be UTF-8 encoded.")]
    Encoding,

    #[error("File has no header row.")]
    Format,

    #[error("CSV must contain a 'review' column.")]
    Schema,

    #[error("No valid reviews found.")]
    EmptyResult,

    #[error("Unsupported file type '{extension}'. Supported: .csv, .tsv")]
    UnsupportedFormat { extension: String },

    #[error("Service error: {message}")]
    Service { message: String },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Output error: {message}: {source}")]
    Output {
        message: String,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, ReviewKitError>;
