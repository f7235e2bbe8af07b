pub mod config;
pub mod error;
pub mod ingest;
pub mod llm;
pub mod output;
pub mod pipeline;
pub mod rating;
pub mod sentiment;
pub mod text;

// Re-export key types for convenience
pub use error::{Result, ReviewKitError};
pub use ingest::ReviewRecord;
pub use pipeline::{AnalysisResult, Analyzer};
pub use rating::Rating;
pub use sentiment::Sentiment;
