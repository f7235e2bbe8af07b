//! # Summarization Engines
//!
//! Clients and parsing for the generative summarization services. Two
//! engines exist with a fixed fallback ordering: the primary returns raw
//! model text that [`parse::parse_model_output`] turns into structured
//! fields, while the fallback engine extracts its own fields and hands
//! back a ready-made [`SummaryOutcome`].

pub mod client;
pub mod parse;
pub mod prompt;

use std::fmt;

use serde::Serialize;

use crate::rating::Rating;

/// Which summarization engine produced a result.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Engine {
    Primary,
    Fallback,
}

impl fmt::Display for Engine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Engine::Primary => write!(f, "primary"),
            Engine::Fallback => write!(f, "fallback"),
        }
    }
}

/// Structured summarization output: the summary text, the predicted
/// rating (or its sentinel), and the engine that produced them.
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryOutcome {
    pub summary: String,
    pub predicted_rating: Rating,
    pub engine_used: Engine,
}
