//! # Rating Extraction
//!
//! Pulls a numeric star rating out of arbitrary model output. Model text
//! rarely arrives as a bare number — "Predicted Rating: 4.5 stars" and
//! "I'd give it a 3/5" both have to work — so extraction takes the first
//! decimal-looking substring and rounds it to one decimal place.
//!
//! The value is returned unclamped even though the product domain is a
//! 1–5 scale. Clamping is a display concern: `stars()` floors at zero and
//! caps at [`MAX_STARS`] so rendering can never panic or over-allocate.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Serialize, Serializer};

/// Wire form of the missing-rating sentinel.
pub const RATING_SENTINEL: &str = "N/A";

/// Upper bound on rendered star glyphs. Extraction is unclamped, so a
/// model can emit arbitrarily large (or non-finite) numbers; rendering
/// caps at the domain maximum instead of allocating a glyph per unit.
pub const MAX_STARS: usize = 5;

static NUMBER_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d+(\.\d+)?").unwrap());

/// A predicted star rating, or the sentinel when no number could be found.
///
/// Serializes as a JSON number or the string `"N/A"`, matching the output
/// report contract.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Rating {
    Value(f64),
    NotAvailable,
}

impl Rating {
    /// Render the rating as repeated star glyphs, rounded to the nearest
    /// whole star and capped at [`MAX_STARS`]. The sentinel (and anything
    /// rounding below one, NaN included) renders as an empty string.
    pub fn stars(&self) -> String {
        match self {
            Rating::Value(v) => {
                let count = v.round().max(0.0).min(MAX_STARS as f64) as usize;
                "⭐".repeat(count)
            }
            Rating::NotAvailable => String::new(),
        }
    }

    pub fn is_available(&self) -> bool {
        matches!(self, Rating::Value(_))
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rating::Value(v) => write!(f, "{}", v),
            Rating::NotAvailable => write!(f, "{}", RATING_SENTINEL),
        }
    }
}

impl Serialize for Rating {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Rating::Value(v) => serializer.serialize_f64(*v),
            Rating::NotAvailable => serializer.serialize_str(RATING_SENTINEL),
        }
    }
}

/// Extract a numeric rating from free text.
///
/// Takes the first substring matching `\d+(\.\d+)?`, parses it as `f64`,
/// and rounds to one decimal place. No match means [`Rating::NotAvailable`].
/// Idempotent: extracting from a `Value`'s rendered form returns the same
/// value.
pub fn extract_rating(text: &str) -> Rating {
    match NUMBER_RE.find(text) {
        Some(m) => match m.as_str().parse::<f64>() {
            Ok(v) => Rating::Value((v * 10.0).round() / 10.0),
            Err(_) => Rating::NotAvailable,
        },
        None => Rating::NotAvailable,
    }
}
