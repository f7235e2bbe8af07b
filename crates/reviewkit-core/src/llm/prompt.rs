//! # Prompt Templates
//!
//! Builds the summarization prompt. Both engines receive the same
//! instruction: summarize the review and predict a 1–5 star rating,
//! answering in the `Summary:` / `Predicted Rating:` line format that
//! [`super::parse::parse_model_output`] knows how to read.

/// Generate the summarize-and-rate prompt for a single review.
pub fn summary_prompt(review: &str) -> String {
    format!(
        r#"You are an assistant that summarizes customer reviews and predicts a star rating (1-5).

Review: "{}"

Respond in exactly this format:
Summary: <one-sentence summary>
Predicted Rating: <1-5>"#,
        review
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_contains_review() {
        let prompt = summary_prompt("The battery died after two days.");
        assert!(prompt.contains("The battery died after two days."));
    }

    #[test]
    fn test_prompt_requests_line_format() {
        let prompt = summary_prompt("x");
        assert!(prompt.contains("Summary:"));
        assert!(prompt.contains("Predicted Rating:"));
    }

    #[test]
    fn test_prompt_names_rating_scale() {
        let prompt = summary_prompt("x");
        assert!(prompt.contains("1-5"));
    }
}
