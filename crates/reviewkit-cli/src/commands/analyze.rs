use std::path::Path;

use anyhow::{Context, Result};
use comfy_table::{presets::UTF8_FULL, Table};

use reviewkit_core::pipeline::Analyzer;

use crate::args::AnalyzeArgs;

pub async fn run(args: &AnalyzeArgs) -> Result<()> {
    let mut config = reviewkit_core::config::read_config(Path::new("."))?;

    // CLI --language overrides the config file
    if let Some(lang) = &args.language {
        let mut cfg = config.unwrap_or_default();
        cfg.sentiment.language = Some(lang.clone());
        config = Some(cfg);
    }

    let analyzer =
        Analyzer::from_config(config.as_ref()).context("Failed to configure services")?;

    let result = analyzer
        .analyze_one(&args.text)
        .await
        .context("Analysis failed")?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["Field", "Value"]);
    table.add_row(vec!["Review", result.original_review.as_str()]);
    table.add_row(vec!["Summary", result.summary.as_str()]);
    table.add_row(vec![
        "Predicted rating".to_string(),
        format!("{} {}", result.predicted_rating, result.rating_stars),
    ]);
    table.add_row(vec!["Sentiment".to_string(), result.sentiment.to_string()]);
    table.add_row(vec!["Engine".to_string(), result.engine_used.to_string()]);
    println!("{}", table);

    Ok(())
}
