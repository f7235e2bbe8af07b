use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};

use reviewkit_core::config::DEFAULT_OUTPUT_PATH;
use reviewkit_core::ingest::ingest_records;
use reviewkit_core::output::write_report;
use reviewkit_core::pipeline::Analyzer;

use crate::args::BatchArgs;

pub async fn run(args: &BatchArgs) -> Result<()> {
    let config = reviewkit_core::config::read_config(Path::new("."))?;
    let analyzer =
        Analyzer::from_config(config.as_ref()).context("Failed to configure services")?;

    // Phase 1: Ingest
    let input_path = Path::new(&args.input);
    let filename = input_path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or(&args.input);
    let bytes = std::fs::read(input_path)
        .with_context(|| format!("Failed to read input file: {}", args.input))?;

    let records = ingest_records(&bytes, filename)
        .with_context(|| format!("Failed to ingest {}", args.input))?;
    eprintln!("Ingested {} reviews from {}", records.len(), args.input);

    // Phase 2: Analyze, strictly in input order
    let pb = ProgressBar::new(records.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.cyan} Analyzing reviews... {bar:40.cyan/dim} {pos}/{len} ({eta})")
            .unwrap()
            .progress_chars("█▓░"),
    );

    let results = analyzer
        .analyze_batch(
            &records,
            Some(&|current, _total| {
                pb.set_position(current as u64);
            }),
        )
        .await;

    pb.finish_with_message(format!("Analyzing reviews... ✓ ({} records)", results.len()));

    // Phase 3: Write the report
    let output_path = args
        .output
        .clone()
        .or_else(|| config.as_ref().and_then(|c| c.output.path.clone()))
        .unwrap_or_else(|| DEFAULT_OUTPUT_PATH.to_string());

    if let Some(parent) = Path::new(&output_path).parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create output directory for {}", output_path))?;
        }
    }

    let file = File::create(&output_path)
        .with_context(|| format!("Failed to create output file: {}", output_path))?;
    let mut writer = BufWriter::new(file);
    write_report(&mut writer, &results)?;

    eprintln!(
        "\n✓ Analyzed {} reviews → {}",
        results.len(),
        output_path
    );

    Ok(())
}
