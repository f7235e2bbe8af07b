use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "reviewkit",
    about = "Analyze customer reviews: sentiment, summary, and predicted rating",
    version,
    after_help = "Examples:\n  reviewkit analyze --text \"Loved it, arrived early and works great\"\n  reviewkit analyze --text \"Broke after a week\" --json\n  reviewkit batch --input reviews.csv --output summaries.csv\n  reviewkit batch --input reviews.tsv    # writes output/summaries.csv"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Analyze a single review
    Analyze(AnalyzeArgs),

    /// Analyze every review in a delimited file and write a report
    Batch(BatchArgs),
}

#[derive(Parser, Debug)]
pub struct AnalyzeArgs {
    /// The review text to analyze
    #[arg(long)]
    pub text: String,

    /// Language tag passed to the sentiment service
    #[arg(long)]
    pub language: Option<String>,

    /// Print the result as JSON instead of a table
    #[arg(long)]
    pub json: bool,
}

#[derive(Parser, Debug)]
pub struct BatchArgs {
    /// Input file (.csv or .tsv; delimiter is auto-detected)
    #[arg(short, long)]
    pub input: String,

    /// Report path. Falls back to [output].path in reviewkit.toml,
    /// then to output/summaries.csv
    #[arg(short, long)]
    pub output: Option<String>,
}
