//! Command-line interface definitions for Story Formatter.
//!
//! This module defines the CLI arguments and options using the `clap` crate.
//! Input and output locations can also be provided via environment variables.

use chrono::NaiveDate;
use clap::Parser;

/// Command-line arguments for the Story Formatter application.
///
/// # Examples
///
/// ```sh
/// # Format yesterday's stories
/// story_formatter -i ./stories.jsonl -o ./formatted
///
/// # Reprocess a specific day with custom sentence bounds and a source report
/// story_formatter -i ./stories.jsonl -o ./formatted \
///     --process-date 2020-03-04 --config formatter.yaml --source-counts sources.tsv
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// JSON-lines file of raw scraped stories
    #[arg(short, long, env = "STORY_INPUT")]
    pub input: String,

    /// Output directory for the formatted stories
    #[arg(short, long, env = "STORY_OUTPUT_DIR")]
    pub output_dir: String,

    /// Date being processed (YYYY-MM-DD); defaults to yesterday
    #[arg(short, long)]
    pub process_date: Option<NaiveDate>,

    /// Optional path to a formatter YAML config
    #[arg(short, long)]
    pub config: Option<String>,

    /// Optional path for the per-source story count report
    #[arg(long)]
    pub source_counts: Option<String>,
}
