//! # Story Formatter
//!
//! Formats one day's worth of scraped news stories for event coding.
//!
//! ## Usage
//!
//! ```sh
//! story_formatter -i ./stories.jsonl -o ./formatted
//! ```
//!
//! ## Flow
//!
//! 1. **Loading**: Read raw stories exported by the scraper
//! 2. **Formatting**: Trim, segment and date every story in sequence
//! 3. **Output**: Store the formatted batch and, optionally, the source counts

use clap::Parser;
use std::error::Error;
use std::path::Path;
use story_formatter::cli::Cli;
use story_formatter::config::FormatterConfig;
use story_formatter::dates::DateResolver;
use story_formatter::dates::parser::FreeTextDateParser;
use story_formatter::dates::timex::Timex2Tagger;
use story_formatter::ingest::load_stories;
use story_formatter::outputs::json::JsonFileSink;
use story_formatter::outputs::{StorySink, tally};
use story_formatter::pipeline::StoryPipeline;
use story_formatter::utils::{default_process_date, ensure_writable_dir};
use tracing::{debug, error, info, instrument, warn};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

#[tokio::main]
#[instrument]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    info!("story_formatter starting up");

    // Parse CLI
    let args = Cli::parse();
    debug!(?args, "Parsed CLI arguments");

    let config = FormatterConfig::load(args.config.as_deref().map(Path::new))?;
    let process_date = args.process_date.unwrap_or_else(default_process_date);
    info!(%process_date, "Processing stories");

    // Early check: ensure output dir is writable before doing any work
    if let Err(e) = ensure_writable_dir(&args.output_dir).await {
        error!(
            path = %args.output_dir,
            error = %e,
            "Output directory is not writable (fix perms or choose a different path)"
        );
        return Err(e);
    }

    // ---- Load ----
    let stories = load_stories(&args.input).await?;
    if stories.is_empty() {
        warn!(input = %args.input, "No stories to format");
    }

    // ---- Format ----
    let resolver = DateResolver::new(FreeTextDateParser::new(process_date), Timex2Tagger)
        .with_scan_segments(config.date_scan_segments);
    let pipeline = StoryPipeline::new(config.segmenter(), resolver, process_date);
    let output = pipeline.run(stories);

    // ---- Store ----
    let sink = JsonFileSink::new(args.output_dir.clone(), process_date);
    let ids = sink.store_all(&output.records).await?;
    info!(stored = ids.len(), path = %sink.output_path(), "Stored formatted stories");

    if let Some(path) = args.source_counts.as_deref() {
        if output.source_counts.is_empty() {
            warn!(%path, "No sources to report");
        }
        if let Err(e) = tally::write_source_counts(&output.source_counts, path).await {
            error!(%path, error = %e, "Failed to write source counts");
        }
    }

    let elapsed = start_time.elapsed();
    info!(
        ?elapsed,
        secs = elapsed.as_secs(),
        millis = elapsed.subsec_millis(),
        "Execution complete"
    );

    Ok(())
}
