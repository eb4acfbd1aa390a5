//! Loading raw story records exported by the scraper.
//!
//! The scraper dumps one JSON object per line:
//!
//! ```text
//! {"content": "...", "source": "reuters", "date": "March 3, 2020", "date_added": "2020-03-04T12:00:00Z"}
//! ```
//!
//! Blank lines are ignored. Lines that fail to deserialize are logged and
//! skipped so one bad export row does not sink the whole batch.

use crate::models::RawStoryRecord;
use crate::utils::truncate_for_log;
use std::error::Error;
use tokio::fs;
use tracing::{info, instrument, warn};

/// Read every parseable story from a JSON-lines file.
#[instrument(level = "info", skip_all, fields(%path))]
pub async fn load_stories(path: &str) -> Result<Vec<RawStoryRecord>, Box<dyn Error>> {
    let body = fs::read_to_string(path).await?;
    let stories = parse_stories(&body);
    info!(count = stories.len(), "Loaded raw stories");
    Ok(stories)
}

/// Parse JSON-lines text into story records, skipping malformed lines.
pub fn parse_stories(body: &str) -> Vec<RawStoryRecord> {
    body.lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .filter_map(|(i, line)| match serde_json::from_str::<RawStoryRecord>(line) {
            Ok(story) => Some(story),
            Err(e) => {
                warn!(
                    line = i + 1,
                    error = %e,
                    preview = %truncate_for_log(line, 120),
                    "Skipping malformed story record"
                );
                None
            }
        })
        .collect()
}
