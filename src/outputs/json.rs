//! JSON persistence of formatted stories.
//!
//! The event coder picks up one file per process date:
//! ```text
//! output_dir/
//! ├── 200303.json
//! └── 200304.json
//! ```
//!
//! Each file holds an array of stories keyed by an identifier this sink
//! assigns: `{YYMMDD}-{index}`.

use super::StorySink;
use crate::dates::format_event_date;
use crate::models::FormattedStoryRecord;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::error::Error;
use tokio::fs;
use tracing::{error, info, instrument};

/// A formatted story together with the identifier it was stored under.
#[derive(Debug, Deserialize, Serialize)]
pub struct StoredStory {
    pub id: String,
    #[serde(flatten)]
    pub story: FormattedStoryRecord,
}

/// Writes each batch to `{output_dir}/{YYMMDD}.json` for its process date.
#[derive(Debug, Clone)]
pub struct JsonFileSink {
    output_dir: String,
    process_date: NaiveDate,
}

impl JsonFileSink {
    pub fn new(output_dir: impl Into<String>, process_date: NaiveDate) -> Self {
        Self {
            output_dir: output_dir.into(),
            process_date,
        }
    }

    /// Path of the file this sink writes.
    pub fn output_path(&self) -> String {
        format!(
            "{}/{}.json",
            self.output_dir.trim_end_matches('/'),
            format_event_date(self.process_date)
        )
    }
}

impl StorySink for JsonFileSink {
    #[instrument(level = "info", skip_all, fields(output_dir = %self.output_dir))]
    async fn store_all(
        &self,
        records: &[FormattedStoryRecord],
    ) -> Result<Vec<String>, Box<dyn Error>> {
        let stem = format_event_date(self.process_date);
        let stored: Vec<StoredStory> = records
            .iter()
            .enumerate()
            .map(|(i, story)| StoredStory {
                id: format!("{}-{:05}", stem, i),
                story: story.clone(),
            })
            .collect();
        let json = serde_json::to_string(&stored)?;

        if let Err(e) = fs::create_dir_all(&self.output_dir).await {
            error!(output_dir = %self.output_dir, error = %e, "Failed to create output dir");
            return Err(e.into());
        }

        let path = self.output_path();
        info!(path = %path, count = stored.len(), "Writing JSON");
        fs::write(&path, json).await?;
        info!(path = %path, "Wrote formatted stories");

        Ok(stored.into_iter().map(|s| s.id).collect())
    }
}
