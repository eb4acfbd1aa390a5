//! Data models for raw story records and their formatted representations.
//!
//! This module defines the core data structures used throughout the application:
//! - [`RawStoryRecord`]: A scraped story as handed over by the upstream record source
//! - [`FormattedStoryRecord`]: Sentence-segmented content plus a `YYMMDD` event date
//! - [`SourceTally`]: Per-source occurrence counts accumulated over one batch

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// A raw news story as pulled from the scraping store.
///
/// The record is read-only to the formatter. `date` is whatever free text the
/// originating feed supplied (if any); `date_added` is stamped at ingestion and
/// is always present.
#[derive(Debug, Clone, Deserialize)]
pub struct RawStoryRecord {
    /// The raw story text, possibly prefixed with a wire-service dateline.
    pub content: String,
    /// Identifier of the outlet the story was scraped from.
    pub source: String,
    /// Free-text publication date from the feed.
    #[serde(default)]
    pub date: Option<String>,
    /// Timestamp assigned when the story entered the store.
    pub date_added: DateTime<Utc>,
}

impl RawStoryRecord {
    /// The feed date, treating blank strings the same as a missing value.
    pub fn feed_date(&self) -> Option<&str> {
        self.date.as_deref().map(str::trim).filter(|d| !d.is_empty())
    }

    /// The first `n` non-blank lines of the story content.
    ///
    /// Scrapers store one paragraph per line, so these are the leading
    /// paragraphs where a dateline usually sits.
    pub fn leading_segments(&self, n: usize) -> Vec<&str> {
        self.content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .take(n)
            .collect()
    }
}

/// A story after trimming, segmentation and date resolution.
///
/// This is the shape handed to the persistence layer.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct FormattedStoryRecord {
    /// Accepted sentences joined by single spaces.
    pub content: String,
    /// Event date as `YYMMDD`.
    pub date: String,
    /// Unchanged source identifier.
    pub source: String,
}

/// Per-source story counts for one pipeline run.
///
/// Backed by a `BTreeMap` so exports come out sorted by source.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceTally {
    counts: BTreeMap<String, usize>,
}

impl SourceTally {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one more story for `source`.
    pub fn record(&mut self, source: &str) {
        *self.counts.entry(source.to_string()).or_insert(0) += 1;
    }

    pub fn get(&self, source: &str) -> usize {
        self.counts.get(source).copied().unwrap_or(0)
    }

    /// Total number of stories counted across all sources.
    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.counts.iter().map(|(source, count)| (source.as_str(), *count))
    }
}

/// Renders the tally as tab-separated `source\tcount` lines.
impl fmt::Display for SourceTally {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (source, count) in self.iter() {
            writeln!(f, "{}\t{}", source, count)?;
        }
        Ok(())
    }
}
