//! Event date resolution.
//!
//! Every formatted story needs exactly one event date. Candidates are tried in
//! decreasing order of trust:
//!
//! | Tier | Source | Validation |
//! |------|--------|------------|
//! | [`DateTier::FeedMetadata`] | the feed's own `date` field | must parse |
//! | [`DateTier::TemporalExpression`] | first date mentioned in the leading paragraphs | must parse and not be after the process date |
//! | [`DateTier::Ingestion`] | `date_added` | none, always succeeds |
//!
//! # Submodules
//!
//! - [`parser`]: free-text date parsing
//! - [`timex`]: inline TIMEX2 tagging of date expressions

pub mod parser;
pub mod timex;

use crate::models::RawStoryRecord;
use chrono::NaiveDate;
use parser::{DateParser, FreeTextDateParser};
use timex::{TemporalTagger, Timex2Tagger, temporal_expressions};
use tracing::debug;

/// Number of leading content segments scanned for a date expression.
pub const DATE_SCAN_SEGMENTS: usize = 2;

/// Where a resolved date came from, most trusted first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum DateTier {
    FeedMetadata,
    TemporalExpression,
    Ingestion,
}

impl DateTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            DateTier::FeedMetadata => "feed_metadata",
            DateTier::TemporalExpression => "temporal_expression",
            DateTier::Ingestion => "ingestion",
        }
    }
}

/// A candidate date together with the tier that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedDate {
    pub date: NaiveDate,
    pub tier: DateTier,
}

impl ResolvedDate {
    /// The date as `YYMMDD`.
    pub fn formatted(&self) -> String {
        format_event_date(self.date)
    }
}

/// Render `date` as two-digit year, month and day: `2020-03-03` becomes `200303`.
pub fn format_event_date(date: NaiveDate) -> String {
    date.format("%y%m%d").to_string()
}

/// Picks one date per story by falling back across feed metadata, in-text
/// temporal expressions and the ingestion timestamp.
#[derive(Debug, Clone)]
pub struct DateResolver<P = FreeTextDateParser, T = Timex2Tagger> {
    parser: P,
    tagger: T,
    scan_segments: usize,
}

impl<P: DateParser, T: TemporalTagger> DateResolver<P, T> {
    pub fn new(parser: P, tagger: T) -> Self {
        Self {
            parser,
            tagger,
            scan_segments: DATE_SCAN_SEGMENTS,
        }
    }

    /// Scan `segments` leading content segments instead of the default two.
    pub fn with_scan_segments(mut self, segments: usize) -> Self {
        self.scan_segments = segments;
        self
    }

    /// Resolve the event date of `story`. Never fails: the ingestion
    /// timestamp is the last resort.
    pub fn resolve(&self, story: &RawStoryRecord, process_date: NaiveDate) -> ResolvedDate {
        if let Some(date) = self.from_feed(story) {
            return ResolvedDate {
                date,
                tier: DateTier::FeedMetadata,
            };
        }
        if let Some(date) = self.from_content(story, process_date) {
            return ResolvedDate {
                date,
                tier: DateTier::TemporalExpression,
            };
        }
        ResolvedDate {
            date: story.date_added.date_naive(),
            tier: DateTier::Ingestion,
        }
    }

    fn from_feed(&self, story: &RawStoryRecord) -> Option<NaiveDate> {
        let raw = story.feed_date()?;
        match self.parser.parse(raw) {
            Ok(date) => Some(date),
            Err(e) => {
                debug!(source = %story.source, error = %e, "Feed date unusable; falling back");
                None
            }
        }
    }

    fn from_content(&self, story: &RawStoryRecord, process_date: NaiveDate) -> Option<NaiveDate> {
        let leading = story.leading_segments(self.scan_segments).join("\n");
        let tagged = self.tagger.tag(&leading);
        let expression = temporal_expressions(&tagged).next()?;

        let date = match self.parser.parse(expression) {
            Ok(date) => date,
            Err(e) => {
                debug!(source = %story.source, error = %e, "In-text date unusable; falling back");
                return None;
            }
        };

        if is_after_process_date(date, process_date) {
            debug!(
                source = %story.source,
                %date,
                %process_date,
                "In-text date is after the process date; rejected"
            );
            return None;
        }
        Some(date)
    }
}

/// Whether `candidate` lies strictly after `process_date`. Only dates on or
/// before the run anchor are trusted.
fn is_after_process_date(candidate: NaiveDate, process_date: NaiveDate) -> bool {
    (candidate - process_date).num_days() > 0
}
