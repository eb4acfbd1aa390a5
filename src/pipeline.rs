//! Batch formatting of raw stories into event-coder input.
//!
//! For each story the pipeline
//! 1. strips the wire-service dateline ([`trim_story`]),
//! 2. segments the remaining text into sentences ([`SentenceSegmenter`]),
//! 3. drops sentences opening with a quotation mark,
//! 4. joins the survivors with single spaces (trailing whitespace trimmed),
//! 5. resolves the event date from the *untrimmed* story ([`DateResolver`]).
//!
//! Stories are processed sequentially. The per-source tally is returned with
//! the records instead of living in shared state.

use crate::dates::DateResolver;
use crate::dates::parser::DateParser;
use crate::dates::timex::TemporalTagger;
use crate::models::{FormattedStoryRecord, RawStoryRecord, SourceTally};
use crate::segmenter::SentenceSegmenter;
use crate::trimmer::trim_story;
use crate::utils::truncate_for_log;
use chrono::NaiveDate;
use itertools::Itertools;
use tracing::{debug, info, instrument};

/// Everything one pipeline run produces.
#[derive(Debug, Default)]
pub struct PipelineOutput {
    pub records: Vec<FormattedStoryRecord>,
    pub source_counts: SourceTally,
}

/// Formats batches of stories against a fixed process date.
#[derive(Debug)]
pub struct StoryPipeline<P, T> {
    segmenter: SentenceSegmenter,
    resolver: DateResolver<P, T>,
    process_date: NaiveDate,
}

impl<P: DateParser, T: TemporalTagger> StoryPipeline<P, T> {
    pub fn new(
        segmenter: SentenceSegmenter,
        resolver: DateResolver<P, T>,
        process_date: NaiveDate,
    ) -> Self {
        Self {
            segmenter,
            resolver,
            process_date,
        }
    }

    /// Trimmed, segmented and quote-filtered story content.
    pub fn format_content(&self, raw_content: &str) -> String {
        let story = trim_story(raw_content);
        self.segmenter
            .segment(story)
            .filter(|sentence| !sentence.starts_with('"'))
            .map(str::trim_end)
            .join(" ")
    }

    /// Format a single story.
    pub fn format_story(&self, story: &RawStoryRecord) -> FormattedStoryRecord {
        let content = self.format_content(&story.content);
        let resolved = self.resolver.resolve(story, self.process_date);
        debug!(
            source = %story.source,
            tier = resolved.tier.as_str(),
            date = %resolved.date,
            content_preview = %truncate_for_log(&content, 80),
            "Formatted story"
        );
        FormattedStoryRecord {
            content,
            date: resolved.formatted(),
            source: story.source.clone(),
        }
    }

    /// Format every story in `stories`, in order, tallying sources as it goes.
    #[instrument(level = "info", skip_all, fields(process_date = %self.process_date))]
    pub fn run<I>(&self, stories: I) -> PipelineOutput
    where
        I: IntoIterator<Item = RawStoryRecord>,
    {
        let mut output = PipelineOutput::default();
        for story in stories {
            output.source_counts.record(&story.source);
            output.records.push(self.format_story(&story));
        }

        let empty = output
            .records
            .iter()
            .filter(|record| record.content.is_empty())
            .count();
        info!(
            stories = output.records.len(),
            sources = output.source_counts.iter().count(),
            without_sentences = empty,
            "Formatted story batch"
        );
        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dates::parser::FreeTextDateParser;
    use crate::dates::timex::Timex2Tagger;
    use chrono::{TimeZone, Utc};

    const MINISTER: &str = "The minister told reporters on Tuesday that the government would not negotiate with the armed groups operating in the northern provinces.";
    const QUOTE: &str = "\"This is unacceptable,\" the official said, adding that the situation had deteriorated significantly over recent weeks and required immediate intervention.";
    const J_SMITH: &str = "J. Smith said the plan would proceed despite objections from several board members who had expressed concern about funding and timeline risks.";
    const TALKS: &str = "Talks between the two delegations are expected to resume next week in Geneva under the supervision of United Nations mediators and observers.";

    fn process_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2020, 3, 5).unwrap()
    }

    fn pipeline() -> StoryPipeline<FreeTextDateParser, Timex2Tagger> {
        StoryPipeline::new(
            SentenceSegmenter::default(),
            DateResolver::new(FreeTextDateParser::new(process_date()), Timex2Tagger),
            process_date(),
        )
    }

    fn story(content: &str, source: &str, date: Option<&str>) -> RawStoryRecord {
        RawStoryRecord {
            content: content.to_string(),
            source: source.to_string(),
            date: date.map(str::to_string),
            date_added: Utc.with_ymd_and_hms(2020, 3, 4, 9, 0, 0).unwrap(),
        }
    }

    #[test]
    fn test_quote_leading_sentences_are_dropped() {
        let raw = format!("{} {} {}", MINISTER, QUOTE, TALKS);
        let content = pipeline().format_content(&raw);
        assert!(!content.contains("unacceptable"));
        assert_eq!(content, format!("{} {}", MINISTER, TALKS));
        assert!(content.starts_with("The minister"));
        assert!(content.ends_with("observers."));
    }

    #[test]
    fn test_wire_prefix_is_trimmed_before_segmenting() {
        let raw = format!("ISLAMABAD, March 3 (Reuters) - {} {}", MINISTER, TALKS);
        let content = pipeline().format_content(&raw);
        assert!(content.starts_with("The minister"));
    }

    #[test]
    fn test_initial_opening_trimmed_story_is_kept() {
        let raw = format!("LONDON (Reuters) - {} {}", J_SMITH, TALKS);
        let content = pipeline().format_content(&raw);
        assert!(content.starts_with("J. Smith"));
        assert_eq!(content, format!("{} {}", J_SMITH, TALKS));
    }

    #[test]
    fn test_date_is_resolved_from_untrimmed_story() {
        // The in-text date only appears in the dateline the trimmer removes.
        let raw = format!("BEIJING, March 2, 2020 (Xinhua) -- {}", MINISTER);
        let formatted = pipeline().format_story(&story(&raw, "xinhua", None));
        assert_eq!(formatted.date, "200302");
        assert_eq!(formatted.content, MINISTER);
    }

    #[test]
    fn test_run_formats_batch_and_tallies_sources() {
        let stories = vec![
            story(MINISTER, "reuters", Some("March 3, 2020")),
            story(TALKS, "xinhua", None),
            story("Too short.", "reuters", Some("garbage")),
        ];
        let output = pipeline().run(stories);

        assert_eq!(output.records.len(), 3);
        assert_eq!(output.records[0].date, "200303");
        assert_eq!(output.records[1].date, "200304");
        assert_eq!(output.records[2].content, "");
        assert_eq!(output.records[2].source, "reuters");
        assert_eq!(output.source_counts.get("reuters"), 2);
        assert_eq!(output.source_counts.get("xinhua"), 1);
        assert!(output.records.iter().all(|r| r.date.len() == 6));
    }

    #[test]
    fn test_run_on_empty_batch() {
        let output = pipeline().run(Vec::new());
        assert!(output.records.is_empty());
        assert!(output.source_counts.is_empty());
    }
}
