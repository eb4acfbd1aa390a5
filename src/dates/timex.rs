//! Inline tagging of temporal expressions.
//!
//! Taggers mark dates found in running text with TIMEX2 elements,
//! `<TIMEX2>March 3, 2020</TIMEX2>`, leaving the rest of the text untouched.

use super::parser::{MONTH, WEEKDAY};
use once_cell::sync::Lazy;
use regex::Regex;

static CALENDAR_DATE: Lazy<Regex> = Lazy::new(|| {
    let pattern = format!(
        r"(?i)\b(?:(?:{WEEKDAY})\.?,?\s+)?(?:(?:{MONTH})\.?\s+\d{{1,2}}(?:st|nd|rd|th)?(?:,?\s+\d{{4}})?|\d{{1,2}}(?:st|nd|rd|th)?\s+(?:of\s+)?(?:{MONTH})\.?(?:,?\s+\d{{4}})?|\d{{4}}-\d{{1,2}}-\d{{1,2}}|\d{{1,2}}/\d{{1,2}}/\d{{4}})\b"
    );
    Regex::new(&pattern).expect("calendar date pattern is valid")
});

static TIMEX2_SPAN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<TIMEX2>(.*?)</TIMEX2>").expect("TIMEX2 pattern is valid"));

/// Annotates text with inline markers around recognized date expressions.
pub trait TemporalTagger {
    fn tag(&self, text: &str) -> String;
}

/// Tags explicit calendar dates: `March 3, 2020`, `3rd of March`,
/// `2020-03-03`, `03/03/2020`.
///
/// Relative expressions (`yesterday`, `last week`) are not tagged since no
/// calendar date can be recovered from them without the story's own date.
#[derive(Debug, Clone, Copy, Default)]
pub struct Timex2Tagger;

impl TemporalTagger for Timex2Tagger {
    fn tag(&self, text: &str) -> String {
        CALENDAR_DATE
            .replace_all(text, "<TIMEX2>$0</TIMEX2>")
            .into_owned()
    }
}

/// Every TIMEX2-marked substring in `tagged`, in order of appearance.
pub fn temporal_expressions(tagged: &str) -> impl Iterator<Item = &str> {
    TIMEX2_SPAN
        .captures_iter(tagged)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tagged(text: &str) -> String {
        Timex2Tagger.tag(text)
    }

    #[test]
    fn test_tags_prose_dates() {
        assert_eq!(
            tagged("The vote, held on March 3, 2020, was close."),
            "The vote, held on <TIMEX2>March 3, 2020</TIMEX2>, was close."
        );
        assert_eq!(
            tagged("Talks began on Tuesday, 3rd of March in Doha."),
            "Talks began on <TIMEX2>Tuesday, 3rd of March</TIMEX2> in Doha."
        );
    }

    #[test]
    fn test_tags_numeric_dates() {
        assert_eq!(
            tagged("Filed 2020-03-03 and amended 04/01/2020."),
            "Filed <TIMEX2>2020-03-03</TIMEX2> and amended <TIMEX2>04/01/2020</TIMEX2>."
        );
    }

    #[test]
    fn test_leaves_plain_text_alone() {
        let text = "Omar said 300 people marched yesterday.";
        assert_eq!(tagged(text), text);
    }

    #[test]
    fn test_extracts_expressions_in_order() {
        let tagged = "On <TIMEX2>June 1</TIMEX2> and <TIMEX2>June 2, 2020</TIMEX2>.";
        let found: Vec<&str> = temporal_expressions(tagged).collect();
        assert_eq!(found, vec!["June 1", "June 2, 2020"]);
    }

    #[test]
    fn test_no_expressions() {
        assert_eq!(temporal_expressions("nothing tagged here").count(), 0);
    }
}
