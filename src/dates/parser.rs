//! Free-text date parsing.
//!
//! Feed metadata and in-text expressions arrive in whatever shape the outlet
//! happened to use: RFC 2822 from RSS, RFC 3339 from JSON APIs, ISO or US
//! numeric dates, and prose such as `Tuesday, March 3, 2020` or `3rd of March`.
//! [`FreeTextDateParser`] accepts all of those and nothing fuzzier.

use chrono::{DateTime, Datelike, NaiveDate};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use thiserror::Error;

/// Month names and their common abbreviations.
pub(crate) const MONTH: &str = r"jan(?:uary)?|feb(?:ruary)?|mar(?:ch)?|apr(?:il)?|may|june?|july?|aug(?:ust)?|sep(?:t(?:ember)?)?|oct(?:ober)?|nov(?:ember)?|dec(?:ember)?";

/// Day names and their common abbreviations.
pub(crate) const WEEKDAY: &str = r"mon(?:day)?|tue(?:s(?:day)?)?|wed(?:nesday)?|thu(?:rs(?:day)?)?|fri(?:day)?|sat(?:urday)?|sun(?:day)?";

/// Trailing clock time, e.g. `10:30`, `10:30:00 p.m. EST`.
const TIME: &str = r"\d{1,2}(?::\d{2}){1,2}(?:\s*[ap]\.?m\.?)?(?:\s+[a-z]{2,5})?";

/// Anchored patterns, each with `year`, `month` and `day` groups.
static DATE_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        // March 3, 2020 / Tue, Mar. 3rd 2020 10:00 GMT / March 3
        format!(
            r"(?i)^(?:(?:{WEEKDAY})\.?,?\s+)?(?P<month>{MONTH})\.?\s+(?P<day>\d{{1,2}})(?:st|nd|rd|th)?(?:,?\s+(?P<year>\d{{4}}))?(?:,?\s+{TIME})?$"
        ),
        // 3 March 2020 / Tuesday, 3rd of March
        format!(
            r"(?i)^(?:(?:{WEEKDAY})\.?,?\s+)?(?P<day>\d{{1,2}})(?:st|nd|rd|th)?\s+(?:of\s+)?(?P<month>{MONTH})\.?(?:,?\s+(?P<year>\d{{4}}))?(?:,?\s+{TIME})?$"
        ),
        // 2020-03-03, 2020/03/03, 2020-03-03 10:00:00
        r"^(?P<year>\d{4})[-/.](?P<month>\d{1,2})[-/.](?P<day>\d{1,2})(?:[T\s].*)?$".to_string(),
        // 03/03/2020 (US ordering)
        r"^(?P<month>\d{1,2})/(?P<day>\d{1,2})/(?P<year>\d{4})(?:\s.*)?$".to_string(),
    ]
    .iter()
    .map(|pattern| Regex::new(pattern).expect("date pattern is valid"))
    .collect()
});

/// Why a date string could not be turned into a calendar date.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DateParseError {
    #[error("date string is empty")]
    Empty,
    #[error("unrecognized date string '{0}'")]
    Unrecognized(String),
    #[error("date '{0}' does not exist on the calendar")]
    OutOfRange(String),
}

/// Turns an arbitrary date-like string into a calendar date.
pub trait DateParser {
    fn parse(&self, text: &str) -> Result<NaiveDate, DateParseError>;
}

/// Pattern-based parser for the date formats news feeds actually use.
///
/// Dates written without a year (`March 3`) take the year of `reference`.
#[derive(Debug, Clone, Copy)]
pub struct FreeTextDateParser {
    reference: NaiveDate,
}

impl FreeTextDateParser {
    pub fn new(reference: NaiveDate) -> Self {
        Self { reference }
    }
}

impl DateParser for FreeTextDateParser {
    fn parse(&self, text: &str) -> Result<NaiveDate, DateParseError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(DateParseError::Empty);
        }

        if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
            return Ok(dt.date_naive());
        }
        if let Ok(dt) = DateTime::parse_from_rfc2822(text) {
            return Ok(dt.date_naive());
        }

        let caps = DATE_PATTERNS
            .iter()
            .find_map(|pattern| pattern.captures(text))
            .ok_or_else(|| DateParseError::Unrecognized(text.to_string()))?;
        self.date_from_captures(text, &caps)
    }
}

impl FreeTextDateParser {
    fn date_from_captures(&self, text: &str, caps: &Captures) -> Result<NaiveDate, DateParseError> {
        let out_of_range = || DateParseError::OutOfRange(text.to_string());

        let year = match caps.name("year") {
            Some(y) => y.as_str().parse::<i32>().map_err(|_| out_of_range())?,
            None => self.reference.year(),
        };
        let month = caps
            .name("month")
            .and_then(|m| month_number(m.as_str()))
            .ok_or_else(out_of_range)?;
        let day = caps
            .name("day")
            .and_then(|d| d.as_str().parse::<u32>().ok())
            .ok_or_else(out_of_range)?;

        NaiveDate::from_ymd_opt(year, month, day).ok_or_else(out_of_range)
    }
}

/// Month number from either digits or an English month name.
fn month_number(token: &str) -> Option<u32> {
    if let Ok(n) = token.parse::<u32>() {
        return Some(n);
    }
    let prefix: String = token.chars().take(3).collect::<String>().to_ascii_lowercase();
    let n = match prefix.as_str() {
        "jan" => 1,
        "feb" => 2,
        "mar" => 3,
        "apr" => 4,
        "may" => 5,
        "jun" => 6,
        "jul" => 7,
        "aug" => 8,
        "sep" => 9,
        "oct" => 10,
        "nov" => 11,
        "dec" => 12,
        _ => return None,
    };
    Some(n)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parser() -> FreeTextDateParser {
        FreeTextDateParser::new(NaiveDate::from_ymd_opt(2020, 3, 5).unwrap())
    }

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_prose_month_day_year() {
        assert_eq!(parser().parse("March 3, 2020"), Ok(ymd(2020, 3, 3)));
        assert_eq!(parser().parse("Tuesday, Mar. 3rd 2020"), Ok(ymd(2020, 3, 3)));
        assert_eq!(parser().parse("Sept 14, 2019 10:30 a.m. EST"), Ok(ymd(2019, 9, 14)));
    }

    #[test]
    fn test_prose_day_month_year() {
        assert_eq!(parser().parse("3 March 2020"), Ok(ymd(2020, 3, 3)));
        assert_eq!(parser().parse("Friday, 21st of February"), Ok(ymd(2020, 2, 21)));
    }

    #[test]
    fn test_missing_year_uses_reference() {
        assert_eq!(parser().parse("June 1"), Ok(ymd(2020, 6, 1)));
    }

    #[test]
    fn test_feed_timestamps() {
        assert_eq!(
            parser().parse("Tue, 03 Mar 2020 10:00:00 +0000"),
            Ok(ymd(2020, 3, 3))
        );
        assert_eq!(parser().parse("2020-03-03T23:30:00-05:00"), Ok(ymd(2020, 3, 3)));
    }

    #[test]
    fn test_numeric_dates() {
        assert_eq!(parser().parse("2020-03-03"), Ok(ymd(2020, 3, 3)));
        assert_eq!(parser().parse("2020/03/03 10:00:00"), Ok(ymd(2020, 3, 3)));
        assert_eq!(parser().parse("03/04/2020"), Ok(ymd(2020, 3, 4)));
    }

    #[test]
    fn test_empty_and_garbage() {
        assert_eq!(parser().parse("   "), Err(DateParseError::Empty));
        assert_eq!(
            parser().parse("last week"),
            Err(DateParseError::Unrecognized("last week".to_string()))
        );
    }

    #[test]
    fn test_impossible_dates() {
        assert!(matches!(
            parser().parse("February 30, 2020"),
            Err(DateParseError::OutOfRange(_))
        ));
        assert!(matches!(parser().parse("2020-13-01"), Err(DateParseError::OutOfRange(_))));
    }

    #[test]
    fn test_month_number() {
        assert_eq!(month_number("September"), Some(9));
        assert_eq!(month_number("sept"), Some(9));
        assert_eq!(month_number("07"), Some(7));
        assert_eq!(month_number("smarch"), None);
    }
}
