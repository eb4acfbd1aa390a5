//! Heuristic sentence segmentation for news prose.
//!
//! The segmenter walks the text looking for a terminal pattern: `.`, `?` or
//! `!`, then whitespace, then an uppercase letter or a double quote. A
//! candidate boundary is rejected when
//!
//! 1. the `.` closes a single initial (`J. Smith`) or a known abbreviation
//!    (`Dr.`, `Inc.`, `Ph.D.`),
//! 2. the text before it has unbalanced parentheses or an odd number of
//!    double quotes, so the sentence is extended over the quoted or
//!    parenthetical material.
//!
//! Only sentences whose length falls strictly inside the configured window
//! are kept. The default lower bound keeps only sentences long enough to
//! carry both a subject and an object.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;

/// Default lower bound (exclusive) on sentence length, in characters.
pub const MIN_SENTLENGTH: usize = 100;
/// Default upper bound (exclusive) on sentence length, in characters.
pub const MAX_SENTLENGTH: usize = 512;

static TERMINAL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"[.?!]\s+[A-Z"]"#).expect("terminal pattern is valid"));

/// Titles, honorifics and units that end in a period without ending a sentence.
///
/// Adapted from the Illinois NER `known_title.lst`, stored lowercase.
static ABBREVIATIONS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "mrs.", "ms.", "mr.", "dr.", "gov.", "sr.", "rev.", "r.n.", "pres.", "treas.", "sect.",
        "maj.", "ph.d.", "proc.", "fr.", "asst.", "p.f.c.", "prof.", "admr.", "engr.", "mgr.",
        "supt.", "admin.", "assoc.", "voc.", "hon.", "m.d.", "dpty.", "sec.", "capt.", "c.e.o.",
        "c.f.o.", "c.i.o.", "c.o.o.", "c.p.a.", "c.n.a.", "acct.", "llc.", "inc.", "dir.",
        "esq.", "lt.", "d.d.", "ed.", "revd.", "psy.d.", "v.p.", "senr.", "gen.", "prov.",
        "cmdr.", "sgt.", "sen.", "col.", "lieut.", "cpl.", "pfc.", "k.p.h.", "cent.", "deg.",
        "doz.", "fahr.", "cel.", "f.", "c.", "k.", "ft.", "fur.", "gal.", "gr.", "in.", "kg.",
        "km.", "kw.", "l.", "lat.", "lb.", "long.", "mg.", "mm.", "m.p.g.", "m.p.h.", "cc.",
        "qr.", "qt.", "sq.", "t.", "vol.", "w.", "wt.",
    ]
    .into_iter()
    .collect()
});

/// Splits text into sentences within a length window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SentenceSegmenter {
    min_len: usize,
    max_len: usize,
}

impl Default for SentenceSegmenter {
    fn default() -> Self {
        Self::new(MIN_SENTLENGTH, MAX_SENTLENGTH)
    }
}

impl SentenceSegmenter {
    /// Create a segmenter keeping sentences with `min_len < len < max_len`.
    pub fn new(min_len: usize, max_len: usize) -> Self {
        Self { min_len, max_len }
    }

    /// Lazily segment `text`. Each call starts a fresh scan.
    pub fn segment<'a>(&self, text: &'a str) -> Sentences<'a> {
        Sentences {
            rest: text,
            search_from: 0,
            min_len: self.min_len,
            max_len: self.max_len,
            finished: false,
        }
    }
}

/// Iterator over the sentences of one text, borrowed from that text.
///
/// Yielded sentences include their terminator and the whitespace character
/// that follows it.
#[derive(Debug, Clone)]
pub struct Sentences<'a> {
    /// Text not yet emitted; always starts at a sentence start.
    rest: &'a str,
    /// Byte offset into `rest` where the next terminal search begins.
    search_from: usize,
    min_len: usize,
    max_len: usize,
    finished: bool,
}

impl<'a> Sentences<'a> {
    fn within_bounds(&self, sentence: &str) -> bool {
        let len = sentence.chars().count();
        len > self.min_len && len < self.max_len
    }
}

impl<'a> Iterator for Sentences<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        while !self.finished {
            let Some(found) = TERMINAL_PATTERN.find_at(self.rest, self.search_from) else {
                self.finished = true;
                let tail = self.rest;
                return self.within_bounds(tail).then_some(tail);
            };

            let terminator = found.start();
            let after = terminator + 1;
            let cut = after + self.rest[after..].chars().next().map_or(0, char::len_utf8);

            if is_sentence_end(self.rest, terminator) {
                let sentence = &self.rest[..cut];
                // The match ends on a one-byte capital or quote that opens the next sentence.
                self.rest = &self.rest[found.end() - 1..];
                self.search_from = 0;
                if self.within_bounds(sentence) {
                    return Some(sentence);
                }
            } else {
                self.search_from = cut;
            }
        }
        None
    }
}

/// Whether the terminal punctuation at byte `terminator` really ends a sentence
/// that started at the beginning of `text`.
fn is_sentence_end(text: &str, terminator: usize) -> bool {
    let before = &text[..terminator];
    if text.as_bytes()[terminator] == b'.' && (is_single_initial(before) || is_abbreviation(before))
    {
        return false;
    }
    is_balanced(before)
}

/// `before` ends in a lone capital letter standing at the start of the text or
/// after whitespace, as in `J. Smith`.
fn is_single_initial(before: &str) -> bool {
    let mut tail = before.chars().rev();
    matches!(
        (tail.next(), tail.next()),
        (Some(c), prev) if c.is_uppercase() && prev.is_none_or(char::is_whitespace)
    )
}

/// The last word of `before`, with the period appended, is a known abbreviation.
fn is_abbreviation(before: &str) -> bool {
    let word = before.rsplit(char::is_whitespace).next().unwrap_or(before);
    if word.is_empty() {
        return false;
    }
    let candidate = format!("{}.", word.to_lowercase());
    ABBREVIATIONS.contains(candidate.as_str())
}

fn is_balanced(before: &str) -> bool {
    let opens = before.matches('(').count();
    let closes = before.matches(')').count();
    let quotes = before.matches('"').count();
    opens == closes && quotes % 2 == 0
}
