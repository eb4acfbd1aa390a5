//! Removal of wire-service datelines and bylines from raw story text.
//!
//! Agency copy usually opens with something like
//! `NEW DELHI, March 3 (IANS) Officials said...`. Everything up to and
//! including the agency marker is noise for sentence segmentation.

use tracing::debug;

/// Agency markers in priority order, with the byte offset (measured from the
/// start of the marker) at which the story body begins.
const WIRE_MARKERS: [(&str, usize); 5] = [
    ("(Reuters)", 12),
    ("(IANS)", 7),
    ("(ANI)", 7),
    ("(Xinhua) -- ", 12),
    ("(UPI) -- ", 9),
];

/// Number of leading characters inspected for a dash-style dateline separator.
const DASH_WINDOW: usize = 32;

const DASHES: [char; 2] = ['\u{2013}', '\u{2014}'];

/// Strip any leading wire-service attribution from `story`.
///
/// A matching agency marker wins. Only when none is present does the dash
/// rule apply: a dash in the first 32 characters means the dateline ends at
/// the first `"<dash> "`. If neither applies the text comes back unchanged.
pub fn trim_story(story: &str) -> &str {
    if let Some(body) = strip_wire_marker(story) {
        return body;
    }
    strip_dash_dateline(story).unwrap_or(story)
}

fn strip_wire_marker(story: &str) -> Option<&str> {
    WIRE_MARKERS.iter().find_map(|(marker, offset)| {
        story.find(marker).map(|at| {
            debug!(marker, "Trimming wire-service prefix");
            &story[ceil_char_boundary(story, at + offset)..]
        })
    })
}

fn strip_dash_dateline(story: &str) -> Option<&str> {
    let dash = story.chars().take(DASH_WINDOW).find(|c| DASHES.contains(c))?;
    let separator = format!("{} ", dash);
    story
        .split_once(separator.as_str())
        .map(|(_, body)| body)
}

/// Clamp `idx` to the text length and move it forward onto a char boundary.
fn ceil_char_boundary(s: &str, idx: usize) -> usize {
    let mut idx = idx.min(s.len());
    while !s.is_char_boundary(idx) {
        idx += 1;
    }
    idx
}
