//! Whitespace segmentation of text item strings.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref WHITESPACE_RUN: Regex = Regex::new(r"\s+").expect("valid whitespace regex");
}

/// A contiguous piece of an item string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment<'a> {
    /// A run of non-whitespace characters
    Word(&'a str),
    /// A run of whitespace characters
    Space(&'a str),
}

impl<'a> Segment<'a> {
    /// The underlying text.
    pub fn as_str(&self) -> &'a str {
        match self {
            Segment::Word(s) | Segment::Space(s) => s,
        }
    }

    /// Whether this segment is a word.
    pub fn is_word(&self) -> bool {
        matches!(self, Segment::Word(_))
    }
}

/// Split `text` into alternating word and whitespace segments.
///
/// Concatenating the segments gives back `text` exactly. Hyphens and other
/// punctuation stay inside words.
///
/// # Examples
///
/// ```
/// use pdf_highlight::text::segment::{split_segments, Segment};
///
/// let segs = split_segments("peer-to-peer  cash");
/// assert_eq!(
///     segs,
///     vec![Segment::Word("peer-to-peer"), Segment::Space("  "), Segment::Word("cash")]
/// );
/// ```
pub fn split_segments(text: &str) -> Vec<Segment<'_>> {
    let mut segments = Vec::new();
    let mut last = 0;

    for space in WHITESPACE_RUN.find_iter(text) {
        if space.start() > last {
            segments.push(Segment::Word(&text[last..space.start()]));
        }
        segments.push(Segment::Space(space.as_str()));
        last = space.end();
    }
    if last < text.len() {
        segments.push(Segment::Word(&text[last..]));
    }

    segments
}
