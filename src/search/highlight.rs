//! Highlight matching over extracted words.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::extractors::{ProcessedWord, WordKind};
use crate::geometry::Rect;

/// Fill and border colors for highlight boxes, as CSS color strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HighlightStyle {
    /// Box fill
    pub color: String,
    /// Box border
    pub border_color: String,
}

impl Default for HighlightStyle {
    fn default() -> Self {
        Self {
            color: "rgba(255, 255, 0, 0.4)".to_string(),
            border_color: "rgba(255, 255, 0, 0.8)".to_string(),
        }
    }
}

/// Identifies one highlight within a single matching pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HighlightId {
    /// Index of the search target that matched
    pub target: usize,
    /// Index of the matched word
    pub word: usize,
}

impl fmt::Display for HighlightId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "word-{}-{}", self.target, self.word)
    }
}

/// A word selected for emphasis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Highlight {
    /// Unique within one pass
    pub id: HighlightId,
    /// The matched word
    pub word: ProcessedWord,
    /// Box to paint, sitting above the word's baseline
    pub rect: Rect,
    /// Box fill
    pub color: String,
    /// Box border
    pub border_color: String,
}

/// Split a comma-separated search string into trimmed, non-empty targets.
///
/// # Examples
///
/// ```
/// use pdf_highlight::search::parse_search_terms;
///
/// assert_eq!(parse_search_terms(" Bitcoin, peer ,,"), vec!["Bitcoin", "peer"]);
/// assert!(parse_search_terms("   ").is_empty());
/// ```
pub fn parse_search_terms(search: &str) -> Vec<String> {
    search
        .split(',')
        .map(str::trim)
        .filter(|term| !term.is_empty())
        .map(str::to_string)
        .collect()
}

/// Select every word containing any target, case-insensitively.
///
/// Targets are matched independently, so a word containing two targets is
/// highlighted twice with distinct ids. Only [`WordKind::Word`] entries are
/// considered.
pub fn match_highlights<S: AsRef<str>>(
    words: &[ProcessedWord],
    targets: &[S],
    style: &HighlightStyle,
) -> Vec<Highlight> {
    let lowered: Vec<String> = words.iter().map(|w| w.text.to_lowercase()).collect();
    let mut highlights = Vec::new();

    for (target_index, target) in targets.iter().enumerate() {
        let needle = target.as_ref().to_lowercase();
        if needle.is_empty() {
            continue;
        }

        for (word_index, word) in words.iter().enumerate() {
            if word.kind != WordKind::Word || !lowered[word_index].contains(&needle) {
                continue;
            }
            highlights.push(Highlight {
                id: HighlightId {
                    target: target_index,
                    word: word_index,
                },
                word: word.clone(),
                rect: word.rect().offset(0.0, -word.height),
                color: style.color.clone(),
                border_color: style.border_color.clone(),
            });
        }
    }

    log::debug!("{} highlights for {} targets", highlights.len(), targets.len());
    highlights
}

/// Parse `search` and match it against `words`.
pub fn highlight_search(
    words: &[ProcessedWord],
    search: &str,
    style: &HighlightStyle,
) -> Vec<Highlight> {
    match_highlights(words, &parse_search_terms(search), style)
}
