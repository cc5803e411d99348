//! Word geometry extraction.
//!
//! Turns the text items of one page into screen-space boxes, one per
//! whitespace-delimited word, with the font metrics needed to reproduce the
//! word's rendered width.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::geometry::{Matrix, Rect};
use crate::text::measure::{FontSpec, TextMeasurer};
use crate::text::segment::{split_segments, Segment};
use crate::text::TextContent;
use crate::viewport::Viewport;

/// Granularity of a processed box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WordKind {
    /// A single word
    Word,
    /// A whole line of text ending in an end-of-line marker
    Sentence,
}

/// A text item resolved to screen space, before word splitting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineRecord {
    /// Full item string
    pub text: String,
    /// Item transform composed with the viewport and y flip
    pub transform: Matrix,
    /// Screen-space position (baseline) and size
    pub bbox: Rect,
    /// Back-derived font size in pixels, two decimals
    pub font_size: f32,
    /// CSS font family
    pub font_family: String,
    /// Target width over measured width at the trial font size
    pub scale: f32,
    /// `Sentence` iff the source item ends a line
    #[serde(rename = "type")]
    pub kind: WordKind,
}

/// A single highlightable word with resolved screen coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessedWord {
    /// Word text, never empty and never containing whitespace
    pub text: String,
    /// Left edge in screen pixels
    pub x: f32,
    /// Baseline in screen pixels
    pub y: f32,
    /// Measured word width
    pub width: f32,
    /// Line height
    pub height: f32,
    /// Font size in pixels
    pub font_size: f32,
    /// CSS font family
    pub font_family: String,
    /// Scale of the source line
    pub scale: f32,
    /// Always [`WordKind::Word`] for split words
    #[serde(rename = "type")]
    pub kind: WordKind,
    /// Index of the source line in [`PageGeometry::lines`]
    pub line: usize,
}

impl ProcessedWord {
    /// Screen-space box with its top edge at the baseline.
    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }
}

/// Lines and words extracted from one page.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PageGeometry {
    /// One record per non-blank text item
    pub lines: Vec<LineRecord>,
    /// Words in reading order of the source items
    pub words: Vec<ProcessedWord>,
}

impl PageGeometry {
    /// The line a word was split from.
    pub fn line_of(&self, word: &ProcessedWord) -> Option<&LineRecord> {
        self.lines.get(word.line)
    }

    /// Whether nothing was extracted.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

/// Extract per-word screen geometry from a page's text content.
///
/// Blank items are skipped. Each remaining item is mapped through the
/// viewport and the y flip, its font size is back-derived by measuring the
/// whole string, and the string is then walked segment by segment so that
/// whitespace advances the pen without producing a word.
///
/// The result depends only on the inputs.
pub fn extract_geometry(
    content: &TextContent,
    viewport: &Viewport,
    measurer: &dyn TextMeasurer,
) -> Result<PageGeometry> {
    let flip = Matrix::vertical_flip();
    let mut geometry = PageGeometry::default();

    for item in &content.items {
        if item.text.trim().is_empty() {
            continue;
        }

        let screen = flip.multiply(&item.transform.multiply(&viewport.transform));
        let ratio = scale_ratio(&item.transform, &screen);

        let width = item.width * ratio;
        let height = item.height * ratio;
        let (x, y) = (screen.e, screen.f);
        let font_family = content.font_family(&item.font_name).to_string();

        let trial = FontSpec::new(height, font_family.as_str());
        let measured = measurer.measure(&trial, &item.text)?;
        let scale = if measured > 0.0 && measured.is_finite() {
            width / measured
        } else {
            log::debug!("Unmeasurable item {:?} at {}, keeping scale 1", item.text, trial);
            1.0
        };
        let font_size = round_to_hundredths(height * scale);

        let line = geometry.lines.len();
        geometry.lines.push(LineRecord {
            text: item.text.clone(),
            transform: screen,
            bbox: Rect::new(x, y, width, height),
            font_size,
            font_family: font_family.clone(),
            scale,
            kind: if item.has_eol {
                WordKind::Sentence
            } else {
                WordKind::Word
            },
        });

        let font = FontSpec::new(font_size, font_family.as_str());
        let mut current_x = x;
        for segment in split_segments(&item.text) {
            let advance = measurer.measure(&font, segment.as_str())?;
            if let Segment::Word(text) = segment {
                geometry.words.push(ProcessedWord {
                    text: text.to_string(),
                    x: current_x,
                    y,
                    width: advance,
                    height,
                    font_size,
                    font_family: font_family.clone(),
                    scale,
                    kind: WordKind::Word,
                    line,
                });
            }
            current_x += advance;
        }
    }

    log::debug!(
        "Extracted {} words from {} lines at scale {}",
        geometry.words.len(),
        geometry.lines.len(),
        viewport.scale
    );
    Ok(geometry)
}

/// How much the viewport magnified an item, independent of its own scale.
fn scale_ratio(local: &Matrix, screen: &Matrix) -> f32 {
    let local_scale = local.horizontal_scale();
    if local_scale > f32::EPSILON {
        screen.horizontal_scale() / local_scale
    } else {
        1.0
    }
}

fn round_to_hundredths(value: f32) -> f32 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::measure::FixedAdvanceMeasurer;
    use crate::text::{TextItem, TextStyle};
    use crate::viewport::LETTER_VIEW_BOX;

    fn viewport(scale: f32) -> Viewport {
        Viewport::new(LETTER_VIEW_BOX, scale, 0).unwrap()
    }

    /// Item whose reported width matches the fixed 0.5em advance exactly.
    fn item(text: &str, size: f32, x: f32, y: f32) -> TextItem {
        let width = text.chars().count() as f32 * 0.5 * size;
        TextItem::new(text, Matrix::new(size, 0.0, 0.0, size, x, y), width, size)
    }

    #[test]
    fn test_single_item_geometry() {
        let content = TextContent::new(vec![item("hello world", 10.0, 72.0, 700.0)]);
        let geometry =
            extract_geometry(&content, &viewport(1.0), &FixedAdvanceMeasurer::default()).unwrap();

        assert_eq!(geometry.lines.len(), 1);
        assert_eq!(geometry.words.len(), 2);

        let hello = &geometry.words[0];
        assert_eq!(hello.text, "hello");
        assert_eq!(hello.x, 72.0);
        assert_eq!(hello.y, 92.0); // 792 - 700
        assert_eq!(hello.width, 25.0);
        assert_eq!(hello.height, 10.0);
        assert_eq!(hello.font_size, 10.0);
        assert_eq!(hello.scale, 1.0);

        // "hello" + one space at 5px each
        let world = &geometry.words[1];
        assert_eq!(world.x, 72.0 + 25.0 + 5.0);
    }

    #[test]
    fn test_blank_items_skipped() {
        let content = TextContent::new(vec![
            item("   ", 10.0, 0.0, 0.0),
            item("", 10.0, 0.0, 0.0),
            item("x", 10.0, 0.0, 0.0),
        ]);
        let geometry =
            extract_geometry(&content, &viewport(1.0), &FixedAdvanceMeasurer::default()).unwrap();
        assert_eq!(geometry.lines.len(), 1);
        assert_eq!(geometry.words[0].line, 0);
    }

    #[test]
    fn test_font_size_back_derived() {
        // Reported width is twice what the measurer says at the trial size
        let mut wide = item("abcd", 10.0, 0.0, 100.0);
        wide.width *= 2.0;
        let content = TextContent::new(vec![wide]);
        let geometry =
            extract_geometry(&content, &viewport(1.0), &FixedAdvanceMeasurer::default()).unwrap();

        let line = &geometry.lines[0];
        assert_eq!(line.scale, 2.0);
        assert_eq!(line.font_size, 20.0);
        // Words are measured at the derived size
        assert_eq!(geometry.words[0].width, 40.0);
    }

    #[test]
    fn test_font_size_rounded() {
        let mut odd = item("abc", 10.0, 0.0, 0.0);
        odd.width = 15.0 * 1.23456;
        let content = TextContent::new(vec![odd]);
        let geometry =
            extract_geometry(&content, &viewport(1.0), &FixedAdvanceMeasurer::default()).unwrap();
        assert_eq!(geometry.lines[0].font_size, 12.35);
    }

    #[test]
    fn test_eol_tags_line_not_words() {
        let content = TextContent::new(vec![item("end of line", 10.0, 0.0, 0.0).with_eol(true)]);
        let geometry =
            extract_geometry(&content, &viewport(1.0), &FixedAdvanceMeasurer::default()).unwrap();
        assert_eq!(geometry.lines[0].kind, WordKind::Sentence);
        assert!(geometry.words.iter().all(|w| w.kind == WordKind::Word));
    }

    #[test]
    fn test_font_family_from_styles() {
        let mut content = TextContent::new(vec![
            item("styled", 10.0, 0.0, 0.0).with_font_name("f1"),
            item("plain", 10.0, 0.0, 20.0).with_font_name("missing"),
        ]);
        content.styles.insert(
            "f1".to_string(),
            TextStyle {
                font_family: "serif".to_string(),
                ..Default::default()
            },
        );
        let geometry =
            extract_geometry(&content, &viewport(1.0), &FixedAdvanceMeasurer::default()).unwrap();
        assert_eq!(geometry.words[0].font_family, "serif");
        assert_eq!(geometry.words[1].font_family, "sans-serif");
    }

    #[test]
    fn test_zero_measurement_keeps_unit_scale() {
        let content = TextContent::new(vec![item("abc", 10.0, 0.0, 0.0)]);
        let geometry =
            extract_geometry(&content, &viewport(1.0), &FixedAdvanceMeasurer::new(0.0)).unwrap();
        assert_eq!(geometry.lines[0].scale, 1.0);
        assert!(geometry.words[0].x.is_finite());
    }

    #[test]
    fn test_line_of() {
        let content = TextContent::new(vec![item("a b", 10.0, 0.0, 0.0), item("c", 10.0, 0.0, 50.0)]);
        let geometry =
            extract_geometry(&content, &viewport(1.0), &FixedAdvanceMeasurer::default()).unwrap();
        let c = &geometry.words[2];
        assert_eq!(geometry.line_of(c).map(|l| l.text.as_str()), Some("c"));
    }

    #[test]
    fn test_round_to_hundredths() {
        assert_eq!(round_to_hundredths(9.996), 10.0);
        assert_eq!(round_to_hundredths(1.234), 1.23);
    }
}
