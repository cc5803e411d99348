//! Page text content as reported by the PDF rendering collaborator.
//!
//! The types here mirror the text-content dump of a browser PDF library:
//! one [`TextItem`] per run of text sharing a transform, plus a style table
//! keyed by the library's internal font name.

pub mod measure;
pub mod segment;

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::geometry::Matrix;

/// Font family used when the style table has no entry for an item's font.
pub const FALLBACK_FONT_FAMILY: &str = "sans-serif";

/// A run of text on a page with its own local transform.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextItem {
    /// Raw string content
    #[serde(rename = "str")]
    pub text: String,
    /// Text space to page space
    pub transform: Matrix,
    /// Advance width in page units
    #[serde(default)]
    pub width: f32,
    /// Line height in page units
    #[serde(default)]
    pub height: f32,
    /// Item ends a line
    #[serde(default, rename = "hasEOL")]
    pub has_eol: bool,
    /// Library-internal font name, key into [`TextContent::styles`]
    #[serde(default)]
    pub font_name: String,
}

impl TextItem {
    /// Create an item; width and height are in page units.
    pub fn new(text: impl Into<String>, transform: Matrix, width: f32, height: f32) -> Self {
        Self {
            text: text.into(),
            transform,
            width,
            height,
            has_eol: false,
            font_name: String::new(),
        }
    }

    /// Mark the item as ending its line.
    pub fn with_eol(mut self, has_eol: bool) -> Self {
        self.has_eol = has_eol;
        self
    }

    /// Set the font name used to look up the item's style.
    pub fn with_font_name(mut self, font_name: impl Into<String>) -> Self {
        self.font_name = font_name.into();
        self
    }
}

/// Style entry for one library font.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TextStyle {
    /// CSS font family
    pub font_family: String,
    /// Ascent as a fraction of the em
    pub ascent: f32,
    /// Descent as a fraction of the em (negative)
    pub descent: f32,
    /// Vertical writing mode
    pub vertical: bool,
}

/// All text on one page.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TextContent {
    /// Text items in content-stream order
    pub items: Vec<TextItem>,
    /// Styles keyed by font name
    #[serde(default)]
    pub styles: HashMap<String, TextStyle>,
}

impl TextContent {
    /// Create text content without any styles.
    pub fn new(items: Vec<TextItem>) -> Self {
        Self {
            items,
            styles: HashMap::new(),
        }
    }

    /// Parse a JSON text-content dump.
    pub fn from_json(json: &str) -> crate::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// CSS font family for `font_name`, or [`FALLBACK_FONT_FAMILY`].
    pub fn font_family(&self, font_name: &str) -> &str {
        self.styles
            .get(font_name)
            .map(|style| style.font_family.as_str())
            .filter(|family| !family.is_empty())
            .unwrap_or(FALLBACK_FONT_FAMILY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DUMP: &str = r#"{
        "items": [
            {"str": "Bitcoin: A Peer-to-Peer Electronic Cash System", "dir": "ltr",
             "width": 280.5, "height": 14.3, "transform": [14.3, 0, 0, 14.3, 160.2, 700.1],
             "fontName": "g_d0_f1", "hasEOL": true},
            {"str": "Satoshi Nakamoto", "transform": [12, 0, 0, 12, 250, 660],
             "width": 95.0, "height": 12, "fontName": "g_d0_f2"}
        ],
        "styles": {
            "g_d0_f1": {"fontFamily": "serif", "ascent": 0.891, "descent": -0.216, "vertical": false}
        }
    }"#;

    #[test]
    fn test_parse_text_content_dump() {
        let content = TextContent::from_json(DUMP).unwrap();
        assert_eq!(content.items.len(), 2);

        let title = &content.items[0];
        assert!(title.text.starts_with("Bitcoin"));
        assert!(title.has_eol);
        assert_eq!(title.transform.e, 160.2);
        assert_eq!(title.font_name, "g_d0_f1");

        assert!(!content.items[1].has_eol);
    }

    #[test]
    fn test_font_family_fallback() {
        let content = TextContent::from_json(DUMP).unwrap();
        assert_eq!(content.font_family("g_d0_f1"), "serif");
        assert_eq!(content.font_family("g_d0_f2"), FALLBACK_FONT_FAMILY);
    }

    #[test]
    fn test_malformed_dump() {
        assert!(TextContent::from_json("{\"items\": [{\"str\": 3}]}").is_err());
    }
}
