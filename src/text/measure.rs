//! Text measurement.
//!
//! The extractor never knows the true rendered font size of a text item, so
//! it measures strings at trial sizes and back-derives the size from the
//! ratio of target to measured width. Anything that can answer "how wide is
//! this string in this font" can drive it.

use std::fmt;
use std::path::Path;

use ttf_parser::Face;

use crate::error::{Error, Result};

/// A font size and family, as used in a CSS font shorthand.
#[derive(Debug, Clone, PartialEq)]
pub struct FontSpec {
    /// Font size in pixels
    pub size_px: f32,
    /// Font family name
    pub family: String,
}

impl FontSpec {
    /// Create a font specification.
    pub fn new(size_px: f32, family: impl Into<String>) -> Self {
        Self {
            size_px,
            family: family.into(),
        }
    }
}

impl fmt::Display for FontSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}px {}", self.size_px, self.family)
    }
}

/// Measures rendered string widths in pixels.
pub trait TextMeasurer: Send + Sync {
    /// Width of `text` rendered in `font`, in pixels.
    fn measure(&self, font: &FontSpec, text: &str) -> Result<f32>;
}

/// Measurer where every character advances by the same fraction of an em.
///
/// Family is ignored. Useful when no font program is available.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedAdvanceMeasurer {
    em_ratio: f32,
}

impl FixedAdvanceMeasurer {
    /// Create a measurer advancing `em_ratio` ems per character.
    pub fn new(em_ratio: f32) -> Self {
        Self { em_ratio }
    }
}

impl Default for FixedAdvanceMeasurer {
    fn default() -> Self {
        Self::new(0.5)
    }
}

impl TextMeasurer for FixedAdvanceMeasurer {
    fn measure(&self, font: &FontSpec, text: &str) -> Result<f32> {
        Ok(text.chars().count() as f32 * self.em_ratio * font.size_px)
    }
}

/// Measurer backed by the horizontal metrics of a TrueType/OpenType font.
///
/// Every family is measured with the same font program.
pub struct TrueTypeMeasurer {
    data: Vec<u8>,
    units_per_em: f32,
}

impl TrueTypeMeasurer {
    /// Parse font data (TTF or OTF).
    pub fn from_bytes(data: Vec<u8>) -> Result<Self> {
        if data.is_empty() {
            return Err(Error::Font("Font file is empty".to_string()));
        }
        let units_per_em = Face::parse(&data, 0)
            .map_err(|e| Error::Font(format!("Failed to parse font file: {}", e)))?
            .units_per_em() as f32;
        Ok(Self { data, units_per_em })
    }

    /// Read and parse a font file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        log::debug!("Loading measurement font from {}", path.display());
        Self::from_bytes(std::fs::read(path)?)
    }
}

impl fmt::Debug for TrueTypeMeasurer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TrueTypeMeasurer")
            .field("bytes", &self.data.len())
            .field("units_per_em", &self.units_per_em)
            .finish()
    }
}

impl TextMeasurer for TrueTypeMeasurer {
    fn measure(&self, font: &FontSpec, text: &str) -> Result<f32> {
        let face = Face::parse(&self.data, 0).map_err(|e| Error::Measure(e.to_string()))?;
        let notdef = face
            .glyph_hor_advance(ttf_parser::GlyphId(0))
            .map(f32::from)
            .unwrap_or(self.units_per_em / 2.0);

        let units: f32 = text
            .chars()
            .map(|ch| {
                face.glyph_index(ch)
                    .and_then(|glyph| face.glyph_hor_advance(glyph))
                    .map(f32::from)
                    .unwrap_or(notdef)
            })
            .sum();

        Ok(units / self.units_per_em * font.size_px)
    }
}
