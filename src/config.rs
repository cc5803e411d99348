//! Configuration for the page viewer.

use std::time::Duration;

use crate::search::HighlightStyle;

/// Default settle window for search and zoom input.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(500);

/// Page viewer configuration.
#[derive(Debug, Clone)]
pub struct ViewerConfig {
    /// Quiet period before search/zoom changes propagate.
    pub debounce: Duration,

    /// Smallest zoom the zoom input accepts.
    pub min_scale: f32,

    /// Largest zoom the zoom input accepts.
    pub max_scale: f32,

    /// Zoom when the query has none.
    pub default_scale: f32,

    /// Page shown when the query has none (1-indexed).
    pub default_page: u32,

    /// Highlight box colors.
    pub highlight_style: HighlightStyle,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl ViewerConfig {
    /// Create new configuration with defaults.
    pub fn new() -> Self {
        Self {
            debounce: DEFAULT_DEBOUNCE,
            min_scale: 0.5,
            max_scale: 3.0,
            default_scale: 1.0,
            default_page: 1,
            highlight_style: HighlightStyle::default(),
        }
    }

    /// Set the debounce window.
    pub fn with_debounce(mut self, debounce: Duration) -> Self {
        self.debounce = debounce;
        self
    }

    /// Set the accepted zoom range.
    pub fn with_scale_bounds(mut self, min: f32, max: f32) -> Self {
        self.min_scale = min;
        self.max_scale = max;
        self
    }

    /// Set the default zoom.
    pub fn with_default_scale(mut self, scale: f32) -> Self {
        self.default_scale = scale;
        self
    }

    /// Set the default page.
    pub fn with_default_page(mut self, page: u32) -> Self {
        self.default_page = page;
        self
    }

    /// Set the highlight colors.
    pub fn with_highlight_style(mut self, style: HighlightStyle) -> Self {
        self.highlight_style = style;
        self
    }

    /// Constrain a zoom factor to the accepted range.
    pub fn clamp_scale(&self, scale: f32) -> f32 {
        if !scale.is_finite() {
            return self.default_scale;
        }
        scale.clamp(self.min_scale, self.max_scale)
    }
}
