//! Error types for the highlighting library.
//!
//! This module defines all error types that can occur while rendering a page,
//! extracting word geometry and matching highlights.

/// Result type alias for highlighting library operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur during page rendering and highlighting.
#[derive(Debug, thiserror::Error)]
#[allow(clippy::enum_variant_names)] // "Invalid" prefix is intentional for clarity
pub enum Error {
    /// A newer render superseded this one
    #[error("Rendering cancelled")]
    Cancelled,

    /// Requested page does not exist in the document
    #[error("Page {page} not found (document has {count} pages)")]
    PageNotFound {
        /// Requested page number (1-indexed)
        page: u32,
        /// Number of pages in the document
        count: u32,
    },

    /// Zoom factor is not a finite positive number
    #[error("Invalid scale: {0}")]
    InvalidScale(f32),

    /// Page rotation is not a multiple of 90 degrees
    #[error("Invalid rotation: {0} (must be a multiple of 90)")]
    InvalidRotation(i32),

    /// Text content could not be retrieved from a page
    #[error("Text content error: {0}")]
    TextContent(String),

    /// Text could not be measured
    #[error("Measurement error: {0}")]
    Measure(String),

    /// Font error
    #[error("Font error: {0}")]
    Font(String),

    /// Page rasterization failed
    #[error("Render error: {0}")]
    Render(String),

    /// Query string could not be interpreted
    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Whether this error only signals that a newer render took over.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Error::Cancelled)
    }
}
