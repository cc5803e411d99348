//! Extraction of highlightable geometry from rendered pages.

mod words;

pub use words::{extract_geometry, LineRecord, PageGeometry, ProcessedWord, WordKind};

use crate::render::PdfPage;
use crate::text::measure::TextMeasurer;
use crate::viewport::Viewport;

/// Fetch a page's text content and extract its word geometry.
///
/// Retrieval and measurement failures are logged and yield an empty
/// geometry, so a broken text layer never takes the page view down with it.
pub async fn extract_page_geometry(
    page: &dyn PdfPage,
    viewport: &Viewport,
    measurer: &dyn TextMeasurer,
) -> PageGeometry {
    let content = match page.text_content().await {
        Ok(content) => content,
        Err(e) => {
            log::error!("Error extracting text content: {}", e);
            return PageGeometry::default();
        },
    };

    extract_geometry(&content, viewport, measurer).unwrap_or_else(|e| {
        log::error!("Error extracting text content: {}", e);
        PageGeometry::default()
    })
}
