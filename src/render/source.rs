//! The PDF rendering collaborator.
//!
//! Parsing, font handling and rasterization belong to whatever library sits
//! behind these traits; the viewer only needs pages, viewports, a cancellable
//! render and the page's text content.

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::Result;
use crate::render::CancellationToken;
use crate::text::TextContent;
use crate::viewport::Viewport;

/// Opens documents.
#[async_trait]
pub trait PdfSource: Send + Sync {
    /// Load the document at `path`.
    async fn load(&self, path: &str) -> Result<Arc<dyn PdfDocument>>;
}

/// An open document.
#[async_trait]
pub trait PdfDocument: Send + Sync {
    /// Number of pages.
    fn page_count(&self) -> u32;

    /// Fetch page `number` (1-indexed).
    async fn page(&self, number: u32) -> Result<Arc<dyn PdfPage>>;
}

/// One page of an open document.
#[async_trait]
pub trait PdfPage: Send + Sync {
    /// Page number (1-indexed).
    fn number(&self) -> u32;

    /// Page box `[x0, y0, x1, y1]` in PDF points.
    fn view_box(&self) -> [f32; 4];

    /// Intrinsic page rotation in degrees.
    fn rotation(&self) -> i32 {
        0
    }

    /// Viewport for this page at `scale`.
    fn viewport(&self, scale: f32) -> Result<Viewport> {
        Viewport::new(self.view_box(), scale, self.rotation())
    }

    /// Rasterize the page onto a canvas sized to `viewport`.
    ///
    /// Implementations should return `Error::Cancelled` promptly once
    /// `cancel` fires.
    async fn render(&self, viewport: &Viewport, cancel: &CancellationToken) -> Result<()>;

    /// Text items and font styles of the page.
    async fn text_content(&self) -> Result<TextContent>;
}
