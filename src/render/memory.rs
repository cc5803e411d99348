//! Documents backed by pre-extracted text content.
//!
//! Useful when the text content was dumped from a PDF library ahead of time
//! (as JSON) and only geometry and highlighting need to run here.

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::render::{CancellationToken, PdfDocument, PdfPage, PdfSource};
use crate::text::TextContent;
use crate::viewport::{Viewport, LETTER_VIEW_BOX};

fn letter() -> [f32; 4] {
    LETTER_VIEW_BOX
}

/// Serialized form of one page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageDump {
    /// Page box in PDF points
    #[serde(default = "letter")]
    pub view_box: [f32; 4],
    /// Page rotation in degrees
    #[serde(default)]
    pub rotation: i32,
    /// Text content of the page
    pub text_content: TextContent,
}

/// Serialized form of a whole document.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DocumentDump {
    /// Pages in order
    pub pages: Vec<PageDump>,
}

/// A page whose text content is already known.
#[derive(Debug, Clone)]
pub struct InMemoryPage {
    number: u32,
    view_box: [f32; 4],
    rotation: i32,
    content: std::result::Result<TextContent, String>,
    render_time: Duration,
}

impl InMemoryPage {
    /// Letter-sized page with the given text content.
    pub fn new(number: u32, content: TextContent) -> Self {
        Self {
            number,
            view_box: LETTER_VIEW_BOX,
            rotation: 0,
            content: Ok(content),
            render_time: Duration::ZERO,
        }
    }

    /// Set the page box.
    pub fn with_view_box(mut self, view_box: [f32; 4]) -> Self {
        self.view_box = view_box;
        self
    }

    /// Set the page rotation.
    pub fn with_rotation(mut self, rotation: i32) -> Self {
        self.rotation = rotation;
        self
    }

    /// Make rendering take `render_time`, interruptible by cancellation.
    pub fn with_render_time(mut self, render_time: Duration) -> Self {
        self.render_time = render_time;
        self
    }

    /// Make text-content retrieval fail with `message`.
    pub fn with_text_error(mut self, message: impl Into<String>) -> Self {
        self.content = Err(message.into());
        self
    }
}

#[async_trait]
impl PdfPage for InMemoryPage {
    fn number(&self) -> u32 {
        self.number
    }

    fn view_box(&self) -> [f32; 4] {
        self.view_box
    }

    fn rotation(&self) -> i32 {
        self.rotation
    }

    async fn render(&self, viewport: &Viewport, cancel: &CancellationToken) -> Result<()> {
        log::debug!(
            "Rendering page {} at {}x{}",
            self.number,
            viewport.width,
            viewport.height
        );
        if !self.render_time.is_zero() {
            tokio::select! {
                _ = tokio::time::sleep(self.render_time) => {},
                _ = cancel.cancelled() => {},
            }
        }
        cancel.check()
    }

    async fn text_content(&self) -> Result<TextContent> {
        self.content.clone().map_err(Error::TextContent)
    }
}

/// A document made of [`InMemoryPage`]s.
#[derive(Debug, Clone, Default)]
pub struct InMemoryDocument {
    pages: Vec<Arc<InMemoryPage>>,
}

impl InMemoryDocument {
    /// Create a document from pages in order.
    pub fn new(pages: Vec<InMemoryPage>) -> Self {
        Self {
            pages: pages.into_iter().map(Arc::new).collect(),
        }
    }

    /// Build a document from its serialized form, numbering pages from 1.
    pub fn from_dump(dump: DocumentDump) -> Self {
        let pages = dump
            .pages
            .into_iter()
            .zip(1..)
            .map(|(page, number)| {
                InMemoryPage::new(number, page.text_content)
                    .with_view_box(page.view_box)
                    .with_rotation(page.rotation)
            })
            .collect();
        Self::new(pages)
    }

    /// Parse a JSON document dump.
    ///
    /// A bare text-content object is accepted as a one-page document.
    pub fn from_json(json: &str) -> Result<Self> {
        let value: serde_json::Value = serde_json::from_str(json)?;
        if value.get("pages").is_some() {
            Ok(Self::from_dump(serde_json::from_value(value)?))
        } else {
            let content: TextContent = serde_json::from_value(value)?;
            Ok(Self::new(vec![InMemoryPage::new(1, content)]))
        }
    }

    /// Read a JSON document dump from disk.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        log::info!("Loading text content from {}", path.display());
        Self::from_json(&std::fs::read_to_string(path)?)
    }
}

#[async_trait]
impl PdfDocument for InMemoryDocument {
    fn page_count(&self) -> u32 {
        self.pages.len() as u32
    }

    async fn page(&self, number: u32) -> Result<Arc<dyn PdfPage>> {
        let index = number.checked_sub(1).map(|i| i as usize);
        match index.and_then(|i| self.pages.get(i)) {
            Some(page) => Ok(page.clone() as Arc<dyn PdfPage>),
            None => Err(Error::PageNotFound {
                page: number,
                count: self.page_count(),
            }),
        }
    }
}

/// Loads JSON document dumps from the filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonDumpSource;

#[async_trait]
impl PdfSource for JsonDumpSource {
    async fn load(&self, path: &str) -> Result<Arc<dyn PdfDocument>> {
        let json = tokio::fs::read_to_string(path).await?;
        Ok(Arc::new(InMemoryDocument::from_json(&json)?))
    }
}
