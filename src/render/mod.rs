//! Page rendering pipeline.
//!
//! A render runs as a chain of suspension points: fetch the page, rasterize
//! it, fetch its text content, extract word geometry, match highlights and
//! commit. A [`CancellationToken`] is checked after every one of them so a
//! superseded render never commits.
//!
//! ## Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use pdf_highlight::config::ViewerConfig;
//! use pdf_highlight::query::ViewQuery;
//! use pdf_highlight::render::{InMemoryDocument, PageViewer};
//! use pdf_highlight::text::measure::FixedAdvanceMeasurer;
//!
//! let config = ViewerConfig::default();
//! let document = Arc::new(InMemoryDocument::from_file("bitcoin.json")?);
//! let mut viewer = PageViewer::new(document, Arc::new(FixedAdvanceMeasurer::default()), config.clone());
//!
//! let view = viewer.request(&ViewQuery::parse("page=1&search=bitcoin", &config)).wait().await?;
//! println!("{} highlights", view.highlights.len());
//! ```

mod cancel;
mod memory;
mod source;
mod viewer;

pub use cancel::CancellationToken;
pub use memory::{DocumentDump, InMemoryDocument, InMemoryPage, JsonDumpSource, PageDump};
pub use source::{PdfDocument, PdfPage, PdfSource};
pub use viewer::{PageView, PageViewer, RenderHandle};
