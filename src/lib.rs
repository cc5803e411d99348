// Allow some clippy lints that are too pedantic for this project
#![allow(clippy::type_complexity)]
#![allow(clippy::too_many_arguments)]
// Allow unused for tests
#![cfg_attr(test, allow(dead_code))]

//! # PDF Highlight
//!
//! Screen-space word geometry and search highlighting for rendered PDF pages.
//!
//! PDF parsing, font handling and rasterization are left to a rendering
//! library behind the [`render::PdfPage`] trait. This crate takes the text
//! items such a library reports, maps them onto the rendered canvas, splits
//! them into words and picks out the words matching a search.
//!
//! ## Core Features
//!
//! - **Geometry extraction**: viewport and y-flip composition, font size
//!   back-derived from measured widths, per-word boxes ([`extractors`])
//! - **Highlight matching**: comma-separated, case-insensitive substring
//!   targets ([`search`])
//! - **Render pipeline**: cancellable renders where the newest request wins,
//!   published on a watch channel ([`render`])
//! - **View state**: `page`/`scale`/`search` query parameters and input
//!   debouncing ([`query`], [`debounce`])
//!
//! ## Quick Start
//!
//! ```
//! use pdf_highlight::extractors::extract_geometry;
//! use pdf_highlight::geometry::Matrix;
//! use pdf_highlight::search::{highlight_search, HighlightStyle};
//! use pdf_highlight::text::measure::FixedAdvanceMeasurer;
//! use pdf_highlight::text::{TextContent, TextItem};
//! use pdf_highlight::viewport::Viewport;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let item = TextItem::new("A purely peer-to-peer", Matrix::new(10.0, 0.0, 0.0, 10.0, 72.0, 700.0), 105.0, 10.0);
//! let content = TextContent::new(vec![item]);
//! let viewport = Viewport::new([0.0, 0.0, 612.0, 792.0], 1.0, 0)?;
//!
//! let geometry = extract_geometry(&content, &viewport, &FixedAdvanceMeasurer::default())?;
//! let highlights = highlight_search(&geometry.words, "peer", &HighlightStyle::default());
//! assert_eq!(highlights.len(), 1);
//! assert_eq!(highlights[0].word.text, "peer-to-peer");
//! # Ok(())
//! # }
//! ```
//!
//! ## License
//!
//! Licensed under either of:
//!
//! * Apache License, Version 2.0 ([LICENSE-APACHE](LICENSE-APACHE) or <http://www.apache.org/licenses/LICENSE-2.0>)
//! * MIT license ([LICENSE-MIT](LICENSE-MIT) or <http://opensource.org/licenses/MIT>)
//!
//! at your option.

#![warn(missing_docs)]

// Error handling
pub mod error;

// Configuration
pub mod config;

// Geometry
pub mod geometry;
pub mod viewport;

// Text content and measurement
pub mod text;

// Word geometry extraction
pub mod extractors;

// Highlight matching
pub mod search;

// View state
pub mod debounce;
pub mod query;

// Render pipeline
pub mod render;

// Re-exports
pub use config::ViewerConfig;
pub use error::{Error, Result};
pub use extractors::{extract_geometry, PageGeometry, ProcessedWord};
pub use search::{match_highlights, parse_search_terms, Highlight};

// Version info
/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
