//! Search highlighting for extracted page words.
//!
//! A search string is a comma-separated list of targets. Every word that
//! contains a target (case-insensitively) becomes a [`Highlight`] box,
//! recomputed from scratch whenever the words or the search string change.
//!
//! ## Example
//!
//! ```ignore
//! use pdf_highlight::search::{highlight_search, HighlightStyle};
//!
//! let geometry = extract_geometry(&content, &viewport, &measurer)?;
//! for h in highlight_search(&geometry.words, "Bitcoin, peer", &HighlightStyle::default()) {
//!     println!("{} {:?}", h.id, h.rect);
//! }
//! ```

mod highlight;

pub use highlight::{
    highlight_search, match_highlights, parse_search_terms, Highlight, HighlightId,
    HighlightStyle,
};
