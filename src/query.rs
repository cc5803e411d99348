//! View state carried in the page address.
//!
//! The viewer's inputs live in three query parameters: `page`, `scale` and
//! `search`. Anything else in the query string is preserved untouched.

use url::form_urlencoded;

use crate::config::ViewerConfig;
use crate::error::{Error, Result};

/// Page number, zoom and search string for one view.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewQuery {
    /// Page number (1-indexed)
    pub page: u32,
    /// Zoom factor
    pub scale: f32,
    /// Comma-separated highlight terms, empty for none
    pub search: String,
    extra: Vec<(String, String)>,
}

impl ViewQuery {
    /// Query with the configured defaults and no search.
    pub fn new(config: &ViewerConfig) -> Self {
        Self {
            page: config.default_page,
            scale: config.default_scale,
            search: String::new(),
            extra: Vec::new(),
        }
    }

    /// Parse a query string, with or without the leading `?`.
    ///
    /// Malformed `page` or `scale` values fall back to the defaults.
    ///
    /// # Examples
    ///
    /// ```
    /// use pdf_highlight::config::ViewerConfig;
    /// use pdf_highlight::query::ViewQuery;
    ///
    /// let q = ViewQuery::parse("?page=2&scale=1.5&search=Bitcoin%2C+peer", &ViewerConfig::default());
    /// assert_eq!(q.page, 2);
    /// assert_eq!(q.scale, 1.5);
    /// assert_eq!(q.search, "Bitcoin, peer");
    /// ```
    pub fn parse(query: &str, config: &ViewerConfig) -> Self {
        let query = query.strip_prefix('?').unwrap_or(query);
        let mut view = Self::new(config);

        for (key, value) in form_urlencoded::parse(query.as_bytes()) {
            match key.as_ref() {
                "page" => match parse_page(&value) {
                    Ok(page) => view.page = page,
                    Err(e) => log::warn!("{}, using page {}", e, config.default_page),
                },
                "scale" => match parse_scale(&value) {
                    Ok(scale) => view.scale = scale,
                    Err(e) => log::warn!("{}, using scale {}", e, config.default_scale),
                },
                "search" => view.search = value.into_owned(),
                _ => view.extra.push((key.into_owned(), value.into_owned())),
            }
        }

        view
    }

    /// Zoom constrained to the configured range.
    pub fn clamped_scale(&self, config: &ViewerConfig) -> f32 {
        config.clamp_scale(self.scale)
    }

    /// Replace the search string; an empty value clears it.
    pub fn set_search(&mut self, search: &str) {
        self.search = search.to_string();
    }

    /// Replace the zoom from raw input; an empty value restores the default.
    pub fn set_scale(&mut self, raw: &str, config: &ViewerConfig) -> Result<()> {
        if raw.trim().is_empty() {
            self.scale = config.default_scale;
            return Ok(());
        }
        self.scale = parse_scale(raw)?;
        Ok(())
    }

    /// Replace the page number.
    pub fn set_page(&mut self, page: u32) -> Result<()> {
        if page == 0 {
            return Err(Error::InvalidQuery("page numbers start at 1".to_string()));
        }
        self.page = page;
        Ok(())
    }

    /// Serialize back to a query string without the leading `?`.
    ///
    /// `search` is omitted when empty.
    pub fn to_query_string(&self) -> String {
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        for (key, value) in &self.extra {
            serializer.append_pair(key, value);
        }
        serializer.append_pair("page", &self.page.to_string());
        serializer.append_pair("scale", &self.scale.to_string());
        if !self.search.is_empty() {
            serializer.append_pair("search", &self.search);
        }
        serializer.finish()
    }
}

fn parse_page(raw: &str) -> Result<u32> {
    match raw.trim().parse::<u32>() {
        Ok(page) if page >= 1 => Ok(page),
        _ => Err(Error::InvalidQuery(format!("invalid page {:?}", raw))),
    }
}

fn parse_scale(raw: &str) -> Result<f32> {
    match raw.trim().parse::<f32>() {
        Ok(scale) if scale.is_finite() && scale > 0.0 => Ok(scale),
        _ => Err(Error::InvalidQuery(format!("invalid scale {:?}", raw))),
    }
}
