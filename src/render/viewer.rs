//! The page viewer: one page at a time, re-rendered on page or zoom change.
//!
//! Each [`PageViewer::request`] supersedes the render before it. The old
//! task's token is cancelled, and the new task joins the old one before it
//! starts, so at most one render commits at a time and commits land in
//! request order. The committed [`PageView`] is published on a watch channel.
//!
//! Superseding and committing both happen under the watch channel's lock: a
//! render either committed before it was superseded, or it sees the
//! cancellation and commits nothing.

use std::sync::Arc;

use serde::Serialize;
use tokio::sync::{oneshot, watch};
use tokio::task::JoinHandle;

use crate::config::ViewerConfig;
use crate::error::{Error, Result};
use crate::extractors::{extract_page_geometry, PageGeometry};
use crate::query::ViewQuery;
use crate::render::{CancellationToken, PdfDocument};
use crate::search::{highlight_search, Highlight, HighlightStyle};
use crate::text::measure::TextMeasurer;

/// Everything needed to paint one rendered page and its overlays.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageView {
    /// Page number (1-indexed)
    pub page: u32,
    /// Zoom factor the page was rendered at
    pub scale: f32,
    /// Canvas width in pixels
    pub canvas_width: f32,
    /// Canvas height in pixels
    pub canvas_height: f32,
    /// Search string the highlights were computed from
    pub search: String,
    /// Word geometry of the page
    pub geometry: PageGeometry,
    /// Boxes to paint over matching words
    pub highlights: Vec<Highlight>,
}

/// Caller's view of one requested render.
#[derive(Debug)]
pub struct RenderHandle {
    token: CancellationToken,
    outcome: oneshot::Receiver<Result<PageView>>,
}

impl RenderHandle {
    /// Cancel this render.
    pub fn cancel(&self) {
        self.token.cancel();
    }

    /// Whether this render has been cancelled.
    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Wait for the committed view, or `Error::Cancelled` if the render was
    /// superseded before it committed.
    pub async fn wait(self) -> Result<PageView> {
        self.outcome.await.unwrap_or(Err(Error::Cancelled))
    }
}

struct InFlight {
    token: CancellationToken,
    task: JoinHandle<()>,
}

/// Renders pages of one document and keeps their highlights current.
pub struct PageViewer {
    document: Arc<dyn PdfDocument>,
    measurer: Arc<dyn TextMeasurer>,
    config: ViewerConfig,
    state: Arc<watch::Sender<Option<PageView>>>,
    search: Arc<watch::Sender<String>>,
    in_flight: Option<InFlight>,
}

impl PageViewer {
    /// Create a viewer with nothing rendered yet.
    pub fn new(
        document: Arc<dyn PdfDocument>,
        measurer: Arc<dyn TextMeasurer>,
        config: ViewerConfig,
    ) -> Self {
        let (state, _) = watch::channel(None);
        let (search, _) = watch::channel(String::new());
        Self {
            document,
            measurer,
            config,
            state: Arc::new(state),
            search: Arc::new(search),
            in_flight: None,
        }
    }

    /// The viewer configuration.
    pub fn config(&self) -> &ViewerConfig {
        &self.config
    }

    /// Receive every committed view.
    pub fn subscribe(&self) -> watch::Receiver<Option<PageView>> {
        self.state.subscribe()
    }

    /// The last committed view.
    pub fn current(&self) -> Option<PageView> {
        self.state.borrow().clone()
    }

    /// Whether a render task is still running.
    pub fn is_rendering(&self) -> bool {
        self.in_flight
            .as_ref()
            .map(|in_flight| !in_flight.task.is_finished())
            .unwrap_or(false)
    }

    /// Render the page and zoom named by `query`, superseding any render in
    /// flight. Must be called from within a Tokio runtime.
    pub fn request(&mut self, query: &ViewQuery) -> RenderHandle {
        let previous = self.in_flight.take();
        if let Some(previous) = &previous {
            self.supersede(&previous.token);
        }

        self.search.send_replace(query.search.clone());

        let token = CancellationToken::new();
        let (outcome_tx, outcome_rx) = oneshot::channel();
        let job = RenderJob {
            document: Arc::clone(&self.document),
            measurer: Arc::clone(&self.measurer),
            style: self.config.highlight_style.clone(),
            state: Arc::clone(&self.state),
            search: self.search.subscribe(),
            page: query.page,
            scale: query.clamped_scale(&self.config),
            token: token.clone(),
        };

        let task = tokio::spawn(async move {
            if let Some(previous) = previous {
                settle(previous).await;
            }
            let outcome = job.run().await;
            match &outcome {
                Err(e) if e.is_cancelled() => log::debug!("Render superseded"),
                Err(e) => log::error!("Error rendering page: {}", e),
                Ok(view) => log::debug!(
                    "Committed page {} at scale {} with {} highlights",
                    view.page,
                    view.scale,
                    view.highlights.len()
                ),
            }
            // The caller may have dropped its handle
            let _ = outcome_tx.send(outcome);
        });

        self.in_flight = Some(InFlight {
            token: token.clone(),
            task,
        });
        RenderHandle {
            token,
            outcome: outcome_rx,
        }
    }

    /// Change the search string and recompute highlights from the words
    /// already on screen. No re-render happens.
    pub fn update_search(&mut self, search: &str) {
        self.search.send_replace(search.to_string());
        let style = &self.config.highlight_style;
        self.state.send_if_modified(|view| match view {
            Some(view) => {
                view.highlights = highlight_search(&view.geometry.words, search, style);
                view.search = search.to_string();
                true
            },
            None => false,
        });
    }

    /// Cancel the render in flight, if any.
    pub fn cancel(&mut self) {
        if let Some(in_flight) = &self.in_flight {
            self.supersede(&in_flight.token);
        }
    }

    fn supersede(&self, token: &CancellationToken) {
        self.state.send_if_modified(|_| {
            token.cancel();
            false
        });
    }
}

impl Drop for PageViewer {
    fn drop(&mut self) {
        self.cancel();
    }
}

/// Wait for a superseded task to finish. Its cancellation is expected.
async fn settle(previous: InFlight) {
    if let Err(e) = previous.task.await {
        if !e.is_cancelled() {
            log::error!("Previous render task failed: {}", e);
        }
    }
}

struct RenderJob {
    document: Arc<dyn PdfDocument>,
    measurer: Arc<dyn TextMeasurer>,
    style: HighlightStyle,
    state: Arc<watch::Sender<Option<PageView>>>,
    search: watch::Receiver<String>,
    page: u32,
    scale: f32,
    token: CancellationToken,
}

impl RenderJob {
    async fn run(self) -> Result<PageView> {
        self.token.check()?;

        // Nothing from an earlier page may stay on screen
        self.state.send_replace(None);

        let page = self.document.page(self.page).await?;
        self.token.check()?;

        let viewport = page.viewport(self.scale)?;
        page.render(&viewport, &self.token).await?;
        self.token.check()?;

        let geometry = extract_page_geometry(page.as_ref(), &viewport, self.measurer.as_ref()).await;
        self.token.check()?;

        let search = self.search.borrow().clone();
        let view = PageView {
            page: self.page,
            scale: self.scale,
            canvas_width: viewport.width,
            canvas_height: viewport.height,
            highlights: highlight_search(&geometry.words, &search, &self.style),
            search,
            geometry,
        };
        self.commit(view)
    }

    /// Publish `view` unless the render has been cancelled.
    fn commit(&self, mut view: PageView) -> Result<PageView> {
        let committed = self.state.send_if_modified(|state| {
            if self.token.is_cancelled() {
                return false;
            }
            // The search may have changed since highlights were computed
            let search = self.search.borrow();
            if *search != view.search {
                view.search = search.clone();
                view.highlights = highlight_search(&view.geometry.words, &view.search, &self.style);
            }
            *state = Some(view.clone());
            true
        });

        if committed {
            Ok(view)
        } else {
            Err(Error::Cancelled)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use crate::extractors::extract_geometry;
    use crate::geometry::Matrix;
    use crate::render::{InMemoryDocument, InMemoryPage};
    use crate::text::measure::FixedAdvanceMeasurer;
    use crate::text::{TextContent, TextItem};
    use crate::viewport::{Viewport, LETTER_VIEW_BOX};

    fn viewer(pages: Vec<InMemoryPage>) -> PageViewer {
        PageViewer::new(
            Arc::new(InMemoryDocument::new(pages)),
            Arc::new(FixedAdvanceMeasurer::default()),
            ViewerConfig::default(),
        )
    }

    fn page(number: u32, text: &str) -> InMemoryPage {
        let width = text.chars().count() as f32 * 5.0;
        let item = TextItem::new(text, Matrix::new(10.0, 0.0, 0.0, 10.0, 72.0, 700.0), width, 10.0);
        InMemoryPage::new(number, TextContent::new(vec![item]))
    }

    fn query(q: &str) -> ViewQuery {
        ViewQuery::parse(q, &ViewerConfig::default())
    }

    fn job(viewer: &PageViewer, token: CancellationToken) -> RenderJob {
        RenderJob {
            document: Arc::clone(&viewer.document),
            measurer: Arc::clone(&viewer.measurer),
            style: viewer.config.highlight_style.clone(),
            state: Arc::clone(&viewer.state),
            search: viewer.search.subscribe(),
            page: 1,
            scale: 1.0,
            token,
        }
    }

    fn rendered(text: &str) -> PageView {
        let width = text.chars().count() as f32 * 5.0;
        let item = TextItem::new(text, Matrix::new(10.0, 0.0, 0.0, 10.0, 72.0, 700.0), width, 10.0);
        let viewport = Viewport::new(LETTER_VIEW_BOX, 1.0, 0).unwrap();
        let geometry = extract_geometry(
            &TextContent::new(vec![item]),
            &viewport,
            &FixedAdvanceMeasurer::default(),
        )
        .unwrap();
        PageView {
            page: 1,
            scale: 1.0,
            canvas_width: viewport.width,
            canvas_height: viewport.height,
            search: String::new(),
            geometry,
            highlights: Vec::new(),
        }
    }

    #[test]
    fn test_cancelled_job_commits_nothing() {
        let viewer = viewer(vec![page(1, "electronic cash")]);
        let token = CancellationToken::new();
        let job = job(&viewer, token.clone());

        token.cancel();
        assert!(matches!(job.commit(rendered("electronic cash")), Err(Error::Cancelled)));
        assert_eq!(viewer.current(), None);
    }

    #[test]
    fn test_commit_uses_latest_search() {
        let mut viewer = viewer(vec![page(1, "electronic cash")]);
        let job = job(&viewer, CancellationToken::new());

        // Nothing committed yet, so only the search string changes
        viewer.update_search("cash");
        assert_eq!(viewer.current(), None);

        let view = job.commit(rendered("electronic cash")).unwrap();
        assert_eq!(view.search, "cash");
        assert_eq!(view.highlights.len(), 1);
        assert_eq!(viewer.current(), Some(view));
    }

    #[test]
    fn test_cancel_after_commit_keeps_view() {
        let viewer = viewer(vec![page(1, "electronic cash")]);
        let token = CancellationToken::new();
        let job = job(&viewer, token.clone());

        let view = job.commit(rendered("electronic cash")).unwrap();
        viewer.supersede(&token);
        assert!(token.is_cancelled());
        assert_eq!(viewer.current(), Some(view));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_supersession_on_parallel_runtime() {
        let words: Vec<String> = (0..2000).map(|i| format!("word{}", i)).collect();
        let text = words.join(" ");
        let mut viewer = viewer(vec![page(1, &text), page(2, "second page")]);
        let search: Vec<String> = (0..50).map(|i| format!("word{}", i * 7)).collect();
        let search = search.join(",");

        for attempt in 0..20u64 {
            let first = viewer.request(&query(&format!("page=1&search={}", search)));
            tokio::time::sleep(Duration::from_micros(attempt * 250)).await;
            let second = viewer.request(&query("page=2"));

            match first.wait().await {
                Ok(view) => assert_eq!(view.page, 1),
                Err(e) => assert!(e.is_cancelled()),
            }
            let view = second.wait().await.unwrap();
            assert_eq!(view.page, 2);
            assert_eq!(viewer.current().map(|v| v.page), Some(2));
        }
    }

    #[tokio::test]
    async fn test_render_commits_view() {
        let mut viewer = viewer(vec![page(1, "electronic cash system")]);
        let view = viewer.request(&query("page=1&search=cash")).wait().await.unwrap();

        assert_eq!(view.page, 1);
        assert_eq!((view.canvas_width, view.canvas_height), (612.0, 792.0));
        assert_eq!(view.geometry.words.len(), 3);
        assert_eq!(view.highlights.len(), 1);
        assert_eq!(viewer.current(), Some(view));
    }

    #[tokio::test]
    async fn test_scale_is_clamped() {
        let mut viewer = viewer(vec![page(1, "a")]);
        let view = viewer.request(&query("scale=9")).wait().await.unwrap();
        assert_eq!(view.scale, 3.0);
    }

    #[tokio::test]
    async fn test_missing_page_reports_error() {
        let mut viewer = viewer(vec![page(1, "a")]);
        let err = viewer.request(&query("page=5")).wait().await.unwrap_err();
        assert!(matches!(err, Error::PageNotFound { page: 5, count: 1 }));
        assert_eq!(viewer.current(), None);
    }

    #[tokio::test]
    async fn test_update_search_without_rerender() {
        let mut viewer = viewer(vec![page(1, "peer to peer")]);
        viewer.request(&query("search=peer")).wait().await.unwrap();
        assert_eq!(viewer.current().unwrap().highlights.len(), 2);

        viewer.update_search("to");
        let view = viewer.current().unwrap();
        assert_eq!(view.search, "to");
        assert_eq!(view.highlights.len(), 1);

        viewer.update_search("");
        assert!(viewer.current().unwrap().highlights.is_empty());
    }

    #[tokio::test]
    async fn test_text_failure_yields_empty_view() {
        let mut viewer = viewer(vec![page(1, "x").with_text_error("no worker")]);
        let view = viewer.request(&query("search=x")).wait().await.unwrap();
        assert!(view.geometry.is_empty());
        assert!(view.highlights.is_empty());
    }

    #[tokio::test]
    async fn test_explicit_cancel() {
        let mut viewer = viewer(vec![page(1, "x")]);
        let handle = viewer.request(&query("page=1"));
        handle.cancel();
        assert!(handle.is_cancelled());
        assert!(matches!(handle.wait().await, Err(Error::Cancelled)));
        assert_eq!(viewer.current(), None);
    }
}
