//! Compute word boxes and search highlights for one page of a text-content dump
//!
//! Reads a JSON dump of a document's text content (either `{"pages": [...]}`
//! or a single page's `{"items": [...], "styles": {...}}`), renders the page
//! named by the query and prints the resulting page view as JSON.
//!
//! Usage:
//!   highlight_page bitcoin.json --query "page=1&scale=2&search=bitcoin,peer"
//!   highlight_page bitcoin.json --font DejaVuSans.ttf --words

use std::sync::Arc;

use pdf_highlight::config::ViewerConfig;
use pdf_highlight::query::ViewQuery;
use pdf_highlight::render::{JsonDumpSource, PageViewer, PdfSource};
use pdf_highlight::text::measure::{FixedAdvanceMeasurer, TextMeasurer, TrueTypeMeasurer};
use pdf_highlight::Result;

struct CliConfig {
    input: String,
    query: String,
    font: Option<String>,
    words_only: bool,
}

impl CliConfig {
    fn from_args() -> Option<Self> {
        let args: Vec<String> = std::env::args().collect();
        let mut input = None;
        let mut query = String::new();
        let mut font = None;
        let mut words_only = false;

        let mut i = 1;
        while i < args.len() {
            match args[i].as_str() {
                "--query" | "-q" => {
                    i += 1;
                    if i < args.len() {
                        query = args[i].clone();
                    }
                },
                "--font" => {
                    i += 1;
                    if i < args.len() {
                        font = Some(args[i].clone());
                    }
                },
                "--words" => {
                    words_only = true;
                },
                other if input.is_none() && !other.starts_with('-') => {
                    input = Some(other.to_string());
                },
                other => {
                    eprintln!("Ignoring unknown argument: {}", other);
                },
            }
            i += 1;
        }

        Some(Self {
            input: input?,
            query,
            font,
            words_only,
        })
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    env_logger::init();

    let Some(cli) = CliConfig::from_args() else {
        eprintln!("Usage: highlight_page <text-content.json> [--query QUERY] [--font FILE] [--words]");
        eprintln!("Example: highlight_page bitcoin.json --query \"page=1&search=bitcoin,peer\"");
        std::process::exit(1);
    };

    let measurer: Arc<dyn TextMeasurer> = match &cli.font {
        Some(path) => Arc::new(TrueTypeMeasurer::from_file(path)?),
        None => Arc::new(FixedAdvanceMeasurer::default()),
    };

    let config = ViewerConfig::default();
    let query = ViewQuery::parse(&cli.query, &config);
    let document = JsonDumpSource.load(&cli.input).await?;
    log::info!("Loaded {} pages from {}", document.page_count(), cli.input);

    let mut viewer = PageViewer::new(document, measurer, config);
    let view = viewer.request(&query).wait().await?;

    let json = if cli.words_only {
        serde_json::to_string_pretty(&view.geometry.words)?
    } else {
        serde_json::to_string_pretty(&view)?
    };
    println!("{}", json);

    eprintln!(
        "Page {} at {}x: {} words, {} highlights",
        view.page,
        view.scale,
        view.geometry.words.len(),
        view.highlights.len()
    );
    Ok(())
}
