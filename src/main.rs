//! # Yahoo! News Topics
//!
//! A collector for the daily "top-picks" topic listing on Yahoo! News Japan.
//! For one calendar date it walks the paginated listing, pulls the topic
//! records out of each page's embedded `__PRELOADED_STATE__` blob, and
//! writes everything to a single date-stamped JSON file.
//!
//! ## Usage
//!
//! ```sh
//! # Today's topics (JST), written to the current directory
//! yahoo_news_topics
//!
//! # A specific date, written elsewhere
//! yahoo_news_topics -d 20240101 -o ./data
//! ```
//!
//! ## Architecture
//!
//! The application follows a short pipeline:
//! 1. **Fetching**: GET one listing page at a time, pages numbered from 1
//! 2. **Extraction**: decode the embedded state blob and take `topicsList.list`
//! 3. **Pagination**: repeat until a 404, an empty page, or the page ceiling
//! 4. **Output**: write the accumulated records as pretty-printed JSON
//!
//! A 404 is the upstream's end-of-range signal and ends the run
//! successfully. Every other transport failure aborts the run without
//! writing a file.

use clap::Parser;
use std::error::Error;
use std::time::Duration;
use tracing::{debug, error, info, instrument};
use tracing_subscriber::{fmt as tfmt, EnvFilter};

mod cli;
mod crawler;
mod models;
mod outputs;
mod utils;

use cli::Cli;
use crawler::fetcher::PageFetcher;
use crawler::pages::TopicsCrawler;
use models::RunResult;
use outputs::json;
use utils::{ensure_writable_dir, jst_today, parse_run_date};

#[tokio::main]
#[instrument]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    info!("yahoo_news_topics starting up");

    // Parse CLI
    let args = Cli::parse();
    debug!(?args.date, ?args.output_dir, ?args.max_pages, "Parsed CLI arguments");

    // An explicit --date wins; otherwise today on the JST calendar.
    let date = match args.date.as_deref() {
        Some(raw) => parse_run_date(raw)?,
        None => jst_today(),
    };
    info!(%date, "Collecting topics");

    // Early check: ensure the output dir is writable
    if let Err(e) = ensure_writable_dir(&args.output_dir).await {
        error!(
            path = %args.output_dir,
            error = %e,
            "Output directory is not writable (fix perms or choose a different path)"
        );
        return Err(e);
    }

    // ---- Walk the listing ----
    let fetcher = PageFetcher::new(Duration::from_secs(args.timeout_secs))?;
    let crawler = TopicsCrawler::new(fetcher, args.max_pages);

    let crawl = match crawler.crawl(&date).await {
        Ok(crawl) => crawl,
        Err(e) => {
            error!(error = %e, "Topics crawl failed; nothing written");
            return Err(e);
        }
    };
    info!(
        count = crawl.articles.len(),
        pages = crawl.pages,
        stop = ?crawl.stop,
        "Crawl finished"
    );

    // ---- Write the artifact ----
    let output_path = json::write_topics(&date, &crawl.articles, &args.output_dir).await?;

    let run = RunResult {
        date,
        articles: crawl.articles,
        output_path,
    };

    let elapsed = start_time.elapsed();
    info!(
        date = %run.date,
        count = run.articles.len(),
        path = %run.output_path.display(),
        ?elapsed,
        "Topics collection complete"
    );

    Ok(())
}
