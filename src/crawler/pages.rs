//! Sequential pagination over a date's topic listing.
//!
//! Pages are numbered from 1 and walked upward one at a time; each page's
//! records are extracted and appended before the next request goes out. The
//! walk ends when the upstream answers 404 (past the last page), when a page
//! yields no records, or when the optional page ceiling is reached. Any
//! other transport failure aborts the run with nothing written.

use crate::crawler::extract::extract_topics;
use crate::crawler::fetcher::{FetchOutcome, FetchPage};
use crate::models::{StopReason, TopicsCrawl};
use std::error::Error;
use tracing::{debug, error, info, instrument};

/// Drives the page walk for one date against a [`FetchPage`] transport.
pub struct TopicsCrawler<F> {
    fetcher: F,
    page_limit: Option<u32>,
}

impl<F> TopicsCrawler<F>
where
    F: FetchPage,
{
    /// Create a crawler.
    ///
    /// # Arguments
    ///
    /// * `fetcher` - Transport used for each page request
    /// * `page_limit` - Optional ceiling on pages fetched; `None` walks to
    ///   the end of the range
    pub fn new(fetcher: F, page_limit: Option<u32>) -> Self {
        Self {
            fetcher,
            page_limit,
        }
    }

    /// Walk the listing for `date`, accumulating records until a stop
    /// condition is hit.
    ///
    /// The page that triggers the stop never contributes records. The
    /// ceiling in particular is checked before the fetch goes out, so a
    /// capped walk issues exactly `limit` requests.
    ///
    /// # Errors
    ///
    /// Returns the underlying cause on any transport failure (connect or
    /// timeout errors, statuses other than 2xx/404, body read failures).
    /// Records accumulated before the failure are dropped with the crawl.
    #[instrument(level = "info", skip_all, fields(date = %date))]
    pub async fn crawl(&self, date: &str) -> Result<TopicsCrawl, Box<dyn Error + Send + Sync>> {
        let mut articles = Vec::new();
        let mut page: u32 = 1;

        loop {
            if let Some(limit) = self.page_limit {
                if page > limit {
                    info!(limit, "Page ceiling reached; stopping");
                    return Ok(TopicsCrawl {
                        articles,
                        pages: page - 1,
                        stop: StopReason::PageLimit,
                    });
                }
            }

            info!(date, page, "Fetching topics page");
            match self.fetcher.fetch_page(date, page).await {
                FetchOutcome::Success(html) => {
                    let records = extract_topics(&html);
                    if records.is_empty() {
                        info!(page, "Page yielded no records; stopping");
                        return Ok(TopicsCrawl {
                            articles,
                            pages: page - 1,
                            stop: StopReason::EmptyPage,
                        });
                    }
                    debug!(page, count = records.len(), "Extracted topic records");
                    articles.extend(records);
                    page += 1;
                }
                FetchOutcome::NotFound => {
                    info!(page, "Past the last page; stopping");
                    return Ok(TopicsCrawl {
                        articles,
                        pages: page - 1,
                        stop: StopReason::PastLastPage,
                    });
                }
                FetchOutcome::TransportError(e) => {
                    error!(page, error = %e, "Page fetch failed");
                    return Err(e);
                }
            }
        }
    }
}
