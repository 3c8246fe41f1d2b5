//! Data models for the embedded page state and crawl results.
//!
//! This module defines the core data structures used throughout the application:
//! - [`PreloadedState`] / [`TopicsListing`]: serde view of the state blob
//!   embedded in each listing page
//! - [`TopicRecord`]: a single topic entry, kept as raw JSON
//! - [`TopicsCrawl`] / [`StopReason`]: what a finished page walk produced and
//!   why it stopped
//! - [`RunResult`]: the final product of a run
//!
//! Only the `topicsList.list` path of the state blob is modeled; everything
//! else Yahoo! puts in there is ignored during decoding.

use serde::Deserialize;
use std::path::PathBuf;

/// A single topic entry exactly as the page's state blob carried it.
///
/// Records stay opaque end to end: no field is ever read or rewritten, and
/// the output file reproduces them unmodified, so upstream schema changes
/// pass straight through.
pub type TopicRecord = serde_json::Value;

/// Serde view of the `__PRELOADED_STATE__` blob embedded in a listing page.
///
/// Unknown keys are ignored; a blob without the `topicsList.list` path fails
/// to decode and is treated upstream as a page with no records.
#[derive(Debug, Deserialize)]
pub struct PreloadedState {
    /// The topic listing section of the page state.
    #[serde(rename = "topicsList")]
    pub topics_list: TopicsListing,
}

/// The listing container inside [`PreloadedState`].
#[derive(Debug, Deserialize)]
pub struct TopicsListing {
    /// Topic records in the order the page presents them.
    pub list: Vec<TopicRecord>,
}

/// Why a page walk stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// The upstream returned 404 for the next page number.
    PastLastPage,
    /// A page yielded no extractable records.
    EmptyPage,
    /// The configured `--max-pages` ceiling was reached.
    PageLimit,
}

/// Everything a finished page walk produced.
#[derive(Debug)]
pub struct TopicsCrawl {
    /// Accumulated records, page order then within-page order.
    pub articles: Vec<TopicRecord>,
    /// Number of pages that contributed records.
    pub pages: u32,
    /// The condition that ended the walk.
    pub stop: StopReason,
}

/// The final product of a run: what was collected and where it was written.
#[derive(Debug)]
pub struct RunResult {
    /// The collected date in `YYYYMMDD` form.
    pub date: String,
    /// All records, in accumulation order.
    pub articles: Vec<TopicRecord>,
    /// Path of the JSON artifact.
    pub output_path: PathBuf,
}
