//! JSON artifact generation.
//!
//! This module serializes the accumulated topic records to a single
//! date-stamped file for downstream consumption.
//!
//! # Output Format
//!
//! A pretty-printed JSON array, UTF-8 with Japanese text written raw rather
//! than `\u`-escaped, records in accumulation order:
//!
//! ```text
//! output_dir/yahoo_news_20240101.json
//! ```

use crate::models::TopicRecord;
use std::error::Error;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{info, instrument};

/// Write the collected records for `date` to disk.
///
/// Serializes the whole collection in one pass to
/// `{output_dir}/yahoo_news_{date}.json`. An empty collection still writes
/// `[]`: an artifact that exists but holds nothing records a completed run.
///
/// # Returns
///
/// The path of the written file.
#[instrument(level = "info", skip_all, fields(date = %date, count = articles.len()))]
pub async fn write_topics(
    date: &str,
    articles: &[TopicRecord],
    output_dir: &str,
) -> Result<PathBuf, Box<dyn Error>> {
    let json = serde_json::to_string_pretty(articles)?;

    let path = Path::new(output_dir).join(format!("yahoo_news_{date}.json"));
    info!(path = %path.display(), "Writing JSON");
    fs::write(&path, json).await?;
    info!(path = %path.display(), "Wrote topics JSON file");

    Ok(path)
}
