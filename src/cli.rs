//! Command-line interface definitions for the Yahoo! News topics collector.
//!
//! This module defines the CLI arguments and options using the `clap` crate.

use clap::Parser;

/// Command-line arguments for the topics collector.
///
/// Every option has a sensible default: with no arguments the application
/// collects today's topics (on the JST calendar) into the current directory.
///
/// # Examples
///
/// ```sh
/// # Collect today's topics into the current directory
/// yahoo_news_topics
///
/// # Collect a specific date into ./data
/// yahoo_news_topics -d 20240101 -o ./data
///
/// # Cap the walk at five pages
/// yahoo_news_topics --max-pages 5
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Date to collect as YYYYMMDD (defaults to today in JST)
    #[arg(short, long)]
    pub date: Option<String>,

    /// Output directory for the JSON file
    #[arg(short, long, default_value = ".")]
    pub output_dir: String,

    /// Stop after this many pages (unbounded when omitted)
    #[arg(long)]
    pub max_pages: Option<u32>,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = 30)]
    pub timeout_secs: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::parse_from(&["yahoo_news_topics"]);

        assert_eq!(cli.date, None);
        assert_eq!(cli.output_dir, ".");
        assert_eq!(cli.max_pages, None);
        assert_eq!(cli.timeout_secs, 30);
    }

    #[test]
    fn test_cli_parsing() {
        let cli = Cli::parse_from(&[
            "yahoo_news_topics",
            "--date",
            "20240101",
            "--output-dir",
            "./data",
            "--max-pages",
            "5",
            "--timeout-secs",
            "10",
        ]);

        assert_eq!(cli.date.as_deref(), Some("20240101"));
        assert_eq!(cli.output_dir, "./data");
        assert_eq!(cli.max_pages, Some(5));
        assert_eq!(cli.timeout_secs, 10);
    }

    #[test]
    fn test_cli_short_flags() {
        let cli = Cli::parse_from(&["yahoo_news_topics", "-d", "20240101", "-o", "/tmp/topics"]);

        assert_eq!(cli.date.as_deref(), Some("20240101"));
        assert_eq!(cli.output_dir, "/tmp/topics");
    }
}
