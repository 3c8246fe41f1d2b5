//! Utility functions for run dates, log truncation, and file system checks.
//!
//! This module provides helper functions used throughout the application:
//! - Run-date handling on the JST (UTC+9) publication calendar
//! - String truncation for logging page payload previews
//! - File system validation for the output directory

use chrono::{FixedOffset, NaiveDate, Utc};
use std::error::Error;
use std::fs as stdfs;
use tokio::fs;
use tracing::{info, instrument};

/// Today's date on the Japanese publication calendar, as `YYYYMMDD`.
///
/// Yahoo! News keys its topic listings to JST regardless of where this
/// process runs, so the offset is fixed at UTC+9 rather than taken from
/// the host timezone.
pub fn jst_today() -> String {
    let jst = FixedOffset::east_opt(9 * 3600).unwrap();
    Utc::now().with_timezone(&jst).format("%Y%m%d").to_string()
}

/// Validate a caller-supplied run date.
///
/// Accepts exactly eight ASCII digits naming a real calendar date, and
/// returns the string unchanged for use in URLs and the output filename.
///
/// # Errors
///
/// Returns an error describing the expected format if the input is not a
/// plausible `YYYYMMDD` date.
pub fn parse_run_date(raw: &str) -> Result<String, Box<dyn Error>> {
    let well_formed = raw.len() == 8 && raw.bytes().all(|b| b.is_ascii_digit());
    if !well_formed || NaiveDate::parse_from_str(raw, "%Y%m%d").is_err() {
        return Err(format!("invalid date {raw:?}: expected YYYYMMDD").into());
    }
    Ok(raw.to_string())
}

/// Truncate a string for logging purposes.
///
/// Long strings are truncated to at most `max` bytes with an ellipsis and
/// byte count indicator appended. The cut always lands on a char boundary,
/// so multibyte page content never splits mid-character.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(truncate_for_log("short", 100), "short");
/// assert_eq!(truncate_for_log(&"a".repeat(500), 10), "aaaaaaaaaa…(+490 bytes)");
/// ```
pub fn truncate_for_log(s: &str, max: usize) -> String {
    if s.len() <= max {
        return s.to_string();
    }
    let mut cut = max;
    while !s.is_char_boundary(cut) {
        cut -= 1;
    }
    format!("{}…(+{} bytes)", &s[..cut], s.len() - cut)
}

/// Ensure a directory exists and is writable.
///
/// Creates the directory if it doesn't exist, then performs a write test by
/// creating and immediately deleting a probe file.
///
/// # Errors
///
/// Returns an error if the directory cannot be created or is not writable
/// (permission denied, read-only filesystem, etc.).
#[instrument(level = "info", skip_all, fields(path = %path))]
pub async fn ensure_writable_dir(path: &str) -> Result<(), Box<dyn Error>> {
    if let Err(e) = fs::create_dir_all(path).await {
        return Err(Box::new(e));
    }
    // Try a small sync write using std fs (simpler error surface)
    let probe_path = format!("{}/..__probe_write__", path.trim_end_matches('/'));
    match stdfs::File::create(&probe_path) {
        Ok(_) => {
            let _ = stdfs::remove_file(&probe_path);
            info!("Output directory is writable");
            Ok(())
        }
        Err(e) => Err(Box::new(e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_jst_today_shape() {
        let today = jst_today();
        assert_eq!(today.len(), 8);
        assert!(today.bytes().all(|b| b.is_ascii_digit()));
        assert!(NaiveDate::parse_from_str(&today, "%Y%m%d").is_ok());
    }

    #[test]
    fn test_parse_run_date_valid() {
        assert_eq!(parse_run_date("20240101").unwrap(), "20240101");
        assert_eq!(parse_run_date("19991231").unwrap(), "19991231");
    }

    #[test]
    fn test_parse_run_date_rejects_wrong_length() {
        assert!(parse_run_date("2024011").is_err());
        assert!(parse_run_date("202401011").is_err());
        assert!(parse_run_date("").is_err());
    }

    #[test]
    fn test_parse_run_date_rejects_non_digits() {
        assert!(parse_run_date("2024010a").is_err());
        assert!(parse_run_date("2024-1-1").is_err());
    }

    #[test]
    fn test_parse_run_date_rejects_impossible_dates() {
        assert!(parse_run_date("20240231").is_err());
        assert!(parse_run_date("20241301").is_err());
        assert!(parse_run_date("20240100").is_err());
    }

    #[test]
    fn test_truncate_for_log_short_string() {
        let s = "Hello, world!";
        assert_eq!(truncate_for_log(s, 100), "Hello, world!");
    }

    #[test]
    fn test_truncate_for_log_long_string() {
        let s = "a".repeat(500);
        let result = truncate_for_log(&s, 100);
        assert!(result.starts_with(&"a".repeat(100)));
        assert!(result.contains("…(+400 bytes)"));
    }

    #[test]
    fn test_truncate_for_log_multibyte_boundary() {
        // Each of these characters is three bytes in UTF-8.
        let s = "速報速報";
        assert_eq!(truncate_for_log(s, 4), "速…(+9 bytes)");
        assert_eq!(truncate_for_log(s, 12), "速報速報");
    }
}
