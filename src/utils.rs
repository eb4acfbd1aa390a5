//! Utility functions for run dates, log previews and file system checks.
//!
//! This module provides helper functions used throughout the application:
//! - The default process date (the day before the run)
//! - String truncation for logging
//! - File system validation for output directories

use chrono::{Duration, Local, NaiveDate};
use std::error::Error;
use std::fs as stdfs;
use tokio::fs;
use tracing::{info, instrument};

/// The date a run processes when none is given: yesterday, local time.
///
/// Scrapers keep adding stories throughout the day, so a run formats the
/// last complete day.
#[instrument]
pub fn default_process_date() -> NaiveDate {
    let date = Local::now().date_naive() - Duration::days(1);
    tracing::debug!(%date, "Computed default process date");
    date
}

/// Truncate a string for logging purposes.
///
/// Long strings are truncated to `max` characters with an ellipsis and
/// byte count indicator appended.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(truncate_for_log("short", 100), "short");
/// assert_eq!(truncate_for_log(&"a".repeat(500), 10), "aaaaaaaaaa…(+490 bytes)");
/// ```
pub fn truncate_for_log(s: &str, max: usize) -> String {
    match s.char_indices().nth(max) {
        None => s.to_string(),
        Some((cut, _)) => format!("{}…(+{} bytes)", &s[..cut], s.len() - cut),
    }
}

/// Ensure a directory exists and is writable.
///
/// Creates the directory if it doesn't exist, then creates and immediately
/// deletes a probe file.
///
/// # Errors
///
/// Returns an error if:
/// - The directory cannot be created
/// - The directory is not writable (permission denied, read-only filesystem, etc.)
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
    fn test_truncate_for_log_multibyte() {
        let s = "\u{2013}".repeat(5);
        assert_eq!(truncate_for_log(&s, 2), "\u{2013}\u{2013}…(+9 bytes)");
    }

    #[test]
    fn test_default_process_date_is_yesterday() {
        let today = Local::now().date_naive();
        let date = default_process_date();
        // Allow for the clock rolling over midnight between the two reads.
        assert!(date == today - Duration::days(1) || date == today);
    }

    #[tokio::test]
    async fn test_ensure_writable_dir_creates_directory() {
        let tmp = tempfile::tempdir().unwrap();
        let nested = tmp.path().join("out/stories");
        let path = nested.to_str().unwrap();
        ensure_writable_dir(path).await.unwrap();
        assert!(nested.is_dir());
    }
}
