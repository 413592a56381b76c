//! Batch report rendering and durable summary persistence
//!
//! Formatting is pure: rendering the same result twice yields identical
//! lines, and the multiset of lines depends only on the collected
//! outcomes, never on their arrival order.

use crate::config::Config;
use crate::error::{Error, Result};
use crate::types::{BatchReport, FetchOutcome, FetchResult};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Render one output line for a collected result
///
/// Success lines carry the per-fetch elapsed seconds (two decimals), the
/// payload size right-justified to seven columns, and the URL. Failure
/// lines are the failure message verbatim — the message already names
/// the URL, so no separate column is added.
pub fn format_result(result: &FetchResult) -> String {
    match result.outcome() {
        FetchOutcome::Success { bytes } => format!(
            "{:.2}s {:>7} {}",
            result.elapsed().as_secs_f64(),
            bytes,
            result.url()
        ),
        FetchOutcome::Failed { message } => message.clone(),
    }
}

/// Render the whole-batch summary line
pub fn format_summary(report: &BatchReport) -> String {
    format!("{:.2}s elapsed", report.elapsed().as_secs_f64())
}

/// Renders batch reports and persists the summary record
///
/// The reporter runs strictly after the collector's barrier, so it is
/// the only writer of the summary file and needs no locking.
#[derive(Clone, Debug)]
pub struct Reporter {
    summary_path: PathBuf,
}

impl Reporter {
    /// Create a reporter from the library configuration
    pub fn new(config: &Config) -> Self {
        Self {
            summary_path: config.report.summary_path.clone(),
        }
    }

    /// Create a reporter writing its summary record to an explicit path
    pub fn with_summary_path(path: impl Into<PathBuf>) -> Self {
        Self {
            summary_path: path.into(),
        }
    }

    /// The path the summary record is written to
    pub fn summary_path(&self) -> &Path {
        &self.summary_path
    }

    /// Write the full report to the primary output stream
    ///
    /// Emits one line per collected result in arrival order, then the
    /// summary line. An empty batch produces only the summary line.
    /// Errors writing to `out` are propagated — unlike summary
    /// persistence, the primary stream is the report's whole purpose.
    pub fn write_report(&self, report: &BatchReport, out: &mut dyn Write) -> Result<()> {
        for result in report.results() {
            writeln!(out, "{}", format_result(result))?;
        }
        writeln!(out, "{}", format_summary(report))?;
        Ok(())
    }

    /// Persist the summary line to the durable record
    ///
    /// Overwrites any prior content and marks the file world-readable on
    /// Unix. Returns [`Error::Persistence`] on failure; the combined
    /// [`write_and_persist`](Self::write_and_persist) path downgrades
    /// that to a warning.
    pub fn persist_summary(&self, report: &BatchReport) -> Result<()> {
        let line = format!("{}\n", format_summary(report));
        write_world_readable(&self.summary_path, line.as_bytes()).map_err(|source| {
            Error::Persistence {
                path: self.summary_path.clone(),
                source,
            }
        })
    }

    /// Write the report to `out`, then persist the summary best-effort
    ///
    /// A persistence failure is logged and swallowed: the report has
    /// already reached the primary stream, and per the aggregator's
    /// contract fetch failures are content, not process failures.
    pub fn write_and_persist(&self, report: &BatchReport, out: &mut dyn Write) -> Result<()> {
        self.write_report(report, out)?;
        if let Err(error) = self.persist_summary(report) {
            tracing::warn!(error = %error, "summary persistence failed");
        }
        Ok(())
    }
}

/// Write `contents` to `path`, truncating, with 0o644 permissions on Unix
fn write_world_readable(path: &Path, contents: &[u8]) -> std::io::Result<()> {
    std::fs::write(path, contents)?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o644))?;
    }

    Ok(())
}

// unwrap/expect are acceptable in tests for concise failure-on-error assertions
#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::FetchRequest;
    use std::time::Duration;
    use tempfile::TempDir;

    fn success(url: &str, millis: u64, bytes: u64) -> FetchResult {
        FetchResult::success(&FetchRequest::from(url), Duration::from_millis(millis), bytes)
    }

    fn failed(url: &str, millis: u64, message: &str) -> FetchResult {
        FetchResult::failed(&FetchRequest::from(url), Duration::from_millis(millis), message)
    }

    // =========================================================================
    // Line formatting
    // =========================================================================

    #[test]
    fn success_line_matches_columnar_format() {
        let result = success("http://gopl.io", 100, 1024);

        assert_eq!(format_result(&result), "0.10s    1024 http://gopl.io");
    }

    #[test]
    fn success_line_right_justifies_small_byte_counts() {
        let result = success("http://a/", 2500, 7);

        // Seven-column byte field: six spaces then the digit
        assert_eq!(format_result(&result), "2.50s       7 http://a/");
    }

    #[test]
    fn success_line_does_not_truncate_wide_byte_counts() {
        let result = success("http://big/", 1000, 123_456_789);

        assert_eq!(format_result(&result), "1.00s 123456789 http://big/");
    }

    #[test]
    fn failure_line_is_the_message_verbatim() {
        let message = "while reading http://bad/: connection reset";
        let result = failed("http://bad/", 50, message);

        assert_eq!(format_result(&result), message);
    }

    #[test]
    fn formatting_is_idempotent() {
        let result = success("http://gopl.io", 123, 4096);

        assert_eq!(format_result(&result), format_result(&result));
    }

    #[test]
    fn summary_line_formats_elapsed_seconds() {
        let report = BatchReport::new(Vec::new(), Duration::from_millis(1234));

        assert_eq!(format_summary(&report), "1.23s elapsed");
    }

    #[test]
    fn empty_batch_summary_reads_zero() {
        let report = BatchReport::new(Vec::new(), Duration::ZERO);

        assert_eq!(format_summary(&report), "0.00s elapsed");
    }

    // =========================================================================
    // Report writing
    // =========================================================================

    #[test]
    fn write_report_emits_one_line_per_result_plus_summary() {
        let report = BatchReport::new(
            vec![
                success("http://a/", 100, 10),
                failed("http://b/", 20, "error sending request for url (http://b/)"),
                success("http://c/", 300, 30),
            ],
            Duration::from_millis(310),
        );
        let reporter = Reporter::with_summary_path("unused.txt");

        let mut out = Vec::new();
        reporter.write_report(&report, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 4, "three result lines plus one summary line");
        assert_eq!(lines[0], "0.10s      10 http://a/");
        assert_eq!(lines[1], "error sending request for url (http://b/)");
        assert_eq!(lines[2], "0.30s      30 http://c/");
        assert_eq!(lines[3], "0.31s elapsed");
    }

    #[test]
    fn write_report_for_empty_batch_is_summary_only() {
        let report = BatchReport::new(Vec::new(), Duration::ZERO);
        let reporter = Reporter::with_summary_path("unused.txt");

        let mut out = Vec::new();
        reporter.write_report(&report, &mut out).unwrap();

        assert_eq!(String::from_utf8(out).unwrap(), "0.00s elapsed\n");
    }

    #[test]
    fn line_multiset_is_independent_of_arrival_order() {
        let a = success("http://a/", 100, 10);
        let b = failed("http://b/", 20, "connect refused on http://b/");
        let reporter = Reporter::with_summary_path("unused.txt");

        let forward = BatchReport::new(vec![a.clone(), b.clone()], Duration::from_millis(100));
        let backward = BatchReport::new(vec![b, a], Duration::from_millis(100));

        let render = |report: &BatchReport| {
            let mut out = Vec::new();
            reporter.write_report(report, &mut out).unwrap();
            let text = String::from_utf8(out).unwrap();
            let mut lines: Vec<String> = text.lines().map(String::from).collect();
            lines.sort();
            lines
        };

        assert_eq!(render(&forward), render(&backward));
    }

    // =========================================================================
    // Summary persistence
    // =========================================================================

    #[test]
    fn persist_summary_writes_only_the_summary_line() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("fetch_output.txt");
        let reporter = Reporter::with_summary_path(&path);

        let report = BatchReport::new(
            vec![success("http://a/", 100, 10)],
            Duration::from_millis(150),
        );
        reporter.persist_summary(&report).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(contents, "0.15s elapsed\n", "result lines never reach the record");
    }

    #[test]
    fn persist_summary_truncates_prior_content() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("fetch_output.txt");
        std::fs::write(&path, "9999.99s elapsed — stale and much longer than the new line\n")
            .unwrap();
        let reporter = Reporter::with_summary_path(&path);

        let report = BatchReport::new(Vec::new(), Duration::from_millis(20));
        reporter.persist_summary(&report).unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "0.02s elapsed\n");
    }

    #[cfg(unix)]
    #[test]
    fn persist_summary_marks_record_world_readable() {
        use std::os::unix::fs::PermissionsExt;

        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("fetch_output.txt");
        let reporter = Reporter::with_summary_path(&path);

        let report = BatchReport::new(Vec::new(), Duration::ZERO);
        reporter.persist_summary(&report).unwrap();

        let mode = std::fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o644);
    }

    #[test]
    fn persist_summary_surfaces_unwritable_path_as_persistence_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("missing-dir").join("fetch_output.txt");
        let reporter = Reporter::with_summary_path(&path);

        let report = BatchReport::new(Vec::new(), Duration::ZERO);
        let result = reporter.persist_summary(&report);

        match result {
            Err(Error::Persistence { path: p, .. }) => assert_eq!(p, path),
            other => panic!("expected Persistence error, got {other:?}"),
        }
    }

    #[test]
    fn write_and_persist_succeeds_despite_unwritable_record() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("missing-dir").join("fetch_output.txt");
        let reporter = Reporter::with_summary_path(&path);

        let report = BatchReport::new(
            vec![success("http://a/", 100, 10)],
            Duration::from_millis(100),
        );

        let mut out = Vec::new();
        // Persistence is best-effort: the report must still succeed
        reporter.write_and_persist(&report, &mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.ends_with("0.10s elapsed\n"));
        assert!(!path.exists());
    }

    #[test]
    fn write_and_persist_writes_both_stream_and_record() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("fetch_output.txt");
        let reporter = Reporter::with_summary_path(&path);

        let report = BatchReport::new(
            vec![success("http://a/", 50, 2048)],
            Duration::from_millis(60),
        );

        let mut out = Vec::new();
        reporter.write_and_persist(&report, &mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert_eq!(text, "0.05s    2048 http://a/\n0.06s elapsed\n");
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "0.06s elapsed\n");
    }
}
