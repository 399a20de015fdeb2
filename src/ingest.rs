//! Log ingestion
//!
//! Reads tab-separated activity logs from a directory and turns them into
//! validated [`LogRecord`]s. Line format:
//!
//! ```text
//! ip \t user \t date \t event \t status
//! ```
//!
//! where `date` uses the `D.M.YYYY H:m:s` pattern and `event` is either a
//! bare token or `SOLVE_TASK <id>` / `DONE_TASK <id>`.
//!
//! Ingestion is best-effort: any malformed line (wrong field count,
//! unparsable date, unknown event or status token, bad task id) is counted,
//! logged at debug and dropped. Only I/O failures are real errors.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, info};

use crate::store::{parse_timestamp, Event, LogRecord, Status};

/// Number of tab-separated fields in a well-formed line
const FIELD_COUNT: usize = 5;

/// Errors that can occur during ingestion
#[derive(Error, Debug)]
pub enum IngestError {
    /// Reading the log directory or a log file failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The csv reader failed on a file (not an individual bad line)
    #[error("Log file read error: {0}")]
    Reader(#[from] csv::Error),
}

/// Result of ingesting a directory of logs
#[derive(Debug, Default)]
pub struct IngestReport {
    /// Validated records, in file-then-line order
    pub records: Vec<LogRecord>,
    /// Total lines seen
    pub lines_read: usize,
    /// Lines dropped as malformed
    pub lines_skipped: usize,
}

impl IngestReport {
    fn absorb(&mut self, other: IngestReport) {
        self.records.extend(other.records);
        self.lines_read += other.lines_read;
        self.lines_skipped += other.lines_skipped;
    }
}

/// Directory-based log ingestor
pub struct LogIngestor {
    log_dir: PathBuf,
}

impl LogIngestor {
    /// Create an ingestor for a directory of `.log` files
    pub fn new(log_dir: impl Into<PathBuf>) -> Self {
        Self {
            log_dir: log_dir.into(),
        }
    }

    /// Ingest every `.log` file in the directory (extension match is
    /// case-insensitive; other files are ignored)
    pub fn load(&self) -> Result<IngestReport, IngestError> {
        let mut report = IngestReport::default();

        for entry in fs::read_dir(&self.log_dir)? {
            let path = entry?.path();
            if !is_log_file(&path) {
                continue;
            }
            debug!(file = %path.display(), "ingesting log file");
            report.absorb(self.load_file(&path)?);
        }

        info!(
            records = report.records.len(),
            lines_read = report.lines_read,
            lines_skipped = report.lines_skipped,
            "ingestion complete"
        );
        Ok(report)
    }

    /// Ingest a single log file
    pub fn load_file(&self, path: &Path) -> Result<IngestReport, IngestError> {
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(b'\t')
            .quoting(false)
            .has_headers(false)
            .flexible(true)
            .from_path(path)?;
        Ok(read_records(&mut reader))
    }

    /// Ingest log lines from a string (useful for testing)
    pub fn load_str(data: &str) -> IngestReport {
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(b'\t')
            .quoting(false)
            .has_headers(false)
            .flexible(true)
            .from_reader(data.as_bytes());
        read_records(&mut reader)
    }
}

fn is_log_file(path: &Path) -> bool {
    path.is_file()
        && path
            .extension()
            .map(|e| e.eq_ignore_ascii_case("log"))
            .unwrap_or(false)
}

fn read_records<R: std::io::Read>(reader: &mut csv::Reader<R>) -> IngestReport {
    let mut report = IngestReport::default();

    for (line_num, result) in reader.records().enumerate() {
        report.lines_read += 1;
        let line = line_num + 1;

        let row = match result {
            Ok(r) => r,
            Err(e) => {
                debug!(line, error = %e, "skipping unreadable line");
                report.lines_skipped += 1;
                continue;
            }
        };

        match parse_row(&row) {
            Some(record) => report.records.push(record),
            None => {
                debug!(line, "skipping malformed line");
                report.lines_skipped += 1;
            }
        }
    }

    report
}

/// Parse one tab-separated row into a record; `None` means malformed
fn parse_row(row: &csv::StringRecord) -> Option<LogRecord> {
    if row.len() != FIELD_COUNT {
        return None;
    }

    let ip = row.get(0)?.trim();
    let user = row.get(1)?.trim();
    if ip.is_empty() || user.is_empty() {
        return None;
    }

    let timestamp = parse_timestamp(row.get(2)?.trim())?;
    let (event, task) = parse_event(row.get(3)?.trim())?;
    let status = Status::from_token(row.get(4)?.trim())?;

    let mut record = LogRecord::new(ip, user, timestamp, event, status);
    record.task = task;
    Some(record)
}

/// Parse the event field, splitting off the task id for task events
fn parse_event(raw: &str) -> Option<(Event, Option<i32>)> {
    for (prefix, event) in [
        ("SOLVE_TASK", Event::SolveTask),
        ("DONE_TASK", Event::DoneTask),
    ] {
        if let Some(rest) = raw.strip_prefix(prefix) {
            let task = rest.trim().parse().ok()?;
            return Some((event, Some(task)));
        }
    }
    Event::from_token(raw).map(|e| (e, None))
}
