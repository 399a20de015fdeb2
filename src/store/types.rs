//! Core data types for the logquery record store
//!
//! This module defines the fundamental types shared across the crate:
//! - `LogRecord`: one parsed activity-log line
//! - `Event` and `Status`: the closed vocabularies of the log format
//! - `DateRange`: an optionally-bounded time window for queries

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// The fixed timestamp pattern used by the log format.
///
/// chrono accepts unpadded components during parsing, so `3.6.2024 0:12:5`
/// parses the same as `03.06.2024 00:12:05`.
pub const DATE_FORMAT: &str = "%d.%m.%Y %H:%M:%S";

/// Parse a timestamp in the log format, returning `None` on failure.
///
/// Used by ingestion, the query grammar and the equality filter so that all
/// three agree on what a date literal means.
pub fn parse_timestamp(s: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(s, DATE_FORMAT).ok()
}

/// Render a timestamp in the log format.
pub fn format_timestamp(t: NaiveDateTime) -> String {
    t.format(DATE_FORMAT).to_string()
}

/// A single parsed activity-log record
///
/// Created once during ingestion and never mutated afterwards. Every field is
/// guaranteed well-formed; lines that fail validation never become records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogRecord {
    /// Client address as it appeared in the log (not validated as a real IP)
    pub ip: String,
    /// User identifier, non-empty
    pub user: String,
    /// Timestamp with second resolution
    pub timestamp: NaiveDateTime,
    /// What the user did
    pub event: Event,
    /// Task id carried by `SOLVE_TASK`/`DONE_TASK` events, `None` for all others
    #[serde(default)]
    pub task: Option<i32>,
    /// Outcome of the event
    pub status: Status,
}

impl LogRecord {
    /// Create a record for a bare event (no task id)
    pub fn new(
        ip: impl Into<String>,
        user: impl Into<String>,
        timestamp: NaiveDateTime,
        event: Event,
        status: Status,
    ) -> Self {
        Self {
            ip: ip.into(),
            user: user.into(),
            timestamp,
            event,
            task: None,
            status,
        }
    }

    /// Builder method: attach a task id
    pub fn with_task(mut self, task: i32) -> Self {
        self.task = Some(task);
        self
    }
}

/// The kinds of events the log format knows about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Event {
    /// User logged in
    Login,
    /// User downloaded the plugin
    DownloadPlugin,
    /// User wrote a message
    WriteMessage,
    /// User attempted a task (task id attached)
    SolveTask,
    /// User completed a task (task id attached)
    DoneTask,
}

impl Event {
    /// All event kinds, for iteration
    pub fn all() -> &'static [Event] {
        &[
            Event::Login,
            Event::DownloadPlugin,
            Event::WriteMessage,
            Event::SolveTask,
            Event::DoneTask,
        ]
    }

    /// Parse a bare event token as it appears in a log line
    pub fn from_token(s: &str) -> Option<Self> {
        match s {
            "LOGIN" => Some(Event::Login),
            "DOWNLOAD_PLUGIN" => Some(Event::DownloadPlugin),
            "WRITE_MESSAGE" => Some(Event::WriteMessage),
            "SOLVE_TASK" => Some(Event::SolveTask),
            "DONE_TASK" => Some(Event::DoneTask),
            _ => None,
        }
    }
}

impl std::fmt::Display for Event {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Display renders the raw log vocabulary so text-equality filters
        // compare against exactly what ingestion consumed.
        match self {
            Event::Login => write!(f, "LOGIN"),
            Event::DownloadPlugin => write!(f, "DOWNLOAD_PLUGIN"),
            Event::WriteMessage => write!(f, "WRITE_MESSAGE"),
            Event::SolveTask => write!(f, "SOLVE_TASK"),
            Event::DoneTask => write!(f, "DONE_TASK"),
        }
    }
}

/// Outcome of an event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Status {
    /// Completed successfully
    Ok,
    /// Attempted but did not succeed
    Failed,
    /// Aborted with an error
    Error,
}

impl Status {
    /// Parse a status token as it appears in a log line
    pub fn from_token(s: &str) -> Option<Self> {
        match s {
            "OK" => Some(Status::Ok),
            "FAILED" => Some(Status::Failed),
            "ERROR" => Some(Status::Error),
            _ => None,
        }
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Status::Ok => write!(f, "OK"),
            Status::Failed => write!(f, "FAILED"),
            Status::Error => write!(f, "ERROR"),
        }
    }
}

/// A time window with optionally absent bounds
///
/// Membership is STRICTLY EXCLUSIVE on both ends: a record whose timestamp
/// exactly equals `after` or `before` is outside the range. Changing this
/// would silently alter every range query's result set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateRange {
    /// Lower bound (exclusive); `None` means no lower bound
    pub after: Option<NaiveDateTime>,
    /// Upper bound (exclusive); `None` means no upper bound
    pub before: Option<NaiveDateTime>,
}

impl DateRange {
    /// A range with no bounds that every timestamp is inside
    pub fn unbounded() -> Self {
        Self::default()
    }

    /// Create a range from optional bounds
    pub fn new(after: Option<NaiveDateTime>, before: Option<NaiveDateTime>) -> Self {
        Self { after, before }
    }

    /// Create a fully bounded range
    pub fn between(after: NaiveDateTime, before: NaiveDateTime) -> Self {
        Self {
            after: Some(after),
            before: Some(before),
        }
    }

    /// Check whether a timestamp falls strictly inside this range
    pub fn contains(&self, t: NaiveDateTime) -> bool {
        self.after.map_or(true, |a| t > a) && self.before.map_or(true, |b| t < b)
    }

    /// Whether both bounds are absent
    pub fn is_unbounded(&self) -> bool {
        self.after.is_none() && self.before.is_none()
    }
}
