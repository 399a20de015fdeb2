//! In-memory record store
//!
//! The store is an ordered, append-only sequence of [`LogRecord`]s built once
//! from ingestion and frozen afterwards. It exposes:
//!
//! - a generic filter-and-project scan primitive ([`RecordStore::select`])
//! - a typed analytical accessor surface (distinct IPs, users per event,
//!   task attempt counts, ...)
//!
//! Both the typed accessors and the query-language executor are thin layers
//! over the same scan; neither ever mutates a record.

mod analytics;
mod records;
mod types;

pub use records::RecordStore;
pub use types::{
    format_timestamp, parse_timestamp, DateRange, Event, LogRecord, Status, DATE_FORMAT,
};
