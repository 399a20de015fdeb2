//! # logquery
//!
//! In-memory activity-log analytics with a small string query language.
//!
//! Logquery ingests tab-separated activity logs from a directory, holds the
//! parsed records in a frozen in-memory store, and answers analytical
//! questions two ways:
//!
//! - a typed accessor surface (distinct IPs, users per event, task attempt
//!   counts, ...): see the [`store`] module
//! - a string query language parsed and interpreted per call: see the
//!   [`query`] module
//!
//! ## Modules
//!
//! - [`store`]: record types, the frozen record store and typed accessors
//! - [`query`]: query language parser, predicate builder and executor
//! - [`ingest`]: best-effort directory ingestion
//! - [`config`]: TOML configuration with environment overrides
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use logquery::ingest::LogIngestor;
//! use logquery::query::QueryExecutor;
//! use logquery::store::RecordStore;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let report = LogIngestor::new("./logs").load()?;
//!     let store = Arc::new(RecordStore::from_records(report.records));
//!     let executor = QueryExecutor::new(store);
//!
//!     let users = executor.execute_str("get user for event = \"LOGIN\"")?;
//!     println!("{} distinct users logged in", users.len());
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod ingest;
pub mod query;
pub mod store;

// Re-export top-level types for convenience
pub use config::{Config, ConfigError, IngestConfig, LoggingConfig};
pub use ingest::{IngestError, IngestReport, LogIngestor};
pub use query::{Field, FieldValue, Query, QueryError, QueryExecutor, QueryResult};
pub use store::{DateRange, Event, LogRecord, RecordStore, Status};
