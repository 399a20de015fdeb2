//! Query executor
//!
//! Runs parsed queries against the record store:
//!
//! ```text
//! query string → parse → build predicate → scan → project → set
//! ```
//!
//! Each execution is a self-contained pipeline; the only shared state is the
//! read-only store.

use std::collections::HashSet;
use std::sync::Arc;

use tracing::debug;

use crate::query::ast::{FieldValue, Query};
use crate::query::error::QueryResult;
use crate::query::parser::parse_query;
use crate::query::predicate::Predicate;
use crate::store::RecordStore;

/// Query executor over a frozen record store
pub struct QueryExecutor {
    store: Arc<RecordStore>,
}

impl QueryExecutor {
    /// Create an executor for a store
    pub fn new(store: Arc<RecordStore>) -> Self {
        Self { store }
    }

    /// The underlying store
    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    /// Parse and execute a query string
    ///
    /// The only error is a grammar mismatch; every well-formed query yields a
    /// (possibly empty) result set.
    pub fn execute_str(&self, query: &str) -> QueryResult<HashSet<FieldValue>> {
        let query = parse_query(query)?;
        Ok(self.execute(&query))
    }

    /// Execute a parsed query
    pub fn execute(&self, query: &Query) -> HashSet<FieldValue> {
        let predicate = Predicate::build(query.filter.as_ref(), query.range);

        let result: HashSet<FieldValue> = self
            .store
            .iter()
            .filter(|r| predicate.matches(r))
            .map(|r| query.select.extract(r))
            .collect();

        debug!(
            field = %query.select,
            matched = result.len(),
            scanned = self.store.len(),
            "query executed"
        );
        result
    }
}
