//! The record store and its scan primitive

use std::collections::HashSet;
use std::hash::Hash;

use crate::store::types::{DateRange, LogRecord};

/// An immutable, in-memory sequence of parsed log records
///
/// Built once from ingestion output and frozen: there is no way to append or
/// mutate after construction, which makes shared references safe to hand out
/// to any number of readers.
#[derive(Debug, Default)]
pub struct RecordStore {
    records: Vec<LogRecord>,
}

impl RecordStore {
    /// Build a store from already-validated records, in ingestion order
    pub fn from_records(records: Vec<LogRecord>) -> Self {
        Self { records }
    }

    /// Number of records in the store
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the store holds no records
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Iterate over all records in store order
    pub fn iter(&self) -> impl Iterator<Item = &LogRecord> {
        self.records.iter()
    }

    /// The scan primitive: filter by date range plus an extra predicate, then
    /// project each matching record into a deduplicated set.
    ///
    /// Every analytical accessor and the query executor reduce to one call of
    /// this (or of [`count`](Self::count) / [`earliest`](Self::earliest)).
    pub fn select<T, K, P>(&self, range: &DateRange, keep: K, project: P) -> HashSet<T>
    where
        T: Eq + Hash,
        K: Fn(&LogRecord) -> bool,
        P: Fn(&LogRecord) -> T,
    {
        self.records
            .iter()
            .filter(|r| range.contains(r.timestamp))
            .filter(|r| keep(r))
            .map(project)
            .collect()
    }

    /// Count records matching a range plus predicate (no deduplication)
    pub fn count<K>(&self, range: &DateRange, keep: K) -> usize
    where
        K: Fn(&LogRecord) -> bool,
    {
        self.records
            .iter()
            .filter(|r| range.contains(r.timestamp))
            .filter(|r| keep(r))
            .count()
    }

    /// Earliest timestamp among matching records, if any match
    pub fn earliest<K>(&self, range: &DateRange, keep: K) -> Option<chrono::NaiveDateTime>
    where
        K: Fn(&LogRecord) -> bool,
    {
        self.records
            .iter()
            .filter(|r| range.contains(r.timestamp))
            .filter(|r| keep(r))
            .map(|r| r.timestamp)
            .min()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::types::{parse_timestamp, Event, Status};

    fn sample() -> RecordStore {
        let ts = |s| parse_timestamp(s).unwrap();
        RecordStore::from_records(vec![
            LogRecord::new("10.0.0.1", "alice", ts("1.1.2024 10:0:0"), Event::Login, Status::Ok),
            LogRecord::new("10.0.0.2", "bob", ts("2.1.2024 10:0:0"), Event::Login, Status::Failed),
            LogRecord::new("10.0.0.1", "alice", ts("3.1.2024 10:0:0"), Event::WriteMessage, Status::Ok),
        ])
    }

    #[test]
    fn test_select_deduplicates() {
        let store = sample();
        let ips = store.select(&DateRange::unbounded(), |_| true, |r| r.ip.clone());
        assert_eq!(ips.len(), 2);
        assert!(ips.contains("10.0.0.1"));
        assert!(ips.contains("10.0.0.2"));
    }

    #[test]
    fn test_select_applies_range_and_predicate() {
        let store = sample();
        let ts = |s| parse_timestamp(s).unwrap();
        let range = DateRange::between(ts("1.1.2024 12:0:0"), ts("4.1.2024 0:0:0"));

        let users = store.select(&range, |r| r.status == Status::Ok, |r| r.user.clone());
        assert_eq!(users.len(), 1);
        assert!(users.contains("alice"));
    }

    #[test]
    fn test_count_keeps_duplicates() {
        let store = sample();
        let logins = store.count(&DateRange::unbounded(), |r| r.event == Event::Login);
        assert_eq!(logins, 2);
    }

    #[test]
    fn test_earliest() {
        let store = sample();
        let ts = |s| parse_timestamp(s).unwrap();
        let first = store.earliest(&DateRange::unbounded(), |r| r.user == "alice");
        assert_eq!(first, Some(ts("1.1.2024 10:0:0")));

        let none = store.earliest(&DateRange::unbounded(), |r| r.user == "nobody");
        assert_eq!(none, None);
    }

    #[test]
    fn test_empty_store() {
        let store = RecordStore::default();
        assert!(store.is_empty());
        assert_eq!(store.len(), 0);
        let all: HashSet<String> = store.select(&DateRange::unbounded(), |_| true, |r| r.ip.clone());
        assert!(all.is_empty());
    }
}
