//! Predicate builder
//!
//! Turns the optional equality constraint and the date range of a parsed
//! query into one composite predicate over a record: the logical AND of
//! range membership (always applied) and the equality constraint (only when
//! present).

use chrono::NaiveDateTime;
use tracing::debug;

use crate::query::ast::{Field, Filter};
use crate::store::{parse_timestamp, DateRange, LogRecord};

/// A compiled record predicate
#[derive(Debug, Clone)]
pub struct Predicate {
    range: DateRange,
    equality: Equality,
}

/// The equality arm of a predicate, resolved at build time
#[derive(Debug, Clone)]
enum Equality {
    /// No constraint
    Any,
    /// Compare a field's text form against a literal, case-sensitive
    Text(Field, String),
    /// Compare the record timestamp for exact equality
    Timestamp(NaiveDateTime),
    /// A `date` constraint whose literal did not parse: matches nothing
    Never,
}

impl Predicate {
    /// Build a predicate from an optional equality constraint and a range
    ///
    /// A `date` constraint with an unparsable literal becomes a filter that
    /// never matches, the lenient counterpart of ingestion's skip policy.
    pub fn build(filter: Option<&Filter>, range: DateRange) -> Self {
        let equality = match filter {
            None => Equality::Any,
            Some(f) if f.field == Field::Date => match parse_timestamp(&f.literal) {
                Some(ts) => Equality::Timestamp(ts),
                None => {
                    debug!(literal = %f.literal, "unparsable date literal, filter matches nothing");
                    Equality::Never
                }
            },
            Some(f) => Equality::Text(f.field, f.literal.clone()),
        };

        Self { range, equality }
    }

    /// A predicate that matches every record
    pub fn match_all() -> Self {
        Self::build(None, DateRange::unbounded())
    }

    /// Test a record against this predicate
    pub fn matches(&self, record: &LogRecord) -> bool {
        if !self.range.contains(record.timestamp) {
            return false;
        }
        match &self.equality {
            Equality::Any => true,
            Equality::Never => false,
            Equality::Timestamp(ts) => record.timestamp == *ts,
            Equality::Text(field, literal) => field.extract(record).to_string() == *literal,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{Event, Status};

    fn ts(s: &str) -> NaiveDateTime {
        parse_timestamp(s).unwrap()
    }

    fn record() -> LogRecord {
        LogRecord::new(
            "146.34.15.5",
            "Eclipse",
            ts("28.4.2022 12:30:0"),
            Event::Login,
            Status::Ok,
        )
    }

    #[test]
    fn test_match_all() {
        assert!(Predicate::match_all().matches(&record()));
    }

    #[test]
    fn test_text_equality_is_case_sensitive() {
        let filter = Filter::new(Field::User, "Eclipse");
        assert!(Predicate::build(Some(&filter), DateRange::unbounded()).matches(&record()));

        let wrong_case = Filter::new(Field::User, "eclipse");
        assert!(!Predicate::build(Some(&wrong_case), DateRange::unbounded()).matches(&record()));
    }

    #[test]
    fn test_event_and_status_compare_as_log_tokens() {
        let by_event = Filter::new(Field::Event, "LOGIN");
        assert!(Predicate::build(Some(&by_event), DateRange::unbounded()).matches(&record()));

        let by_status = Filter::new(Field::Status, "OK");
        assert!(Predicate::build(Some(&by_status), DateRange::unbounded()).matches(&record()));

        // Not the enum variant name, not lowercase
        let miss = Filter::new(Field::Status, "Ok");
        assert!(!Predicate::build(Some(&miss), DateRange::unbounded()).matches(&record()));
    }

    #[test]
    fn test_date_equality_to_the_second() {
        let exact = Filter::new(Field::Date, "28.4.2022 12:30:0");
        assert!(Predicate::build(Some(&exact), DateRange::unbounded()).matches(&record()));

        let off_by_one = Filter::new(Field::Date, "28.4.2022 12:30:1");
        assert!(!Predicate::build(Some(&off_by_one), DateRange::unbounded()).matches(&record()));
    }

    #[test]
    fn test_unparsable_date_literal_matches_nothing() {
        let bad = Filter::new(Field::Date, "yesterday-ish");
        let predicate = Predicate::build(Some(&bad), DateRange::unbounded());
        assert!(!predicate.matches(&record()));
    }

    #[test]
    fn test_range_and_equality_are_anded() {
        let filter = Filter::new(Field::User, "Eclipse");

        // Record inside range: both arms hold
        let inside = DateRange::between(ts("28.4.2022 0:0:0"), ts("28.4.2022 23:59:59"));
        assert!(Predicate::build(Some(&filter), inside).matches(&record()));

        // Record outside range: equality alone is not enough
        let outside = DateRange::between(ts("1.1.2023 0:0:0"), ts("2.1.2023 0:0:0"));
        assert!(!Predicate::build(Some(&filter), outside).matches(&record()));
    }

    #[test]
    fn test_range_bound_exactly_at_record_is_excluded() {
        let at_record = DateRange::new(Some(ts("28.4.2022 12:30:0")), None);
        assert!(!Predicate::build(None, at_record).matches(&record()));
    }
}
