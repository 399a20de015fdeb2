//! Query abstract syntax tree
//!
//! Defines the parsed form of the query language and the field accessor
//! registry: [`Field`] is the closed set of queryable fields, and
//! [`Field::extract`] is the dispatch from a field to its value on a record.
//! Because `Field` is an enum produced only by the grammar (and by typed
//! callers), an out-of-set field token is unrepresentable here.
//!
//! # Example Queries
//!
//! ```text
//! get ip
//! get user for event = "LOGIN"
//! get status for user = "Eclipse" and date between "28.4.2022 0:0:0" and "28.4.2022 23:59:59"
//! ```

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::store::{format_timestamp, DateRange, Event, LogRecord, Status};

/// A queryable field of a log record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Field {
    /// Client address
    Ip,
    /// User identifier
    User,
    /// Record timestamp
    Date,
    /// Event kind
    Event,
    /// Event outcome
    Status,
}

impl Field {
    /// All queryable fields, for iteration
    pub fn all() -> &'static [Field] {
        &[Field::Ip, Field::User, Field::Date, Field::Event, Field::Status]
    }

    /// Parse a field token as it appears in a query string
    pub fn from_token(s: &str) -> Option<Self> {
        match s {
            "ip" => Some(Field::Ip),
            "user" => Some(Field::User),
            "date" => Some(Field::Date),
            "event" => Some(Field::Event),
            "status" => Some(Field::Status),
            _ => None,
        }
    }

    /// The grammar token for this field
    pub fn token(&self) -> &'static str {
        match self {
            Field::Ip => "ip",
            Field::User => "user",
            Field::Date => "date",
            Field::Event => "event",
            Field::Status => "status",
        }
    }

    /// Extract this field's value from a record
    ///
    /// The accessor registry: a pure, total mapping with no record mutation.
    pub fn extract(&self, record: &LogRecord) -> FieldValue {
        match self {
            Field::Ip => FieldValue::Text(record.ip.clone()),
            Field::User => FieldValue::Text(record.user.clone()),
            Field::Date => FieldValue::Timestamp(record.timestamp),
            Field::Event => FieldValue::Event(record.event),
            Field::Status => FieldValue::Status(record.status),
        }
    }
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.token())
    }
}

/// A value extracted from a record, typed by the field's semantic kind
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FieldValue {
    /// `ip` and `user` fields
    Text(String),
    /// `date` field
    Timestamp(NaiveDateTime),
    /// `event` field
    Event(Event),
    /// `status` field
    Status(Status),
}

impl std::fmt::Display for FieldValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Timestamps render in the log date pattern, enums in the raw log
        // vocabulary; this text form is what equality filters compare against.
        match self {
            FieldValue::Text(s) => f.write_str(s),
            FieldValue::Timestamp(t) => f.write_str(&format_timestamp(*t)),
            FieldValue::Event(e) => write!(f, "{}", e),
            FieldValue::Status(s) => write!(f, "{}", s),
        }
    }
}

/// An equality constraint from the `for FIELD = "LITERAL"` clause
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Filter {
    /// Field the constraint applies to
    pub field: Field,
    /// Raw literal text, uninterpreted until predicate construction
    pub literal: String,
}

impl Filter {
    /// Create a new equality constraint
    pub fn new(field: Field, literal: impl Into<String>) -> Self {
        Self {
            field,
            literal: literal.into(),
        }
    }
}

/// A parsed query ready for execution
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    /// Field whose values are projected into the result
    pub select: Field,
    /// Optional equality constraint
    pub filter: Option<Filter>,
    /// Date window, unbounded when the range clause is absent or unparsable
    pub range: DateRange,
}

impl Query {
    /// Start building a query for a field
    pub fn select(field: Field) -> QueryBuilder {
        QueryBuilder::new(field)
    }
}

/// Builder for constructing queries programmatically
#[derive(Debug, Clone)]
pub struct QueryBuilder {
    select: Field,
    filter: Option<Filter>,
    range: DateRange,
}

impl QueryBuilder {
    /// Create a builder projecting the given field
    pub fn new(select: Field) -> Self {
        Self {
            select,
            filter: None,
            range: DateRange::unbounded(),
        }
    }

    /// Constrain a field to equal a literal
    pub fn filter(mut self, field: Field, literal: impl Into<String>) -> Self {
        self.filter = Some(Filter::new(field, literal));
        self
    }

    /// Restrict to a date window (both bounds exclusive)
    pub fn between(mut self, after: NaiveDateTime, before: NaiveDateTime) -> Self {
        self.range = DateRange::between(after, before);
        self
    }

    /// Restrict to an arbitrary range
    pub fn range(mut self, range: DateRange) -> Self {
        self.range = range;
        self
    }

    /// Build the query
    pub fn build(self) -> Query {
        Query {
            select: self.select,
            filter: self.filter,
            range: self.range,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::parse_timestamp;

    #[test]
    fn test_field_tokens_round_trip() {
        for field in Field::all() {
            assert_eq!(Field::from_token(field.token()), Some(*field));
        }
        assert_eq!(Field::from_token("task"), None);
        assert_eq!(Field::from_token("IP"), None); // tokens are case-sensitive
    }

    #[test]
    fn test_extract_dispatch() {
        let ts = parse_timestamp("3.6.2024 0:12:5").unwrap();
        let record = LogRecord::new("146.34.15.5", "Eclipse", ts, Event::Login, Status::Ok);

        assert_eq!(Field::Ip.extract(&record), FieldValue::Text("146.34.15.5".into()));
        assert_eq!(Field::User.extract(&record), FieldValue::Text("Eclipse".into()));
        assert_eq!(Field::Date.extract(&record), FieldValue::Timestamp(ts));
        assert_eq!(Field::Event.extract(&record), FieldValue::Event(Event::Login));
        assert_eq!(Field::Status.extract(&record), FieldValue::Status(Status::Ok));
    }

    #[test]
    fn test_field_value_display() {
        let ts = parse_timestamp("3.6.2024 0:12:5").unwrap();
        assert_eq!(FieldValue::Timestamp(ts).to_string(), "03.06.2024 00:12:05");
        assert_eq!(FieldValue::Event(Event::DownloadPlugin).to_string(), "DOWNLOAD_PLUGIN");
        assert_eq!(FieldValue::Status(Status::Failed).to_string(), "FAILED");
        assert_eq!(FieldValue::Text("alice".into()).to_string(), "alice");
    }

    #[test]
    fn test_query_builder() {
        let after = parse_timestamp("28.4.2022 0:0:0").unwrap();
        let before = parse_timestamp("28.4.2022 23:59:59").unwrap();

        let query = Query::select(Field::Status)
            .filter(Field::User, "Eclipse")
            .between(after, before)
            .build();

        assert_eq!(query.select, Field::Status);
        assert_eq!(query.filter, Some(Filter::new(Field::User, "Eclipse")));
        assert_eq!(query.range, DateRange::between(after, before));
    }
}
