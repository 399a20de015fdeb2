//! Query parser
//!
//! Parses query strings into the [`Query`] AST.
//!
//! # Supported Syntax
//!
//! ```text
//! get FIELD [for FIELD = "LITERAL"] [and date between "DATE" and "DATE"]
//! ```
//!
//! Keywords are case-sensitive. `FIELD` is one of `ip`, `user`, `date`,
//! `event`, `status`; `DATE` literals use the log date pattern
//! (`D.M.YYYY H:m:s`, no padding required). The filter clause and the range
//! clause are each independently optional.
//!
//! A query that does not match the grammar is a structured
//! [`QueryError::Parse`]. A range clause whose date literals do not parse is
//! not an error: the range is silently treated as absent (both bounds
//! unbounded), mirroring ingestion's lenient policy.

use nom::{
    branch::alt,
    bytes::complete::{tag, take_while},
    character::complete::{char, multispace0, multispace1},
    combinator::{opt, value},
    sequence::delimited,
    IResult,
};
use tracing::debug;

use crate::query::ast::{Field, Filter, Query};
use crate::query::error::{QueryError, QueryResult};
use crate::store::{parse_timestamp, DateRange};

/// Parse a query string into a Query AST
pub fn parse_query(input: &str) -> QueryResult<Query> {
    let input = input.trim();

    match parse_full_query(input) {
        Ok((remaining, query)) => {
            if remaining.trim().is_empty() {
                Ok(query)
            } else {
                Err(QueryError::Parse(format!(
                    "unexpected input after query: '{}'",
                    remaining.trim()
                )))
            }
        }
        Err(e) => Err(QueryError::Parse(format!(
            "query does not match grammar: {:?}",
            e
        ))),
    }
}

/// Parse the full query
fn parse_full_query(input: &str) -> IResult<&str, Query> {
    let (input, _) = tag("get")(input)?;
    let (input, _) = multispace1(input)?;
    let (input, select) = parse_field(input)?;
    let (input, filter) = opt(parse_filter_clause)(input)?;
    let (input, raw_range) = opt(parse_range_clause)(input)?;

    let range = match raw_range {
        None => DateRange::unbounded(),
        Some((after, before)) => match (parse_timestamp(after), parse_timestamp(before)) {
            (Some(after), Some(before)) => DateRange::between(after, before),
            _ => {
                debug!(%after, %before, "unparsable range bound, treating range as absent");
                DateRange::unbounded()
            }
        },
    };

    Ok((
        input,
        Query {
            select,
            filter,
            range,
        },
    ))
}

/// Parse one of the five field tokens
fn parse_field(input: &str) -> IResult<&str, Field> {
    alt((
        value(Field::Ip, tag("ip")),
        value(Field::User, tag("user")),
        value(Field::Date, tag("date")),
        value(Field::Event, tag("event")),
        value(Field::Status, tag("status")),
    ))(input)
}

/// Parse the `for FIELD = "LITERAL"` clause
fn parse_filter_clause(input: &str) -> IResult<&str, Filter> {
    let (input, _) = multispace1(input)?;
    let (input, _) = tag("for")(input)?;
    let (input, _) = multispace1(input)?;
    let (input, field) = parse_field(input)?;
    let (input, _) = multispace1(input)?;
    let (input, _) = char('=')(input)?;
    let (input, _) = multispace1(input)?;
    let (input, literal) = parse_quoted(input)?;

    Ok((input, Filter::new(field, literal)))
}

/// Parse the `and date between "DATE" and "DATE"` clause, literals raw
fn parse_range_clause(input: &str) -> IResult<&str, (&str, &str)> {
    let (input, _) = multispace1(input)?;
    let (input, _) = tag("and")(input)?;
    let (input, _) = multispace1(input)?;
    let (input, _) = tag("date")(input)?;
    let (input, _) = multispace1(input)?;
    let (input, _) = tag("between")(input)?;
    let (input, _) = multispace1(input)?;
    let (input, after) = parse_quoted(input)?;
    let (input, _) = multispace1(input)?;
    let (input, _) = tag("and")(input)?;
    let (input, _) = multispace1(input)?;
    let (input, before) = parse_quoted(input)?;

    Ok((input, (after, before)))
}

/// Parse a double-quoted literal (no escapes in this grammar)
fn parse_quoted(input: &str) -> IResult<&str, &str> {
    delimited(char('"'), take_while(|c| c != '"'), char('"'))(input)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bare_projection() {
        let query = parse_query("get ip").unwrap();
        assert_eq!(query.select, Field::Ip);
        assert!(query.filter.is_none());
        assert!(query.range.is_unbounded());
    }

    #[test]
    fn test_parse_all_field_tokens() {
        for field in Field::all() {
            let query = parse_query(&format!("get {}", field.token())).unwrap();
            assert_eq!(query.select, *field);
        }
    }

    #[test]
    fn test_parse_filter_clause() {
        let query = parse_query("get user for event = \"LOGIN\"").unwrap();
        assert_eq!(query.select, Field::User);
        assert_eq!(query.filter, Some(Filter::new(Field::Event, "LOGIN")));
        assert!(query.range.is_unbounded());
    }

    #[test]
    fn test_parse_range_clause_without_filter() {
        let query =
            parse_query("get ip and date between \"28.4.2022 0:0:0\" and \"28.4.2022 23:59:59\"")
                .unwrap();
        assert!(query.filter.is_none());
        assert_eq!(query.range.after, parse_timestamp("28.4.2022 0:0:0"));
        assert_eq!(query.range.before, parse_timestamp("28.4.2022 23:59:59"));
    }

    #[test]
    fn test_parse_filter_and_range() {
        let query = parse_query(
            "get status for user = \"Eclipse\" and date between \"28.4.2022 0:0:0\" and \"28.4.2022 23:59:59\"",
        )
        .unwrap();
        assert_eq!(query.select, Field::Status);
        assert_eq!(query.filter, Some(Filter::new(Field::User, "Eclipse")));
        assert!(!query.range.is_unbounded());
    }

    #[test]
    fn test_parse_date_equality_literal_kept_raw() {
        let query = parse_query("get ip for date = \"3.6.2024 0:12:5\"").unwrap();
        assert_eq!(query.filter, Some(Filter::new(Field::Date, "3.6.2024 0:12:5")));
    }

    #[test]
    fn test_unparsable_range_bound_means_unbounded() {
        let query =
            parse_query("get ip and date between \"not a date\" and \"28.4.2022 0:0:0\"").unwrap();
        assert!(query.range.is_unbounded());

        // Either bound failing drops the whole range
        let query =
            parse_query("get ip and date between \"28.4.2022 0:0:0\" and \"whenever\"").unwrap();
        assert!(query.range.is_unbounded());
    }

    #[test]
    fn test_grammar_errors_are_structured() {
        assert!(parse_query("").is_err());
        assert!(parse_query("fetch ip").is_err());
        assert!(parse_query("get task").is_err());
        assert!(parse_query("get").is_err());
        assert!(parse_query("get ip garbage").is_err());
        assert!(parse_query("get user for event LOGIN").is_err());
    }

    #[test]
    fn test_equals_sign_requires_surrounding_whitespace() {
        assert!(parse_query("get ip for user=\"x\"").is_err());
        assert!(parse_query("get ip for user =\"x\"").is_err());
        assert!(parse_query("get ip for user= \"x\"").is_err());
    }

    #[test]
    fn test_keywords_are_case_sensitive() {
        assert!(parse_query("GET ip").is_err());
        assert!(parse_query("get IP").is_err());
        assert!(parse_query("get user FOR event = \"LOGIN\"").is_err());
    }

    #[test]
    fn test_empty_literal_is_allowed() {
        let query = parse_query("get ip for user = \"\"").unwrap();
        assert_eq!(query.filter, Some(Filter::new(Field::User, "")));
    }

    #[test]
    fn test_surrounding_whitespace_is_trimmed() {
        let query = parse_query("   get event   ").unwrap();
        assert_eq!(query.select, Field::Event);
    }
}
