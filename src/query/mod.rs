//! Query engine
//!
//! A small string query language over the record store:
//!
//! - **AST**: parsed query form plus the field accessor registry
//! - **Parser**: query strings into the AST
//! - **Predicate**: composite record filter built from a parsed query
//! - **Executor**: parse, filter, project into a result set
//!
//! # Query Language
//!
//! ```text
//! get FIELD [for FIELD = "LITERAL"] [and date between "DATE" and "DATE"]
//! ```
//!
//! # Examples
//!
//! ## Using a query string
//!
//! ```rust,ignore
//! let result = executor.execute_str("get user for event = \"LOGIN\"")?;
//! ```
//!
//! ## Using the builder
//!
//! ```rust,ignore
//! use logquery::query::{Field, Query};
//!
//! let query = Query::select(Field::User).filter(Field::Event, "LOGIN").build();
//! let result = executor.execute(&query);
//! ```

mod ast;
mod error;
mod executor;
mod parser;
mod predicate;

pub use ast::{Field, FieldValue, Filter, Query, QueryBuilder};
pub use error::{QueryError, QueryResult};
pub use executor::QueryExecutor;
pub use parser::parse_query;
pub use predicate::Predicate;
