//! Parameterized SELECT builder used by the news repository.
//!
//! Filters are kept as an expression tree and rendered with numbered
//! placeholders, so values never end up inside the SQL text.
//!
//! ```
//! use news_sql::{Operator, SortDir, Value, sqlite};
//!
//! let query = sqlite("tl_news")
//!     .filter("pid", Operator::In, Value::Array(vec![Value::Int(3), Value::Int(7)]))
//!     .sort("date", SortDir::Desc)
//!     .limit(10)
//!     .build();
//!
//! assert_eq!(
//!     query.sql,
//!     "SELECT * FROM tl_news WHERE pid IN (?1, ?2) ORDER BY date DESC LIMIT 10"
//! );
//! assert_eq!(query.params.len(), 2);
//! ```

mod builder;
mod dialect;
mod validate;

pub use builder::{
    CompoundFilter, Filter, FilterExpr, LogicalOp, Operator, Projection, QueryBuilder,
    QueryResult, SortDir, SortField, Value, and, or, simple,
};
pub use dialect::{Dialect, Postgres, Sqlite};
pub use validate::{ValidationError, assert_valid_sql_identifier, is_valid_sql_identifier};

/// Create a SELECT builder for Postgres.
pub fn postgres(table: impl Into<String>) -> QueryBuilder<Postgres> {
    QueryBuilder::new(Postgres, table)
}

/// Create a SELECT builder for `SQLite`.
pub fn sqlite(table: impl Into<String>) -> QueryBuilder<Sqlite> {
    QueryBuilder::new(Sqlite, table)
}
