//! In-process `SQLite` retriever.
//!
//! Unset `start`/`stop` bounds are stored as `''`. The columns use NUMERIC
//! affinity, so real timestamps are stored as integers and compare
//! numerically against the bound `now`, while `''` stays text and only
//! matches the explicit `= ''` check.

use crate::record::{NewsRecord, Source};
use crate::repository::Retriever;
use news_sql::{QueryResult, Value, assert_valid_sql_identifier};
use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, Value as SqlValue, ValueRef};
use rusqlite::{Connection, OptionalExtension, Row, params_from_iter};
use thiserror::Error;

/// Errors raised by [`SqliteRetriever`].
#[derive(Debug, Error)]
pub enum SqliteRetrieverError {
    /// Preparing, binding or stepping a statement failed.
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// `SQLite` binds lists as individual parameters; an array parameter means
    /// the query was compiled for another dialect.
    #[error("array parameters are not supported by SQLite, compile with the sqlite dialect")]
    ArrayParameter,

    /// `COUNT(*)` returned something negative.
    #[error("invalid row count {0}")]
    InvalidCount(i64),
}

/// `CREATE TABLE` statement for a news table named `table`.
///
/// # Panics
///
/// Panics if `table` is not a valid SQL identifier.
#[must_use]
pub fn create_table_sql(table: &str) -> String {
    assert_valid_sql_identifier(table, "table");
    format!(
        "CREATE TABLE IF NOT EXISTS {table} (
    id INTEGER PRIMARY KEY,
    pid INTEGER NOT NULL DEFAULT 0,
    alias TEXT NOT NULL DEFAULT '',
    headline TEXT NOT NULL DEFAULT '',
    date INTEGER NOT NULL DEFAULT 0,
    source TEXT NOT NULL DEFAULT 'default',
    featured INTEGER NOT NULL DEFAULT 0,
    published INTEGER NOT NULL DEFAULT 0,
    start NUMERIC NOT NULL DEFAULT '',
    stop NUMERIC NOT NULL DEFAULT ''
);
CREATE INDEX IF NOT EXISTS {table}_pid_date ON {table} (pid, date);"
    )
}

/// [`Retriever`] over a rusqlite [`Connection`].
#[derive(Debug)]
pub struct SqliteRetriever {
    conn: Connection,
}

impl SqliteRetriever {
    /// Wrap an open connection.
    pub const fn new(conn: Connection) -> Self {
        Self { conn }
    }

    /// In-memory database with an empty news table.
    pub fn open_in_memory(table: &str) -> Result<Self, SqliteRetrieverError> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch(&create_table_sql(table))?;
        Ok(Self::new(conn))
    }

    /// Underlying connection, e.g. for seeding.
    pub const fn connection(&self) -> &Connection {
        &self.conn
    }

    fn bind(params: &[Value]) -> Result<Vec<SqlValue>, SqliteRetrieverError> {
        params
            .iter()
            .map(|value| match value {
                Value::Null => Ok(SqlValue::Null),
                Value::Bool(b) => Ok(SqlValue::Integer(i64::from(*b))),
                Value::Int(i) => Ok(SqlValue::Integer(*i)),
                Value::String(s) => Ok(SqlValue::Text(s.clone())),
                Value::Array(_) => Err(SqliteRetrieverError::ArrayParameter),
            })
            .collect()
    }
}

impl Retriever for SqliteRetriever {
    type Error = SqliteRetrieverError;

    fn find_one(&self, query: &QueryResult) -> Result<Option<NewsRecord>, Self::Error> {
        let params = Self::bind(&query.params)?;
        let mut stmt = self.conn.prepare(&query.sql)?;
        let record = stmt
            .query_row(params_from_iter(params), map_row)
            .optional()?;
        Ok(record)
    }

    fn find_many(&self, query: &QueryResult) -> Result<Vec<NewsRecord>, Self::Error> {
        let params = Self::bind(&query.params)?;
        let mut stmt = self.conn.prepare(&query.sql)?;
        let rows = stmt.query_map(params_from_iter(params), map_row)?;
        let records = rows.collect::<Result<Vec<_>, _>>()?;
        Ok(records)
    }

    fn count(&self, query: &QueryResult) -> Result<u64, Self::Error> {
        let params = Self::bind(&query.params)?;
        let count: i64 = self
            .conn
            .query_row(&query.sql, params_from_iter(params), |row| row.get(0))?;
        u64::try_from(count).map_err(|_| SqliteRetrieverError::InvalidCount(count))
    }
}

/// A `start`/`stop` column: integer timestamp or `''`.
struct Bound(Option<i64>);

impl FromSql for Bound {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        match value {
            ValueRef::Null => Ok(Self(None)),
            ValueRef::Integer(i) => Ok(Self(Some(i))),
            ValueRef::Text(_) => {
                let text = value.as_str()?.trim();
                if text.is_empty() {
                    Ok(Self(None))
                } else {
                    text.parse()
                        .map(|ts| Self(Some(ts)))
                        .map_err(|e| FromSqlError::Other(Box::new(e)))
                }
            },
            _ => Err(FromSqlError::InvalidType),
        }
    }
}

impl FromSql for Source {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        value
            .as_str()?
            .parse()
            .map_err(|e| FromSqlError::Other(Box::new(e)))
    }
}

fn map_row(row: &Row<'_>) -> rusqlite::Result<NewsRecord> {
    let alias: String = row.get("alias")?;
    let start: Bound = row.get("start")?;
    let stop: Bound = row.get("stop")?;

    Ok(NewsRecord {
        id: row.get("id")?,
        pid: row.get("pid")?,
        alias: (!alias.is_empty()).then_some(alias),
        headline: row.get("headline")?,
        date: row.get("date")?,
        source: row.get("source")?,
        featured: row.get("featured")?,
        published: row.get("published")?,
        start: start.0,
        stop: stop.0,
    })
}
