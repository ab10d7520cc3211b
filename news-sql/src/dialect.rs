//! SQL dialect implementations for Postgres and `SQLite`.
//!
//! Each dialect handles the placeholder and list syntax differences between
//! databases.

use crate::Value;

/// SQL dialect trait for database-specific syntax.
pub trait Dialect: Clone + Copy {
    /// Format a parameter placeholder (e.g., `$1` for Postgres, `?1` for `SQLite`).
    fn param(&self, idx: usize) -> String;

    /// Format an IN clause with multiple values.
    /// Returns the SQL fragment (e.g., `= ANY($1)` or `IN (?1, ?2)`) and the
    /// parameters it binds.
    fn in_clause(&self, field: &str, values: &[Value], start_idx: usize) -> (String, Vec<Value>);

    /// LIMIT value to emit when an OFFSET is requested without a limit.
    ///
    /// `None` means the dialect accepts a bare OFFSET.
    fn unbounded_limit(&self) -> Option<&'static str>;
}

/// Postgres dialect.
#[derive(Debug, Clone, Copy, Default)]
pub struct Postgres;

impl Dialect for Postgres {
    #[inline]
    fn param(&self, idx: usize) -> String {
        format!("${idx}")
    }

    fn in_clause(&self, field: &str, values: &[Value], start_idx: usize) -> (String, Vec<Value>) {
        // Postgres: field = ANY($1) with array parameter
        let sql = format!("{field} = ANY(${start_idx})");
        (sql, vec![Value::Array(values.to_vec())])
    }

    #[inline]
    fn unbounded_limit(&self) -> Option<&'static str> {
        None
    }
}

/// `SQLite` dialect.
#[derive(Debug, Clone, Copy, Default)]
pub struct Sqlite;

impl Dialect for Sqlite {
    #[inline]
    fn param(&self, idx: usize) -> String {
        format!("?{idx}")
    }

    fn in_clause(&self, field: &str, values: &[Value], start_idx: usize) -> (String, Vec<Value>) {
        // SQLite: field IN (?1, ?2, ?3) with expanded parameters
        let placeholders: Vec<String> = (0..values.len())
            .map(|i| format!("?{}", start_idx + i))
            .collect();
        let sql = format!("{} IN ({})", field, placeholders.join(", "));
        (sql, values.to_vec())
    }

    #[inline]
    fn unbounded_limit(&self) -> Option<&'static str> {
        // OFFSET is only valid after LIMIT; a negative limit means "no limit"
        Some("-1")
    }
}
