//! SQL identifier validation.
//!
//! Table, column and sort names are spliced into the SQL text, so every one
//! of them has to pass [`is_valid_sql_identifier`] first. Values never do;
//! they are always bound as parameters.

use thiserror::Error;

/// Maximum length for SQL identifiers (`PostgreSQL` limit is 63).
const MAX_IDENTIFIER_LENGTH: usize = 63;

/// Errors raised while validating caller-supplied query parts.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// The name is not a safe SQL identifier.
    #[error("invalid SQL identifier '{0}'")]
    InvalidIdentifier(String),

    /// The sort field is valid but not in the whitelist.
    #[error("sort field '{field}' not allowed, allowed: {allowed:?}")]
    SortFieldNotAllowed {
        /// Requested field.
        field: String,
        /// Whitelist the field was checked against.
        allowed: Vec<String>,
    },

    /// The sort direction is neither `ASC` nor `DESC`.
    #[error("invalid sort direction '{0}', expected ASC or DESC")]
    InvalidSortDirection(String),
}

/// Validate that a string is a safe SQL identifier.
///
/// A valid SQL identifier:
/// - Starts with a letter (a-z, A-Z) or underscore
/// - Contains only letters, digits (0-9), and underscores
/// - Is not empty and not longer than 63 characters
///
/// # Examples
///
/// ```
/// use news_sql::is_valid_sql_identifier;
///
/// assert!(is_valid_sql_identifier("tl_news"));
/// assert!(is_valid_sql_identifier("_private"));
///
/// assert!(!is_valid_sql_identifier(""));
/// assert!(!is_valid_sql_identifier("123abc"));
/// assert!(!is_valid_sql_identifier("tl_news.pid"));
/// assert!(!is_valid_sql_identifier("date; DROP"));
/// ```
#[inline]
#[must_use]
pub fn is_valid_sql_identifier(s: &str) -> bool {
    if s.is_empty() || s.len() > MAX_IDENTIFIER_LENGTH {
        return false;
    }

    let mut chars = s.chars();

    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {},
        _ => return false,
    }

    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Assert that a string is a valid SQL identifier.
///
/// # Panics
///
/// Panics with a descriptive error if the identifier is invalid.
/// This is intended for programmer errors (invalid table/column names in code),
/// not for user input validation.
///
/// ```should_panic
/// use news_sql::assert_valid_sql_identifier;
///
/// assert_valid_sql_identifier("tl_news; DROP TABLE", "table");
/// ```
#[inline]
pub fn assert_valid_sql_identifier(s: &str, context: &str) {
    assert!(
        is_valid_sql_identifier(s),
        "Invalid SQL {context} name '{s}': must start with letter/underscore, \
             contain only ASCII alphanumeric/underscore, and be 1-63 chars"
    );
}
