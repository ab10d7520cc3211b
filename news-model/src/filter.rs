//! Filter fragments shared by the news queries.

use crate::context::CallerContext;
use crate::record::columns;
use news_sql::{FilterExpr, Operator, Value, and, or, simple};

/// Featured filtering, three ways.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FeaturedFilter {
    /// No featured condition.
    #[default]
    Any,
    /// Only featured items.
    FeaturedOnly,
    /// Only items that are not featured.
    UnfeaturedOnly,
}

impl FeaturedFilter {
    /// The condition to add, if any.
    #[must_use]
    pub fn to_filter(self) -> Option<FilterExpr> {
        match self {
            Self::Any => None,
            Self::FeaturedOnly => Some(simple(columns::FEATURED, Operator::Eq, Value::Bool(true))),
            Self::UnfeaturedOnly => {
                Some(simple(columns::FEATURED, Operator::Eq, Value::Bool(false)))
            },
        }
    }
}

impl From<Option<bool>> for FeaturedFilter {
    fn from(value: Option<bool>) -> Self {
        match value {
            None => Self::Any,
            Some(true) => Self::FeaturedOnly,
            Some(false) => Self::UnfeaturedOnly,
        }
    }
}

/// When the visibility window is added to a query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisibilityGate {
    /// Only for callers that are not back end users.
    Unprivileged,
    /// For unprivileged callers and for anything rendered in back end mode,
    /// so unpublished items never reach generated feeds.
    FeedSafe,
    /// For everyone.
    Always,
}

impl VisibilityGate {
    /// Whether the window applies to `caller`.
    #[must_use]
    pub const fn applies(self, caller: &CallerContext) -> bool {
        match self {
            Self::Unprivileged => !caller.is_privileged(),
            Self::FeedSafe => !caller.is_privileged() || caller.is_backend_mode(),
            Self::Always => true,
        }
    }
}

/// The visibility window at `now`:
/// `(start = '' OR start < now) AND (stop = '' OR stop > now) AND published`.
///
/// The empty string marks an unset bound; `0` is a real timestamp.
#[must_use]
pub fn visibility(now: i64) -> FilterExpr {
    and(vec![
        or(vec![
            simple(columns::START, Operator::Eq, Value::String(String::new())),
            simple(columns::START, Operator::Lt, Value::Int(now)),
        ]),
        or(vec![
            simple(columns::STOP, Operator::Eq, Value::String(String::new())),
            simple(columns::STOP, Operator::Gt, Value::Int(now)),
        ]),
        simple(columns::PUBLISHED, Operator::Eq, Value::Bool(true)),
    ])
}

/// `pid IN (...)`. Callers make sure `pids` is not empty.
#[must_use]
pub fn parent_in(pids: &[i64]) -> FilterExpr {
    simple(
        columns::PID,
        Operator::In,
        Value::Array(pids.iter().copied().map(Value::Int).collect()),
    )
}

/// Coerce raw parent ids to integers.
///
/// Each entry keeps its leading integer (after whitespace and an optional
/// sign); entries without one become `0`, which matches no archive.
///
/// ```
/// use news_model::parse_parent_ids;
///
/// assert_eq!(parse_parent_ids(["3", " 7", "12abc", "x", "-2"]), vec![3, 7, 12, 0, -2]);
/// ```
pub fn parse_parent_ids<I, S>(raw: I) -> Vec<i64>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    raw.into_iter().map(|s| leading_int(s.as_ref())).collect()
}

fn leading_int(s: &str) -> i64 {
    let s = s.trim_start();
    let (negative, digits) = match s.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, s.strip_prefix('+').unwrap_or(s)),
    };

    let mut value: i64 = 0;
    for b in digits.bytes().take_while(u8::is_ascii_digit) {
        let digit = i64::from(b - b'0');
        value = value.saturating_mul(10);
        value = if negative {
            value.saturating_sub(digit)
        } else {
            value.saturating_add(digit)
        };
    }
    value
}

/// The id to compare against for an id-or-alias lookup.
///
/// A fully numeric lookup (surrounding whitespace allowed, integral floats
/// such as `"12.0"` included) yields its value; anything else yields `0`,
/// which never matches a stored id.
///
/// ```
/// use news_model::numeric_id;
///
/// assert_eq!(numeric_id("42"), 42);
/// assert_eq!(numeric_id("42.0"), 42);
/// assert_eq!(numeric_id("launch-day"), 0);
/// assert_eq!(numeric_id("42abc"), 0);
/// ```
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
pub fn numeric_id(lookup: &str) -> i64 {
    let trimmed = lookup.trim();
    if let Ok(id) = trimmed.parse::<i64>() {
        return id;
    }

    match trimmed.parse::<f64>() {
        Ok(f) if f.is_finite() && f.fract() == 0.0 && f.abs() < i64::MAX as f64 => f as i64,
        _ => 0,
    }
}
