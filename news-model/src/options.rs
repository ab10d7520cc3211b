//! Caller-supplied result shaping.

use crate::record::columns;
use news_sql::{SortDir, SortField, ValidationError};

/// Ordering and paging requested by the caller.
///
/// Unset fields fall back to the defaults of the query they are passed to.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FindOptions {
    /// Explicit ordering. `None` lets the query pick its default.
    pub order: Option<Vec<SortField>>,
    /// Maximum rows.
    pub limit: Option<u32>,
    /// Rows to skip.
    pub offset: Option<u32>,
}

impl FindOptions {
    /// Empty options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Order by a sort string such as `"headline"` or `"date ASC, id DESC"`.
    ///
    /// Only news columns are accepted. A blank string clears the order.
    pub fn with_order(mut self, sort: &str) -> Result<Self, ValidationError> {
        let sorts = SortField::parse_sort_string(sort, columns::ALL)?;
        self.order = if sorts.is_empty() { None } else { Some(sorts) };
        Ok(self)
    }

    /// Cap the number of rows.
    #[must_use]
    pub const fn with_limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Skip rows.
    #[must_use]
    pub const fn with_offset(mut self, offset: u32) -> Self {
        self.offset = Some(offset);
        self
    }

    /// Order by `date DESC` unless the caller chose an order.
    pub(crate) fn or_newest_first(mut self) -> Self {
        if self.order.is_none() {
            self.order = Some(vec![SortField::new(columns::DATE, SortDir::Desc)]);
        }
        self
    }

    /// Overwrite paging with explicit arguments. `0` means unbounded.
    pub(crate) fn paged(mut self, limit: u32, offset: u32) -> Self {
        self.limit = (limit > 0).then_some(limit);
        self.offset = (offset > 0).then_some(offset);
        self
    }

    /// Overwrite the limit only when one is given.
    pub(crate) fn limited(mut self, limit: u32) -> Self {
        if limit > 0 {
            self.limit = Some(limit);
        }
        self
    }

    /// Sort fields, empty when unordered.
    #[must_use]
    pub fn sorts(&self) -> &[SortField] {
        self.order.as_deref().unwrap_or_default()
    }
}
