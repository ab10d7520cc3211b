//! The published-news queries, as pure values.
//!
//! Each function takes everything it depends on (parent ids, caller, `now`,
//! options) and returns a [`NewsQuery`]; nothing here reads a clock or global
//! state. Functions taking a parent id set return `None` when the set is
//! empty, and the caller should not run anything in that case.

use crate::context::QueryScope;
use crate::filter::{FeaturedFilter, VisibilityGate, numeric_id, parent_in, visibility};
use crate::options::FindOptions;
use crate::period::DateRange;
use crate::record::{Source, columns};
use news_sql::{Dialect, FilterExpr, Operator, QueryBuilder, QueryResult, Value, or, simple};

/// Result shape expected from the retriever.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fetch {
    /// At most one record.
    One,
    /// An ordered collection.
    Many,
    /// A row count.
    Count,
}

/// A composed news query: filters AND-ed together plus result shaping.
#[derive(Debug, Clone, PartialEq)]
pub struct NewsQuery {
    fetch: Fetch,
    filters: Vec<FilterExpr>,
    options: FindOptions,
}

impl NewsQuery {
    fn new(fetch: Fetch) -> Self {
        Self {
            fetch,
            filters: Vec::new(),
            options: FindOptions::default(),
        }
    }

    fn filter(mut self, expr: FilterExpr) -> Self {
        self.filters.push(expr);
        self
    }

    fn filter_opt(self, expr: Option<FilterExpr>) -> Self {
        match expr {
            Some(expr) => self.filter(expr),
            None => self,
        }
    }

    fn visible(self, gate: VisibilityGate, scope: &QueryScope) -> Self {
        if gate.applies(&scope.caller) {
            self.filter(visibility(scope.now))
        } else {
            self
        }
    }

    fn options(mut self, options: FindOptions) -> Self {
        self.options = options;
        self
    }

    /// Expected result shape.
    #[must_use]
    pub const fn fetch(&self) -> Fetch {
        self.fetch
    }

    /// Conditions, joined with AND.
    #[must_use]
    pub fn filters(&self) -> &[FilterExpr] {
        &self.filters
    }

    /// Ordering and paging after defaults were applied.
    #[must_use]
    pub const fn find_options(&self) -> &FindOptions {
        &self.options
    }

    /// Compile for `dialect` against `table`.
    ///
    /// Count queries ignore ordering and paging.
    ///
    /// # Panics
    ///
    /// Panics if `table` is not a valid SQL identifier.
    pub fn to_sql<D: Dialect>(&self, dialect: D, table: &str) -> QueryResult {
        let mut builder = QueryBuilder::new(dialect, table);
        for expr in &self.filters {
            builder = builder.filter_expr(expr.clone());
        }

        if self.fetch == Fetch::Count {
            return builder.count().build();
        }

        builder = builder.sorts(self.options.sorts());
        if let Some(limit) = self.options.limit {
            builder = builder.limit(limit);
        }
        if let Some(offset) = self.options.offset {
            builder = builder.offset(offset);
        }
        builder.build()
    }
}

/// One published item of the given archives, by numeric id or alias.
///
/// A non-numeric `lookup` compares the id against `0`, so only the alias can
/// match. Back end users see unpublished items. Returns `None` for an empty
/// parent set or a blank lookup.
#[must_use]
pub fn published_by_parent_and_id_or_alias(
    lookup: &str,
    pids: &[i64],
    scope: &QueryScope,
    options: FindOptions,
) -> Option<NewsQuery> {
    if pids.is_empty() || lookup.trim().is_empty() {
        return None;
    }

    let id_or_alias = or(vec![
        simple(columns::ID, Operator::Eq, Value::Int(numeric_id(lookup))),
        simple(columns::ALIAS, Operator::Eq, Value::String(lookup.to_string())),
    ]);

    Some(
        NewsQuery::new(Fetch::One)
            .filter(id_or_alias)
            .filter(parent_in(pids))
            .visible(VisibilityGate::Unprivileged, scope)
            .options(options.limited(1)),
    )
}

/// Published items of the given archives, newest first.
///
/// The visibility window also applies in back end mode, so feeds built there
/// never contain unpublished items. `limit`/`offset` of `0` mean unbounded and
/// replace whatever `options` carried.
#[must_use]
pub fn published_by_pids(
    pids: &[i64],
    featured: FeaturedFilter,
    limit: u32,
    offset: u32,
    scope: &QueryScope,
    options: FindOptions,
) -> Option<NewsQuery> {
    if pids.is_empty() {
        return None;
    }

    Some(
        NewsQuery::new(Fetch::Many)
            .filter(parent_in(pids))
            .filter_opt(featured.to_filter())
            .visible(VisibilityGate::FeedSafe, scope)
            .options(options.or_newest_first().paged(limit, offset)),
    )
}

/// Number of published items of the given archives.
#[must_use]
pub fn count_published_by_pids(
    pids: &[i64],
    featured: FeaturedFilter,
    scope: &QueryScope,
) -> Option<NewsQuery> {
    if pids.is_empty() {
        return None;
    }

    Some(
        NewsQuery::new(Fetch::Count)
            .filter(parent_in(pids))
            .filter_opt(featured.to_filter())
            .visible(VisibilityGate::Unprivileged, scope),
    )
}

/// Published items of one archive that use the default reader page, newest
/// first.
#[must_use]
pub fn published_default_by_pid(pid: i64, scope: &QueryScope, options: FindOptions) -> NewsQuery {
    NewsQuery::new(Fetch::Many)
        .filter(simple(columns::PID, Operator::Eq, Value::Int(pid)))
        .filter(simple(
            columns::SOURCE,
            Operator::Eq,
            Value::String(Source::Default.as_str().to_string()),
        ))
        .visible(VisibilityGate::Unprivileged, scope)
        .options(options.or_newest_first())
}

/// Published items of one archive, newest first, for every caller.
///
/// The visibility window applies regardless of the caller in `scope`. A
/// `limit` of `0` keeps the limit from `options`.
#[must_use]
pub fn published_by_pid(
    pid: i64,
    limit: u32,
    scope: &QueryScope,
    options: FindOptions,
) -> NewsQuery {
    NewsQuery::new(Fetch::Many)
        .filter(simple(columns::PID, Operator::Eq, Value::Int(pid)))
        .visible(VisibilityGate::Always, scope)
        .options(options.or_newest_first().limited(limit))
}

fn in_range(range: DateRange) -> [FilterExpr; 2] {
    [
        simple(columns::DATE, Operator::Gte, Value::Int(range.from)),
        simple(columns::DATE, Operator::Lte, Value::Int(range.to)),
    ]
}

/// Published items of the given archives dated inside `range`, newest first.
#[must_use]
pub fn published_from_to_by_pids(
    range: DateRange,
    pids: &[i64],
    limit: u32,
    offset: u32,
    scope: &QueryScope,
    options: FindOptions,
) -> Option<NewsQuery> {
    if pids.is_empty() {
        return None;
    }

    let [from, to] = in_range(range);
    Some(
        NewsQuery::new(Fetch::Many)
            .filter(from)
            .filter(to)
            .filter(parent_in(pids))
            .visible(VisibilityGate::Unprivileged, scope)
            .options(options.or_newest_first().paged(limit, offset)),
    )
}

/// Number of published items of the given archives dated inside `range`.
#[must_use]
pub fn count_published_from_to_by_pids(
    range: DateRange,
    pids: &[i64],
    scope: &QueryScope,
) -> Option<NewsQuery> {
    if pids.is_empty() {
        return None;
    }

    let [from, to] = in_range(range);
    Some(
        NewsQuery::new(Fetch::Count)
            .filter(from)
            .filter(to)
            .filter(parent_in(pids))
            .visible(VisibilityGate::Unprivileged, scope),
    )
}
