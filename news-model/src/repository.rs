//! Runs the news queries against a retrieval primitive.

use crate::config::NewsConfig;
use crate::context::{CallerContext, Clock, QueryScope, SystemClock};
use crate::error::NewsError;
use crate::filter::FeaturedFilter;
use crate::options::FindOptions;
use crate::period::DateRange;
use crate::query::{self, NewsQuery};
use crate::record::NewsRecord;
use news_sql::QueryResult;

/// Executes compiled news queries.
///
/// Implementations own the connection and the row mapping. They are only
/// called with non-trivial queries; empty inputs never reach them.
pub trait Retriever {
    /// Storage error type.
    type Error: std::error::Error + Send + Sync + 'static;

    /// First matching record, if any.
    fn find_one(&self, query: &QueryResult) -> Result<Option<NewsRecord>, Self::Error>;

    /// All matching records, in query order.
    fn find_many(&self, query: &QueryResult) -> Result<Vec<NewsRecord>, Self::Error>;

    /// Value of a `COUNT(*)` query.
    fn count(&self, query: &QueryResult) -> Result<u64, Self::Error>;
}

impl<R: Retriever + ?Sized> Retriever for &R {
    type Error = R::Error;

    fn find_one(&self, query: &QueryResult) -> Result<Option<NewsRecord>, Self::Error> {
        (**self).find_one(query)
    }

    fn find_many(&self, query: &QueryResult) -> Result<Vec<NewsRecord>, Self::Error> {
        (**self).find_many(query)
    }

    fn count(&self, query: &QueryResult) -> Result<u64, Self::Error> {
        (**self).count(query)
    }
}

/// Published-news lookups for one news table.
///
/// Collection lookups return `None` both when the input short-circuits and
/// when nothing matched.
#[derive(Debug)]
pub struct NewsRepository<R, C = SystemClock> {
    config: NewsConfig,
    retriever: R,
    clock: C,
}

impl<R: Retriever> NewsRepository<R> {
    /// Repository on the wall clock.
    pub fn new(config: NewsConfig, retriever: R) -> Result<Self, NewsError> {
        Self::with_clock(config, retriever, SystemClock)
    }
}

impl<R: Retriever, C: Clock> NewsRepository<R, C> {
    /// Repository on a custom clock.
    pub fn with_clock(config: NewsConfig, retriever: R, clock: C) -> Result<Self, NewsError> {
        config.validate()?;
        Ok(Self {
            config,
            retriever,
            clock,
        })
    }

    /// Active configuration.
    pub const fn config(&self) -> &NewsConfig {
        &self.config
    }

    /// Underlying retriever.
    pub const fn retriever(&self) -> &R {
        &self.retriever
    }

    fn scope(&self, caller: &CallerContext) -> QueryScope {
        QueryScope::new(*caller, self.clock.now())
    }

    fn compile(&self, query: &NewsQuery) -> QueryResult {
        let compiled = query.to_sql(self.config.dialect, &self.config.table);
        tracing::trace!(
            sql = %compiled.sql,
            params = compiled.params.len(),
            fetch = ?query.fetch(),
            "running news query"
        );
        compiled
    }

    fn one(
        &self,
        query: Option<NewsQuery>,
        operation: &str,
    ) -> Result<Option<NewsRecord>, NewsError> {
        let Some(query) = query else {
            tracing::debug!(operation, "empty input, skipping retrieval");
            return Ok(None);
        };
        self.retriever
            .find_one(&self.compile(&query))
            .map_err(NewsError::retrieval)
    }

    fn many(
        &self,
        query: Option<NewsQuery>,
        operation: &str,
    ) -> Result<Option<Vec<NewsRecord>>, NewsError> {
        let Some(query) = query else {
            tracing::debug!(operation, "empty input, skipping retrieval");
            return Ok(None);
        };
        let records = self
            .retriever
            .find_many(&self.compile(&query))
            .map_err(NewsError::retrieval)?;
        Ok((!records.is_empty()).then_some(records))
    }

    fn count(&self, query: Option<NewsQuery>, operation: &str) -> Result<u64, NewsError> {
        let Some(query) = query else {
            tracing::debug!(operation, "empty input, counting zero");
            return Ok(0);
        };
        self.retriever
            .count(&self.compile(&query))
            .map_err(NewsError::retrieval)
    }

    /// Published item of `pids` whose id or alias is `lookup`.
    pub fn find_published_by_parent_and_id_or_alias(
        &self,
        lookup: &str,
        pids: &[i64],
        caller: &CallerContext,
        options: FindOptions,
    ) -> Result<Option<NewsRecord>, NewsError> {
        let scope = self.scope(caller);
        self.one(
            query::published_by_parent_and_id_or_alias(lookup, pids, &scope, options),
            "find_published_by_parent_and_id_or_alias",
        )
    }

    /// Published items of `pids`, newest first. `0` for `limit`/`offset` means
    /// unbounded.
    pub fn find_published_by_pids(
        &self,
        pids: &[i64],
        featured: FeaturedFilter,
        limit: u32,
        offset: u32,
        caller: &CallerContext,
        options: FindOptions,
    ) -> Result<Option<Vec<NewsRecord>>, NewsError> {
        let scope = self.scope(caller);
        self.many(
            query::published_by_pids(pids, featured, limit, offset, &scope, options),
            "find_published_by_pids",
        )
    }

    /// Number of published items of `pids`; `0` for an empty set.
    pub fn count_published_by_pids(
        &self,
        pids: &[i64],
        featured: FeaturedFilter,
        caller: &CallerContext,
    ) -> Result<u64, NewsError> {
        let scope = self.scope(caller);
        self.count(
            query::count_published_by_pids(pids, featured, &scope),
            "count_published_by_pids",
        )
    }

    /// Published items of archive `pid` that use the default reader page.
    pub fn find_published_default_by_pid(
        &self,
        pid: i64,
        caller: &CallerContext,
        options: FindOptions,
    ) -> Result<Option<Vec<NewsRecord>>, NewsError> {
        let scope = self.scope(caller);
        self.many(
            Some(query::published_default_by_pid(pid, &scope, options)),
            "find_published_default_by_pid",
        )
    }

    /// Published items of archive `pid`. The visibility window applies even
    /// to back end users.
    pub fn find_published_by_pid(
        &self,
        pid: i64,
        limit: u32,
        caller: &CallerContext,
        options: FindOptions,
    ) -> Result<Option<Vec<NewsRecord>>, NewsError> {
        let scope = self.scope(caller);
        self.many(
            Some(query::published_by_pid(pid, limit, &scope, options)),
            "find_published_by_pid",
        )
    }

    /// Published items of `pids` dated inside `range`, newest first.
    pub fn find_published_from_to_by_pids(
        &self,
        range: DateRange,
        pids: &[i64],
        limit: u32,
        offset: u32,
        caller: &CallerContext,
        options: FindOptions,
    ) -> Result<Option<Vec<NewsRecord>>, NewsError> {
        let scope = self.scope(caller);
        self.many(
            query::published_from_to_by_pids(range, pids, limit, offset, &scope, options),
            "find_published_from_to_by_pids",
        )
    }

    /// Number of published items of `pids` dated inside `range`; `0` for an
    /// empty set.
    pub fn count_published_from_to_by_pids(
        &self,
        range: DateRange,
        pids: &[i64],
        caller: &CallerContext,
    ) -> Result<u64, NewsError> {
        let scope = self.scope(caller);
        self.count(
            query::count_published_from_to_by_pids(range, pids, &scope),
            "count_published_from_to_by_pids",
        )
    }
}
