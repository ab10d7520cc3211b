//! Publication-aware queries over news archives.
//!
//! Every lookup composes the same building blocks: a parent archive
//! filter, an optional featured filter and the visibility window
//! (`published`, `start`, `stop`). Which blocks apply depends on the caller:
//! back end users skip the visibility window, except where a query feeds
//! generated output.
//!
//! [`query`] builds those filters as pure values. [`NewsRepository`]
//! compiles them for the configured dialect and hands them to a
//! [`Retriever`].
//!
//! ```
//! use news_model::{CallerContext, FeaturedFilter, FindOptions, QueryScope, query};
//! use news_sql::Sqlite;
//!
//! let scope = QueryScope::new(CallerContext::anonymous(), 1_700_000_000);
//! let featured = FeaturedFilter::FeaturedOnly;
//! let news = query::published_by_pids(&[3, 7], featured, 0, 0, &scope, FindOptions::new())
//!     .expect("parent ids given");
//!
//! let compiled = news.to_sql(Sqlite, "tl_news");
//! assert!(compiled.sql.starts_with("SELECT * FROM tl_news WHERE pid IN (?1, ?2) AND featured"));
//! assert!(compiled.sql.ends_with("ORDER BY date DESC"));
//! ```

pub mod config;
pub mod context;
pub mod error;
pub mod filter;
pub mod options;
pub mod period;
pub mod query;
pub mod record;
pub mod repository;
#[cfg(feature = "sqlite")]
pub mod sqlite;

pub use config::{DialectKind, NewsConfig};
pub use context::{CallerContext, Clock, FixedClock, Mode, QueryScope, SystemClock};
pub use error::{ConfigError, NewsError};
pub use filter::{FeaturedFilter, VisibilityGate, numeric_id, parse_parent_ids};
pub use options::FindOptions;
pub use period::DateRange;
pub use query::{Fetch, NewsQuery};
pub use record::{NewsRecord, Source, columns};
pub use repository::{NewsRepository, Retriever};
#[cfg(feature = "sqlite")]
pub use sqlite::{SqliteRetriever, SqliteRetrieverError, create_table_sql};
