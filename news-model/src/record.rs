//! The news item as the repository returns it.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Column names of the news table.
pub mod columns {
    /// Primary key.
    pub const ID: &str = "id";
    /// Owning archive.
    pub const PID: &str = "pid";
    /// Optional unique alias, `''` when unset.
    pub const ALIAS: &str = "alias";
    /// Title.
    pub const HEADLINE: &str = "headline";
    /// Publication date used for ordering and ranges.
    pub const DATE: &str = "date";
    /// Redirect target kind.
    pub const SOURCE: &str = "source";
    /// Featured flag.
    pub const FEATURED: &str = "featured";
    /// Published flag.
    pub const PUBLISHED: &str = "published";
    /// Show from, `''` when unset.
    pub const START: &str = "start";
    /// Show until, `''` when unset.
    pub const STOP: &str = "stop";

    /// Every column, in table order. Also the sort whitelist.
    pub const ALL: &[&str] = &[
        ID, PID, ALIAS, HEADLINE, DATE, SOURCE, FEATURED, PUBLISHED, START, STOP,
    ];
}

/// Where a news item links to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    /// The item's own reader page.
    #[default]
    Default,
    /// Another page of the site.
    Internal,
    /// An article of the site.
    Article,
    /// An external URL.
    External,
}

impl Source {
    /// Stored string form.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Internal => "internal",
            Self::Article => "article",
            Self::External => "external",
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unknown source tag.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown news source '{0}'")]
pub struct SourceParseError(pub String);

impl FromStr for Source {
    type Err = SourceParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "default" => Ok(Self::Default),
            "internal" => Ok(Self::Internal),
            "article" => Ok(Self::Article),
            "external" => Ok(Self::External),
            other => Err(SourceParseError(other.to_string())),
        }
    }
}

/// A news item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewsRecord {
    /// Primary key.
    pub id: i64,
    /// Owning archive.
    pub pid: i64,
    /// Alternative lookup key.
    pub alias: Option<String>,
    /// Title.
    pub headline: String,
    /// Unix timestamp used for ordering and date ranges.
    pub date: i64,
    /// Redirect target kind.
    pub source: Source,
    /// Featured flag.
    pub featured: bool,
    /// Published flag.
    pub published: bool,
    /// Visible from (exclusive), `None` for unbounded.
    pub start: Option<i64>,
    /// Visible until (exclusive), `None` for unbounded.
    pub stop: Option<i64>,
}

impl NewsRecord {
    /// Whether an unprivileged caller may see this item at `now`.
    ///
    /// Mirrors the SQL visibility window: published, and strictly inside
    /// whichever bounds are set.
    #[must_use]
    pub fn is_visible_at(&self, now: i64) -> bool {
        self.published
            && self.start.is_none_or(|start| start < now)
            && self.stop.is_none_or(|stop| stop > now)
    }
}
