//! Repository configuration, usually read from a `news.toml`.
//!
//! ```toml
//! table = "tl_news"
//! dialect = "sqlite"
//! ```
//!
//! Both keys are optional.

use crate::error::ConfigError;
use news_sql::{Dialect, Postgres, Sqlite, Value, is_valid_sql_identifier};
use serde::Deserialize;
use std::path::Path;

/// Maximum accepted config file size.
const MAX_CONFIG_BYTES: u64 = 64 * 1024;

/// SQL dialect picked at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DialectKind {
    /// `$n` placeholders, `= ANY($n)` lists.
    Postgres,
    /// `?n` placeholders, expanded `IN` lists.
    #[default]
    Sqlite,
}

impl Dialect for DialectKind {
    fn param(&self, idx: usize) -> String {
        match self {
            Self::Postgres => Postgres.param(idx),
            Self::Sqlite => Sqlite.param(idx),
        }
    }

    fn in_clause(&self, field: &str, values: &[Value], start_idx: usize) -> (String, Vec<Value>) {
        match self {
            Self::Postgres => Postgres.in_clause(field, values, start_idx),
            Self::Sqlite => Sqlite.in_clause(field, values, start_idx),
        }
    }

    fn unbounded_limit(&self) -> Option<&'static str> {
        match self {
            Self::Postgres => Postgres.unbounded_limit(),
            Self::Sqlite => Sqlite.unbounded_limit(),
        }
    }
}

/// Where the news live and how to talk to the store.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NewsConfig {
    /// News table name.
    pub table: String,
    /// SQL dialect of the store.
    pub dialect: DialectKind,
}

impl Default for NewsConfig {
    fn default() -> Self {
        Self {
            table: "tl_news".to_string(),
            dialect: DialectKind::default(),
        }
    }
}

impl NewsConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(input: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(input)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let size = std::fs::metadata(path)?.len();
        if size > MAX_CONFIG_BYTES {
            return Err(ConfigError::Io(std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                format!("{} is {size} bytes, limit is {MAX_CONFIG_BYTES}", path.display()),
            )));
        }

        let input = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&input)?;
        tracing::debug!(path = %path.display(), table = %config.table, "loaded news config");
        Ok(config)
    }

    /// Check that the table name is usable in SQL.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if is_valid_sql_identifier(&self.table) {
            Ok(())
        } else {
            Err(ConfigError::InvalidTable(self.table.clone()))
        }
    }
}
