//! Error types.

use thiserror::Error;

// ============================================================================
// Error Types
// ============================================================================

/// Loading or validating a [`NewsConfig`](crate::NewsConfig) failed.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read, or is over the size limit.
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    /// The document is not valid TOML or has unknown keys.
    #[error("Invalid TOML in config file: {0}")]
    Parse(#[from] toml::de::Error),

    /// The table name cannot be used as an SQL identifier.
    #[error("Invalid table name '{0}'")]
    InvalidTable(String),
}

/// Errors surfaced by the news repository.
#[derive(Debug, Error)]
pub enum NewsError {
    /// The repository configuration is invalid.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The retrieval primitive failed; the original error is the source.
    #[error("News retrieval failed")]
    Retrieval(#[source] Box<dyn std::error::Error + Send + Sync + 'static>),
}

impl NewsError {
    /// Wrap a retriever error.
    pub fn retrieval<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Retrieval(Box::new(err))
    }
}
