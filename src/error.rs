use thiserror::Error;

use crate::config::ConfigError;
use crate::store::StoreError;

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Rejected input, raised before anything reaches the store.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("stream category must not be empty")]
    EmptyCategory,

    #[error("stream id must not be empty")]
    EmptyStreamId,

    #[error("stream category {0:?} must not contain '-'")]
    CategoryContainsDelimiter(String),

    #[error("stream name {0:?} is not of the form Category-Id")]
    MissingDelimiter(String),
}

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Whatever the store reported, untouched.
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("failed to encode {what}: {source}")]
    Encode {
        what: &'static str,
        #[source]
        source: serde_json::Error,
    },
}
