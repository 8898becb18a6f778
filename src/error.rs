use thiserror::Error;

/// Errors reported by the persistence backend.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("failed to read key `{key}`: {message}")]
    Read { key: String, message: String },
    #[error("failed to write key `{key}`: {message}")]
    Write { key: String, message: String },
    #[error("stored value under `{key}` is not valid: {source}")]
    Corrupt {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Errors surfaced by chart construction and configuration.
#[derive(Debug, Error)]
pub enum ChartError {
    #[error("chart initialization failed: {0}")]
    Initialization(String),
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error("invalid chart configuration: {0}")]
    Config(#[from] serde_json::Error),
}
