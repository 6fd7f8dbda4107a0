//! Client error types.

use eventsieve_core::{TracingError, UnknownRange};
use eventsieve_providers::{NormalizeError, SourceError};
use eventsieve_store::StoreError;
use thiserror::Error;

/// Result type for client operations.
pub type ClientResult<T> = Result<T, ClientError>;

/// Errors that can occur in the client.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error(transparent)]
    Source(#[from] SourceError),

    /// First rejected event under `--strict`.
    #[error("event #{index}{}: {source}", id_suffix(.id))]
    Normalize {
        index: usize,
        id: Option<String>,
        #[source]
        source: NormalizeError,
    },

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to initialize logging: {0}")]
    Tracing(#[from] TracingError),

    #[error("failed to serialize output: {0}")]
    Serialize(String),
}

fn id_suffix(id: &Option<String>) -> String {
    id.as_deref().map(|id| format!(" ({id})")).unwrap_or_default()
}

impl From<UnknownRange> for ClientError {
    fn from(err: UnknownRange) -> Self {
        Self::InvalidArgument(err.to_string())
    }
}
