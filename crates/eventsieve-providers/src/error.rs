//! Error types for normalization and event sources.

use std::path::PathBuf;

use thiserror::Error;

/// A raw event that could not become a canonical event.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NormalizeError {
    /// Neither `start.dateTime` nor `start.date` is present.
    #[error("event has no start time")]
    MissingStart,

    /// The start value matched neither the date-time nor the date format.
    #[error("unparseable start time: {value:?}")]
    UnparseableStart { value: String },
}

impl NormalizeError {
    /// Returns a short machine-friendly name for this error.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MissingStart => "missing_start",
            Self::UnparseableStart { .. } => "unparseable_start",
        }
    }
}

/// A failure to read raw events from a source.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("failed to read events from {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid event JSON in {path}: {source}")]
    InvalidJson {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl SourceError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub fn invalid_json(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        Self::InvalidJson {
            path: path.into(),
            source,
        }
    }

    /// The file the source was reading.
    pub fn path(&self) -> &std::path::Path {
        match self {
            Self::Io { path, .. } | Self::InvalidJson { path, .. } => path,
        }
    }
}

/// A specialized Result type for event sources.
pub type SourceResult<T> = Result<T, SourceError>;
