//! Error types for exclusion stores.

use thiserror::Error;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// A failure to read or write saved exclusions.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The storage medium could not be opened, read or written.
    #[error("{backend} exclusion store unavailable: {source}")]
    Unavailable {
        backend: &'static str,
        #[source]
        source: BoxError,
    },

    /// The medium was readable but its content is not what we wrote.
    #[error("{backend} exclusion store is corrupt: {message}")]
    Corrupt {
        backend: &'static str,
        message: String,
    },
}

impl StoreError {
    pub fn unavailable<E>(backend: &'static str, source: E) -> Self
    where
        E: Into<BoxError>,
    {
        Self::Unavailable {
            backend,
            source: source.into(),
        }
    }

    pub fn corrupt(backend: &'static str, message: impl Into<String>) -> Self {
        Self::Corrupt {
            backend,
            message: message.into(),
        }
    }

    /// The backend that produced the error.
    pub fn backend(&self) -> &'static str {
        match self {
            Self::Unavailable { backend, .. } | Self::Corrupt { backend, .. } => backend,
        }
    }

    pub fn is_corrupt(&self) -> bool {
        matches!(self, Self::Corrupt { .. })
    }
}

/// A specialized Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_backend() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err = StoreError::unavailable("json", io);
        assert_eq!(err.to_string(), "json exclusion store unavailable: denied");
        assert_eq!(err.backend(), "json");
        assert!(!err.is_corrupt());
        assert!(std::error::Error::source(&err).is_some());

        let err = StoreError::corrupt("sqlite", "schema version 7 is newer than supported 1");
        assert_eq!(
            err.to_string(),
            "sqlite exclusion store is corrupt: schema version 7 is newer than supported 1"
        );
        assert!(err.is_corrupt());
    }
}
