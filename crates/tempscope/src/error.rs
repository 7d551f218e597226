//! Error types for temporary resource acquisition
use std::path::PathBuf;

use thiserror::Error;

use crate::descriptor::Kind;

/// Result type for temp resource operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for temp resource operations
#[derive(Error, Debug)]
pub enum Error {
    /// Provider or descriptor parameters are invalid
    #[error("Configuration error: {message}")]
    Configuration {
        /// The error message
        message: String,
    },

    /// Creating the underlying storage failed.
    ///
    /// Surfaced before the consumer's scope runs; the scope body never
    /// starts on a creation failure.
    #[error("Failed to create temp {kind}: {reason}")]
    Creation {
        /// The kind of resource being created
        kind: Kind,
        /// The failure reason
        reason: String,
        /// The underlying I/O error
        #[source]
        source: Option<std::io::Error>,
    },

    /// Explicitly requested removal failed.
    ///
    /// Only [`Handle::close`](crate::Handle::close) returns this; implicit
    /// cleanup on drop logs removal failures instead of surfacing them.
    #[error("Failed to remove temp resource at '{}'", path.display())]
    Cleanup {
        /// Path of the resource that could not be removed
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    /// Create a configuration error
    pub fn configuration<S: Into<String>>(message: S) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create a creation error with no I/O cause (e.g. invalid parameters)
    pub(crate) fn creation(kind: Kind, reason: impl Into<String>) -> Self {
        Self::Creation {
            kind,
            reason: reason.into(),
            source: None,
        }
    }

    /// Create a creation error from a failed filesystem operation
    pub(crate) fn creation_io(
        kind: Kind,
        reason: impl Into<String>,
        source: std::io::Error,
    ) -> Self {
        Self::Creation {
            kind,
            reason: reason.into(),
            source: Some(source),
        }
    }

    /// Check whether this error was raised while creating a resource
    #[must_use]
    pub fn is_creation(&self) -> bool {
        matches!(self, Self::Creation { .. })
    }

    /// Get the path associated with this error (if any)
    #[must_use]
    pub fn path(&self) -> Option<&std::path::Path> {
        match self {
            Self::Cleanup { path, .. } => Some(path),
            _ => None,
        }
    }
}
