//! Error type shared by loading, resolution and formatting.

use std::path::PathBuf;

/// Errors surfaced by collection loading, icon resolution and output formatting.
///
/// Every failure is returned as a value; nothing in this crate panics on bad
/// input. [`IconError::status`] gives the HTTP status a front end would map
/// the error to.
#[derive(Debug, thiserror::Error)]
pub enum IconError {
    /// The collection document is malformed or its keys violate the prefix rules.
    #[error("collection not loaded: {0}")]
    NotLoaded(String),

    /// The requested icon or alias does not resolve.
    #[error("icon not found: {0}")]
    NotFound(String),

    /// A JS callback name does not match `^[a-z0-9_.]+$`.
    #[error("invalid callback name: {0:?}")]
    InvalidCallback(String),

    /// No collection is registered under this prefix.
    #[error("unknown collection: {0}")]
    UnknownCollection(String),

    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl IconError {
    /// Returns the HTTP status code a request handler should answer with.
    pub fn status(&self) -> u16 {
        match self {
            Self::NotLoaded(_) | Self::NotFound(_) | Self::UnknownCollection(_) => 404,
            Self::InvalidCallback(_) => 400,
            Self::Io { .. } | Self::Json(_) => 500,
        }
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T, E = IconError> = std::result::Result<T, E>;
