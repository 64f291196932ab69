//! Error types for the session layer.

use std::path::PathBuf;

/// Errors that can occur while loading or persisting a session.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// Reading or writing the storage file failed.
    #[error("storage io error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The storage file exists but isn't a JSON object of strings.
    #[error("storage file {path} is corrupt: {source}")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// A role string that is neither `cricketer` nor `admin`.
    #[error("unknown role: {0}")]
    UnknownRole(String),
}
