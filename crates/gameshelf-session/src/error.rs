//! Error types for the session layer.

use std::path::PathBuf;

/// Errors that can occur while handling credentials.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// Reading or writing persisted credentials failed.
    #[error("token storage failed at {path}: {source}")]
    Storage {
        /// File the storage was working on.
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A stored value is not a Basic credential: either not base64 or
    /// missing the `username:password` separator.
    #[error("invalid credential token: {0}")]
    InvalidToken(String),
}
