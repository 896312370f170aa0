//! Where the credential lives between runs.
//!
//! The store itself keeps the token in memory. A [`TokenStorage`]
//! optionally mirrors it somewhere durable under a fixed key, the way a
//! browser keeps it in local storage. Implement the trait to persist
//! somewhere else (a keyring, a database row); [`FileTokenStorage`] covers
//! the common "one file in a config directory" case.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::SessionError;

/// The key the credential token is stored under.
pub const TOKEN_KEY: &str = "authToken";

/// Key/value persistence for string values.
///
/// Methods are synchronous: values are tiny and writes are rare (login,
/// logout, invalidation).
pub trait TokenStorage: Send + Sync + 'static {
    /// Reads the value stored under `key`, or `None` if there isn't one.
    fn load(&self, key: &str) -> Result<Option<String>, SessionError>;

    /// Stores `value` under `key`, replacing anything already there.
    fn save(&self, key: &str, value: &str) -> Result<(), SessionError>;

    /// Deletes the value under `key`. Deleting a missing key is not an error.
    fn remove(&self, key: &str) -> Result<(), SessionError>;
}

/// A [`TokenStorage`] that keeps one file per key inside a directory.
///
/// The directory is created on first write.
#[derive(Debug, Clone)]
pub struct FileTokenStorage {
    dir: PathBuf,
}

impl FileTokenStorage {
    /// Creates storage rooted at `dir`.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Returns the directory values are stored in.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(key)
    }
}

impl TokenStorage for FileTokenStorage {
    fn load(&self, key: &str) -> Result<Option<String>, SessionError> {
        let path = self.path_for(key);
        match std::fs::read_to_string(&path) {
            Ok(value) if value.trim().is_empty() => Ok(None),
            Ok(value) => Ok(Some(value.trim().to_string())),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(source) => Err(SessionError::Storage { path, source }),
        }
    }

    fn save(&self, key: &str, value: &str) -> Result<(), SessionError> {
        std::fs::create_dir_all(&self.dir).map_err(|source| {
            SessionError::Storage {
                path: self.dir.clone(),
                source,
            }
        })?;
        let path = self.path_for(key);
        std::fs::write(&path, value)
            .map_err(|source| SessionError::Storage { path, source })
    }

    fn remove(&self, key: &str) -> Result<(), SessionError> {
        let path = self.path_for(key);
        match std::fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(source) => Err(SessionError::Storage { path, source }),
        }
    }
}
