//! The credential store: a single slot holding the current token.
//!
//! There is at most one signed-in user per store. Login writes the slot,
//! logout and session invalidation clear it, and the request pipeline reads
//! it right before each dispatch.
//!
//! # Concurrency note
//!
//! Clones share the same slot (it sits behind an `Arc<Mutex<_>>`). The
//! lock is held for a read, or for a swap plus its write-through to
//! storage, never across an `.await`. Last write wins, every reader sees
//! either the old token or the new one, and storage ends up holding
//! whatever the slot holds.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::storage::{TOKEN_KEY, TokenStorage};
use crate::{CredentialToken, SessionError};

/// Holds the current credential, optionally mirrored to durable storage.
///
/// There is no expiry timer: a token stays until it is cleared, either
/// explicitly or because the server rejected it.
#[derive(Clone, Default)]
pub struct CredentialStore {
    slot: Arc<Mutex<Option<CredentialToken>>>,
    storage: Option<Arc<dyn TokenStorage>>,
}

impl CredentialStore {
    /// Creates an empty, memory-only store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store backed by `storage`, restoring any token it holds.
    ///
    /// A stored value that isn't a valid token is discarded (and removed
    /// from storage) rather than attached to requests.
    /// A failure to remove it is logged.
    ///
    /// # Errors
    /// Returns [`SessionError::Storage`] if the storage can't be read.
    pub fn with_storage(
        storage: impl TokenStorage,
    ) -> Result<Self, SessionError> {
        let storage: Arc<dyn TokenStorage> = Arc::new(storage);

        let restored = match storage.load(TOKEN_KEY)? {
            Some(raw) => match CredentialToken::from_encoded(&raw) {
                Ok(token) => {
                    tracing::info!(username = token.username(), "restored stored credentials");
                    Some(token)
                }
                Err(e) => {
                    tracing::warn!(error = %e, "discarding unreadable stored credentials");
                    if let Err(e) = storage.remove(TOKEN_KEY) {
                        tracing::warn!(error = %e, "failed to remove unreadable stored credentials");
                    }
                    None
                }
            },
            None => None,
        };

        Ok(Self {
            slot: Arc::new(Mutex::new(restored)),
            storage: Some(storage),
        })
    }

    /// Replaces the current token.
    pub fn set(&self, token: CredentialToken) {
        let mut slot = self.lock();
        self.persist(Some(&token));
        *slot = Some(token);
    }

    /// Returns a copy of the current token, if any.
    pub fn get(&self) -> Option<CredentialToken> {
        self.lock().clone()
    }

    /// Empties the slot. Clearing an empty store is a no-op.
    pub fn clear(&self) {
        let mut slot = self.lock();
        let previous = slot.take();
        // Storage is cleared even when the slot was already empty so a
        // stale persisted value can't outlive a logout.
        self.persist(None);
        drop(slot);
        if let Some(token) = previous {
            tracing::debug!(username = token.username(), "credentials cleared");
        }
    }

    /// Returns `true` if a token is currently held.
    pub fn is_authenticated(&self) -> bool {
        self.lock().is_some()
    }

    /// The slot is plain data, so a panic elsewhere can't leave it
    /// half-written; recover from poisoning instead of propagating it.
    fn lock(&self) -> MutexGuard<'_, Option<CredentialToken>> {
        self.slot.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Mirrors the slot to storage. Callers hold the slot lock so memory
    /// and storage change together. Failures are logged, not returned: the
    /// in-memory slot is authoritative for this process.
    fn persist(&self, token: Option<&CredentialToken>) {
        let Some(storage) = &self.storage else {
            return;
        };
        let result = match token {
            Some(token) => storage.save(TOKEN_KEY, token.as_str()),
            None => storage.remove(TOKEN_KEY),
        };
        if let Err(e) = result {
            tracing::warn!(error = %e, "failed to persist credentials");
        }
    }
}

impl std::fmt::Debug for CredentialStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialStore")
            .field("authenticated", &self.is_authenticated())
            .field("persistent", &self.storage.is_some())
            .finish()
    }
}

// =========================================================================
// Tests
// =========================================================================
