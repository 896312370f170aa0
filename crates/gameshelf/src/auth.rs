//! Signing in and out.
//!
//! The backend has no login endpoint: a credential is "valid" if
//! `GET /users/me` accepts it. So login stores the credential first,
//! probes with it, and takes it back out if the probe fails.

use gameshelf_protocol::User;
use gameshelf_session::CredentialToken;
use gameshelf_transport::Transport;

use crate::{ApiClient, ApiError};

/// Session operations. Obtained from [`ApiClient::auth`].
#[derive(Debug)]
pub struct Auth<'a, T: Transport> {
    client: &'a ApiClient<T>,
}

impl<'a, T: Transport> Auth<'a, T> {
    pub(crate) fn new(client: &'a ApiClient<T>) -> Self {
        Self { client }
    }

    /// Stores a credential for `username`/`password` and checks it
    /// against the backend.
    ///
    /// On success the credential stays stored and the account is
    /// returned. On any failure the store is cleared again and the
    /// error is returned as-is.
    pub async fn login(
        &self,
        username: &str,
        password: &str,
    ) -> Result<User, ApiError> {
        let store = self.client.credentials();
        store.set(CredentialToken::from_credentials(username, password));

        match self.client.users().me().await {
            Ok(user) => {
                tracing::info!(username = %user.username, "signed in");
                Ok(user)
            }
            Err(e) => {
                store.clear();
                tracing::info!(%username, status = ?e.status, "sign-in rejected");
                Err(e)
            }
        }
    }

    /// Forgets the stored credential. Always succeeds.
    pub fn logout(&self) {
        self.client.credentials().clear();
        tracing::info!("signed out");
    }

    /// Returns `true` if a credential is currently stored.
    pub fn is_authenticated(&self) -> bool {
        self.client.credentials().is_authenticated()
    }
}
