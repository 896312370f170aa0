//! `ApiClient` builder and request dispatch.
//!
//! This is the entry point for talking to the Gameshelf backend. It ties
//! together all the layers: transport → protocol → session → domain
//! operations.

use std::sync::Arc;

use gameshelf_protocol::{Codec, JsonCodec};
use gameshelf_session::{CredentialStore, SessionEvent, SessionSignals};
use gameshelf_transport::{
    Method, ReqwestTransport, Request, Response, Transport, TransportError,
};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tokio::sync::broadcast;

use crate::auth::Auth;
use crate::config::ClientConfig;
use crate::error::{ApiError, Failure};
use crate::games::Games;
use crate::pipeline::{SessionPolicy, attach_credentials, normalize};
use crate::users::Users;

/// State shared by every clone of a client.
///
/// Wrapped in `Arc` so a client can be cheaply cloned into as many tasks
/// as the application likes. Nothing in here is locked across an await.
struct Shared<T: Transport> {
    transport: T,
    store: CredentialStore,
    signals: SessionSignals,
    policy: SessionPolicy,
    codec: JsonCodec,
}

/// Builder for configuring an [`ApiClient`].
///
/// # Example
///
/// ```rust,no_run
/// use gameshelf::prelude::*;
///
/// # async fn run() -> Result<(), ApiError> {
/// let client = ApiClient::builder()
///     .config(ClientConfig::default())
///     .build()?;
/// let user = client.auth().login("alice", "secret").await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Default)]
pub struct ApiClientBuilder {
    config: ClientConfig,
    store: Option<CredentialStore>,
}

impl ApiClientBuilder {
    /// Creates a builder with default settings and a fresh, memory-only
    /// credential store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the client configuration.
    pub fn config(mut self, config: ClientConfig) -> Self {
        self.config = config;
        self
    }

    /// Uses an existing credential store instead of a fresh one.
    ///
    /// Pass a store built with
    /// [`CredentialStore::with_storage`] to keep the session across
    /// restarts, or a clone of another client's store to share it.
    pub fn credentials(mut self, store: CredentialStore) -> Self {
        self.store = Some(store);
        self
    }

    /// Builds a client on top of the HTTP transport.
    ///
    /// # Errors
    /// A transport that can't be set up (for example an unparseable base
    /// URL) is reported like any other pre-send failure: an [`ApiError`]
    /// with the generic message and no status.
    pub fn build(self) -> Result<ApiClient<ReqwestTransport>, ApiError> {
        let transport = ReqwestTransport::new(self.config.transport_config())
            .map_err(|e| {
                tracing::error!(error = %e, "could not set up HTTP transport");
                normalize(e.into())
            })?;
        Ok(self.build_with(transport))
    }

    /// Builds a client on top of any [`Transport`].
    pub fn build_with<T: Transport>(self, transport: T) -> ApiClient<T> {
        let store = self.store.unwrap_or_default();
        let signals = SessionSignals::new();
        let policy = SessionPolicy::new(
            store.clone(),
            signals.clone(),
            self.config.login_path,
            self.config.redirect_delay,
        );

        ApiClient {
            shared: Arc::new(Shared {
                transport,
                store,
                signals,
                policy,
                codec: JsonCodec,
            }),
        }
    }
}

/// A typed client for the Gameshelf backend.
///
/// Domain operations hang off [`games()`](Self::games),
/// [`users()`](Self::users) and [`auth()`](Self::auth). All of them go
/// through [`dispatch()`](Self::dispatch), so every request gets the
/// stored credential attached and every failure comes back as an
/// [`ApiError`].
///
/// Clones share the transport, the credential store and the session
/// event channel.
pub struct ApiClient<T: Transport = ReqwestTransport> {
    shared: Arc<Shared<T>>,
}

impl<T: Transport> Clone for ApiClient<T> {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl<T: Transport> std::fmt::Debug for ApiClient<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("store", &self.shared.store)
            .finish_non_exhaustive()
    }
}

impl ApiClient<ReqwestTransport> {
    /// Creates a new builder.
    pub fn builder() -> ApiClientBuilder {
        ApiClientBuilder::new()
    }
}

impl<T: Transport> ApiClient<T> {
    /// Creates a client with default settings on top of `transport`.
    pub fn with_transport(transport: T) -> Self {
        ApiClientBuilder::new().build_with(transport)
    }

    /// Game library operations.
    pub fn games(&self) -> Games<'_, T> {
        Games::new(self)
    }

    /// User account operations.
    pub fn users(&self) -> Users<'_, T> {
        Users::new(self)
    }

    /// Login, logout and session state.
    pub fn auth(&self) -> Auth<'_, T> {
        Auth::new(self)
    }

    /// The credential store this client attaches from.
    pub fn credentials(&self) -> &CredentialStore {
        &self.shared.store
    }

    /// Subscribes to session events (for example "the session expired,
    /// go to the login page").
    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.shared.signals.subscribe()
    }

    /// Sends one request through the pipeline.
    ///
    /// The stored credential (if any) is attached right before sending.
    /// Any failure, including a non-2xx response handed back as `Ok`, is
    /// normalized, the session policy runs on it, and the resulting
    /// [`ApiError`] is returned.
    pub async fn dispatch(&self, request: Request) -> Result<Response, ApiError> {
        let request = attach_credentials(request, &self.shared.store);
        let method = request.method;
        let path = request.path.clone();

        tracing::debug!(%method, %path, "sending request");
        match self.shared.transport.send(request).await {
            Ok(response) if !(200..300).contains(&response.status) => {
                // Transports are meant to report these as errors; treat
                // one that doesn't the same way.
                let error = TransportError::status(response.status, response.body);
                Err(self.fail(method, &path, error.into()))
            }
            Ok(response) => {
                tracing::debug!(%method, %path, status = response.status, "request completed");
                Ok(response)
            }
            Err(e) => Err(self.fail(method, &path, e.into())),
        }
    }

    // -----------------------------------------------------------------
    // Helpers for the domain modules
    // -----------------------------------------------------------------

    /// Builds a request carrying `body` encoded as JSON.
    pub(crate) fn request_with<B: Serialize>(
        &self,
        method: Method,
        path: String,
        body: &B,
    ) -> Result<Request, ApiError> {
        match self.shared.codec.encode(body) {
            Ok(bytes) => Ok(Request::new(method, path).with_body(bytes)),
            Err(e) => Err(self.fail(method, &path, Failure::Encode(e))),
        }
    }

    /// Dispatches and decodes the response body.
    pub(crate) async fn fetch<R: DeserializeOwned>(
        &self,
        request: Request,
    ) -> Result<R, ApiError> {
        let method = request.method;
        let path = request.path.clone();
        let response = self.dispatch(request).await?;

        self.shared.codec.decode(&response.body).map_err(|error| {
            let status = response.status;
            self.fail(method, &path, Failure::Decode { status, error })
        })
    }

    /// Dispatches and ignores whatever body comes back.
    pub(crate) async fn execute(&self, request: Request) -> Result<(), ApiError> {
        self.dispatch(request).await.map(drop)
    }

    /// Normalizes a failure, applies the session policy, and logs it.
    fn fail(&self, method: Method, path: &str, failure: Failure) -> ApiError {
        tracing::debug!(%method, %path, cause = %failure, "request failed");

        let error = normalize(failure);
        self.shared.policy.apply(&error);

        match error.status {
            Some(status) if status >= 500 => tracing::error!(
                %method, %path, status, message = %error.message,
                "server error"
            ),
            _ => tracing::warn!(
                %method, %path, status = ?error.status, code = ?error.code,
                message = %error.message,
                "request failed"
            ),
        }
        error
    }
}
