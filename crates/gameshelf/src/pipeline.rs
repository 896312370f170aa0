//! The request pipeline stages.
//!
//! Every request the client sends passes through the same ordered stages:
//!
//! ```text
//!  Request ──→ attach_credentials ──→ Transport::send ──→ Response
//!                                          │
//!                                          ▼ (any failure)
//!                                     normalize ──→ SessionPolicy::apply ──→ ApiError
//! ```
//!
//! `attach_credentials` and `normalize` are pure functions of their inputs
//! (plus a read of the store), so each can be tested without a network.
//! [`SessionPolicy`] is the one stage with side effects.
//! [`ApiClient::dispatch`](crate::ApiClient::dispatch) composes them.

use std::time::Duration;

use gameshelf_protocol::ErrorBody;
use gameshelf_session::{CredentialStore, SessionEvent, SessionSignals};
use gameshelf_transport::{AUTHORIZATION, Request, TransportError};

use crate::error::{
    ApiError, Failure, GENERIC_FAILURE_MESSAGE, MALFORMED_RESPONSE_MESSAGE,
    NETWORK_FAILURE_MESSAGE,
};

/// The status that means "your credential was rejected".
pub const UNAUTHORIZED: u16 = 401;

// ---------------------------------------------------------------------------
// Credential attachment
// ---------------------------------------------------------------------------

/// Sets `Authorization: Basic <token>` from the store's current token.
///
/// With no token the request goes out unauthenticated, and any
/// `Authorization` header already on it is stripped: the store is the only
/// source of credentials.
pub fn attach_credentials(request: Request, store: &CredentialStore) -> Request {
    match store.get() {
        Some(token) => {
            request.with_header(AUTHORIZATION, token.authorization_value())
        }
        None => request.without_header(AUTHORIZATION),
    }
}

// ---------------------------------------------------------------------------
// Error normalization
// ---------------------------------------------------------------------------

/// Converts any request-path failure into the one [`ApiError`] shape.
///
/// In priority order:
/// 1. A server response: status from the response; message, code and
///    field errors from the body, with `"Error: <status>"` when the body
///    has no usable message.
/// 2. No response: the fixed connectivity message, no status or code.
/// 3. Never sent: the fixed generic message.
///
/// A 2xx with an unreadable body keeps its status and gets the
/// malformed-response message. Already-normalized errors pass through
/// unchanged, so normalizing twice is the same as normalizing once.
pub fn normalize(failure: Failure) -> ApiError {
    match failure {
        Failure::Transport(TransportError::Status { status, body }) => {
            let body = ErrorBody::from_slice(&body);
            ApiError {
                message: body
                    .message
                    .unwrap_or_else(|| format!("Error: {status}")),
                code: body.code,
                status: Some(status),
                field_errors: body.errors,
            }
        }
        Failure::Transport(TransportError::Network(_)) => {
            ApiError::new(NETWORK_FAILURE_MESSAGE)
        }
        Failure::Transport(TransportError::Setup(_)) | Failure::Encode(_) => {
            ApiError::new(GENERIC_FAILURE_MESSAGE)
        }
        Failure::Decode { status, .. } => {
            ApiError::new(MALFORMED_RESPONSE_MESSAGE).with_status(status)
        }
        Failure::Normalized(error) => error,
    }
}

// ---------------------------------------------------------------------------
// Session invalidation
// ---------------------------------------------------------------------------

/// Tears the session down when the server rejects the credential.
///
/// On a 401 the store is cleared before `apply` returns, and one
/// [`SessionEvent::Expired`] is published after `redirect_delay`.
/// Any other status is left alone.
#[derive(Debug, Clone)]
pub struct SessionPolicy {
    store: CredentialStore,
    signals: SessionSignals,
    login_path: String,
    redirect_delay: Duration,
}

impl SessionPolicy {
    /// Creates a policy acting on `store` and publishing on `signals`.
    pub fn new(
        store: CredentialStore,
        signals: SessionSignals,
        login_path: impl Into<String>,
        redirect_delay: Duration,
    ) -> Self {
        Self {
            store,
            signals,
            login_path: login_path.into(),
            redirect_delay,
        }
    }

    /// Applies the policy to a normalized error.
    ///
    /// Returns `true` if the session was invalidated.
    pub fn apply(&self, error: &ApiError) -> bool {
        if error.status != Some(UNAUTHORIZED) {
            return false;
        }

        self.store.clear();
        tracing::info!(
            redirect_to = %self.login_path,
            "credentials rejected by server, session invalidated"
        );
        self.signals.emit_after(
            SessionEvent::Expired {
                redirect_to: self.login_path.clone(),
            },
            self.redirect_delay,
        );
        true
    }
}

// =========================================================================
// Tests
// =========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    use gameshelf_protocol::ProtocolError;
    use gameshelf_session::CredentialToken;
    use gameshelf_transport::Method;
    use tokio::sync::broadcast::error::TryRecvError;

    fn status(code: u16, body: &str) -> Failure {
        Failure::Transport(TransportError::status(code, body))
    }

    fn decode_error() -> ProtocolError {
        ProtocolError::Decode(
            serde_json::from_slice::<serde_json::Value>(b"{").unwrap_err(),
        )
    }

    fn policy_with_token() -> (SessionPolicy, CredentialStore, SessionSignals) {
        let store = CredentialStore::new();
        store.set(CredentialToken::from_credentials("alice", "secret"));
        let signals = SessionSignals::new();
        let policy = SessionPolicy::new(
            store.clone(),
            signals.clone(),
            "/login",
            Duration::from_millis(100),
        );
        (policy, store, signals)
    }

    // =====================================================================
    // attach_credentials()
    // =====================================================================

    #[test]
    fn test_attach_with_token_sets_basic_header() {
        let store = CredentialStore::new();
        store.set(CredentialToken::from_credentials("alice", "secret"));

        let req = attach_credentials(Request::new(Method::Get, "/games"), &store);

        assert_eq!(req.header(AUTHORIZATION), Some("Basic YWxpY2U6c2VjcmV0"));
    }

    #[test]
    fn test_attach_without_token_leaves_no_header() {
        let store = CredentialStore::new();

        let req = attach_credentials(Request::new(Method::Get, "/games"), &store);

        assert!(req.header(AUTHORIZATION).is_none());
    }

    #[test]
    fn test_attach_without_token_strips_foreign_header() {
        let store = CredentialStore::new();
        let req = Request::new(Method::Get, "/games")
            .with_header("authorization", "Bearer smuggled");

        let req = attach_credentials(req, &store);

        assert!(req.header(AUTHORIZATION).is_none());
    }

    #[test]
    fn test_attach_reads_store_at_call_time() {
        let store = CredentialStore::new();
        let before = attach_credentials(Request::new(Method::Get, "/a"), &store);
        store.set(CredentialToken::from_credentials("bob", "pw"));
        let after = attach_credentials(Request::new(Method::Get, "/b"), &store);

        assert!(before.header(AUTHORIZATION).is_none());
        assert!(after.header(AUTHORIZATION).is_some());
    }

    // =====================================================================
    // normalize()
    // =====================================================================

    #[test]
    fn test_normalize_404_with_message_uses_body_message() {
        let err = normalize(status(404, r#"{"message":"Game not found"}"#));

        assert_eq!(err.message, "Game not found");
        assert_eq!(err.status, Some(404));
        assert!(err.code.is_none());
        assert!(err.field_errors.is_none());
    }

    #[test]
    fn test_normalize_status_without_body_synthesizes_message() {
        let err = normalize(status(500, ""));

        assert_eq!(err.message, "Error: 500");
        assert_eq!(err.status, Some(500));
    }

    #[test]
    fn test_normalize_malformed_server_body_synthesizes_message() {
        let err = normalize(status(502, "<html>Bad Gateway</html>"));

        assert_eq!(err.message, "Error: 502");
        assert_eq!(err.status, Some(502));
        assert!(err.code.is_none());
    }

    #[test]
    fn test_normalize_validation_body_carries_code_and_field_errors() {
        let err = normalize(status(
            422,
            r#"{"message":"Validation failed","code":"VALIDATION","errors":{"name":["must not be blank"]}}"#,
        ));

        assert_eq!(err.message, "Validation failed");
        assert_eq!(err.code.as_deref(), Some("VALIDATION"));
        assert_eq!(
            err.field_errors_for("name"),
            Some(&["must not be blank".to_string()][..])
        );
    }

    #[test]
    fn test_normalize_network_failure_uses_connectivity_message() {
        let err = normalize(TransportError::Network("refused".into()).into());

        assert_eq!(err.message, NETWORK_FAILURE_MESSAGE);
        assert!(err.status.is_none());
        assert!(err.code.is_none());
    }

    #[test]
    fn test_normalize_setup_failure_uses_generic_message() {
        let err = normalize(TransportError::Setup("bad url".into()).into());

        assert_eq!(err.message, GENERIC_FAILURE_MESSAGE);
        assert!(err.status.is_none());
    }

    #[test]
    fn test_normalize_undecodable_success_keeps_status() {
        let err = normalize(Failure::Decode {
            status: 200,
            error: decode_error(),
        });

        assert_eq!(err.message, MALFORMED_RESPONSE_MESSAGE);
        assert_eq!(err.status, Some(200));
    }

    #[test]
    fn test_normalize_every_failure_has_non_empty_message() {
        let failures = vec![
            status(400, r#"{"message":""}"#),
            status(401, "null"),
            status(503, "not json"),
            TransportError::Network(String::new()).into(),
            TransportError::Setup(String::new()).into(),
            Failure::Encode(decode_error()),
            Failure::Decode {
                status: 204,
                error: decode_error(),
            },
        ];

        for failure in failures {
            let err = normalize(failure);
            assert!(!err.message.trim().is_empty(), "empty message: {err:?}");
        }
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let once = normalize(status(
            409,
            r#"{"message":"Duplicate","code":"DUP","errors":{"name":"taken"}}"#,
        ));
        let twice = normalize(once.clone().into());

        assert_eq!(once, twice);
    }

    // =====================================================================
    // SessionPolicy::apply()
    // =====================================================================

    #[tokio::test(start_paused = true)]
    async fn test_apply_401_clears_store_and_schedules_one_event() {
        let (policy, store, signals) = policy_with_token();
        let mut rx = signals.subscribe();

        let invalidated = policy.apply(&normalize(status(401, "")));

        assert!(invalidated);
        assert!(store.get().is_none(), "store must be empty immediately");

        tokio::time::sleep(Duration::from_millis(150)).await;
        assert_eq!(
            rx.try_recv().unwrap(),
            SessionEvent::Expired {
                redirect_to: "/login".into()
            }
        );
        assert!(matches!(rx.try_recv(), Err(TryRecvError::Empty)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_apply_other_status_leaves_session_alone() {
        let (policy, store, signals) = policy_with_token();
        let mut rx = signals.subscribe();

        for code in [400, 403, 404, 500] {
            assert!(!policy.apply(&normalize(status(code, ""))));
        }
        assert!(!policy.apply(&normalize(TransportError::Network("x".into()).into())));

        assert!(store.is_authenticated());
        tokio::time::sleep(Duration::from_millis(150)).await;
        assert!(matches!(rx.try_recv(), Err(TryRecvError::Empty)));
    }
}
