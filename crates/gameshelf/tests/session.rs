//! Integration tests for login, logout, and session invalidation.

mod common;

use std::time::Duration;

use common::{ScriptedTransport, client, game_json, user_json};
use gameshelf::prelude::*;
use gameshelf::session::TokenStorage;
use gameshelf::transport::{AUTHORIZATION, Method};
use serde_json::json;
use tokio::sync::broadcast::error::TryRecvError;

fn expired() -> SessionEvent {
    SessionEvent::Expired {
        redirect_to: "/login".into(),
    }
}

// =========================================================================
// Login / logout
// =========================================================================

#[tokio::test]
async fn test_login_valid_credentials_keeps_token() {
    let (client, transport) = client();
    transport.reply_json(200, user_json("u-1", "alice"));

    let user = client.auth().login("alice", "secret").await.unwrap();

    assert_eq!(user.username, "alice");
    assert_eq!(
        client.credentials().get().unwrap().as_str(),
        "YWxpY2U6c2VjcmV0"
    );
    assert!(client.auth().is_authenticated());

    let probe = transport.last();
    assert_eq!(probe.method, Method::Get);
    assert_eq!(probe.path, "/users/me");
    assert_eq!(probe.header(AUTHORIZATION), Some("Basic YWxpY2U6c2VjcmV0"));
}

#[tokio::test(start_paused = true)]
async fn test_login_rejected_credentials_rolls_back() {
    let (client, transport) = client();
    transport.reply_json(401, json!({ "message": "Bad credentials" }));

    let err = client.auth().login("alice", "wrong").await.unwrap_err();

    assert_eq!(err.message, "Bad credentials");
    assert!(err.is_unauthorized());
    assert!(client.credentials().get().is_none());
    assert!(!client.auth().is_authenticated());
}

#[tokio::test]
async fn test_login_network_failure_rolls_back() {
    let (client, transport) = client();
    transport.fail_with(gameshelf::transport::TransportError::Network(
        "connection reset".into(),
    ));

    let err = client.auth().login("alice", "secret").await.unwrap_err();

    assert!(err.status.is_none());
    assert!(!client.auth().is_authenticated());
}

#[tokio::test]
async fn test_logout_clears_token() {
    let (client, _transport) = client();
    client
        .credentials()
        .set(CredentialToken::from_credentials("alice", "secret"));

    client.auth().logout();

    assert!(client.credentials().get().is_none());
}

#[tokio::test]
async fn test_logout_when_signed_out_is_noop() {
    let (client, _transport) = client();

    client.auth().logout();
    client.auth().logout();

    assert!(!client.auth().is_authenticated());
}

// =========================================================================
// Session invalidation
// =========================================================================

#[tokio::test(start_paused = true)]
async fn test_unauthorized_response_clears_store_and_emits_once() {
    let (client, transport) = client();
    client
        .credentials()
        .set(CredentialToken::from_credentials("alice", "secret"));
    let mut events = client.subscribe();
    transport.reply_raw(401, "");

    let err = client.games().list().await.unwrap_err();

    assert_eq!(err.status, Some(401));
    assert_eq!(err.message, "Error: 401");
    assert!(
        client.credentials().get().is_none(),
        "store must be empty as soon as the call returns"
    );
    assert!(matches!(events.try_recv(), Err(TryRecvError::Empty)));

    tokio::time::sleep(Duration::from_millis(150)).await;
    assert_eq!(events.try_recv().unwrap(), expired());
    assert!(matches!(events.try_recv(), Err(TryRecvError::Empty)));
}

#[tokio::test(start_paused = true)]
async fn test_next_request_after_401_is_unauthenticated() {
    let (client, transport) = client();
    client
        .credentials()
        .set(CredentialToken::from_credentials("alice", "secret"));
    transport
        .reply_raw(401, "")
        .reply_json(200, json!([game_json("g-1", "Celeste")]));

    let _ = client.games().list().await;
    client.games().list().await.unwrap();

    assert!(transport.last().header(AUTHORIZATION).is_none());
}

#[tokio::test(start_paused = true)]
async fn test_forbidden_response_keeps_session() {
    let (client, transport) = client();
    client
        .credentials()
        .set(CredentialToken::from_credentials("alice", "secret"));
    let mut events = client.subscribe();
    transport.reply_json(403, json!({ "message": "Not your game" }));

    let err = client.games().delete(&GameId::from("g-9")).await.unwrap_err();

    assert_eq!(err.status, Some(403));
    assert!(client.auth().is_authenticated());
    tokio::time::sleep(Duration::from_millis(150)).await;
    assert!(matches!(events.try_recv(), Err(TryRecvError::Empty)));
}

#[tokio::test(start_paused = true)]
async fn test_custom_login_path_and_delay_are_used() {
    let transport = ScriptedTransport::new();
    let client = ApiClient::builder()
        .config(ClientConfig {
            login_path: "/signin".into(),
            redirect_delay: Duration::from_secs(1),
            ..ClientConfig::default()
        })
        .build_with(transport.clone());
    let mut events = client.subscribe();
    transport.reply_raw(401, "");

    let _ = client.users().me().await;

    tokio::time::sleep(Duration::from_millis(500)).await;
    assert!(matches!(events.try_recv(), Err(TryRecvError::Empty)));
    tokio::time::sleep(Duration::from_millis(600)).await;
    assert_eq!(
        events.try_recv().unwrap(),
        SessionEvent::Expired {
            redirect_to: "/signin".into()
        }
    );
}

// =========================================================================
// Persistent credentials
// =========================================================================

#[tokio::test]
async fn test_login_persists_token_and_next_client_restores_it() {
    let dir = tempfile::tempdir().unwrap();

    let store = CredentialStore::with_storage(FileTokenStorage::new(dir.path())).unwrap();
    let transport = ScriptedTransport::new();
    let client = ApiClient::builder()
        .credentials(store)
        .build_with(transport.clone());
    transport.reply_json(200, user_json("u-1", "alice"));
    client.auth().login("alice", "secret").await.unwrap();

    let restored =
        CredentialStore::with_storage(FileTokenStorage::new(dir.path())).unwrap();
    assert_eq!(restored.get().unwrap().username(), "alice");
}

#[tokio::test]
async fn test_logout_removes_persisted_token() {
    let dir = tempfile::tempdir().unwrap();
    let storage = FileTokenStorage::new(dir.path());
    let store = CredentialStore::with_storage(storage.clone()).unwrap();
    let client = ApiClient::builder()
        .credentials(store)
        .build_with(ScriptedTransport::new());
    client
        .credentials()
        .set(CredentialToken::from_credentials("alice", "secret"));

    client.auth().logout();

    assert!(storage.load(gameshelf::session::TOKEN_KEY).unwrap().is_none());
}
