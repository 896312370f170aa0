//! Shared fixtures for the client integration tests.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use gameshelf::prelude::*;
use gameshelf::transport::{Request, Response, TransportError};
use serde_json::{Value, json};

/// An in-memory [`Transport`] that records every request and answers from
/// a script.
///
/// Clones share the script and the log, so a test can keep one handle and
/// give the other to the client.
#[derive(Clone, Default)]
pub struct ScriptedTransport {
    state: Arc<Mutex<Script>>,
}

#[derive(Default)]
struct Script {
    replies: VecDeque<Result<Response, TransportError>>,
    sent: Vec<Request>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a reply with a JSON body. Non-2xx statuses are queued as
    /// `TransportError::Status`, the way a real transport reports them.
    pub fn reply_json(&self, status: u16, body: Value) -> &Self {
        self.reply_raw(status, body.to_string())
    }

    /// Queues a reply with a raw body.
    pub fn reply_raw(&self, status: u16, body: impl Into<Vec<u8>>) -> &Self {
        let reply = if (200..300).contains(&status) {
            Ok(Response::new(status, body))
        } else {
            Err(TransportError::status(status, body))
        };
        self.push(reply)
    }

    /// Queues a transport-level failure.
    pub fn fail_with(&self, error: TransportError) -> &Self {
        self.push(Err(error))
    }

    /// Every request the transport has seen, in order.
    pub fn sent(&self) -> Vec<Request> {
        self.state.lock().unwrap().sent.clone()
    }

    /// The most recent request.
    pub fn last(&self) -> Request {
        self.sent().pop().expect("no request was sent")
    }

    fn push(&self, reply: Result<Response, TransportError>) -> &Self {
        self.state.lock().unwrap().replies.push_back(reply);
        self
    }
}

impl Transport for ScriptedTransport {
    async fn send(&self, request: Request) -> Result<Response, TransportError> {
        let mut state = self.state.lock().unwrap();
        state.sent.push(request);
        state.replies.pop_front().unwrap_or_else(|| {
            Err(TransportError::Network("no scripted reply".into()))
        })
    }
}

/// A client on a fresh scripted transport, plus the handle to script it.
pub fn client() -> (ApiClient<ScriptedTransport>, ScriptedTransport) {
    let transport = ScriptedTransport::new();
    (ApiClient::with_transport(transport.clone()), transport)
}

pub fn game_json(id: &str, name: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "userId": "u-1",
        "favorite": false,
        "status": "NOT_STARTED",
        "source": "MANUAL",
        "createdAt": "2024-03-01T12:00:00Z",
        "updatedAt": "2024-03-01T12:00:00Z"
    })
}

pub fn user_json(id: &str, username: &str) -> Value {
    json!({
        "id": id,
        "username": username,
        "email": format!("{username}@example.com"),
        "roles": ["USER"]
    })
}

/// Decodes a recorded request body as JSON.
pub fn body_json(request: &Request) -> Value {
    serde_json::from_slice(request.body.as_deref().expect("request had no body"))
        .expect("request body was not JSON")
}
