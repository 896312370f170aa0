//! Transport abstraction layer for Gameshelf.
//!
//! Provides the [`Request`] descriptor, the [`Response`] a transport hands
//! back on success, and the [`Transport`] trait that abstracts over how
//! requests actually reach the backend.
//!
//! # Feature Flags
//!
//! - `reqwest` (default) — HTTP transport via `reqwest`

#![allow(async_fn_in_trait)]

mod error;
#[cfg(feature = "reqwest")]
mod http;

pub use error::TransportError;
#[cfg(feature = "reqwest")]
pub use http::{ReqwestTransport, TransportConfig};

use std::fmt;

/// Name of the header carrying credentials.
pub const AUTHORIZATION: &str = "Authorization";

/// HTTP methods used by the backend API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        };
        f.write_str(name)
    }
}

/// A request descriptor: what to call, not where.
///
/// The base address and the fixed JSON headers are the transport's
/// business. Headers set here are added on top of them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    /// HTTP method.
    pub method: Method,
    /// Path relative to the base address, e.g. `/games/42`.
    pub path: String,
    /// Extra headers, in insertion order.
    pub headers: Vec<(String, String)>,
    /// Encoded JSON body, if any.
    pub body: Option<Vec<u8>>,
}

impl Request {
    /// Creates a request with no headers and no body.
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            headers: Vec::new(),
            body: None,
        }
    }

    /// Attaches an encoded JSON body.
    pub fn with_body(mut self, body: Vec<u8>) -> Self {
        self.body = Some(body);
        self
    }

    /// Sets a header, replacing any existing value with the same name
    /// (names compare case-insensitively).
    pub fn with_header(
        mut self,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        let name = name.into();
        self.headers.retain(|(n, _)| !n.eq_ignore_ascii_case(&name));
        self.headers.push((name, value.into()));
        self
    }

    /// Removes every header with the given (case-insensitive) name.
    pub fn without_header(mut self, name: &str) -> Self {
        self.headers.retain(|(n, _)| !n.eq_ignore_ascii_case(name));
        self
    }

    /// Looks up a header value by case-insensitive name.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// A successful (2xx) response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    /// HTTP status code, always in `200..300`.
    pub status: u16,
    /// Raw response body, possibly empty.
    pub body: Vec<u8>,
}

impl Response {
    /// Creates a response from a status and body.
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }
}

/// Performs requests against the backend.
///
/// Implementations return `Ok` only for 2xx responses. Every other outcome
/// must be reported as one of the three [`TransportError`] variants.
pub trait Transport: Send + Sync + 'static {
    /// Sends the request and waits for the response.
    async fn send(&self, request: Request) -> Result<Response, TransportError>;
}
