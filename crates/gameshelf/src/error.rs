//! The normalized error every caller sees, and the raw failures it is
//! built from.

use gameshelf_protocol::{FieldErrors, ProtocolError};
use gameshelf_transport::TransportError;
use serde::{Deserialize, Serialize};

/// Message used when a request went out but nothing came back.
pub const NETWORK_FAILURE_MESSAGE: &str =
    "No response from server. Please check your connection.";

/// Message used when a request could not even be sent.
pub const GENERIC_FAILURE_MESSAGE: &str = "An unexpected error occurred";

/// Message used when a successful response carried an unreadable body.
pub const MALFORMED_RESPONSE_MESSAGE: &str =
    "Received a malformed response from the server.";

/// The single failure shape surfaced by every client operation.
///
/// Whatever went wrong (a refused connection, a timeout, a 422 with
/// validation messages, a body that didn't parse) reaches application
/// code as one of these. Branch on the fields, never on where the
/// failure came from.
///
/// Serializes with the backend's camelCase naming (`fieldErrors`) so it
/// can be handed to a UI layer as-is.
#[derive(
    Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error,
)]
#[serde(rename_all = "camelCase")]
#[error("{message}")]
pub struct ApiError {
    /// Human-readable description. Always present and non-empty.
    pub message: String,

    /// Server-defined error code, if the server sent one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,

    /// HTTP status, if a response was received.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,

    /// Per-field validation messages, if the server sent any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field_errors: Option<FieldErrors>,
}

impl ApiError {
    /// Creates an error carrying only a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            code: None,
            status: None,
            field_errors: None,
        }
    }

    /// Sets the HTTP status.
    pub fn with_status(mut self, status: u16) -> Self {
        self.status = Some(status);
        self
    }

    /// Returns `true` if the server rejected the credential (401).
    pub fn is_unauthorized(&self) -> bool {
        self.status == Some(401)
    }

    /// Returns `true` if the resource doesn't exist (404).
    pub fn is_not_found(&self) -> bool {
        self.status == Some(404)
    }

    /// Returns the validation messages for one field, if any.
    pub fn field_errors_for(&self, field: &str) -> Option<&[String]> {
        self.field_errors
            .as_ref()
            .and_then(|errors| errors.get(field))
            .map(Vec::as_slice)
    }
}

/// Anything that can go wrong on the request path, before normalization.
///
/// The `From` impls let the pipeline use `?`-style conversions; the only
/// way out of the client is through [`normalize`](crate::pipeline::normalize),
/// which turns every variant into an [`ApiError`].
#[derive(Debug, thiserror::Error)]
pub enum Failure {
    /// The transport failed (server error, network error, setup error).
    #[error(transparent)]
    Transport(TransportError),

    /// A request body could not be encoded, so nothing was sent.
    #[error("request body: {0}")]
    Encode(ProtocolError),

    /// A 2xx response body could not be decoded.
    #[error("response body ({status}): {error}")]
    Decode {
        /// Status of the response whose body was unreadable.
        status: u16,
        /// What the codec reported.
        error: ProtocolError,
    },

    /// Already normalized; passes through unchanged.
    #[error(transparent)]
    Normalized(ApiError),
}

impl From<TransportError> for Failure {
    fn from(error: TransportError) -> Self {
        Self::Transport(error)
    }
}

impl From<ApiError> for Failure {
    fn from(error: ApiError) -> Self {
        Self::Normalized(error)
    }
}
