//! Body encoding.
//!
//! The client never touches `serde_json` directly; it asks a [`Codec`] to
//! turn request DTOs into bytes and response bytes into wire types. The
//! backend only speaks JSON, so [`JsonCodec`] is the one implementation.

use serde::{Serialize, de::DeserializeOwned};

use crate::ProtocolError;

/// Converts request and response bodies to and from bytes.
///
/// Held inside a client that is shared across tasks, hence the
/// `Send + Sync + 'static` bounds.
pub trait Codec: Send + Sync + 'static {
    /// Encodes a request body.
    ///
    /// # Errors
    /// [`ProtocolError::Encode`] if the value can't be represented.
    fn encode<T: Serialize>(&self, value: &T) -> Result<Vec<u8>, ProtocolError>;

    /// Decodes a response body into `T`.
    ///
    /// # Errors
    /// [`ProtocolError::Decode`] if the body is empty, truncated, not
    /// JSON, or JSON of the wrong shape.
    fn decode<T: DeserializeOwned>(&self, body: &[u8]) -> Result<T, ProtocolError>;
}

/// JSON bodies via `serde_json`. Requires the `json` feature (on by default).
///
/// ```rust
/// use gameshelf_protocol::{Codec, JsonCodec, NewGame};
///
/// let bytes = JsonCodec.encode(&NewGame::named("Celeste")).unwrap();
/// let back: NewGame = JsonCodec.decode(&bytes).unwrap();
/// assert_eq!(back.name, "Celeste");
/// ```
#[cfg(feature = "json")]
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec;

#[cfg(feature = "json")]
impl Codec for JsonCodec {
    fn encode<T: Serialize>(&self, value: &T) -> Result<Vec<u8>, ProtocolError> {
        serde_json::to_vec(value).map_err(ProtocolError::Encode)
    }

    fn decode<T: DeserializeOwned>(&self, body: &[u8]) -> Result<T, ProtocolError> {
        serde_json::from_slice(body).map_err(ProtocolError::Decode)
    }
}
