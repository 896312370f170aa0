//! Error types for the protocol layer.
//!
//! Each crate in Gameshelf defines its own error enum. A `ProtocolError`
//! means the bytes were fine as far as the network was concerned, but
//! turning them into (or out of) typed values failed.

/// Errors that can occur while encoding request bodies or decoding
/// response bodies.
#[derive(Debug, thiserror::Error)]
pub enum ProtocolError {
    /// Serialization failed (turning a Rust value into bytes).
    #[cfg(feature = "json")]
    #[error("encode failed: {0}")]
    Encode(serde_json::Error),

    /// Deserialization failed (turning bytes into a Rust value).
    ///
    /// Common causes: malformed JSON, missing required fields, wrong
    /// data types, or an empty body where content was expected.
    #[cfg(feature = "json")]
    #[error("decode failed: {0}")]
    Decode(serde_json::Error),
}
