//! The credential token: what proves who the user is on every request.
//!
//! The backend uses HTTP Basic auth, so the token is simply
//! `base64(username:password)`. It is computed once at login and then
//! attached verbatim to each outgoing request.

use std::fmt;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

use crate::SessionError;

/// An encoded Basic credential.
///
/// `Debug` never prints the encoded value. Base64 is an encoding, not
/// encryption, so the token is as sensitive as the password itself.
#[derive(Clone, PartialEq, Eq)]
pub struct CredentialToken {
    encoded: String,
    username: String,
}

impl CredentialToken {
    /// Encodes a username/password pair as `base64(username:password)`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use gameshelf_session::CredentialToken;
    ///
    /// let token = CredentialToken::from_credentials("alice", "secret");
    /// assert_eq!(token.as_str(), "YWxpY2U6c2VjcmV0");
    /// assert_eq!(token.username(), "alice");
    /// ```
    pub fn from_credentials(username: &str, password: &str) -> Self {
        Self {
            encoded: STANDARD.encode(format!("{username}:{password}")),
            username: username.to_string(),
        }
    }

    /// Parses an already-encoded token, e.g. one read back from storage.
    ///
    /// # Errors
    /// Returns [`SessionError::InvalidToken`] if the value is not standard
    /// base64 of a UTF-8 `username:password` pair.
    pub fn from_encoded(encoded: &str) -> Result<Self, SessionError> {
        let encoded = encoded.trim();
        let bytes = STANDARD
            .decode(encoded)
            .map_err(|e| SessionError::InvalidToken(e.to_string()))?;
        let decoded = String::from_utf8(bytes).map_err(|_| {
            SessionError::InvalidToken("not valid UTF-8".into())
        })?;
        // The user part can't contain a colon; the password can.
        let (username, _) = decoded.split_once(':').ok_or_else(|| {
            SessionError::InvalidToken("missing ':' separator".into())
        })?;

        Ok(Self {
            encoded: encoded.to_string(),
            username: username.to_string(),
        })
    }

    /// The encoded token, exactly as it goes on the wire.
    pub fn as_str(&self) -> &str {
        &self.encoded
    }

    /// The user the token belongs to.
    pub fn username(&self) -> &str {
        &self.username
    }

    /// The full `Authorization` header value: `Basic <token>`.
    pub fn authorization_value(&self) -> String {
        format!("Basic {}", self.encoded)
    }
}

impl fmt::Debug for CredentialToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialToken")
            .field("username", &self.username)
            .finish_non_exhaustive()
    }
}
