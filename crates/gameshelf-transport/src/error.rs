/// Errors that can occur in the transport layer.
///
/// The three variants are the only failure shapes a transport may produce.
/// Each implementation maps its own failures onto them explicitly.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransportError {
    /// The server answered with a non-2xx status.
    #[error("server responded with status {status}")]
    Status {
        /// HTTP status code of the response.
        status: u16,
        /// Raw response body, possibly empty.
        body: Vec<u8>,
    },

    /// The request was sent but no response arrived (refused, reset,
    /// timed out).
    #[error("no response: {0}")]
    Network(String),

    /// The request could not be built or sent at all.
    #[error("request setup failed: {0}")]
    Setup(String),
}

impl TransportError {
    /// Creates a [`TransportError::Status`] from a status and body.
    pub fn status(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self::Status {
            status,
            body: body.into(),
        }
    }

    /// Returns the HTTP status if a response was received.
    pub fn http_status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Network(_) | Self::Setup(_) => None,
        }
    }
}
